//  LOG.rs
//    by Lut99
//
//  Created:
//    22 Mar 2024, 16:09:22
//  Last edited:
//    14 Mar 2025, 10:02:41
//  Auto updated?
//    Yes
//
//  Description:
//!   Provides [`log`]-macro counterparts that only log if the `log`-feature
//!   is given.
//!
//!   The derivation reports quite a lot of diagnostics (unreachable tuples,
//!   underivable alarms, statistics). Users embedding the library without
//!   the feature get none of it, and pay nothing for it either.
//


/***** LIBRARY *****/
/// Mirrors the `info!()`-macro from the [`log`](https://github.com/rust-lang/log)-crate if the
/// `log`-feature is enabled, or does nothing otherwise.
#[cfg(feature = "log")]
macro_rules! info {
    ($($t:tt)*) => {
        ::log::info!($($t)*)
    };
}
#[cfg(not(feature = "log"))]
macro_rules! info {
    ($($t:tt)*) => {};
}
#[allow(unused)]
pub(crate) use info;

/// Mirrors the `warn!()`-macro from the [`log`](https://github.com/rust-lang/log)-crate if the
/// `log`-feature is enabled, or does nothing otherwise.
///
/// Named `warning` internally because `warn` clashes with the builtin lint attribute.
#[cfg(feature = "log")]
macro_rules! warning {
    ($($t:tt)*) => {
        ::log::warn!($($t)*)
    };
}
#[cfg(not(feature = "log"))]
macro_rules! warning {
    ($($t:tt)*) => {};
}
#[allow(unused)]
pub(crate) use warning as warn;

/// Mirrors the `debug!()`-macro from the [`log`](https://github.com/rust-lang/log)-crate if the
/// `log`-feature is enabled, or does nothing otherwise.
#[cfg(feature = "log")]
macro_rules! debug {
    ($($t:tt)*) => {
        ::log::debug!($($t)*)
    };
}
#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($t:tt)*) => {};
}
#[allow(unused)]
pub(crate) use debug;

/// Mirrors the `trace!()`-macro from the [`log`](https://github.com/rust-lang/log)-crate if the
/// `log`-feature is enabled, or does nothing otherwise.
#[cfg(feature = "log")]
macro_rules! trace {
    ($($t:tt)*) => {
        ::log::trace!($($t)*)
    };
}
#[cfg(not(feature = "log"))]
macro_rules! trace {
    ($($t:tt)*) => {};
}
#[allow(unused)]
pub(crate) use trace;
