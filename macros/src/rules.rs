//  RULES.rs
//    by Lut99
//
//  Created:
//    03 Dec 2024, 10:46:29
//  Last edited:
//    14 Mar 2025, 14:18:51
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the [`rules!()`]-macro.
//

use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::ext::IdentExt as _;
use syn::parse::{Parse, ParseStream};
use syn::{Error, Ident, LitStr, Path, Token, bracketed, parenthesized};


/***** CONSTANTS *****/
/// The keyword negating a literal.
const NOT_KEYWORD: &str = "NOT";





/***** HELPERS *****/
/// Attributes given to the macro.
struct RulesAttributes {
    /// The path to the `keep-derivable` crate.
    crate_path: Path,
}
impl Parse for RulesAttributes {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(Token![#]) && input.peek2(Token![!]) {
            input.parse::<Token![#]>()?;
            input.parse::<Token![!]>()?;
            let content;
            bracketed!(content in input);
            let krate: Token![crate] = content.parse()?;
            if !content.is_empty() {
                return Err(content.error("Expected only `crate` in the inner attribute"));
            }
            Ok(Self { crate_path: Path::from(Ident::new("crate", krate.span)) })
        } else {
            Ok(Self { crate_path: syn::parse_quote!(::keep_derivable) })
        }
    }
}



/// A parsed literal.
struct Literal {
    /// Whether it's negated, and if so, where the `NOT` was.
    negated: Option<Span>,
    /// The tuple, as it will appear at runtime.
    tuple:   LitStr,
}
impl Parse for Literal {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        // Parse the `NOT` first, if any
        let first: Ident = Ident::parse_any(input)?;
        let (negated, name): (Option<Span>, Ident) = if first == NOT_KEYWORD && input.peek(Ident::peek_any) {
            (Some(first.span()), Ident::parse_any(input)?)
        } else if first == NOT_KEYWORD {
            return Err(Error::new(first.span(), "Expected a tuple after `NOT`"));
        } else {
            (None, first)
        };

        // Then any arguments
        let mut tuple: String = name.to_string();
        if input.peek(syn::token::Paren) {
            let content;
            parenthesized!(content in input);
            let args: TokenStream2 = content.parse()?;
            tuple.push('(');
            tuple.extend(args.to_string().chars().filter(|c| !c.is_whitespace()));
            tuple.push(')');
        }
        Ok(Self { negated, tuple: LitStr::new(&tuple, name.span()) })
    }
}

/// A parsed named rule.
struct Rule {
    /// The name of the rule.
    name: LitStr,
    /// All literals, the last of which is the consequent.
    lits: Vec<Literal>,
}
impl Parse for Rule {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name: Ident = Ident::parse_any(input)?;
        input.parse::<Token![:]>()?;

        // Parse literals until the dot
        let mut lits: Vec<Literal> = vec![input.parse()?];
        while !input.peek(Token![.]) {
            input.parse::<Token![,]>()?;
            lits.push(input.parse()?);
        }
        input.parse::<Token![.]>()?;
        Ok(Self { name: LitStr::new(&name.to_string(), name.span()), lits })
    }
}





/***** LIBRARY *****/
/// Implements the `rules!()`-macro.
///
/// # Arguments
/// - `input`: The input tokens to parse, as a [`ParseStream`].
///
/// # Returns
/// A [`TokenStream2`] that builds the `RuleSet`.
///
/// # Errors
/// This function errors if the input was not a list of named clauses, or if any of them has a
/// negated consequent.
pub fn rules(input: ParseStream) -> Result<TokenStream2, Error> {
    let attrs: RulesAttributes = input.parse()?;
    let crate_path: &Path = &attrs.crate_path;

    // Serialize every rule as an insertion
    let mut inserts: Vec<TokenStream2> = Vec::new();
    while !input.is_empty() {
        let mut rule: Rule = input.parse()?;
        let cons: Literal = match rule.lits.pop() {
            Some(cons) => cons,
            None => return Err(Error::new(rule.name.span(), "Expected at least a consequent")),
        };
        if let Some(span) = cons.negated {
            return Err(Error::new(span, "The consequent of a rule cannot be negated"));
        }

        let name: &LitStr = &rule.name;
        let cons: &LitStr = &cons.tuple;
        let ants: Vec<TokenStream2> = rule
            .lits
            .iter()
            .map(|lit| {
                let tuple: &LitStr = &lit.tuple;
                if lit.negated.is_some() {
                    quote! { #crate_path::ast::Literal::neg(#tuple) }
                } else {
                    quote! { #crate_path::ast::Literal::pos(#tuple) }
                }
            })
            .collect();
        let n: usize = ants.len();
        inserts.push(quote! {
            let ants: [#crate_path::ast::Literal; #n] = [#(#ants),*];
            set.insert(#name, #crate_path::ast::Clause::new(ants, #cons));
        });
    }

    // Write the remainder
    Ok(quote! {
        {
            let mut set = #crate_path::ast::RuleSet::new();
            #(#inserts)*
            set
        }
    })
}
