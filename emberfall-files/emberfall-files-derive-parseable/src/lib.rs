extern crate proc_macro2;

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::{Span, TokenStream};
use quote::{quote, quote_spanned};
use syn::{Data, DeriveInput, Fields, Ident, parse_macro_input, spanned::Spanned};

/// Derives `Parseable` and `EncodedSize` for a fixed-layout record. Fields are read in declaration order,
/// every field type has to implement both traits itself (primitives and `[T; N]` arrays do).
#[proc_macro_derive(Parse)]
pub fn derive_parseable(item: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    derive_parse_internal(input).into()
}

fn files_crate() -> TokenStream {
    let found_crate = crate_name("emberfall-files").expect("emberfall-files is present in `Cargo.toml`");

    match found_crate {
        FoundCrate::Itself => quote!(crate),
        FoundCrate::Name(name) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(#ident)
        }
    }
}

// put it into a separate function for testability
pub(crate) fn derive_parse_internal(input: DeriveInput) -> TokenStream {
    let crate_name = files_crate();
    let ident = input.ident;

    let fields = match input.data {
        Data::Struct(s) => match s.fields {
            Fields::Named(fields) => fields.named,
            _ => panic!(
                "`#[derive(Parse)]` only supports named struct fields at the moment: {}",
                ident
            ),
        },
        _ => panic!("`#[derive(Parse)]` is only available on structs: {}", ident),
    };

    // The qualified path form keeps generic field types (e.g. `[u16; 4]`) valid in expression position.
    let parse_fields = fields.iter().map(|f| {
        let name = &f.ident;
        let ftype = &f.ty;
        quote_spanned! {f.span()=>
            #name: <#ftype as #crate_name::common::reader::Parseable<#ftype>>::parse(rdr)?,
        }
    });

    let sizes = fields.iter().map(|f| {
        let ftype = &f.ty;
        quote_spanned! {f.span()=>
            + <#ftype as #crate_name::common::reader::EncodedSize>::ENCODED_SIZE
        }
    });

    quote!(
        impl #crate_name::common::reader::Parseable<#ident> for #ident {
            fn parse<R: ::std::io::Read>(rdr: &mut R) -> ::core::result::Result<#ident, #crate_name::ParserError> {
                Ok(#ident {
                    #(#parse_fields)*
                })
            }
        }

        impl #crate_name::common::reader::EncodedSize for #ident {
            const ENCODED_SIZE: usize = 0 #(#sizes)*;
        }
    )
}
