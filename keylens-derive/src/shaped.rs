//! Implementation of the `#[derive(Shaped)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, LitStr, parse_macro_input, parse_quote};

/// Main implementation of the Shaped derive macro.
pub fn derive_shaped_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    TokenStream::from(expand(input).unwrap_or_else(syn::Error::into_compile_error))
}

fn expand(mut input: DeriveInput) -> syn::Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(named) => named.named.iter().cloned().collect::<Vec<_>>(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Shaped can only be derived for structs with named fields, not tuple structs.",
                ));
            }
            Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Shaped cannot be derived for unit structs (structs with no fields).",
                ));
            }
        },
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Shaped can only be derived for structs, not enums.",
            ));
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Shaped cannot be derived for unions.",
            ));
        }
    };

    let mut entries = Vec::with_capacity(fields.len());
    for field in &fields {
        let options = FieldOptions::parse(field)?;
        if options.skip {
            continue;
        }

        let field_type = &field.ty;
        let name = match options.rename {
            Some(rename) => rename,
            None => match &field.ident {
                Some(ident) => LitStr::new(&unraw(&ident.to_string()), ident.span()),
                None => return Err(syn::Error::new_spanned(field, "field must be named")),
            },
        };

        input
            .generics
            .make_where_clause()
            .predicates
            .push(parse_quote!(#field_type: ::keylens::shape::Shaped));

        entries.push(quote! {
            ::keylens::shape::Field::new(
                #name,
                <#field_type as ::keylens::shape::Shaped>::shape(),
                <#field_type as ::keylens::shape::Shaped>::presence(),
            )
        });
    }

    let name = &input.ident;
    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::keylens::shape::Shaped for #name #type_generics #where_clause {
            fn shape() -> ::keylens::shape::Shape {
                ::keylens::shape::Shape::Record(::keylens::shape::Record::new(::std::vec![
                    #(#entries),*
                ]))
            }
        }
    })
}

/// Options read from a field's `#[shaped(...)]` attributes.
#[derive(Default)]
struct FieldOptions {
    rename: Option<LitStr>,
    skip: bool,
}

impl FieldOptions {
    fn parse(field: &Field) -> syn::Result<Self> {
        let mut options = Self::default();
        for attribute in field.attrs.iter().filter(|attribute| attribute.path().is_ident("shaped")) {
            attribute.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    options.skip = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let rename: LitStr = meta.value()?.parse()?;
                    if rename.value().is_empty() {
                        return Err(syn::Error::new_spanned(rename, "field name cannot be empty"));
                    }
                    options.rename = Some(rename);
                    Ok(())
                } else {
                    Err(meta.error("unsupported shaped attribute; expected `rename` or `skip`"))
                }
            })?;
        }
        Ok(options)
    }
}

/// Strips the `r#` prefix of a raw identifier.
fn unraw(name: &str) -> String {
    name.strip_prefix("r#").unwrap_or(name).to_owned()
}
