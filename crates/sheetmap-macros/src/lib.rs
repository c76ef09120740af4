//! `#[derive(RowModel)]`: field-attribute-driven column bindings.
//!
//! ```ignore
//! #[derive(Default, RowModel)]
//! struct Employee {
//!     #[read_column(header = "Name")]
//!     #[write_column(header = "Name", order = 2)]
//!     name: String,
//!
//!     #[read_column(header = "Grade", default = 1)]
//!     #[write_column(header = "Grade", order = 5, width = 64)]
//!     grade: i32,
//! }
//! ```
//!
//! The expansion refers to items re-exported by the `sheetmap` facade
//! crate, which is therefore the only crate the derive can be used
//! through. Fields without either attribute are excluded from both
//! mapping directions and need no `ColumnType` impl.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Expr, Fields, LitInt, LitStr, Meta};

#[proc_macro_derive(RowModel, attributes(read_column, write_column))]
pub fn derive_row_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[derive(Default)]
struct ReadAttr {
    header: Option<LitStr>,
    default: Option<Expr>,
}

#[derive(Default)]
struct WriteAttr {
    header: Option<LitStr>,
    order: Option<LitInt>,
    width: Option<LitInt>,
}

fn parse_read(attr: &syn::Attribute) -> syn::Result<ReadAttr> {
    let mut out = ReadAttr::default();
    // Bare `#[read_column]` carries no keys; the registry rejects the
    // missing header with field-level context.
    if matches!(attr.meta, Meta::Path(_)) {
        return Ok(out);
    }
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("header") {
            out.header = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("default") {
            out.default = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("expected `header` or `default`"))
        }
    })?;
    Ok(out)
}

fn parse_write(attr: &syn::Attribute) -> syn::Result<WriteAttr> {
    let mut out = WriteAttr::default();
    if matches!(attr.meta, Meta::Path(_)) {
        return Ok(out);
    }
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("header") {
            out.header = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("order") {
            out.order = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("width") {
            out.width = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("expected `header`, `order` or `width`"))
        }
    })?;
    Ok(out)
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let ident = &input.ident;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    ident,
                    "RowModel requires a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "RowModel can only be derived for structs",
            ))
        }
    };

    let mut specs = Vec::new();
    for field in fields {
        let name = field
            .ident
            .as_ref()
            .expect("named fields always carry an ident");
        let ty = &field.ty;

        let mut read_attr = None;
        let mut write_attr = None;
        for attr in &field.attrs {
            if attr.path().is_ident("read_column") {
                read_attr = Some(parse_read(attr)?);
            } else if attr.path().is_ident("write_column") {
                write_attr = Some(parse_write(attr)?);
            }
        }
        if read_attr.is_none() && write_attr.is_none() {
            continue;
        }

        let read_tokens = match &read_attr {
            Some(read) => {
                let header = option_tokens(read.header.as_ref().map(|h| quote!(#h)));
                let apply_default = match &read.default {
                    Some(expr) => quote! {
                        ::core::option::Option::Some(|row: &mut Self| {
                            row.#name = (#expr).into();
                        })
                    },
                    None => quote!(::core::option::Option::None),
                };
                quote! {
                    ::core::option::Option::Some(::sheetmap::ReadSpec {
                        header: #header,
                        apply_default: #apply_default,
                    })
                }
            }
            None => quote!(::core::option::Option::None),
        };

        let write_tokens = match &write_attr {
            Some(write) => {
                let header = option_tokens(write.header.as_ref().map(|h| quote!(#h)));
                let order = match &write.order {
                    Some(order) => quote!(#order),
                    None => quote!(0),
                };
                let width = option_tokens(write.width.as_ref().map(|w| quote!(#w)));
                quote! {
                    ::core::option::Option::Some(::sheetmap::WriteSpec {
                        header: #header,
                        order: #order,
                        width: #width,
                    })
                }
            }
            None => quote!(::core::option::Option::None),
        };

        let name_str = name.to_string();
        specs.push(quote! {
            ::sheetmap::FieldSpec {
                name: #name_str,
                kind: <#ty as ::sheetmap::ColumnType>::KIND,
                read: #read_tokens,
                write: #write_tokens,
                get: |row: &Self| ::sheetmap::ColumnType::to_cell(&row.#name),
                set: |row: &mut Self, cell: &::sheetmap::CellValue| {
                    if let ::core::option::Option::Some(value) =
                        <#ty as ::sheetmap::ColumnType>::from_cell(cell)?
                    {
                        row.#name = value;
                    }
                    ::core::result::Result::Ok(())
                },
            }
        });
    }

    let type_name = ident.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::sheetmap::RowModel for #ident #ty_generics #where_clause {
            fn type_name() -> &'static str {
                #type_name
            }

            fn fields() -> ::std::vec::Vec<::sheetmap::FieldSpec<Self>> {
                ::std::vec![#(#specs),*]
            }
        }
    })
}

fn option_tokens(inner: Option<proc_macro2::TokenStream>) -> proc_macro2::TokenStream {
    match inner {
        Some(tokens) => quote!(::core::option::Option::Some(#tokens)),
        None => quote!(::core::option::Option::None),
    }
}
