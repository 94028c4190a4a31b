//! Derive macro for persistent types.
//!
//! This crate provides `#[derive(Persistent)]`, which generates the static
//! field-descriptor table of a struct and its conversion to and from the
//! runtime value shape used by `oxide-persist-orm`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Expr, ExprLit, ExprUnary, Fields, Ident, Lit, Meta, Type, UnOp,
    parse_macro_input,
};

/// Derives `Persistent` and `PersistValue` for a struct with named fields.
///
/// # Attributes
///
/// - `#[persistent(table = "Users")]` - Specifies the table name (optional,
///   defaults to the struct name)
///
/// # Field Attributes
///
/// - `#[persist(primary_key)]` - Column is part of the primary key
/// - `#[persist(auto_increment)]` - Column is filled by the database
/// - `#[persist(unique)]` - Column is UNIQUE
/// - `#[persist(not_null)]` - Column is NOT NULL
/// - `#[persist(embed)]` - Composite field is flattened into this table
/// - `#[persist(references)]` - Composite field is stored in its own table
/// - `#[persist(name = "col")]` - Column name (optional, defaults to the
///   field name)
/// - `#[persist(max_length = 64)]` - Narrows a `String` to `VARCHAR(64)`;
///   `64` and `128` are accepted
/// - `#[persist(binary = 16)]` - Narrows a `Blob` to a fixed length; `16`
///   and `32` are accepted
/// - `#[persist(default = 0)]` - Column DEFAULT; a boolean, integer, float
///   or string literal
#[proc_macro_derive(Persistent, attributes(persistent, persist))]
pub fn derive_persistent(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_persistent_impl(&input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn derive_persistent_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Persistent derive does not support generic structs",
        ));
    }
    let table_name = get_table_name(&input.attrs, struct_name)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Persistent derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Persistent derive only supports structs",
            ));
        }
    };

    let mut field_infos = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let attrs = parse_persist_attrs(&field.attrs)?;
        field_infos.push(FieldInfo {
            column_name: attrs.name.clone().unwrap_or_else(|| ident.to_string()),
            ident,
            ty: field.ty.clone(),
            attrs,
        });
    }

    let descriptors: Vec<TokenStream2> = field_infos.iter().map(field_descriptor).collect();
    let idents: Vec<&Ident> = field_infos.iter().map(|f| &f.ident).collect();
    let types: Vec<&Type> = field_infos.iter().map(|f| &f.ty).collect();
    let type_name = struct_name.to_string();
    let field_count = field_infos.len();

    let expanded = quote! {
        impl ::oxide_persist_orm::Persistent for #struct_name {
            fn descriptor() -> &'static ::oxide_persist_orm::TypeDescriptor {
                static DESCRIPTOR: ::oxide_persist_orm::TypeDescriptor =
                    ::oxide_persist_orm::TypeDescriptor {
                        name: #type_name,
                        table: #table_name,
                        fields: &[#(#descriptors),*],
                    };
                &DESCRIPTOR
            }
        }

        impl ::oxide_persist_orm::PersistValue for #struct_name {
            const KIND: ::oxide_persist_orm::FieldKind = ::oxide_persist_orm::FieldKind::Composite(
                <Self as ::oxide_persist_orm::Persistent>::descriptor,
            );

            fn to_value(&self) -> ::oxide_persist_orm::Value {
                ::oxide_persist_orm::Value::Record(::std::vec![
                    #(<#types as ::oxide_persist_orm::PersistValue>::to_value(&self.#idents)),*
                ])
            }

            #[allow(unused_mut, unused_variables)]
            fn from_value(
                value: ::oxide_persist_orm::Value,
            ) -> ::oxide_persist_orm::Result<Self> {
                let mut fields = value.into_fields(#type_name, #field_count)?.into_iter();
                ::core::result::Result::Ok(Self {
                    #(
                        #idents: <#types as ::oxide_persist_orm::PersistValue>::from_value(
                            fields.next().unwrap_or(::oxide_persist_orm::Value::Null),
                        )?,
                    )*
                })
            }
        }
    };

    Ok(expanded)
}

struct FieldInfo {
    ident: Ident,
    ty: Type,
    column_name: String,
    attrs: PersistAttrs,
}

#[derive(Default)]
#[allow(clippy::struct_excessive_bools)]
struct PersistAttrs {
    name: Option<String>,
    primary_key: bool,
    auto_increment: bool,
    unique: bool,
    not_null: bool,
    embed: bool,
    references: bool,
    narrowed: Option<Ident>,
    default: Option<TokenStream2>,
}

fn field_descriptor(info: &FieldInfo) -> TokenStream2 {
    let field_name = info.ident.to_string();
    let column_name = &info.column_name;
    let ty = &info.ty;
    let attrs = &info.attrs;
    let narrow = attrs.narrowed.as_ref().map(|semantic| {
        quote! { .narrowed(::oxide_persist_orm::SemanticType::#semantic) }
    });
    let primary_key = attrs.primary_key;
    let auto_increment = attrs.auto_increment;
    let unique = attrs.unique;
    let not_null = attrs.not_null;
    let embed = attrs.embed;
    let references = attrs.references;
    let default = match &attrs.default {
        Some(value) => quote! { Some(#value) },
        None => quote! { None },
    };

    quote! {
        ::oxide_persist_orm::FieldDescriptor {
            name: #field_name,
            column: #column_name,
            kind: <#ty as ::oxide_persist_orm::PersistValue>::KIND #narrow,
            nullable: <#ty as ::oxide_persist_orm::PersistValue>::NULLABLE,
            annotations: ::oxide_persist_orm::Annotations {
                primary_key: #primary_key,
                auto_increment: #auto_increment,
                unique: #unique,
                not_null: #not_null,
                embed: #embed,
                references: #references,
                default: #default,
            },
        }
    }
}

fn get_table_name(attrs: &[Attribute], struct_name: &Ident) -> syn::Result<String> {
    for attr in attrs {
        if attr.path().is_ident("persistent") {
            let mut table_name = None;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("table") {
                    let value: syn::LitStr = meta.value()?.parse()?;
                    table_name = Some(value.value());
                    Ok(())
                } else {
                    Err(meta.error("unsupported persistent attribute"))
                }
            })?;
            if let Some(name) = table_name {
                return Ok(name);
            }
        }
    }
    Ok(struct_name.to_string())
}

fn parse_persist_attrs(attrs: &[Attribute]) -> syn::Result<PersistAttrs> {
    let mut result = PersistAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("persist") || matches!(attr.meta, Meta::Path(_)) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("primary_key") {
                result.primary_key = true;
            } else if meta.path.is_ident("auto_increment") {
                result.auto_increment = true;
            } else if meta.path.is_ident("unique") {
                result.unique = true;
            } else if meta.path.is_ident("not_null") {
                result.not_null = true;
            } else if meta.path.is_ident("embed") {
                result.embed = true;
            } else if meta.path.is_ident("references") {
                result.references = true;
            } else if meta.path.is_ident("name") {
                let value: syn::LitStr = meta.value()?.parse()?;
                result.name = Some(value.value());
            } else if meta.path.is_ident("max_length") {
                let value: syn::LitInt = meta.value()?.parse()?;
                let semantic = match value.base10_parse::<u32>()? {
                    64 => "String64",
                    128 => "String128",
                    _ => return Err(meta.error("max_length must be 64 or 128")),
                };
                result.narrowed = Some(Ident::new(semantic, value.span()));
            } else if meta.path.is_ident("binary") {
                let value: syn::LitInt = meta.value()?.parse()?;
                let semantic = match value.base10_parse::<u32>()? {
                    16 => "Binary16",
                    32 => "Binary32",
                    _ => return Err(meta.error("binary must be 16 or 32")),
                };
                result.narrowed = Some(Ident::new(semantic, value.span()));
            } else if meta.path.is_ident("default") {
                let value: Expr = meta.value()?.parse()?;
                result.default = Some(default_value(&value)?);
            } else {
                return Err(meta.error("unsupported persist attribute"));
            }
            Ok(())
        })?;
    }

    if result.embed && result.references {
        return Err(syn::Error::new(
            proc_macro2::Span::call_site(),
            "a field cannot be both `embed` and `references`",
        ));
    }
    Ok(result)
}

fn default_value(expr: &Expr) -> syn::Result<TokenStream2> {
    let (negative, lit) = match expr {
        Expr::Lit(ExprLit { lit, .. }) => (false, lit),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => match &**expr {
            Expr::Lit(ExprLit { lit, .. }) => (true, lit),
            other => return Err(syn::Error::new_spanned(other, "expected a literal")),
        },
        other => return Err(syn::Error::new_spanned(other, "expected a literal")),
    };
    let sign = if negative { quote!(-) } else { quote!() };
    match lit {
        Lit::Bool(b) if !negative => {
            Ok(quote! { ::oxide_persist_orm::DefaultValue::Bool(#b) })
        }
        Lit::Int(i) => {
            let value = i.base10_parse::<i64>()?;
            Ok(quote! { ::oxide_persist_orm::DefaultValue::Int(#sign #value) })
        }
        Lit::Float(f) => {
            let value = f.base10_parse::<f64>()?;
            Ok(quote! { ::oxide_persist_orm::DefaultValue::Float(#sign #value) })
        }
        Lit::Str(s) if !negative => Ok(quote! { ::oxide_persist_orm::DefaultValue::Text(#s) }),
        other => Err(syn::Error::new_spanned(other, "unsupported default literal")),
    }
}
