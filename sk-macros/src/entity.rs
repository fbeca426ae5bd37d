use crate::derive_utils::apply_derives;
use crate::field_utils::{ensure_leading_field, ensure_trailing_field};
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Item, Result, Token, Type, parse::Parse, parse::ParseStream, parse_macro_input};

/// #[entity] 宏实现
/// - 若缺失则追加字段 `id: IdType` 并置于字段最前
/// - `auditable = true` 时若缺失则在末尾追加 `audit: ::sk_domain::auditable::AuditInfo`
/// - 自动实现 `::sk_domain::entity::Entity`（new/id），按需实现 `Auditable`
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as EntityAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[entity] only on struct")
                .to_compile_error()
                .into();
        }
    };

    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.span(), "only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };

    let id_type = cfg.id_ty.unwrap_or_else(|| syn::parse_quote! { String });
    ensure_leading_field(fields_named, &format_ident!("id"), &id_type);

    let auditable = cfg.auditable.unwrap_or(false);
    if auditable {
        let audit_ty: Type = syn::parse_quote! { ::sk_domain::auditable::AuditInfo };
        ensure_trailing_field(fields_named, &format_ident!("audit"), &audit_ty);
    }

    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Default),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    if cfg.derive_debug.unwrap_or(true) {
        required.insert(0, syn::parse_quote!(Debug));
    }
    apply_derives(&mut st.attrs, required);

    let ident = &st.ident;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    let auditable_impl = auditable.then(|| {
        quote! {
            impl #impl_generics ::sk_domain::auditable::Auditable for #ident #ty_generics #where_clause {
                fn audit(&self) -> &::sk_domain::auditable::AuditInfo { &self.audit }

                fn audit_mut(&mut self) -> &mut ::sk_domain::auditable::AuditInfo { &mut self.audit }
            }
        }
    });

    let expanded = quote! {
        #st

        impl #impl_generics ::sk_domain::entity::Entity for #ident #ty_generics #where_clause {
            type Id = #id_type;

            fn new(id: Self::Id) -> Self {
                Self { id, ..Default::default() }
            }

            fn id(&self) -> &Self::Id { &self.id }
        }

        #auditable_impl
    };

    TokenStream::from(expanded)
}

// -------- parsing --------

struct EntityAttrConfig {
    id_ty: Option<Type>,
    derive_debug: Option<bool>,
    auditable: Option<bool>,
}

impl Parse for EntityAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut cfg = Self {
            id_ty: None,
            derive_debug: None,
            auditable: None,
        };

        if input.is_empty() {
            return Ok(cfg);
        }

        let elems: Punctuated<EntityAttrElem, Token![,]> = Punctuated::parse_terminated(input)?;

        for elem in elems.into_iter() {
            match elem {
                EntityAttrElem::Id(ty) => {
                    if cfg.id_ty.is_some() {
                        return Err(syn::Error::new(ty.span(), "duplicate key 'id' in attribute"));
                    }
                    cfg.id_ty = Some(*ty);
                }
                EntityAttrElem::Debug(b) => {
                    if cfg.derive_debug.is_some() {
                        return Err(syn::Error::new(
                            proc_macro2::Span::call_site(),
                            "duplicate key 'debug' in attribute",
                        ));
                    }
                    cfg.derive_debug = Some(b);
                }
                EntityAttrElem::Auditable(b) => {
                    if cfg.auditable.is_some() {
                        return Err(syn::Error::new(
                            proc_macro2::Span::call_site(),
                            "duplicate key 'auditable' in attribute",
                        ));
                    }
                    cfg.auditable = Some(b);
                }
            }
        }

        Ok(cfg)
    }
}

enum EntityAttrElem {
    Id(Box<Type>),
    Debug(bool),
    Auditable(bool),
}

fn parse_bool(input: ParseStream, key: &str) -> Result<bool> {
    let expr: syn::Expr = input.parse()?;
    match expr {
        syn::Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Bool(b),
            ..
        }) => Ok(b.value()),
        other => Err(syn::Error::new(
            other.span(),
            format!("expected boolean literal for '{key}'"),
        )),
    }
}

impl Parse for EntityAttrElem {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: syn::Ident = input.parse()?;
        let _eq: Token![=] = input.parse()?;
        if key == "id" {
            let ty: Type = input.parse()?;
            Ok(EntityAttrElem::Id(Box::new(ty)))
        } else if key == "debug" {
            parse_bool(input, "debug").map(EntityAttrElem::Debug)
        } else if key == "auditable" {
            parse_bool(input, "auditable").map(EntityAttrElem::Auditable)
        } else {
            Err(syn::Error::new(
                key.span(),
                "unknown key in attribute; expected 'id', 'debug' or 'auditable'",
            ))
        }
    }
}
