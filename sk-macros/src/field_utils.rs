use syn::{Field, FieldsNamed, Ident, Token, Type, punctuated::Punctuated};

fn is_named(field: &Field, name: &str) -> bool {
    field.ident.as_ref().map(|i| i == name).unwrap_or(false)
}

/// 确保字段存在且位于最前：若已存在则复用原定义并移至最前，否则新增
pub(crate) fn ensure_leading_field(fields_named: &mut FieldsNamed, name: &Ident, ty: &Type) {
    let old_named = fields_named.named.clone();
    let mut new_named: Punctuated<Field, Token![,]> = Punctuated::new();

    let key = name.to_string();
    match old_named.iter().find(|f| is_named(f, &key)) {
        Some(existing) => new_named.push(existing.clone()),
        None => new_named.push(syn::parse_quote! { #name: #ty }),
    }

    for f in old_named.into_iter() {
        if !is_named(&f, &key) {
            new_named.push(f);
        }
    }

    fields_named.named = new_named;
}

/// 仅在缺失时于末尾追加字段，保留既有顺序
pub(crate) fn ensure_trailing_field(fields_named: &mut FieldsNamed, name: &Ident, ty: &Type) {
    let key = name.to_string();
    if fields_named.named.iter().any(|f| is_named(f, &key)) {
        return;
    }
    fields_named.named.push(syn::parse_quote! { #name: #ty });
}
