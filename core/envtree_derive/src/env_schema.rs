/*
 * Licensed to the Apache Software Foundation (ASF) under one
 * or more contributor license agreements.  See the NOTICE file
 * distributed with this work for additional information
 * regarding copyright ownership.  The ASF licenses this file
 * to you under the Apache License, Version 2.0 (the
 * "License"); you may not use this file except in compliance
 * with the License.  You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing,
 * software distributed under the License is distributed on an
 * "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
 * KIND, either express or implied.  See the License for the
 * specific language governing permissions and limitations
 * under the License.
 */

use darling::{FromDeriveInput, FromField};
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::meta::ParseNestedMeta;
use syn::{Attribute, DeriveInput, Generics, Ident, LitStr, Token, Type};

/// Container-level attributes for `#[env_schema(...)]`
#[derive(Debug, FromDeriveInput)]
#[darling(
    attributes(env_schema),
    supports(struct_named),
    forward_attrs(serde)
)]
pub struct EnvSchemaOpts {
    ident: Ident,
    generics: Generics,
    data: darling::ast::Data<darling::util::Ignored, FieldOpts>,
    attrs: Vec<Attribute>,

    /// Schema name (e.g., "app-config"). Defaults to the struct name.
    #[darling(default)]
    name: Option<String>,
}

/// Field-level attributes for `#[env_schema(...)]`
#[derive(Debug, FromField)]
#[darling(attributes(env_schema), forward_attrs(serde))]
struct FieldOpts {
    ident: Option<Ident>,
    ty: Type,
    attrs: Vec<Attribute>,

    /// Skip this field entirely
    #[darling(default)]
    skip: bool,

    /// Mask values in logs and errors
    #[darling(default)]
    secret: bool,

    /// Treat this field as a leaf value (not a nested schema)
    #[darling(default)]
    leaf: bool,
}

pub fn generate_impl(input: &DeriveInput) -> TokenStream2 {
    let opts = match EnvSchemaOpts::from_derive_input(input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors(),
    };
    match generate_from_opts(opts) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error(),
    }
}

fn generate_from_opts(opts: EnvSchemaOpts) -> syn::Result<TokenStream2> {
    let struct_name = &opts.ident;
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();
    let schema_name = opts.name.unwrap_or_else(|| struct_name.to_string());

    let fields = match opts.data {
        darling::ast::Data::Struct(fields) => fields.fields,
        darling::ast::Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                struct_name,
                "EnvSchema can only be derived for structs with named fields",
            ));
        }
    };

    let rename_all = serde_option(&opts.attrs, "rename_all")?
        .map(|rule| RenameRule::parse(&rule))
        .transpose()?;

    let mut field_exprs = Vec::new();
    for field in &fields {
        if field.skip {
            continue;
        }
        let Some(ident) = &field.ident else {
            continue;
        };
        field_exprs.push(field_expr(field, ident, rename_all)?);
    }

    Ok(quote! {
        impl #impl_generics envtree::EnvSchema for #struct_name #ty_generics #where_clause {
            fn schema() -> envtree::Schema {
                envtree::Schema::new(#schema_name)
                    #(.field(#field_exprs))*
            }
        }
    })
}

/// Build the `envtree::Field` expression for one struct field.
fn field_expr(
    field: &FieldOpts,
    ident: &Ident,
    rename_all: Option<RenameRule>,
) -> syn::Result<TokenStream2> {
    let name = ident.to_string();
    let name = name.strip_prefix("r#").unwrap_or(&name).to_string();
    let inner_type = unwrap_transparent(&field.ty);

    if serde_flag(&field.attrs, "flatten")? {
        return Err(syn::Error::new_spanned(
            ident,
            "#[serde(flatten)] is not supported; declare the inner struct as a \
             regular nested field",
        ));
    }

    if is_collection_type(inner_type) && !field.leaf {
        return Err(syn::Error::new_spanned(
            &field.ty,
            "list and map fields are not supported; mark the field #[env_schema(leaf)] \
             to read it as a single value",
        ));
    }

    let base = match (leaf_kind(inner_type), field.leaf) {
        (Some(kind), _) => {
            let kind = format_ident!("{}", kind);
            quote! { envtree::Field::leaf(#name, envtree::LeafKind::#kind) }
        }
        (None, true) => quote! { envtree::Field::leaf(#name, envtree::LeafKind::Text) },
        (None, false) => quote! {
            envtree::Field::nested(#name, <#inner_type as envtree::EnvSchema>::schema())
        },
    };

    let alias = match serde_option(&field.attrs, "rename")? {
        Some(rename) => Some(rename.value()),
        None => rename_all
            .map(|rule| rule.apply_to_field(&name))
            .filter(|renamed| *renamed != name),
    };
    let alias = alias.map(|alias| quote! { .with_alias(#alias) });
    let secret = field.secret.then(|| quote! { .secret() });

    Ok(quote! { #base #alias #secret })
}

/// Map a Rust primitive to the name of its `LeafKind` variant.
fn leaf_kind(ty: &Type) -> Option<&'static str> {
    let ident = last_segment_ident(ty)?;
    let kind = match ident.as_str() {
        "bool" => "Bool",
        "u8" | "u16" | "u32" | "u64" | "u128" | "usize" | "i8" | "i16" | "i32" | "i64"
        | "i128" | "isize" => "Integer",
        "f32" | "f64" => "Float",
        "String" | "str" | "char" => "String",
        _ => return None,
    };
    Some(kind)
}

fn is_collection_type(ty: &Type) -> bool {
    last_segment_ident(ty).is_some_and(|ident| {
        matches!(
            ident.as_str(),
            "Vec" | "VecDeque" | "HashMap" | "BTreeMap" | "HashSet" | "BTreeSet"
        )
    })
}

/// Strip `Option`, `Box`, `Arc` and `Rc` wrappers.
fn unwrap_transparent(ty: &Type) -> &Type {
    let Type::Path(type_path) = ty else {
        return ty;
    };
    let Some(segment) = type_path.path.segments.last() else {
        return ty;
    };
    if !matches!(
        segment.ident.to_string().as_str(),
        "Option" | "Box" | "Arc" | "Rc"
    ) {
        return ty;
    }
    match &segment.arguments {
        syn::PathArguments::AngleBracketed(args) => match args.args.first() {
            Some(syn::GenericArgument::Type(inner)) => unwrap_transparent(inner),
            _ => ty,
        },
        _ => ty,
    }
}

fn last_segment_ident(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        Type::Reference(reference) => last_segment_ident(&reference.elem),
        _ => None,
    }
}

/// Read `#[serde(key = "...")]` or `#[serde(key(deserialize = "..."))]`.
fn serde_option(attrs: &[Attribute], key: &str) -> syn::Result<Option<LitStr>> {
    let mut found = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident(key) {
                return skip_meta_value(&meta);
            }
            if meta.input.peek(Token![=]) {
                found = Some(meta.value()?.parse()?);
                return Ok(());
            }
            meta.parse_nested_meta(|inner| {
                let value: LitStr = inner.value()?.parse()?;
                if inner.path.is_ident("deserialize") {
                    found = Some(value);
                }
                Ok(())
            })
        })?;
    }
    Ok(found)
}

/// Whether a bare `#[serde(flag)]` is present.
fn serde_flag(attrs: &[Attribute], flag: &str) -> syn::Result<bool> {
    let mut found = false;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(flag) {
                found = true;
            }
            skip_meta_value(&meta)
        })?;
    }
    Ok(found)
}

/// Container `rename_all` conventions, applied to field names the way serde
/// applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    fn parse(rule: &LitStr) -> syn::Result<Self> {
        let parsed = match rule.value().as_str() {
            "lowercase" => Self::Lower,
            "UPPERCASE" => Self::Upper,
            "PascalCase" => Self::Pascal,
            "camelCase" => Self::Camel,
            "snake_case" => Self::Snake,
            "SCREAMING_SNAKE_CASE" => Self::ScreamingSnake,
            "kebab-case" => Self::Kebab,
            "SCREAMING-KEBAB-CASE" => Self::ScreamingKebab,
            other => {
                return Err(syn::Error::new_spanned(
                    rule,
                    format!("unknown rename_all rule `{other}`"),
                ));
            }
        };
        Ok(parsed)
    }

    fn apply_to_field(self, field: &str) -> String {
        match self {
            Self::Lower | Self::Snake => field.to_string(),
            Self::Upper | Self::ScreamingSnake => field.to_ascii_uppercase(),
            Self::Pascal => {
                let mut pascal = String::with_capacity(field.len());
                let mut capitalize = true;
                for ch in field.chars() {
                    if ch == '_' {
                        capitalize = true;
                    } else if capitalize {
                        pascal.push(ch.to_ascii_uppercase());
                        capitalize = false;
                    } else {
                        pascal.push(ch);
                    }
                }
                pascal
            }
            Self::Camel => {
                let pascal = Self::Pascal.apply_to_field(field);
                let mut chars = pascal.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
                    None => pascal,
                }
            }
            Self::Kebab => field.replace('_', "-"),
            Self::ScreamingKebab => field.to_ascii_uppercase().replace('_', "-"),
        }
    }
}

/// Consume the value of a serde option we don't care about.
fn skip_meta_value(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        let _: syn::Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        let _: TokenStream2 = content.parse()?;
    }
    Ok(())
}
