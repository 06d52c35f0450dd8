//! Parsing utilities for the derive macro.
//!
//! Reads the target struct and its `param`/`serde` attributes.

use syn::{
    ext::IdentExt, spanned::Spanned, Attribute, Data, DeriveInput, Field, Fields, Generics, Ident,
    LitStr, Path, Token, Type,
};

/// Parsed `#[param(...)]` options of one field.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParamAttrs {
    /// Leave the field out of the descriptor table.
    pub skip: bool,
    /// Name override.
    pub rename: Option<String>,
}

impl ParamAttrs {
    /// Collects every `#[param(...)]` attribute on a field.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs.iter().filter(|a| a.path().is_ident("param")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    parsed.skip = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().is_empty() {
                        return Err(syn::Error::new(lit.span(), "rename must not be empty"));
                    }
                    parsed.rename = Some(lit.value());
                    Ok(())
                } else {
                    Err(meta.error("unknown param attribute, expected `skip` or `rename`"))
                }
            })?;
        }

        Ok(parsed)
    }
}

/// Parsed `#[param(...)]` options of the struct itself.
#[derive(Debug)]
pub struct ContainerAttrs {
    /// Path of the extract crate in generated code.
    pub krate: Path,
}

impl ContainerAttrs {
    /// Collects every `#[param(...)]` attribute on the struct.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut krate = None;

        for attr in attrs.iter().filter(|a| a.path().is_ident("param")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("crate") {
                    let lit: LitStr = meta.value()?.parse()?;
                    krate = Some(lit.parse::<Path>()?);
                    Ok(())
                } else {
                    Err(meta.error("unknown param attribute, expected `crate`"))
                }
            })?;
        }

        Ok(Self {
            krate: krate.unwrap_or_else(|| syn::parse_quote!(parmenides_extract)),
        })
    }
}

/// The `#[serde(...)]` keys that change which JSON keys a struct reads.
///
/// Other serde keys are consumed and ignored; serde reports its own errors.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SerdeAttrs {
    /// `rename = "..."` or `rename(deserialize = "...")`.
    pub rename: Option<String>,
    /// `rename_all = "..."` or `rename_all(deserialize = "...")`.
    pub rename_all: Option<RenameRule>,
    /// `default` or `default = "path"`.
    pub default: bool,
    /// `skip` or `skip_deserializing`.
    pub skip: bool,
}

impl SerdeAttrs {
    /// Collects every `#[serde(...)]` attribute.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();

        for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    out.rename = deserialize_name(&meta)?.map(|lit| lit.value());
                } else if meta.path.is_ident("rename_all") {
                    if let Some(lit) = deserialize_name(&meta)? {
                        out.rename_all = Some(RenameRule::parse(&lit)?);
                    }
                } else if meta.path.is_ident("default") {
                    if meta.input.peek(Token![=]) {
                        let _: syn::Expr = meta.value()?.parse()?;
                    }
                    out.default = true;
                } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_deserializing") {
                    out.skip = true;
                } else if meta.input.peek(Token![=]) {
                    let _: syn::Expr = meta.value()?.parse()?;
                } else if meta.input.peek(syn::token::Paren) {
                    let content;
                    syn::parenthesized!(content in meta.input);
                    let _: proc_macro2::TokenStream = content.parse()?;
                }
                Ok(())
            })?;
        }

        Ok(out)
    }
}

// `key = "..."` or `key(serialize = "...", deserialize = "...")`
fn deserialize_name(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<Option<LitStr>> {
    if meta.input.peek(Token![=]) {
        return Ok(Some(meta.value()?.parse()?));
    }

    let mut name = None;
    meta.parse_nested_meta(|inner| {
        let lit: LitStr = inner.value()?.parse()?;
        if inner.path.is_ident("deserialize") {
            name = Some(lit);
        }
        Ok(())
    })?;
    Ok(name)
}

/// Serde's `rename_all` case conventions, applied to `snake_case` field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    /// `lowercase`
    Lower,
    /// `UPPERCASE`
    Upper,
    /// `PascalCase`
    Pascal,
    /// `camelCase`
    Camel,
    /// `snake_case`
    Snake,
    /// `SCREAMING_SNAKE_CASE`
    ScreamingSnake,
    /// `kebab-case`
    Kebab,
    /// `SCREAMING-KEBAB-CASE`
    ScreamingKebab,
}

impl RenameRule {
    fn parse(lit: &LitStr) -> syn::Result<Self> {
        Ok(match lit.value().as_str() {
            "lowercase" => Self::Lower,
            "UPPERCASE" => Self::Upper,
            "PascalCase" => Self::Pascal,
            "camelCase" => Self::Camel,
            "snake_case" => Self::Snake,
            "SCREAMING_SNAKE_CASE" => Self::ScreamingSnake,
            "kebab-case" => Self::Kebab,
            "SCREAMING-KEBAB-CASE" => Self::ScreamingKebab,
            other => {
                return Err(syn::Error::new(
                    lit.span(),
                    format!("unknown rename_all rule `{other}`"),
                ))
            }
        })
    }

    /// Spells a field name the way serde does under this rule.
    pub fn apply(self, field: &str) -> String {
        match self {
            Self::Lower | Self::Snake => field.to_string(),
            Self::Upper | Self::ScreamingSnake => field.to_ascii_uppercase(),
            Self::Pascal => field
                .split('_')
                .map(|part| {
                    let mut chars = part.chars();
                    chars.next().map_or_else(String::new, |first| {
                        first.to_ascii_uppercase().to_string() + chars.as_str()
                    })
                })
                .collect(),
            Self::Camel => {
                let pascal = Self::Pascal.apply(field);
                let mut chars = pascal.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_ascii_lowercase().to_string() + chars.as_str()
                })
            }
            Self::Kebab => field.replace('_', "-"),
            Self::ScreamingKebab => field.to_ascii_uppercase().replace('_', "-"),
        }
    }
}

fn is_option(ty: &Type) -> bool {
    match ty {
        Type::Path(path) if path.qself.is_none() => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        _ => false,
    }
}

/// One writable field of the target struct.
#[derive(Debug)]
pub struct BindableField {
    /// The Rust field name.
    pub ident: Ident,
    /// The field type.
    pub ty: Type,
    /// The name matched against query and route keys.
    pub name: String,
}

/// Parsed derive target.
#[derive(Debug)]
pub struct BindableStruct {
    /// The struct name.
    pub ident: Ident,
    /// The struct generics.
    pub generics: Generics,
    /// Path of the extract crate.
    pub krate: Path,
    /// Fields that get a descriptor, in declaration order.
    pub fields: Vec<BindableField>,
}

impl BindableStruct {
    /// Parses a `DeriveInput` into a `BindableStruct`.
    pub fn parse(input: DeriveInput) -> syn::Result<Self> {
        let container = ContainerAttrs::from_attrs(&input.attrs)?;
        let named: Vec<Field> = match input.data {
            Data::Struct(data) => match data.fields {
                Fields::Named(named) => named.named.into_iter().collect(),
                Fields::Unit => Vec::new(),
                Fields::Unnamed(unnamed) => {
                    return Err(syn::Error::new(
                        unnamed.span(),
                        "Bindable requires named fields; tuple structs are not supported",
                    ))
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span,
                    "Bindable can only be derived for structs",
                ))
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "Bindable can only be derived for structs",
                ))
            }
        };

        let serde = SerdeAttrs::from_attrs(&input.attrs)?;
        let mut fields = Vec::with_capacity(named.len());
        let mut required = Vec::new();

        for field in named {
            let attrs = ParamAttrs::from_attrs(&field.attrs)?;
            let field_serde = SerdeAttrs::from_attrs(&field.attrs)?;
            let Some(ident) = field.ident else {
                continue;
            };

            if !(serde.default || field_serde.default || field_serde.skip || is_option(&field.ty))
            {
                required.push(ident.clone());
            }
            if attrs.skip || field_serde.skip {
                continue;
            }

            let declared = ident.unraw().to_string();
            let name = attrs
                .rename
                .or(field_serde.rename)
                .unwrap_or_else(|| match serde.rename_all {
                    Some(rule) => rule.apply(&declared),
                    None => declared,
                });
            fields.push(BindableField {
                ident,
                ty: field.ty,
                name,
            });
        }

        if let Some(first) = required.first() {
            return Err(syn::Error::new(
                first.span(),
                "Bindable fields must tolerate a missing JSON key: add `#[serde(default)]` \
                 to the struct or to this field",
            ));
        }

        Ok(Self {
            ident: input.ident,
            generics: input.generics,
            krate: container.krate,
            fields,
        })
    }
}
