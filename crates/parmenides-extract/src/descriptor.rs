//! Field descriptors for target parameter types.
//!
//! A [`Bindable`] type publishes a table of [`FieldDescriptor`]s, one per
//! field that query and route values may write to. Each descriptor carries
//! the field's name, its scalar [`FieldKind`] and a setter that coerces a
//! raw string into the field. The table is a constant built once per type,
//! normally by `#[derive(Bindable)]`.

use crate::naming::eq_ignore_case;
use serde::de::DeserializeOwned;
use std::fmt;
use thiserror::Error;

/// Declared scalar kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Signed or unsigned integer, parsed base-10.
    Integer,
    /// Floating point number.
    Float,
    /// `true` / `false`.
    Boolean,
    /// Anything assigned from the raw string.
    Text,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "number"),
            Self::Boolean => write!(f, "boolean"),
            Self::Text => write!(f, "string"),
        }
    }
}

/// A raw string could not be converted to a field's type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, got '{value}'")]
pub struct CoercionError {
    /// Kind the field required.
    pub expected: FieldKind,
    /// The rejected input.
    pub value: String,
}

impl CoercionError {
    /// Creates a coercion error.
    #[must_use]
    pub fn new(expected: FieldKind, value: impl Into<String>) -> Self {
        Self {
            expected,
            value: value.into(),
        }
    }
}

/// Scalar types that can be parsed from a query or route value.
pub trait FromParam: Sized {
    /// Kind reported in the field descriptor.
    const KIND: FieldKind;

    /// Parses the raw string.
    ///
    /// # Errors
    ///
    /// Returns [`CoercionError`] if the string is not a valid value.
    fn from_param(value: &str) -> Result<Self, CoercionError>;
}

macro_rules! impl_from_param_for_int {
    ($($t:ty),*) => {
        $(
            impl FromParam for $t {
                const KIND: FieldKind = FieldKind::Integer;

                fn from_param(value: &str) -> Result<Self, CoercionError> {
                    value
                        .trim()
                        .parse()
                        .map_err(|_| CoercionError::new(Self::KIND, value))
                }
            }
        )*
    };
}

impl_from_param_for_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_from_param_for_float {
    ($($t:ty),*) => {
        $(
            impl FromParam for $t {
                const KIND: FieldKind = FieldKind::Float;

                fn from_param(value: &str) -> Result<Self, CoercionError> {
                    value
                        .trim()
                        .parse()
                        .map_err(|_| CoercionError::new(Self::KIND, value))
                }
            }
        )*
    };
}

impl_from_param_for_float!(f32, f64);

impl FromParam for bool {
    const KIND: FieldKind = FieldKind::Boolean;

    fn from_param(value: &str) -> Result<Self, CoercionError> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(CoercionError::new(Self::KIND, value))
        }
    }
}

impl FromParam for String {
    const KIND: FieldKind = FieldKind::Text;

    fn from_param(value: &str) -> Result<Self, CoercionError> {
        Ok(value.to_string())
    }
}

impl FromParam for char {
    const KIND: FieldKind = FieldKind::Text;

    fn from_param(value: &str) -> Result<Self, CoercionError> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(CoercionError::new(Self::KIND, value)),
        }
    }
}

impl<T: FromParam> FromParam for Option<T> {
    const KIND: FieldKind = T::KIND;

    fn from_param(value: &str) -> Result<Self, CoercionError> {
        T::from_param(value).map(Some)
    }
}

/// Setter signature stored in a descriptor.
pub type FieldSetter<T> = fn(&mut T, &str) -> Result<(), CoercionError>;

/// Describes one writable field of a [`Bindable`] type.
pub struct FieldDescriptor<T> {
    name: &'static str,
    kind: FieldKind,
    setter: FieldSetter<T>,
}

impl<T> FieldDescriptor<T> {
    /// Creates a descriptor.
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind, setter: FieldSetter<T>) -> Self {
        Self { name, kind, setter }
    }

    /// Returns the field name as it appears in JSON with no naming policy.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the declared scalar kind.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Coerces `value` and writes it into `target`.
    ///
    /// # Errors
    ///
    /// Returns [`CoercionError`] if `value` does not parse as the field's type.
    pub fn assign(&self, target: &mut T, value: &str) -> Result<(), CoercionError> {
        (self.setter)(target, value)
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// A type that request parameters can be materialized into.
///
/// The body may carry only some fields and the query string or route the
/// rest, so the `Deserialize` impl must accept a JSON object with keys
/// missing, filling them from `Default`. With serde that means
/// `#[serde(default)]` on the struct; the derive refuses types without it.
///
/// Usually derived:
///
/// ```rust,ignore
/// use parmenides_macros::Bindable;
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize, Bindable)]
/// #[serde(default)]
/// struct ExampleRequest {
///     first_name: Option<String>,
///     age: u32,
/// }
/// ```
///
/// It can also be written by hand as a small registration table:
///
/// ```rust
/// use parmenides_extract::{Bindable, FieldDescriptor, FromParam};
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize)]
/// #[serde(default)]
/// struct Paging {
///     page: u32,
/// }
///
/// impl Bindable for Paging {
///     const FIELDS: &'static [FieldDescriptor<Self>] = &[FieldDescriptor::new(
///         "page",
///         <u32 as FromParam>::KIND,
///         |target: &mut Self, value: &str| {
///             target.page = u32::from_param(value)?;
///             Ok(())
///         },
///     )];
/// }
///
/// assert_eq!(Paging::field("PAGE").map(|f| f.name()), Some("page"));
/// ```
pub trait Bindable: Default + DeserializeOwned + 'static {
    /// Writable fields, in declaration order.
    const FIELDS: &'static [FieldDescriptor<Self>];

    /// Finds a field by name, ignoring case.
    #[must_use]
    fn field(name: &str) -> Option<&'static FieldDescriptor<Self>> {
        Self::FIELDS.iter().find(|f| eq_ignore_case(f.name, name))
    }
}
