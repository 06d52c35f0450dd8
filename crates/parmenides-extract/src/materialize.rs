//! Request parameter materialization.
//!
//! [`materialize`] merges the three optional inputs of a request into one
//! [`Bindable`] value:
//!
//! 1. Fail with `MissingInput` if the body is missing or empty and neither
//!    the query string nor the route values are available.
//! 2. Decode the body as JSON if one is attached; otherwise start from
//!    `T::default()`.
//! 3. Overlay every writable field: query value, then route value (later
//!    wins). Names match ignoring case, either as declared or as renamed by
//!    the property naming policy (`first_name` also binds `firstName` under
//!    camelCase).
//! 4. Return the merged value.
//!
//! The [`Parameters`] extractor runs the same steps inside the
//! [`FromRequest`] pipeline.

use crate::{
    Bindable, ExtractionContext, ExtractionError, ExtractionSource, FromRequest, QueryParameters,
    RouteValues, SerializationConfig,
};
use std::ops::Deref;

/// Materializes `T` from the body, query string and route values of `ctx`.
///
/// # Errors
///
/// - `MissingInput` if nothing usable was supplied.
/// - `MalformedBody` if the body is not JSON for `T`, decodes to `null`, or
///   a query/route value cannot be coerced to its field's type.
///
/// # Example
///
/// ```rust
/// use parmenides_extract::{
///     materialize, Bindable, ExtractionContextBuilder, FieldDescriptor, FromParam,
///     SerializationConfig,
/// };
/// use http::Uri;
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize)]
/// #[serde(default)]
/// struct Greeting {
///     name: String,
/// }
///
/// impl Bindable for Greeting {
///     const FIELDS: &'static [FieldDescriptor<Self>] = &[FieldDescriptor::new(
///         "name",
///         <String as FromParam>::KIND,
///         |target: &mut Self, value: &str| {
///             target.name = String::from_param(value)?;
///             Ok(())
///         },
///     )];
/// }
///
/// let ctx = ExtractionContextBuilder::new()
///     .uri(Uri::from_static("/greet?name=B"))
///     .body(r#"{"name":"A"}"#)
///     .route_value("Name", "C")
///     .build();
///
/// let greeting: Greeting = materialize(&ctx, &SerializationConfig::default()).unwrap();
/// assert_eq!(greeting.name, "C");
/// ```
pub fn materialize<T: Bindable>(
    ctx: &ExtractionContext,
    config: &SerializationConfig,
) -> Result<T, ExtractionError> {
    let query = ctx.query()?;
    let route = ctx.route_values();
    let query_available = query.is_available();
    let route_available = route.is_available();

    if ctx.is_body_empty() && !query_available && !route_available {
        return Err(ExtractionError::missing_input());
    }

    let mut target: T = match ctx.body() {
        Some(body) => config.from_slice(body)?,
        None => T::default(),
    };

    if query_available || route_available {
        overlay(&mut target, &query, route, config)?;
    }

    Ok(target)
}

fn overlay<T: Bindable>(
    target: &mut T,
    query: &QueryParameters,
    route: &RouteValues,
    config: &SerializationConfig,
) -> Result<(), ExtractionError> {
    for field in T::FIELDS {
        let name = field.name();
        let wire = config.property_naming.apply(name);

        if let Some(value) = query.get(name).or_else(|| query.get(&wire)) {
            field.assign(target, value).map_err(|e| {
                ExtractionError::invalid_value(ExtractionSource::Query, name, e.to_string())
            })?;
        }
        if let Some(value) = route
            .get_ignore_case(name)
            .or_else(|| route.get_ignore_case(&wire))
        {
            field.assign(target, value).map_err(|e| {
                ExtractionError::invalid_value(ExtractionSource::Route, name, e.to_string())
            })?;
        }
    }
    Ok(())
}

/// Extractor that materializes request parameters into `T`.
///
/// Uses the serializer options attached to the context, or
/// [`SerializationConfig::default`] when the host attached none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameters<T>(pub T);

impl<T> Parameters<T> {
    /// Consumes the extractor and returns the inner value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Parameters<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Bindable> FromRequest for Parameters<T> {
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
        let value = match ctx.serialization() {
            Some(config) => materialize(ctx, config)?,
            None => materialize(ctx, &SerializationConfig::default())?,
        };
        Ok(Parameters(value))
    }
}
