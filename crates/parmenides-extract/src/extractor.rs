//! The [`FromRequest`] extractor trait.

use crate::{ExtractionContext, ExtractionError};

/// A value built from an [`ExtractionContext`].
///
/// Synchronous: the body stream, if any, was read into the context before
/// extraction starts.
///
/// # Example
///
/// ```rust
/// use parmenides_extract::{FromRequest, ExtractionContext, ExtractionError, ExtractionSource};
///
/// struct ApiVersion(u32);
///
/// impl FromRequest for ApiVersion {
///     fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
///         let raw = ctx.header("x-api-version").unwrap_or("1");
///         raw.parse()
///             .map(ApiVersion)
///             .map_err(|_| ExtractionError::invalid_value(
///                 ExtractionSource::Request,
///                 "x-api-version",
///                 "expected integer version",
///             ))
///     }
/// }
/// ```
pub trait FromRequest: Sized {
    /// Builds `Self` from `ctx`.
    ///
    /// # Errors
    ///
    /// Any [`ExtractionError`]; the handler layer answers 400.
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError>;
}

// Failure becomes `None`
impl<T: FromRequest> FromRequest for Option<T> {
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
        Ok(T::from_request(ctx).ok())
    }
}

// Failure is handed to the caller
impl<T: FromRequest> FromRequest for Result<T, ExtractionError> {
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
        Ok(T::from_request(ctx))
    }
}
