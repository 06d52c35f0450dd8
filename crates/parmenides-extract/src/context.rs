//! Extraction context providing access to request data.
//!
//! The [`ExtractionContext`] describes one inbound request: its URI (and so
//! its query string), headers, an optional body and the route values the
//! caller pulled out of the path template.

use crate::{ExtractionError, QueryParameters, RouteValues, SerializationConfig};
use bytes::Bytes;
use http::{HeaderMap, Method, Uri};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Context providing access to all inputs of an HTTP request.
///
/// The body is optional: `None` is the "no body" sentinel, while
/// `Some(Bytes::new())` is a readable body that happens to be empty.
///
/// # Example
///
/// ```rust
/// use parmenides_extract::{ExtractionContext, RouteValues};
/// use http::{HeaderMap, Method, Uri};
/// use bytes::Bytes;
///
/// let mut route = RouteValues::new();
/// route.push("id", "123");
///
/// let ctx = ExtractionContext::new(
///     Method::GET,
///     Uri::from_static("/users/123?verbose=true"),
///     HeaderMap::new(),
///     None,
///     route,
/// );
///
/// assert_eq!(ctx.method(), &Method::GET);
/// assert_eq!(ctx.query_string(), Some("verbose=true"));
/// assert_eq!(ctx.route_values().get("id"), Some("123"));
/// assert!(!ctx.has_body());
/// ```
#[derive(Debug, Clone)]
pub struct ExtractionContext {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Option<Bytes>,
    route_values: RouteValues,
    serialization: Option<Arc<SerializationConfig>>,
}

impl ExtractionContext {
    /// Creates a new extraction context.
    #[must_use]
    pub fn new(
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Option<Bytes>,
        route_values: RouteValues,
    ) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
            route_values,
            serialization: None,
        }
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the path portion of the URI.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Returns the query string if present.
    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.uri.query()
    }

    /// Parses the query string.
    ///
    /// # Errors
    ///
    /// Returns a malformed-input error if the query string cannot be decoded.
    pub fn query(&self) -> Result<QueryParameters, ExtractionError> {
        QueryParameters::parse(self.query_string().unwrap_or(""))
    }

    /// Returns the request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a specific header value as a string.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the request body, or `None` if the request has no body.
    #[must_use]
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Returns true if a body is attached, even a zero-length one.
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Returns true if there is no body or the body has no bytes.
    #[must_use]
    pub fn is_body_empty(&self) -> bool {
        self.body.as_ref().map_or(true, Bytes::is_empty)
    }

    /// Returns the route values.
    #[must_use]
    pub fn route_values(&self) -> &RouteValues {
        &self.route_values
    }

    /// Returns the serializer options shared by the host, if any.
    #[must_use]
    pub fn serialization(&self) -> Option<&SerializationConfig> {
        self.serialization.as_deref()
    }

    /// Attaches shared serializer options.
    #[must_use]
    pub fn with_serialization(mut self, config: Arc<SerializationConfig>) -> Self {
        self.serialization = Some(config);
        self
    }
}

/// Builder for constructing an `ExtractionContext`.
#[derive(Debug, Default)]
pub struct ExtractionContextBuilder {
    method: Option<Method>,
    uri: Option<Uri>,
    headers: HeaderMap,
    body: Option<Bytes>,
    route_values: RouteValues,
    serialization: Option<Arc<SerializationConfig>>,
}

impl ExtractionContextBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the URI.
    #[must_use]
    pub fn uri(mut self, uri: Uri) -> Self {
        self.uri = Some(uri);
        self
    }

    /// Sets the headers.
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = value.parse() {
            self.headers.insert(name, value);
        }
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Reads `reader` to the end and uses the bytes as the body.
    ///
    /// The stream is consumed exactly once. If reading fails, the builder
    /// is dropped along with the partially read data.
    pub async fn read_body<R>(mut self, mut reader: R) -> std::io::Result<Self>
    where
        R: AsyncRead + Unpin,
    {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        self.body = Some(Bytes::from(buf));
        Ok(self)
    }

    /// Sets the route values.
    #[must_use]
    pub fn route_values(mut self, values: RouteValues) -> Self {
        self.route_values = values;
        self
    }

    /// Adds a single route value.
    #[must_use]
    pub fn route_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.route_values.push(name, value);
        self
    }

    /// Attaches shared serializer options.
    #[must_use]
    pub fn serialization(mut self, config: Arc<SerializationConfig>) -> Self {
        self.serialization = Some(config);
        self
    }

    /// Builds the extraction context.
    ///
    /// Method defaults to `GET` and the URI to `/`.
    #[must_use]
    pub fn build(self) -> ExtractionContext {
        ExtractionContext {
            method: self.method.unwrap_or(Method::GET),
            uri: self.uri.unwrap_or_else(|| Uri::from_static("/")),
            headers: self.headers,
            body: self.body,
            route_values: self.route_values,
            serialization: self.serialization,
        }
    }
}
