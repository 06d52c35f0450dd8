//! Example function.
//!
//! Echoes a first and last name back as JSON. The names can arrive in the
//! body, the query string, or the path via [`EXAMPLE_ROUTE`]:
//!
//! ```text
//! GET /Example/Ada/Lovelace              → {"firstName":"Ada","lastName":"Lovelace"}
//! GET /Example?firstName=Ada             → {"firstName":"Ada"}
//! POST /Example {"lastName":"Lovelace"}  → {"lastName":"Lovelace"}
//! ```

use bytes::Bytes;
use http::Response;
use serde::{Deserialize, Serialize};

use crate::{Bindable, RequestHandler};
use parmenides_extract::ExtractionContext;

/// Route template for the example function.
pub const EXAMPLE_ROUTE: &str = "/Example/{firstName}/{lastName}";

/// Operation name used in logs.
pub const EXAMPLE_OPERATION: &str = "ExampleFunction";

/// Parameters of the example function.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Bindable)]
#[serde(default)]
pub struct ExampleRequest {
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
}

/// Result of the example function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleResponse {
    /// First name, as received.
    pub first_name: Option<String>,
    /// Last name, as received.
    pub last_name: Option<String>,
}

/// Echoes the request names.
pub async fn example(request: ExampleRequest) -> anyhow::Result<Option<ExampleResponse>> {
    Ok(Some(ExampleResponse {
        first_name: request.first_name,
        last_name: request.last_name,
    }))
}

/// Runs [`example`] through `handler`.
pub async fn handle_example(handler: &RequestHandler, ctx: &ExtractionContext) -> Response<Bytes> {
    handler.handle(ctx, EXAMPLE_OPERATION, example).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RouteTemplate;
    use http::{StatusCode, Uri};
    use parmenides_extract::{Bindable as _, ExtractionContextBuilder};

    fn body_json(response: &Response<Bytes>) -> serde_json::Value {
        serde_json::from_slice(response.body()).unwrap()
    }

    #[test]
    fn test_descriptor_names() {
        let names: Vec<_> = ExampleRequest::FIELDS.iter().map(|f| f.name()).collect();
        assert_eq!(names, ["first_name", "last_name"]);
    }

    #[tokio::test]
    async fn test_echo() {
        let response = example(ExampleRequest {
            first_name: Some("Ada".to_string()),
            last_name: None,
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(response.first_name.as_deref(), Some("Ada"));
        assert!(response.last_name.is_none());
    }

    #[tokio::test]
    async fn test_route_values() {
        let path = "/Example/Ada/Lovelace";
        let ctx = ExtractionContextBuilder::new()
            .uri(Uri::from_static(path))
            .route_values(RouteTemplate::parse(EXAMPLE_ROUTE).match_path(path).unwrap())
            .build();

        let response = handle_example(&RequestHandler::default(), &ctx).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(&response),
            serde_json::json!({ "firstName": "Ada", "lastName": "Lovelace" })
        );
    }

    #[tokio::test]
    async fn test_missing_names_omitted() {
        let ctx = ExtractionContextBuilder::new()
            .uri(Uri::from_static("/Example?firstName=Ada"))
            .build();

        let response = handle_example(&RequestHandler::default(), &ctx).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(&response.body()[..], br#"{"firstName":"Ada"}"#);
    }

    #[tokio::test]
    async fn test_no_input() {
        let ctx = ExtractionContextBuilder::new()
            .uri(Uri::from_static("/Example"))
            .build();

        let response = handle_example(&RequestHandler::default(), &ctx).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
