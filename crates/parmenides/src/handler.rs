//! Handler layer.
//!
//! [`RequestHandler`] runs one request end to end:
//!
//! ```text
//! ExtractionContext → materialize Req → business fn → JsonEnvelope → Response
//!        │                  │                 │               │
//!        │             400 on error      500 on error    500 on encode error
//!        └── request_id (UUID v7), logged at every exit
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http::{Response, StatusCode};
use parmenides_config::{HandlerConfig, ParmenidesConfig};
use parmenides_extract::{
    bad_request_response, build_response, error_response, error_response_with, materialize,
    Bindable, ExtractionContext, ExtractionError, SerializationConfig,
};
use parmenides_telemetry::{
    log_request_complete, log_request_error, log_request_rejected, log_request_start,
};
use serde::Serialize;

use crate::RequestId;

/// Shared request pipeline for HTTP functions.
///
/// Holds the serializer options every handler shares and the handler layer
/// configuration. Cheap to clone.
///
/// # Example
///
/// ```rust
/// use parmenides::prelude::*;
/// use http::{StatusCode, Uri};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Deserialize, Bindable)]
/// #[serde(default)]
/// #[param(crate = "parmenides::extract")]
/// struct Lookup {
///     id: u64,
/// }
///
/// #[derive(Serialize)]
/// struct Found {
///     id: u64,
/// }
///
/// # tokio_test::block_on(async {
/// let handler = RequestHandler::default();
/// let ctx = ExtractionContextBuilder::new()
///     .uri(Uri::from_static("/lookup?id=5"))
///     .build();
///
/// let response = handler
///     .handle(&ctx, "Lookup", |req: Lookup| async move {
///         Ok(Some(Found { id: req.id }))
///     })
///     .await;
///
/// assert_eq!(response.status(), StatusCode::OK);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct RequestHandler {
    serialization: Arc<SerializationConfig>,
    config: HandlerConfig,
}

impl Default for RequestHandler {
    fn default() -> Self {
        Self::new(SerializationConfig::web(), HandlerConfig::default())
    }
}

impl RequestHandler {
    /// Creates a handler with the given options.
    #[must_use]
    pub fn new(serialization: SerializationConfig, config: HandlerConfig) -> Self {
        Self {
            serialization: Arc::new(serialization),
            config,
        }
    }

    /// Creates a handler from loaded service configuration.
    #[must_use]
    pub fn from_config(config: &ParmenidesConfig) -> Self {
        Self::new(config.serialization.clone(), config.handler)
    }

    /// Returns the shared serializer options.
    #[must_use]
    pub fn serialization(&self) -> &Arc<SerializationConfig> {
        &self.serialization
    }

    /// Returns the handler layer configuration.
    #[must_use]
    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Attaches the shared serializer options to a context so extractors
    /// see them.
    #[must_use]
    pub fn prepare(&self, ctx: ExtractionContext) -> ExtractionContext {
        ctx.with_serialization(Arc::clone(&self.serialization))
    }

    /// Handles one request.
    ///
    /// Materializes `Req` from `ctx`, awaits `f`, and builds the response:
    ///
    /// | Outcome | Status | Body |
    /// |---------|--------|------|
    /// | `Ok(Some(res))` | 200 | JSON |
    /// | `Ok(None)` | 404 | empty |
    /// | materialization fails | 400 | error message |
    /// | `f` fails with an [`ExtractionError`] | 400 | error message |
    /// | `f` fails otherwise | 500 | message only if `expose_error_details` |
    /// | response encoding fails | 500 | empty |
    ///
    /// `operation` names the function in logs.
    pub async fn handle<Req, Res, F, Fut>(
        &self,
        ctx: &ExtractionContext,
        operation: &str,
        f: F,
    ) -> Response<Bytes>
    where
        Req: Bindable,
        Res: Serialize,
        F: FnOnce(Req) -> Fut,
        Fut: Future<Output = anyhow::Result<Option<Res>>>,
    {
        let request_id = RequestId::new();
        let started = Instant::now();
        log_request_start!(request_id, ctx.method(), ctx.path(), operation);

        let response = match materialize::<Req>(ctx, &self.serialization) {
            Ok(request) => match f(request).await {
                Ok(result) => self.respond(result, request_id, operation),
                Err(err) => self.fail(&err, request_id, operation),
            },
            Err(err) => {
                log_request_rejected!(request_id, operation, err.error_code(), err);
                bad_request_response(Some(&err))
            }
        };

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        log_request_complete!(request_id, operation, response.status().as_u16(), duration_ms);
        response
    }

    fn respond<Res: Serialize>(
        &self,
        result: Option<Res>,
        request_id: RequestId,
        operation: &str,
    ) -> Response<Bytes> {
        build_response(
            result,
            StatusCode::OK,
            StatusCode::NOT_FOUND,
            Some(self.serialization.as_ref()),
        )
        .unwrap_or_else(|err| {
            log_request_error!(request_id, operation, err);
            error_response()
        })
    }

    fn fail(&self, err: &anyhow::Error, request_id: RequestId, operation: &str) -> Response<Bytes> {
        if let Some(extraction) = err.downcast_ref::<ExtractionError>() {
            log_request_rejected!(request_id, operation, extraction.error_code(), extraction);
            return bad_request_response(Some(extraction));
        }

        log_request_error!(request_id, operation, format!("{err:#}"));
        if self.config.expose_error_details {
            let source: &(dyn std::error::Error + 'static) = err.as_ref();
            error_response_with(Some(source)).unwrap_or_else(|_| error_response())
        } else {
            error_response()
        }
    }
}
