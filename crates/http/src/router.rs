//! Router builder for the Bookswap HTTP server

use std::time::Duration;

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use uuid::{Timestamp, Uuid};

use bookswap_kernel::ModuleRegistry;

/// Builder for constructing the main HTTP router
pub struct RouterBuilder {
    router: Router,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Mount a module's router under `/api/{module_name}`
    pub fn mount_module(mut self, module_name: &str, module_router: Router) -> Self {
        let api_path = format!("/api/{}", module_name);
        self.router = self.router.nest(&api_path, module_router);
        self
    }

    pub fn with_tracing(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(false))
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );
        self
    }

    pub fn with_cors(mut self) -> Self {
        self.router = self.router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
        self
    }

    /// Tag every request with a time-ordered `x-request-id` and echo it back.
    /// Error envelopes carry the same id as `trace_id`.
    pub fn with_request_id(mut self) -> Self {
        self.router = self
            .router
            .layer(middleware::from_fn(scope_request_id))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));
        self
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.router = self
            .router
            .layer(TimeoutLayer::new(Duration::from_millis(timeout_ms)));
        self
    }

    /// Serve the merged OpenAPI document of every module plus Swagger UI
    pub fn with_openapi(mut self, registry: &ModuleRegistry) -> Self {
        let openapi_spec = merge_openapi(registry);

        match serde_json::from_value::<utoipa::openapi::OpenApi>(openapi_spec.clone()) {
            Ok(openapi_obj) => {
                self.router = self.router.merge(
                    utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                        .url("/api-docs/openapi.json", openapi_obj),
                );
            }
            Err(err) => {
                tracing::warn!(error = %err, "merged OpenAPI document rejected; Swagger UI disabled");
            }
        }

        self.router = self.router.route(
            "/docs/openapi.json",
            get(move || async move { axum::Json(openapi_spec.clone()) }),
        );

        self
    }

    pub fn build(self) -> Router {
        self.router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge module fragments into one document, prefixing paths with the mount point
pub fn merge_openapi(registry: &ModuleRegistry) -> Value {
    let mut openapi_spec = json!({
        "openapi": "3.1.0",
        "info": {
            "title": "Bookswap API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Book listings, purchase requests and swap requests"
        },
        "paths": {
            "/healthz": {
                "get": {
                    "summary": "Health check",
                    "responses": { "200": { "description": "OK" } }
                }
            }
        },
        "components": {
            "schemas": {
                "ErrorResponse": {
                    "type": "object",
                    "properties": {
                        "error": {
                            "type": "object",
                            "properties": {
                                "code": { "type": "string" },
                                "message": { "type": "string" },
                                "details": { "type": "array", "items": {} },
                                "trace_id": { "type": "string" },
                                "timestamp": { "type": "string" }
                            },
                            "required": ["code", "message", "trace_id", "timestamp"]
                        }
                    },
                    "required": ["error"]
                }
            },
            "securitySchemes": {
                "bearer": { "type": "http", "scheme": "bearer" }
            }
        }
    });

    for module in registry.modules() {
        let Some(module_spec) = module.openapi() else {
            continue;
        };

        if let Some(paths) = module_spec.get("paths").and_then(Value::as_object) {
            for (path, path_item) in paths {
                let prefixed_path = match path.as_str() {
                    "/" => format!("/api/{}", module.name()),
                    _ => format!("/api/{}{}", module.name(), path),
                };
                openapi_spec["paths"][prefixed_path] = path_item.clone();
            }
        }

        if let Some(schemas) = module_spec
            .pointer("/components/schemas")
            .and_then(Value::as_object)
        {
            for (schema_name, schema_def) in schemas {
                openapi_spec["components"]["schemas"][schema_name] = schema_def.clone();
            }
        }
    }

    openapi_spec
}

async fn scope_request_id(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok());

    match request_id {
        Some(request_id) => crate::error::scope_request_id(request_id, next.run(request)).await,
        None => next.run(request).await,
    }
}

/// Request ID generator producing UUIDv7 values
#[derive(Clone, Copy)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let timestamp = Timestamp::now(uuid::NoContext);
        let request_id = Uuid::new_v7(timestamp)
            .to_string()
            .parse::<HeaderValue>()
            .ok()?;
        Some(RequestId::new(request_id))
    }
}
