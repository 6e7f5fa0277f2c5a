pub mod models;
pub mod routes;
pub mod service;

use async_trait::async_trait;
use axum::Router;
use bookswap_kernel::{InitCtx, Module};
use serde_json::json;

use crate::modules::{books::models::BOOKS, users::models::USERS};
use crate::state::AppState;

/// Purchase and swap requests between users
pub struct RequestsModule {
    state: AppState,
}

impl RequestsModule {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Module for RequestsModule {
    fn name(&self) -> &'static str {
        "requests"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "requests module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.state.clone())
    }

    fn collections(&self) -> Vec<&'static str> {
        vec![
            models::PURCHASE_REQUESTS,
            models::SWAP_REQUESTS,
            BOOKS,
            USERS,
        ]
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = json!({
            "description": "Error",
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } } }
        });
        let missing_info = json!({
            "description": "Requester or book owner could not be resolved",
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } } }
        });
        let book_id = json!({ "type": "string", "description": "Document id of the requested book" });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List the signed-in user's requests",
                        "tags": ["Requests"],
                        "security": [{ "bearer": [] }],
                        "parameters": [{
                            "name": "direction",
                            "in": "query",
                            "required": false,
                            "schema": { "type": "string", "enum": ["outgoing", "incoming"], "default": "outgoing" }
                        }],
                        "responses": {
                            "200": {
                                "description": "Requests split by kind",
                                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/RequestList" } } }
                            },
                            "401": error
                        }
                    }
                },
                "/purchase": {
                    "post": {
                        "summary": "Ask to buy a book",
                        "tags": ["Requests"],
                        "security": [{ "bearer": [] }],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": { "bookId": book_id },
                                        "required": ["bookId"]
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Pending purchase request",
                                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/PurchaseRequest" } } }
                            },
                            "401": error,
                            "422": missing_info
                        }
                    }
                },
                "/swap": {
                    "post": {
                        "summary": "Offer a swap for a book",
                        "tags": ["Requests"],
                        "security": [{ "bearer": [] }],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": {
                                            "bookId": book_id,
                                            "offeredBookId": { "type": "string", "description": "One of the caller's own listings" }
                                        },
                                        "required": ["bookId"]
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Pending swap request",
                                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/SwapRequest" } } }
                            },
                            "401": error,
                            "422": missing_info
                        }
                    }
                },
                "/{kind}/{id}": {
                    "delete": {
                        "summary": "Delete one of the caller's outgoing requests",
                        "tags": ["Requests"],
                        "security": [{ "bearer": [] }],
                        "parameters": [
                            {
                                "name": "kind",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "string", "enum": ["purchase", "swap"] }
                            },
                            { "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }
                        ],
                        "responses": { "204": { "description": "Deleted" }, "401": error, "404": error }
                    }
                }
            },
            "components": {
                "schemas": {
                    "PurchaseRequest": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "bookID": { "type": "string" },
                            "buyerID": { "type": "string" },
                            "sellerID": { "type": "string" },
                            "price": { "type": "number" },
                            "status": { "type": "string", "enum": ["pending", "resolved"] }
                        },
                        "required": ["id", "bookID", "buyerID", "sellerID", "price", "status"]
                    },
                    "SwapRequest": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "requestedBookID": { "type": "string" },
                            "fromUserID": { "type": "string" },
                            "toUserID": { "type": "string" },
                            "offeredBookID": { "type": ["string", "null"] },
                            "status": { "type": "string", "enum": ["pending", "resolved"] }
                        },
                        "required": ["id", "requestedBookID", "fromUserID", "toUserID", "status"]
                    },
                    "RequestList": {
                        "type": "object",
                        "properties": {
                            "purchases": { "type": "array", "items": { "$ref": "#/components/schemas/PurchaseRequest" } },
                            "swaps": { "type": "array", "items": { "$ref": "#/components/schemas/SwapRequest" } }
                        }
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "requests module stopped");
        Ok(())
    }
}

pub fn create_module(state: AppState) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(RequestsModule::new(state))
}
