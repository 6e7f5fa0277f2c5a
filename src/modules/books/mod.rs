pub mod models;
pub mod routes;
pub mod service;

use async_trait::async_trait;
use axum::Router;
use bookswap_kernel::{InitCtx, Module};
use serde_json::json;

use crate::state::AppState;

/// Book listings: the full catalogue and each user's own listings
pub struct BooksModule {
    state: AppState,
}

impl BooksModule {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let listed = self.state.store.list(models::BOOKS).await?.len();
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            listed,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.state.clone())
    }

    fn collections(&self) -> Vec<&'static str> {
        vec![models::BOOKS, crate::modules::users::models::USERS]
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = json!({
            "description": "Error",
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } } }
        });
        let book_list = json!({
            "description": "List of books",
            "content": {
                "application/json": {
                    "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Book" } }
                }
            }
        });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "q",
                            "in": "query",
                            "required": false,
                            "description": "Case-insensitive search over title and author",
                            "schema": { "type": "string" }
                        }],
                        "responses": { "200": book_list, "500": error }
                    }
                },
                "/mine": {
                    "get": {
                        "summary": "Books listed by the signed-in user",
                        "tags": ["Books"],
                        "security": [{ "bearer": [] }],
                        "responses": { "200": book_list, "401": error }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get one book",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "id",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": {
                                "description": "Book",
                                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Book" } } }
                            },
                            "404": error
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "title": { "type": "string" },
                            "price": { "type": "number" },
                            "imageUrl": { "type": "string", "format": "uri" },
                            "ownerID": { "type": "string" },
                            "author": { "type": "string" }
                        },
                        "required": ["id", "title", "price"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

pub fn create_module(state: AppState) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(state))
}
