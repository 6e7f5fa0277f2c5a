pub mod models;
pub mod routes;
pub mod service;

use async_trait::async_trait;
use axum::Router;
use bookswap_kernel::{InitCtx, Module};
use serde_json::json;

use crate::state::AppState;

/// Accounts, sign-in sessions and profiles
pub struct UsersModule {
    state: AppState,
}

impl UsersModule {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Module for UsersModule {
    fn name(&self) -> &'static str {
        "users"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            min_password_length = ctx.settings.auth.min_password_length,
            "users module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.state.clone())
    }

    fn collections(&self) -> Vec<&'static str> {
        vec![models::USERS]
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = json!({
            "description": "Error",
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } } }
        });
        let session = json!({
            "description": "Open session",
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Session" } } }
        });

        Some(json!({
            "paths": {
                "/sign-up": {
                    "post": {
                        "summary": "Create an account and its user record",
                        "tags": ["Users"],
                        "requestBody": {
                            "required": true,
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/SignUp" } } }
                        },
                        "responses": { "201": session, "409": error, "422": error }
                    }
                },
                "/sign-in": {
                    "post": {
                        "summary": "Sign in with email and password",
                        "tags": ["Users"],
                        "requestBody": {
                            "required": true,
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/SignIn" } } }
                        },
                        "responses": { "200": session, "401": error }
                    }
                },
                "/sign-out": {
                    "post": {
                        "summary": "Close the current session",
                        "tags": ["Users"],
                        "security": [{ "bearer": [] }],
                        "responses": { "204": { "description": "Signed out" }, "401": error }
                    }
                },
                "/me": {
                    "get": {
                        "summary": "Profile of the signed-in user",
                        "tags": ["Users"],
                        "security": [{ "bearer": [] }],
                        "responses": {
                            "200": {
                                "description": "User record",
                                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/User" } } }
                            },
                            "401": error,
                            "404": error
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "User": {
                        "type": "object",
                        "properties": {
                            "userID": { "type": "string" },
                            "email": { "type": "string", "format": "email" },
                            "fullName": { "type": "string" },
                            "isAdmin": { "type": "boolean" }
                        },
                        "required": ["userID", "email", "fullName", "isAdmin"]
                    },
                    "SignUp": {
                        "type": "object",
                        "properties": {
                            "email": { "type": "string", "format": "email" },
                            "password": { "type": "string" },
                            "fullName": { "type": "string" },
                            "userID": { "type": "string" }
                        },
                        "required": ["email", "password", "fullName", "userID"]
                    },
                    "SignIn": {
                        "type": "object",
                        "properties": {
                            "email": { "type": "string", "format": "email" },
                            "password": { "type": "string" }
                        },
                        "required": ["email", "password"]
                    },
                    "Session": {
                        "type": "object",
                        "properties": {
                            "token": { "type": "string" },
                            "email": { "type": ["string", "null"] }
                        },
                        "required": ["token"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "users module stopped");
        Ok(())
    }
}

pub fn create_module(state: AppState) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(UsersModule::new(state))
}
