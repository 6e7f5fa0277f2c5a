use async_trait::async_trait;
use axum::Router;

use crate::settings::Settings;

/// What a module can see while the application boots.
pub struct InitCtx<'a> {
    pub settings: &'a Settings,
}

impl<'a> InitCtx<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }
}

/// A marketplace feature mounted by the registry.
///
/// Lifecycle: every module is initialized, then every module is started,
/// and on shutdown they are stopped in reverse registration order.
#[async_trait]
pub trait Module: Sync + Send {
    /// Mount point under `/api/` and key in logs
    fn name(&self) -> &'static str;

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Handlers served under `/api/{name}`
    fn routes(&self) -> Router {
        Router::new()
    }

    /// OpenAPI fragment with `paths` relative to the mount point and
    /// optional `components.schemas`
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Document store collections this module reads or writes
    fn collections(&self) -> Vec<&'static str> {
        vec![]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
