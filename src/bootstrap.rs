//! Wiring from settings to a running server.

use std::sync::Arc;

use anyhow::Context;
use bookswap_auth::MemoryAuthProvider;
use bookswap_kernel::{settings::Settings, InitCtx, ModuleRegistry};
use bookswap_store::{Fixture, MemoryDocumentStore};

use crate::{modules, state::AppState};

/// Build the shared capabilities, seeding the store from the configured fixture.
pub fn build_state(settings: &Settings) -> anyhow::Result<AppState> {
    let store = match &settings.store.fixture_path {
        Some(path) => {
            let fixture = Fixture::load(path)
                .with_context(|| format!("failed to load fixture {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                collections = ?fixture.summary(),
                "seeding document store from fixture"
            );
            MemoryDocumentStore::with_fixture(fixture)
        }
        None => {
            tracing::info!("starting with an empty document store");
            MemoryDocumentStore::new()
        }
    };
    let auth = MemoryAuthProvider::new(settings.auth.min_password_length);

    Ok(AppState::new(Arc::new(store), Arc::new(auth)))
}

pub fn build_registry(state: &AppState) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, state);
    registry
}

/// Initialize and start every module, serve until a shutdown signal, then stop
/// the modules in reverse order.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let state = build_state(&settings)?;
    let registry = build_registry(&state);
    let ctx = InitCtx::new(&settings);

    tracing::info!(
        env = ?settings.environment,
        modules = registry.module_count(),
        "bookswap bootstrap starting"
    );

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = bookswap_http::start_server(&registry, &settings, bookswap_http::shutdown_signal()).await;

    registry.stop_modules().await?;
    served
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_mounts_every_module_in_order() {
        let state = build_state(&Settings::default()).unwrap();
        let registry = build_registry(&state);

        let names: Vec<_> = registry.modules().map(|module| module.name()).collect();
        assert_eq!(names, vec!["users", "books", "requests"]);
    }

    #[test]
    fn missing_fixture_is_reported() {
        let mut settings = Settings::default();
        settings.store.fixture_path = Some("/nonexistent/bookswap.json".into());

        let err = build_state(&settings).unwrap_err();
        assert!(err.to_string().contains("failed to load fixture"));
    }

    #[tokio::test]
    async fn fixture_seeds_the_store() {
        let path = std::env::temp_dir().join(format!("bookswap-seed-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"books":[{"id":"b1","title":"Dune","price":10}]}"#).unwrap();

        let mut settings = Settings::default();
        settings.store.fixture_path = Some(path.clone());
        let state = build_state(&settings).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(state.store.get("books", "b1").await.unwrap().is_some());
    }
}
