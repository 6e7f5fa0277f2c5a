pub mod books;
pub mod requests;
pub mod users;

use bookswap_kernel::ModuleRegistry;

use crate::state::AppState;

/// Register all marketplace modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, state: &AppState) {
    registry.register(users::create_module(state.clone()));
    registry.register(books::create_module(state.clone()));
    registry.register(requests::create_module(state.clone()));
}
