//! Bookswap application library
//!
//! Book listings, purchase requests and swap requests served as modules on
//! top of the Bookswap kernel. Every flow lives in a module's `service`
//! submodule as a plain async function over the document store and
//! authentication capabilities; HTTP handlers only adapt them.

pub mod bootstrap;
pub mod error;
pub mod modules;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{MarketError, MarketResult};
pub use state::AppState;
