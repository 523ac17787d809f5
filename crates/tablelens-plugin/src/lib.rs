//! tablelens language service plugin
//!
//! This crate wires the tablelens engine into a host language service,
//! adding navigation for table names written as string literals:
//!
//! - **Go-to-definition**: jump from `ctx.db.query("users")` to the `users`
//!   table in the schema
//! - **Hover**: show the table's declaration source
//! - **Find references**: list every string literal naming the table
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tablelens_plugin::{create, init_logging, load_config};
//!
//! let config = load_config(project_root)?;
//! init_logging(&config);
//! let service = create(host_service, config);
//! ```
//!
//! The returned proxy implements the same `LanguageService` trait as the
//! host and can be handed back in its place.

pub mod config;
pub mod logging;
pub mod lsp;
pub mod proxy;

pub use config::load_config;
pub use logging::init_logging;
pub use proxy::CapabilityProxy;

use tablelens_core::PluginConfig;
use tablelens_engine::PluginContext;
use tablelens_host::LanguageService;

/// Wrap a host service for one project
pub fn create<S: LanguageService>(service: S, config: PluginConfig) -> CapabilityProxy<S> {
    tracing::info!(
        root = %config.project_root.display(),
        schema = %config.conventional_schema_path(),
        "tablelens plugin created"
    );
    CapabilityProxy::with_context(service, PluginContext::new(config))
}
