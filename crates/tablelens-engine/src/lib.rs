//! tablelens engine - table name resolution
//!
//! This crate implements the resolution pipeline behind tablelens:
//! - Schema file location (cached hint plus fallbacks)
//! - Table catalog extraction from the schema's inferred type
//! - Name resolution for identifiers and string literals
//! - Reference, definition and quick-info synthesis
//!
//! Every entry point is a pure read over the host's current program. "Not a
//! table" is always `None`; [`AugmentError`] is reserved for inconsistent
//! host data and means a bug somewhere.

pub mod error;
pub mod context;
pub mod traverse;
pub mod locator;
pub mod catalog;
pub mod resolver;
pub mod references;
pub mod definition;
pub mod hover;

pub use error::{AugmentError, Result};
pub use context::{PluginContext, SchemaLocationHint};
pub use locator::locate_schema_file;
pub use catalog::{extract_catalog, is_valid_table_name, TableCatalog, TableCatalogEntry};
pub use resolver::{resolve_at_identifier, resolve_at_string_literal, TableMatch};
pub use references::{augment_references, find_string_references};
pub use definition::synthesize_definition;
pub use hover::{synthesize_quick_info, trim_indent};
