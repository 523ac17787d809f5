//! tablelens core
//!
//! Host-protocol data model shared by every tablelens crate.
//! Field names serialize in the host's camelCase wire form - do not rename them.

pub mod span;
pub mod protocol;
pub mod diagnostic;
pub mod config;
pub mod project;

pub use span::TextSpan;
pub use protocol::{
    CompletionEntry, CompletionInfo, DefinitionInfo, DefinitionInfoAndBoundSpan, QuickInfo,
    ReferenceEntry, ReferencedSymbol, ReferencedSymbolDefinitionInfo, ScriptElementKind,
    SymbolDisplayPart, SymbolDisplayPartKind,
};
pub use diagnostic::{Diagnostic, DiagnosticCategory};
pub use config::{ConfigError, PluginConfig};
pub use project::{ProjectConfig, ProjectConfigError};
