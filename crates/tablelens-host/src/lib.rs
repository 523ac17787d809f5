//! Host capability set consumed by tablelens
//!
//! The host language service owns programs, syntax trees and type
//! information. tablelens only reads them through the traits in [`host`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use tablelens_host::{LanguageService, Program, SourceFile};
//!
//! let program = service.program()?;
//! for file in program.source_files() {
//!     println!("{} ({} bytes)", file.file_name(), file.text().len());
//! }
//! ```
//!
//! [`mock`] provides an in-memory host for tests and demos.

pub mod syntax;
pub mod host;
pub mod mock;

pub use syntax::{NodeId, NodeRef, SymbolId, SyntaxKind, TypeId};
pub use host::{LanguageService, Program, SourceFile, TypeChecker};
pub use mock::{MockFile, MockLanguageService, MockProgram, MockServiceBuilder, MockTypeChecker};
