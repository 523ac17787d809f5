//! Host capability traits

use crate::syntax::{NodeId, NodeRef, SymbolId, SyntaxKind, TypeId};
use tablelens_core::{
    CompletionInfo, DefinitionInfoAndBoundSpan, Diagnostic, QuickInfo, ReferencedSymbol,
};

/// Read-only snapshot of one file: raw text plus syntax tree
pub trait SourceFile {
    fn file_name(&self) -> &str;

    fn text(&self) -> &str;

    /// Declaration-only files (`.d.ts`) never contain table references
    fn is_declaration_file(&self) -> bool;

    fn root(&self) -> NodeId;

    /// Direct children of `node`, in source order
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    fn kind(&self, node: NodeId) -> SyntaxKind;

    /// Start offset including leading trivia
    fn full_start(&self, node: NodeId) -> usize;

    /// Start offset of the node's first token
    fn start(&self, node: NodeId) -> usize;

    /// Exclusive end offset
    fn end(&self, node: NodeId) -> usize;

    fn width(&self, node: NodeId) -> usize {
        self.end(node).saturating_sub(self.start(node))
    }

    /// Source text of `node` without leading trivia
    ///
    /// `None` when the host reports a range outside the text.
    fn node_text(&self, node: NodeId) -> Option<&str> {
        self.text().get(self.start(node)..self.end(node))
    }

    /// Detach a weak reference to `node`
    fn node_ref(&self, node: NodeId) -> NodeRef {
        NodeRef::new(
            self.file_name(),
            self.full_start(node),
            self.start(node),
            self.end(node),
        )
    }
}

/// Type information queries
pub trait TypeChecker {
    /// Inferred type of an expression node
    fn type_at_location(&self, file_name: &str, node: NodeId) -> Option<TypeId>;

    /// Generic type arguments; empty for non-generic types
    fn type_arguments(&self, ty: TypeId) -> Vec<TypeId>;

    /// Named properties of an object-like type
    fn properties_of_type(&self, ty: TypeId) -> Vec<SymbolId>;

    fn symbol_name(&self, symbol: SymbolId) -> String;

    /// Node that declares the symbol's value, if the host can resolve one
    fn value_declaration(&self, symbol: SymbolId) -> Option<NodeRef>;
}

/// All source files of a project plus type checking
pub trait Program {
    type File: SourceFile;
    type Checker: TypeChecker;

    /// Every file, in the host's enumeration order
    fn source_files(&self) -> Vec<&Self::File>;

    fn source_file(&self, file_name: &str) -> Option<&Self::File>;

    fn type_checker(&self) -> &Self::Checker;
}

/// The host language service
///
/// Positions are byte offsets into the named file.
pub trait LanguageService {
    type Program: Program;

    /// Current program snapshot, if the host has one
    fn program(&self) -> Option<&Self::Program>;

    fn find_references(&self, file_name: &str, position: usize) -> Option<Vec<ReferencedSymbol>>;

    fn get_definition_and_bound_span(
        &self,
        file_name: &str,
        position: usize,
    ) -> Option<DefinitionInfoAndBoundSpan>;

    fn get_quick_info_at_position(&self, file_name: &str, position: usize) -> Option<QuickInfo>;

    fn get_semantic_diagnostics(&self, file_name: &str) -> Vec<Diagnostic>;

    fn get_completions_at_position(
        &self,
        file_name: &str,
        position: usize,
    ) -> Option<CompletionInfo>;
}
