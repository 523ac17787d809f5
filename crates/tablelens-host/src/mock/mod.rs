//! Mock language service for testing
//!
//! This host keeps every file in memory and answers the host's own
//! operations from stubs registered up front. It is useful for:
//! - Unit testing the resolution pipeline without a real compiler
//! - Simulating host results the proxy must pass through untouched
//! - Simulating faults (panicking type queries, dangling declarations)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tablelens_host::MockLanguageService;
//!
//! let service = MockLanguageService::builder()
//!     .file("convex/schema.ts", SCHEMA)
//!     .file("convex/tasks.ts", TASKS)
//!     .schema("convex/schema.ts", &["tasks", "users"])
//!     .build();
//! ```
//!
//! The schema file's default export gets a generic type whose first type
//! argument lists the given tables. Each table's declaration is the first
//! object literal member with that name, searched in the schema file first
//! and then in every other file.

mod file;

pub use file::MockFile;

use crate::host::{LanguageService, Program, SourceFile, TypeChecker};
use crate::syntax::{NodeId, NodeRef, SymbolId, TypeId};
use std::collections::HashMap;
use tablelens_core::{
    CompletionInfo, DefinitionInfoAndBoundSpan, Diagnostic, QuickInfo, ReferencedSymbol, TextSpan,
};

#[derive(Debug, Clone, Default)]
struct MockType {
    arguments: Vec<TypeId>,
    properties: Vec<SymbolId>,
}

#[derive(Debug, Clone)]
struct MockSymbol {
    name: String,
    declaration: Option<NodeRef>,
}

/// Type checker answering from a fixed type table
#[derive(Debug, Clone, Default)]
pub struct MockTypeChecker {
    expression_types: HashMap<(String, NodeId), TypeId>,
    types: Vec<MockType>,
    symbols: Vec<MockSymbol>,
    panic_on_query: bool,
}

impl MockTypeChecker {
    fn add_type(&mut self, ty: MockType) -> TypeId {
        self.types.push(ty);
        TypeId(self.types.len() as u32 - 1)
    }

    fn add_symbol(&mut self, symbol: MockSymbol) -> SymbolId {
        self.symbols.push(symbol);
        SymbolId(self.symbols.len() as u32 - 1)
    }

    fn check_panic(&self) {
        if self.panic_on_query {
            panic!("mock type checker: injected failure");
        }
    }
}

impl TypeChecker for MockTypeChecker {
    fn type_at_location(&self, file_name: &str, node: NodeId) -> Option<TypeId> {
        self.check_panic();
        self.expression_types
            .get(&(file_name.to_string(), node))
            .copied()
    }

    fn type_arguments(&self, ty: TypeId) -> Vec<TypeId> {
        self.types
            .get(ty.0 as usize)
            .map(|t| t.arguments.clone())
            .unwrap_or_default()
    }

    fn properties_of_type(&self, ty: TypeId) -> Vec<SymbolId> {
        self.types
            .get(ty.0 as usize)
            .map(|t| t.properties.clone())
            .unwrap_or_default()
    }

    fn symbol_name(&self, symbol: SymbolId) -> String {
        self.symbols
            .get(symbol.0 as usize)
            .map(|s| s.name.clone())
            .unwrap_or_default()
    }

    fn value_declaration(&self, symbol: SymbolId) -> Option<NodeRef> {
        self.symbols.get(symbol.0 as usize)?.declaration.clone()
    }
}

/// In-memory program
#[derive(Debug, Clone, Default)]
pub struct MockProgram {
    files: Vec<MockFile>,
    checker: MockTypeChecker,
}

impl MockProgram {
    pub fn file(&self, file_name: &str) -> Option<&MockFile> {
        self.files.iter().find(|f| f.file_name() == file_name)
    }
}

impl Program for MockProgram {
    type File = MockFile;
    type Checker = MockTypeChecker;

    fn source_files(&self) -> Vec<&MockFile> {
        self.files.iter().collect()
    }

    fn source_file(&self, file_name: &str) -> Option<&MockFile> {
        self.file(file_name)
    }

    fn type_checker(&self) -> &MockTypeChecker {
        &self.checker
    }
}

#[derive(Debug, Clone)]
struct Stub<T> {
    file_name: String,
    span: TextSpan,
    value: T,
}

fn lookup<'a, T>(stubs: &'a [Stub<T>], file_name: &str, position: usize) -> Option<&'a T> {
    stubs
        .iter()
        .find(|s| s.file_name == file_name && s.span.contains(position))
        .map(|s| &s.value)
}

/// Mock host language service
#[derive(Debug, Clone, Default)]
pub struct MockLanguageService {
    program: Option<MockProgram>,
    references: Vec<Stub<Vec<ReferencedSymbol>>>,
    definitions: Vec<Stub<DefinitionInfoAndBoundSpan>>,
    quick_infos: Vec<Stub<QuickInfo>>,
    completions: Vec<Stub<CompletionInfo>>,
    diagnostics: HashMap<String, Vec<Diagnostic>>,
}

impl MockLanguageService {
    pub fn builder() -> MockServiceBuilder {
        MockServiceBuilder::default()
    }
}

impl LanguageService for MockLanguageService {
    type Program = MockProgram;

    fn program(&self) -> Option<&MockProgram> {
        self.program.as_ref()
    }

    fn find_references(&self, file_name: &str, position: usize) -> Option<Vec<ReferencedSymbol>> {
        lookup(&self.references, file_name, position).cloned()
    }

    fn get_definition_and_bound_span(
        &self,
        file_name: &str,
        position: usize,
    ) -> Option<DefinitionInfoAndBoundSpan> {
        lookup(&self.definitions, file_name, position).cloned()
    }

    fn get_quick_info_at_position(&self, file_name: &str, position: usize) -> Option<QuickInfo> {
        lookup(&self.quick_infos, file_name, position).cloned()
    }

    fn get_semantic_diagnostics(&self, file_name: &str) -> Vec<Diagnostic> {
        self.diagnostics.get(file_name).cloned().unwrap_or_default()
    }

    fn get_completions_at_position(
        &self,
        file_name: &str,
        position: usize,
    ) -> Option<CompletionInfo> {
        lookup(&self.completions, file_name, position).cloned()
    }
}

#[derive(Debug, Clone)]
struct MockSchema {
    file_name: String,
    tables: Vec<String>,
}

/// Builder for [`MockLanguageService`]
#[derive(Debug, Clone, Default)]
pub struct MockServiceBuilder {
    files: Vec<MockFile>,
    schema: Option<MockSchema>,
    declaration_overrides: HashMap<String, Option<NodeRef>>,
    non_generic_schema: bool,
    panic_on_type_queries: bool,
    without_program: bool,
    service: MockLanguageService,
}

impl MockServiceBuilder {
    /// Add a regular source file
    pub fn file(mut self, file_name: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.push(MockFile::parse(file_name, text));
        self
    }

    /// Add a declaration-only file
    pub fn declaration_file(mut self, file_name: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.push(MockFile::declaration(file_name, text));
        self
    }

    /// Give the default export of `file_name` a schema type listing `tables`
    pub fn schema(mut self, file_name: impl Into<String>, tables: &[&str]) -> Self {
        self.schema = Some(MockSchema {
            file_name: file_name.into(),
            tables: tables.iter().map(|t| t.to_string()).collect(),
        });
        self
    }

    /// Override the declaration reported for one table (`None` = unresolvable)
    pub fn table_declaration(mut self, table: impl Into<String>, declaration: Option<NodeRef>) -> Self {
        self.declaration_overrides.insert(table.into(), declaration);
        self
    }

    /// Report the schema value's type without type arguments
    pub fn non_generic_schema(mut self) -> Self {
        self.non_generic_schema = true;
        self
    }

    /// Make every `type_at_location` call panic
    pub fn panic_on_type_queries(mut self) -> Self {
        self.panic_on_type_queries = true;
        self
    }

    /// The service reports no program at all
    pub fn without_program(mut self) -> Self {
        self.without_program = true;
        self
    }

    /// Host find-references result for positions inside `span`
    pub fn references(
        mut self,
        file_name: impl Into<String>,
        span: TextSpan,
        groups: Vec<ReferencedSymbol>,
    ) -> Self {
        self.service.references.push(Stub {
            file_name: file_name.into(),
            span,
            value: groups,
        });
        self
    }

    /// Host go-to-definition result for positions inside `span`
    pub fn definition(
        mut self,
        file_name: impl Into<String>,
        span: TextSpan,
        result: DefinitionInfoAndBoundSpan,
    ) -> Self {
        self.service.definitions.push(Stub {
            file_name: file_name.into(),
            span,
            value: result,
        });
        self
    }

    /// Host quick-info result for positions inside `span`
    pub fn quick_info(mut self, file_name: impl Into<String>, span: TextSpan, info: QuickInfo) -> Self {
        self.service.quick_infos.push(Stub {
            file_name: file_name.into(),
            span,
            value: info,
        });
        self
    }

    /// Host completion result for positions inside `span`
    pub fn completions(
        mut self,
        file_name: impl Into<String>,
        span: TextSpan,
        info: CompletionInfo,
    ) -> Self {
        self.service.completions.push(Stub {
            file_name: file_name.into(),
            span,
            value: info,
        });
        self
    }

    /// Host diagnostics for a file
    pub fn diagnostics(mut self, file_name: impl Into<String>, diagnostics: Vec<Diagnostic>) -> Self {
        self.service.diagnostics.insert(file_name.into(), diagnostics);
        self
    }

    pub fn build(self) -> MockLanguageService {
        let mut service = self.service;
        if self.without_program {
            return service;
        }

        let mut checker = MockTypeChecker {
            panic_on_query: self.panic_on_type_queries,
            ..MockTypeChecker::default()
        };

        if let Some(mock_schema) = &self.schema {
            register_schema(
                &mut checker,
                &self.files,
                mock_schema,
                &self.declaration_overrides,
                self.non_generic_schema,
            );
        }

        service.program = Some(MockProgram {
            files: self.files,
            checker,
        });
        service
    }
}

fn register_schema(
    checker: &mut MockTypeChecker,
    files: &[MockFile],
    mock_schema: &MockSchema,
    overrides: &HashMap<String, Option<NodeRef>>,
    non_generic: bool,
) {
    let Some(schema_file) = files.iter().find(|f| f.file_name() == mock_schema.file_name) else {
        tracing::debug!(file = %mock_schema.file_name, "mock schema file not registered");
        return;
    };
    let Some(expression) = schema_file.default_export_expression() else {
        return;
    };

    // Schema file first, then the rest in program order
    let search_order: Vec<&MockFile> = std::iter::once(schema_file)
        .chain(files.iter().filter(|f| f.file_name() != mock_schema.file_name))
        .collect();

    let mut properties = Vec::new();
    for table in &mock_schema.tables {
        let declaration = match overrides.get(table) {
            Some(declaration) => declaration.clone(),
            None => search_order.iter().find_map(|file| {
                file.find_property(table).map(|node| file.node_ref(node))
            }),
        };
        properties.push(checker.add_symbol(MockSymbol {
            name: table.clone(),
            declaration,
        }));
    }

    let table_map = checker.add_type(MockType {
        arguments: Vec::new(),
        properties,
    });
    let arguments = if non_generic { Vec::new() } else { vec![table_map] };
    let schema_type = checker.add_type(MockType {
        arguments,
        properties: Vec::new(),
    });

    checker
        .expression_types
        .insert((mock_schema.file_name.clone(), expression), schema_type);
}
