//! Table catalog extraction
//!
//! The schema declaration's inferred type is generic over the table map:
//! `SchemaDefinition<{ users: TableDefinition<...>, ... }, ...>`. The catalog
//! is the property list of that first type argument, each property paired
//! with the syntax node that declared it.

use crate::traverse::default_export_expression;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tablelens_host::{NodeRef, Program, SourceFile, TypeChecker};

static TABLE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").expect("table name pattern is a valid regex")
});

/// Whether `name` could possibly name a table
///
/// Cheap syntactic gate checked before any program-wide work.
pub fn is_valid_table_name(name: &str) -> bool {
    TABLE_NAME_REGEX.is_match(name)
}

/// One declared table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCatalogEntry {
    pub table_name: String,

    /// Node declaring the table inside the table map
    pub declaration: NodeRef,
}

/// Tables declared by the schema, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCatalog {
    entries: BTreeMap<String, TableCatalogEntry>,
}

impl TableCatalog {
    pub fn get(&self, table_name: &str) -> Option<&TableCatalogEntry> {
        self.entries.get(table_name)
    }

    pub fn contains(&self, table_name: &str) -> bool {
        self.entries.contains_key(table_name)
    }

    /// Table names in sorted order
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First declaration wins for a repeated name
    fn insert(&mut self, entry: TableCatalogEntry) {
        self.entries
            .entry(entry.table_name.clone())
            .or_insert(entry);
    }
}

/// Build the catalog from the schema file's default export
///
/// `None` when the file has no default export, its type is unknown, or the
/// type is not generic.
pub fn extract_catalog<P: Program>(program: &P, schema_file: &P::File) -> Option<TableCatalog> {
    let expression = default_export_expression(schema_file)?;
    let checker = program.type_checker();

    let schema_type = checker.type_at_location(schema_file.file_name(), expression)?;
    let table_map = checker.type_arguments(schema_type).into_iter().next()?;

    let mut catalog = TableCatalog::default();
    for property in checker.properties_of_type(table_map) {
        let table_name = checker.symbol_name(property);
        if !is_valid_table_name(&table_name) {
            tracing::trace!(table = %table_name, "skipping property with non-table name");
            continue;
        }

        let Some(declaration) = checker.value_declaration(property) else {
            tracing::trace!(table = %table_name, "skipping property without declaration");
            continue;
        };

        catalog.insert(TableCatalogEntry {
            table_name,
            declaration,
        });
    }

    Some(catalog)
}
