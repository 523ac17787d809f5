//! Table name resolution for identifiers and string literals

use crate::catalog::{extract_catalog, is_valid_table_name};
use crate::context::PluginContext;
use crate::error::{slice, Result};
use crate::locator::locate_schema_file;
use crate::traverse::{find_smallest_node_at, literal_content};
use tablelens_core::TextSpan;
use tablelens_host::{NodeRef, Program, SourceFile};

/// A token that names a declared table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMatch {
    pub table_name: String,
    pub declaration: NodeRef,

    /// Span of the name itself; never includes string delimiters
    pub text_span: TextSpan,
}

/// Resolve the raw text at `[start, start + length)` of `file_name`
///
/// Errors only when the span does not fit the file's text.
pub fn resolve_at_identifier<P: Program>(
    ctx: &PluginContext,
    program: &P,
    file_name: &str,
    start: usize,
    length: usize,
) -> Result<Option<TableMatch>> {
    let Some(file) = program.source_file(file_name) else {
        return Ok(None);
    };
    let candidate = slice(file_name, file.text(), start, start.saturating_add(length))?;

    Ok(resolve_name(ctx, program, candidate, start))
}

/// Resolve the string or template literal covering `position`
pub fn resolve_at_string_literal<P: Program>(
    ctx: &PluginContext,
    program: &P,
    file_name: &str,
    position: usize,
) -> Option<TableMatch> {
    let file = program.source_file(file_name)?;
    let node = find_smallest_node_at(file, position)?;
    if !file.kind(node).is_string_like() {
        return None;
    }
    let content = literal_content(file, node)?;

    resolve_name(ctx, program, content, file.start(node) + 1)
}

fn resolve_name<P: Program>(
    ctx: &PluginContext,
    program: &P,
    candidate: &str,
    start: usize,
) -> Option<TableMatch> {
    if !is_valid_table_name(candidate) {
        return None;
    }

    let schema_file = locate_schema_file(ctx, program)?;
    let catalog = extract_catalog(program, schema_file)?;
    let entry = catalog.get(candidate)?;

    Some(TableMatch {
        table_name: entry.table_name.clone(),
        declaration: entry.declaration.clone(),
        text_span: TextSpan::new(start, candidate.len()),
    })
}
