//! Find-references augmentation
//!
//! The host already reports the identifier usages of a table property. What
//! it cannot see are the string literals naming the table
//! (`ctx.db.query("users")`); those are appended to the first group.

use crate::context::PluginContext;
use crate::error::Result;
use crate::resolver::resolve_at_identifier;
use crate::traverse::collect_string_literals;
use tablelens_core::{ReferenceEntry, ReferencedSymbol, TextSpan};
use tablelens_host::{Program, SourceFile};

/// Extend a host find-references result with string-literal usages
///
/// Only applies when the first group's definition is exactly a table
/// declaration; every other result comes back unchanged.
pub fn augment_references<P: Program>(
    ctx: &PluginContext,
    program: &P,
    mut groups: Vec<ReferencedSymbol>,
) -> Result<Vec<ReferencedSymbol>> {
    let Some(first) = groups.first() else {
        return Ok(groups);
    };

    let definition = &first.definition;
    let Some(table) = resolve_at_identifier(
        ctx,
        program,
        &definition.file_name,
        definition.text_span.start,
        definition.text_span.length,
    )?
    else {
        return Ok(groups);
    };

    if !table
        .declaration
        .starts_at(&definition.file_name, definition.text_span.start)
    {
        tracing::trace!(table = %table.table_name, "definition is not the table declaration");
        return Ok(groups);
    }

    let found = find_string_references(program, &table.table_name);
    tracing::debug!(table = %table.table_name, count = found.len(), "string references found");
    groups[0].references.extend(found);

    Ok(groups)
}

/// Every string literal in non-declaration files whose content is `name`
///
/// Files come in program order, literals in document order.
pub fn find_string_references<P: Program>(program: &P, name: &str) -> Vec<ReferenceEntry> {
    program
        .source_files()
        .into_iter()
        .filter(|file| !file.is_declaration_file())
        .flat_map(|file| {
            collect_string_literals(file, name)
                .into_iter()
                .map(move |node| {
                    let span = TextSpan::new(file.start(node) + 1, file.width(node).saturating_sub(2));
                    ReferenceEntry::in_string(file.file_name(), span)
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tablelens_core::{ReferencedSymbolDefinitionInfo, ScriptElementKind};
    use tablelens_host::{LanguageService, MockLanguageService};

    const SCHEMA: &str = "export default defineSchema({\n  users: defineTable({}),\n});\n";
    const QUERIES: &str = "db.query(\"users\");\ndb.get('users', `users`);\nconst users = 1;\n";

    fn group(file_name: &str, start: usize, length: usize) -> ReferencedSymbol {
        ReferencedSymbol {
            definition: ReferencedSymbolDefinitionInfo {
                file_name: file_name.to_string(),
                text_span: TextSpan::new(start, length),
                context_span: None,
                kind: ScriptElementKind::MemberVariableElement,
                name: "users".to_string(),
                container_kind: ScriptElementKind::Unknown,
                container_name: String::new(),
                display_parts: Vec::new(),
            },
            references: Vec::new(),
        }
    }

    fn service() -> MockLanguageService {
        MockLanguageService::builder()
            .file("convex/schema.ts", SCHEMA)
            .file("convex/queries.ts", QUERIES)
            .declaration_file("convex/_generated/api.d.ts", "declare const t: \"users\";")
            .schema("convex/schema.ts", &["users"])
            .build()
    }

    #[test]
    fn string_references_skip_declaration_files() {
        let service = service();
        let found = find_string_references(service.program().unwrap(), "users");

        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|r| r.file_name == "convex/queries.ts"));
        assert_eq!(found[0].text_span, TextSpan::new(QUERIES.find("users").unwrap(), 5));
        assert!(found.iter().all(|r| r.is_in_string == Some(true)));
    }

    #[test]
    fn appends_to_first_group_only() {
        let service = service();
        let ctx = PluginContext::default();
        let start = SCHEMA.find("users").unwrap();
        let groups = vec![group("convex/schema.ts", start, 5), group("convex/queries.ts", 0, 2)];

        let augmented = augment_references(&ctx, service.program().unwrap(), groups.clone()).unwrap();
        assert_eq!(augmented[0].references.len(), 3);
        assert_eq!(augmented[1], groups[1]);
    }

    #[test]
    fn unrelated_definition_is_unchanged() {
        let service = service();
        let ctx = PluginContext::default();

        // the local `users` constant shares the name but is not the declaration
        let start = QUERIES.find("users = 1").unwrap();
        let groups = vec![group("convex/queries.ts", start, 5)];

        let result = augment_references(&ctx, service.program().unwrap(), groups.clone()).unwrap();
        assert_eq!(result, groups);
    }

    #[test]
    fn empty_result_passes_through() {
        let service = service();
        let ctx = PluginContext::default();
        let result = augment_references(&ctx, service.program().unwrap(), Vec::new()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn bad_definition_span_is_fault() {
        let service = service();
        let ctx = PluginContext::default();
        let groups = vec![group("convex/schema.ts", SCHEMA.len(), 5)];

        assert!(augment_references(&ctx, service.program().unwrap(), groups).is_err());
    }
}
