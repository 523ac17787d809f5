//! Quick info for table names in string literals

use crate::context::PluginContext;
use crate::error::{slice, AugmentError, Result};
use crate::resolver::resolve_at_string_literal;
use tablelens_core::{QuickInfo, ScriptElementKind, SymbolDisplayPart};
use tablelens_host::{Program, SourceFile};

/// Quick info showing the source of the table's declaration
///
/// The declaration text includes its leading comments, re-indented so the
/// first line starts at column zero.
pub fn synthesize_quick_info<P: Program>(
    ctx: &PluginContext,
    program: &P,
    file_name: &str,
    position: usize,
) -> Result<Option<QuickInfo>> {
    let Some(table) = resolve_at_string_literal(ctx, program, file_name, position) else {
        return Ok(None);
    };

    let declaration = &table.declaration;
    let file = program
        .source_file(&declaration.file_name)
        .ok_or_else(|| AugmentError::MissingSourceFile(declaration.file_name.clone()))?;
    let source = slice(
        &declaration.file_name,
        file.text(),
        declaration.full_start,
        declaration.end,
    )?;

    Ok(Some(QuickInfo {
        kind: ScriptElementKind::String,
        kind_modifiers: String::new(),
        text_span: table.text_span,
        display_parts: vec![SymbolDisplayPart::text(trim_indent(source))],
        documentation: None,
    }))
}

/// Remove the indentation of the first non-blank line from every line
///
/// Blank lines before it are dropped. Lines indented less than it are kept
/// as they are.
pub fn trim_indent(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let first = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(0);

    let indent_len = lines[first].len() - lines[first].trim_start().len();
    let indent = &lines[first][..indent_len];

    lines[first..]
        .iter()
        .map(|&line| line.strip_prefix(indent).unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tablelens_core::TextSpan;
    use tablelens_host::{LanguageService, MockLanguageService, NodeRef};

    const SCHEMA: &str = r#"export default defineSchema({
  // Map markers
  markers: defineTable({
    x: v.number(),
  }),
});
"#;
    const MAP: &str = "const all = await ctx.db.query(\"markers\").collect();\n";

    #[test]
    fn trims_uniform_indent() {
        let text = "\n  markers: defineTable({\n    x: v.number(),\n  })";
        assert_eq!(trim_indent(text), "markers: defineTable({\n  x: v.number(),\n})");
    }

    #[test]
    fn keeps_lines_without_the_indent() {
        assert_eq!(trim_indent("    a\n  b\n      c"), "a\n  b\n  c");
    }

    #[test]
    fn blank_input() {
        assert_eq!(trim_indent(""), "");
        assert_eq!(trim_indent("  \n  "), "\n");
        assert_eq!(trim_indent("\t\tx\n\t\ty"), "x\ny");
    }

    #[test]
    fn hover_shows_declaration_source() {
        let service = MockLanguageService::builder()
            .file("convex/schema.ts", SCHEMA)
            .file("convex/map.ts", MAP)
            .schema("convex/schema.ts", &["markers"])
            .build();
        let ctx = PluginContext::default();
        let position = MAP.find("markers").unwrap();

        let info = synthesize_quick_info(&ctx, service.program().unwrap(), "convex/map.ts", position)
            .unwrap()
            .unwrap();

        assert_eq!(info.kind, ScriptElementKind::String);
        assert_eq!(info.kind_modifiers, "");
        assert_eq!(info.text_span, TextSpan::new(position, 7));
        assert_eq!(info.display_parts.len(), 1);
        assert_eq!(info.display_parts[0].kind, "text");
        assert_eq!(
            info.display_text(),
            "// Map markers\nmarkers: defineTable({\n  x: v.number(),\n})"
        );
    }

    #[test]
    fn dangling_declaration_is_fault() {
        let service = MockLanguageService::builder()
            .file("convex/schema.ts", SCHEMA)
            .file("convex/map.ts", MAP)
            .schema("convex/schema.ts", &["markers"])
            .table_declaration("markers", Some(NodeRef::new("convex/gone.ts", 0, 0, 4)))
            .build();
        let ctx = PluginContext::default();
        let position = MAP.find("markers").unwrap();

        let err = synthesize_quick_info(&ctx, service.program().unwrap(), "convex/map.ts", position).unwrap_err();
        assert!(matches!(err, AugmentError::MissingSourceFile(name) if name == "convex/gone.ts"));
    }

    #[test]
    fn declaration_past_end_of_file_is_fault() {
        let service = MockLanguageService::builder()
            .file("convex/schema.ts", SCHEMA)
            .file("convex/map.ts", MAP)
            .schema("convex/schema.ts", &["markers"])
            .table_declaration("markers", Some(NodeRef::new("convex/schema.ts", 10, 12, 4096)))
            .build();
        let ctx = PluginContext::default();
        let position = MAP.find("markers").unwrap();

        let err = synthesize_quick_info(&ctx, service.program().unwrap(), "convex/map.ts", position).unwrap_err();
        assert!(matches!(err, AugmentError::InvalidSpan { end: 4096, .. }));
    }
}
