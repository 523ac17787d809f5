//! Conversion of tablelens results into LSP shapes
//!
//! Results carry byte offsets; LSP positions count UTF-16 code units per
//! line. Callers supply the file text through a [`LineIndex`] and turn file
//! names into URIs themselves.

use lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Position, Range};
use tablelens_core::{DefinitionInfoAndBoundSpan, QuickInfo, ReferencedSymbol, TextSpan};

/// Byte offset to line/column mapping for one file
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, line_starts }
    }

    /// Position of a byte offset; offsets past the end clamp to the end
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[line];

        let character = self.text[line_start..]
            .char_indices()
            .take_while(|&(i, _)| line_start + i < offset)
            .map(|(_, c)| c.len_utf16())
            .sum::<usize>();

        Position::new(line as u32, character as u32)
    }

    pub fn range(&self, span: TextSpan) -> Range {
        Range::new(self.position(span.start), self.position(span.end()))
    }
}

/// Every reference of every group as `(file_name, range)`
///
/// `text_of` returns the current text of a file; references into unknown
/// files are dropped.
pub fn references_to_locations<'t>(
    groups: &[ReferencedSymbol],
    text_of: impl Fn(&str) -> Option<&'t str>,
) -> Vec<(String, Range)> {
    groups
        .iter()
        .flat_map(|group| &group.references)
        .filter_map(|reference| {
            let text = text_of(&reference.file_name)?;
            let range = LineIndex::new(text).range(reference.text_span);
            Some((reference.file_name.clone(), range))
        })
        .collect()
}

/// Hover showing the quick-info text as a TypeScript code block
pub fn quick_info_to_hover(info: &QuickInfo, index: &LineIndex<'_>) -> Hover {
    let markdown = format!("```typescript\n{}\n```", info.display_text());

    Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: markdown,
        }),
        range: Some(index.range(info.text_span)),
    }
}

/// Definition targets as `(file_name, range)` plus the origin range
pub fn definition_to_targets<'t>(
    result: &DefinitionInfoAndBoundSpan,
    origin: &LineIndex<'_>,
    text_of: impl Fn(&str) -> Option<&'t str>,
) -> (Range, Vec<(String, Range)>) {
    let targets = result
        .definitions
        .iter()
        .filter_map(|definition| {
            let text = text_of(&definition.file_name)?;
            let range = LineIndex::new(text).range(definition.text_span);
            Some((definition.file_name.clone(), range))
        })
        .collect();

    (origin.range(result.text_span), targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tablelens_core::{DefinitionInfo, ReferenceEntry, ScriptElementKind, SymbolDisplayPart};

    fn definition_in(file_name: &str, span: TextSpan) -> DefinitionInfo {
        DefinitionInfo {
            file_name: file_name.to_string(),
            text_span: span,
            context_span: None,
            kind: ScriptElementKind::MemberVariableElement,
            name: "users".to_string(),
            container_kind: ScriptElementKind::Unknown,
            container_name: "__object".to_string(),
        }
    }

    #[test]
    fn positions_count_utf16_units() {
        let text = "a\nñ😀x\n";
        let index = LineIndex::new(text);

        assert_eq!(index.position(0), Position::new(0, 0));
        assert_eq!(index.position(2), Position::new(1, 0));
        // ñ is 2 bytes / 1 unit, 😀 is 4 bytes / 2 units
        assert_eq!(index.position(8), Position::new(1, 3));
        assert_eq!(index.position(100), Position::new(2, 0));
    }

    #[test]
    fn reference_locations_skip_unknown_files() {
        let text = "q(\"users\");\nq('users');";
        let groups = vec![ReferencedSymbol {
            definition: tablelens_core::ReferencedSymbolDefinitionInfo {
                file_name: "a.ts".to_string(),
                text_span: TextSpan::new(0, 1),
                context_span: None,
                kind: ScriptElementKind::Unknown,
                name: String::new(),
                container_kind: ScriptElementKind::Unknown,
                container_name: String::new(),
                display_parts: Vec::new(),
            },
            references: vec![
                ReferenceEntry::in_string("a.ts", TextSpan::new(15, 5)),
                ReferenceEntry::in_string("gone.ts", TextSpan::new(0, 1)),
            ],
        }];

        let locations = references_to_locations(&groups, |name| (name == "a.ts").then_some(text));
        assert_eq!(
            locations,
            vec![("a.ts".to_string(), Range::new(Position::new(1, 3), Position::new(1, 8)))]
        );
    }

    #[test]
    fn hover_is_fenced_typescript() {
        let info = QuickInfo {
            kind: ScriptElementKind::String,
            kind_modifiers: String::new(),
            text_span: TextSpan::new(3, 5),
            display_parts: vec![SymbolDisplayPart::text("users: defineTable({})")],
            documentation: None,
        };
        let hover = quick_info_to_hover(&info, &LineIndex::new("q(\"users\")"));

        let HoverContents::Markup(content) = hover.contents else {
            panic!("expected markup");
        };
        assert_eq!(content.value, "```typescript\nusers: defineTable({})\n```");
        assert_eq!(hover.range, Some(Range::new(Position::new(0, 3), Position::new(0, 8))));
    }

    #[test]
    fn definition_targets_skip_unknown_files() {
        let origin = "const a = 1;\nq(\"users\");";
        let schema = "export default defineSchema({\n  users: defineTable({}),\n});";
        let result = DefinitionInfoAndBoundSpan {
            text_span: TextSpan::new(16, 5),
            definitions: vec![
                definition_in("gone.ts", TextSpan::new(0, 5)),
                definition_in("convex/schema.ts", TextSpan::new(32, 5)),
            ],
        };

        let (origin_range, targets) = definition_to_targets(&result, &LineIndex::new(origin), |name| {
            (name == "convex/schema.ts").then_some(schema)
        });

        assert_eq!(origin_range, Range::new(Position::new(1, 3), Position::new(1, 8)));
        assert_eq!(
            targets,
            vec![(
                "convex/schema.ts".to_string(),
                Range::new(Position::new(1, 2), Position::new(1, 7))
            )]
        );
    }
}
