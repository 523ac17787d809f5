//! Syntax tree walks

use tablelens_host::{NodeId, SourceFile, SyntaxKind};

/// Deepest node whose `[start, end)` contains `position`
///
/// Leading trivia does not count as part of a node.
pub fn find_smallest_node_at<F: SourceFile>(file: &F, position: usize) -> Option<NodeId> {
    let mut found = None;
    visit_covering(file, file.root(), position, &mut found);
    found
}

fn visit_covering<F: SourceFile>(file: &F, node: NodeId, position: usize, found: &mut Option<NodeId>) {
    if position < file.start(node) || position >= file.end(node) {
        return;
    }
    *found = Some(node);
    for child in file.children(node) {
        visit_covering(file, child, position, found);
    }
}

/// Content of a string or template literal, one delimiter stripped per side
///
/// Literals too short to hold both delimiters have empty content. `None` when
/// the host's range does not map onto the text.
pub fn literal_content<F: SourceFile>(file: &F, node: NodeId) -> Option<&str> {
    let (start, end) = (file.start(node), file.end(node));
    if end < start + 2 {
        return Some("");
    }
    file.text().get(start + 1..end - 1)
}

/// Every string-like literal in the file whose content equals `content`
pub fn collect_string_literals<F: SourceFile>(file: &F, content: &str) -> Vec<NodeId> {
    let mut found = Vec::new();
    visit_literals(file, file.root(), content, &mut found);
    found
}

fn visit_literals<F: SourceFile>(file: &F, node: NodeId, content: &str, found: &mut Vec<NodeId>) {
    if file.kind(node).is_string_like() {
        if literal_content(file, node) == Some(content) {
            found.push(node);
        }
        return;
    }
    for child in file.children(node) {
        visit_literals(file, child, content, found);
    }
}

/// Expression of the file's top-level `export default` assignment
pub fn default_export_expression<F: SourceFile>(file: &F) -> Option<NodeId> {
    let assignment = file
        .children(file.root())
        .into_iter()
        .find(|&child| file.kind(child) == SyntaxKind::ExportAssignment)?;

    file.children(assignment)
        .into_iter()
        .find(|&child| !file.kind(child).is_keyword())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablelens_host::MockFile;

    const TEXT: &str = r#"const a = db.query("tasks").filter(`tasks`);
const b = { kind: "tasks", other: 'task' };
const c = `tasks${x}`;
export default schema;
"#;

    #[test]
    fn smallest_node_is_the_token() {
        let file = MockFile::parse("a.ts", TEXT);
        let position = TEXT.find("tasks").unwrap() + 2;

        let node = find_smallest_node_at(&file, position).unwrap();
        assert_eq!(file.kind(node), SyntaxKind::StringLiteral);
        assert_eq!(literal_content(&file, node), Some("tasks"));
    }

    #[test]
    fn delimiters_belong_to_the_literal() {
        let file = MockFile::parse("a.ts", TEXT);
        let opening_quote = TEXT.find("\"tasks\"").unwrap();

        let node = find_smallest_node_at(&file, opening_quote).unwrap();
        assert_eq!(file.kind(node), SyntaxKind::StringLiteral);

        // one past the closing quote is punctuation
        let after = find_smallest_node_at(&file, opening_quote + 7).unwrap();
        assert_eq!(file.kind(after), SyntaxKind::Punctuation);
    }

    #[test]
    fn position_in_trivia_or_past_end() {
        let file = MockFile::parse("a.ts", "  foo");
        assert_eq!(find_smallest_node_at(&file, 0), None);
        assert_eq!(find_smallest_node_at(&file, 5), None);
    }

    #[test]
    fn collects_matching_literals_only() {
        let file = MockFile::parse("a.ts", TEXT);
        let found = collect_string_literals(&file, "tasks");

        let kinds: Vec<_> = found.iter().map(|&n| file.kind(n)).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::StringLiteral,
                SyntaxKind::NoSubstitutionTemplateLiteral,
                SyntaxKind::StringLiteral,
            ]
        );
    }

    #[test]
    fn short_literals_are_empty() {
        let file = MockFile::parse("a.ts", "\"");
        let node = file.children(file.root())[0];
        assert_eq!(literal_content(&file, node), Some(""));
    }

    #[test]
    fn finds_default_export() {
        let file = MockFile::parse("a.ts", TEXT);
        let expression = default_export_expression(&file).unwrap();
        assert_eq!(file.node_text(expression), Some("schema"));

        let file = MockFile::parse("b.ts", "export const x = 1;");
        assert_eq!(default_export_expression(&file), None);
    }
}
