//! In-memory source file with a small TypeScript-flavoured scanner
//!
//! The tree is deliberately shallow: tokens, bracket groups, object literal
//! members and `export default` assignments. That is every shape tablelens
//! inspects; everything else stays a flat run of tokens.

use crate::host::SourceFile;
use crate::syntax::{NodeId, SyntaxKind};

#[derive(Debug, Clone)]
struct NodeData {
    kind: SyntaxKind,
    full_start: usize,
    start: usize,
    end: usize,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy)]
struct Token {
    kind: SyntaxKind,
    full_start: usize,
    start: usize,
    end: usize,
}

/// Parsed in-memory file
#[derive(Debug, Clone)]
pub struct MockFile {
    file_name: String,
    text: String,
    is_declaration_file: bool,
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl MockFile {
    /// Parse a regular source file
    pub fn parse(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let text = text.into();
        let (nodes, root) = TreeBuilder::new(&text).build();

        Self {
            file_name,
            text,
            is_declaration_file: false,
            nodes,
            root,
        }
    }

    /// Parse a declaration-only file (`.d.ts`)
    pub fn declaration(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            is_declaration_file: true,
            ..Self::parse(file_name, text)
        }
    }

    /// Expression of the first top-level `export default` assignment
    pub fn default_export_expression(&self) -> Option<NodeId> {
        let assignment = self
            .children(self.root)
            .into_iter()
            .find(|&child| self.kind(child) == SyntaxKind::ExportAssignment)?;

        self.children(assignment)
            .into_iter()
            .find(|&child| !self.kind(child).is_keyword())
    }

    /// First object literal member (in document order) declaring `name`
    pub fn find_property(&self, name: &str) -> Option<NodeId> {
        self.find_property_in(self.root, name)
    }

    fn find_property_in(&self, node: NodeId, name: &str) -> Option<NodeId> {
        let kind = self.kind(node);
        if matches!(
            kind,
            SyntaxKind::PropertyAssignment | SyntaxKind::ShorthandPropertyAssignment
        ) {
            let key = self.data(node).children.first().copied()?;
            let key_text = self.node_text(key)?;
            let key_text = if self.kind(key) == SyntaxKind::StringLiteral {
                strip_delimiters(key_text)
            } else {
                key_text
            };
            if key_text == name {
                return Some(node);
            }
        }

        self.data(node)
            .children
            .iter()
            .find_map(|&child| self.find_property_in(child, name))
    }

    fn data(&self, node: NodeId) -> &NodeData {
        &self.nodes[node.index()]
    }
}

impl SourceFile for MockFile {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn is_declaration_file(&self) -> bool {
        self.is_declaration_file
    }

    fn root(&self) -> NodeId {
        self.root
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.data(node).children.clone()
    }

    fn kind(&self, node: NodeId) -> SyntaxKind {
        self.data(node).kind
    }

    fn full_start(&self, node: NodeId) -> usize {
        self.data(node).full_start
    }

    fn start(&self, node: NodeId) -> usize {
        self.data(node).start
    }

    fn end(&self, node: NodeId) -> usize {
        self.data(node).end
    }
}

fn strip_delimiters(text: &str) -> &str {
    if text.len() >= 2 {
        &text[1..text.len() - 1]
    } else {
        ""
    }
}

struct TreeBuilder<'a> {
    text: &'a str,
    tokens: Vec<Token>,
    cursor: usize,
    nodes: Vec<NodeData>,
}

impl<'a> TreeBuilder<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            tokens: tokenize(text),
            cursor: 0,
            nodes: Vec::new(),
        }
    }

    fn build(mut self) -> (Vec<NodeData>, NodeId) {
        let items = self.parse_items(None);
        let children = self.group_export_assignments(items);

        let start = self.tokens.first().map_or(self.text.len(), |t| t.start);
        let root = self.push(SyntaxKind::SourceFile, 0, start, self.text.len(), children);
        (self.nodes, root)
    }

    fn push(
        &mut self,
        kind: SyntaxKind,
        full_start: usize,
        start: usize,
        end: usize,
        children: Vec<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            full_start,
            start,
            end,
            children,
        });
        id
    }

    fn push_token(&mut self, token: Token) -> NodeId {
        self.push(token.kind, token.full_start, token.start, token.end, Vec::new())
    }

    fn token_text(&self, token: &Token) -> &'a str {
        &self.text[token.start..token.end]
    }

    fn node_text(&self, node: NodeId) -> &'a str {
        let data = &self.nodes[node.index()];
        &self.text[data.start..data.end]
    }

    fn is_punct(&self, node: NodeId, punct: &str) -> bool {
        self.nodes[node.index()].kind == SyntaxKind::Punctuation && self.node_text(node) == punct
    }

    /// Parse tokens until the matching closer (left unconsumed) or end of input
    fn parse_items(&mut self, closer: Option<&str>) -> Vec<NodeId> {
        let mut items = Vec::new();

        while let Some(token) = self.tokens.get(self.cursor).copied() {
            let text = self.token_text(&token);

            if token.kind == SyntaxKind::Punctuation && Some(text) == closer {
                break;
            }
            self.cursor += 1;

            let group = match text {
                "{" if token.kind == SyntaxKind::Punctuation => {
                    Some(("}", SyntaxKind::ObjectLiteralExpression))
                }
                "[" if token.kind == SyntaxKind::Punctuation => {
                    Some(("]", SyntaxKind::ArrayLiteralExpression))
                }
                "(" if token.kind == SyntaxKind::Punctuation => {
                    Some((")", SyntaxKind::ParenthesizedExpression))
                }
                _ => None,
            };

            let node = match group {
                Some((close, kind)) => self.parse_group(token, close, kind),
                None => self.push_token(token),
            };
            items.push(node);
        }

        items
    }

    fn parse_group(&mut self, open: Token, close: &str, kind: SyntaxKind) -> NodeId {
        let open_node = self.push_token(open);
        let inner = self.parse_items(Some(close));

        let inner = if kind == SyntaxKind::ObjectLiteralExpression {
            self.group_members(inner)
        } else {
            inner
        };

        let mut children = vec![open_node];
        children.extend(inner);

        if let Some(token) = self.tokens.get(self.cursor).copied() {
            // parse_items only stops early on our closer
            self.cursor += 1;
            children.push(self.push_token(token));
        }

        let end = children
            .last()
            .map_or(open.end, |&last| self.nodes[last.index()].end);
        self.push(kind, open.full_start, open.start, end, children)
    }

    /// Wrap comma-separated object literal members in member nodes
    fn group_members(&mut self, inner: Vec<NodeId>) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut segment = Vec::new();

        for node in inner {
            if self.is_punct(node, ",") {
                let member = self.finish_member(std::mem::take(&mut segment));
                result.extend(member);
                result.push(node);
            } else {
                segment.push(node);
            }
        }
        let member = self.finish_member(segment);
        result.extend(member);

        result
    }

    fn finish_member(&mut self, segment: Vec<NodeId>) -> Vec<NodeId> {
        if segment.is_empty() {
            return segment;
        }
        let first = segment[0];
        let last = segment[segment.len() - 1];

        let first_kind = self.nodes[first.index()].kind;
        let is_key = matches!(first_kind, SyntaxKind::Identifier | SyntaxKind::StringLiteral);

        let kind = if segment.len() == 1 && first_kind == SyntaxKind::Identifier {
            SyntaxKind::ShorthandPropertyAssignment
        } else if is_key && segment.len() >= 2 && self.is_punct(segment[1], ":") {
            SyntaxKind::PropertyAssignment
        } else if self.is_punct(first, "...") {
            SyntaxKind::SpreadAssignment
        } else {
            return segment;
        };

        let full_start = self.nodes[first.index()].full_start;
        let start = self.nodes[first.index()].start;
        let end = self.nodes[last.index()].end;
        vec![self.push(kind, full_start, start, end, segment)]
    }

    /// Fold top-level `export default <expr> [;]` runs into assignment nodes
    fn group_export_assignments(&mut self, items: Vec<NodeId>) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut index = 0;

        while index < items.len() {
            let is_export_default = self.nodes[items[index].index()].kind
                == SyntaxKind::ExportKeyword
                && items
                    .get(index + 1)
                    .is_some_and(|&next| self.nodes[next.index()].kind == SyntaxKind::DefaultKeyword);

            if !is_export_default {
                result.push(items[index]);
                index += 1;
                continue;
            }

            let mut children = vec![items[index], items[index + 1]];
            let mut cursor = index + 2;
            let mut expression = Vec::new();

            while let Some(&node) = items.get(cursor) {
                if self.is_punct(node, ";") || self.nodes[node.index()].kind.is_keyword() {
                    break;
                }
                expression.push(node);
                cursor += 1;
            }

            match expression.as_slice() {
                [] => {}
                [single] => children.push(*single),
                [first, .., last] => {
                    let first = &self.nodes[first.index()];
                    let (full_start, start) = (first.full_start, first.start);
                    let end = self.nodes[last.index()].end;
                    let wrapper =
                        self.push(SyntaxKind::Expression, full_start, start, end, expression.clone());
                    children.push(wrapper);
                }
            }

            if let Some(&semicolon) = items.get(cursor) {
                if self.is_punct(semicolon, ";") {
                    children.push(semicolon);
                    cursor += 1;
                }
            }

            let first = &self.nodes[children[0].index()];
            let (full_start, start) = (first.full_start, first.start);
            let end = children
                .last()
                .map_or(start, |&last| self.nodes[last.index()].end);
            result.push(self.push(SyntaxKind::ExportAssignment, full_start, start, end, children));
            index = cursor;
        }

        result
    }
}

fn tokenize(text: &str) -> Vec<Token> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    loop {
        let full_start = pos;
        pos = skip_trivia(bytes, pos);
        if pos >= bytes.len() {
            break;
        }

        let start = pos;
        let kind = match bytes[pos] {
            quote @ (b'\'' | b'"') => {
                pos = scan_string(bytes, pos, quote);
                SyntaxKind::StringLiteral
            }
            b'`' => {
                let (end, has_substitution) = scan_template(bytes, pos);
                pos = end;
                if has_substitution {
                    SyntaxKind::TemplateExpression
                } else {
                    SyntaxKind::NoSubstitutionTemplateLiteral
                }
            }
            b'0'..=b'9' => {
                pos = scan_while(bytes, pos, |c| c.is_ascii_alphanumeric() || c == b'.' || c == b'_');
                SyntaxKind::NumericLiteral
            }
            c if is_ident_start(c) => {
                pos = scan_while(bytes, pos, is_ident_part);
                keyword_kind(&text[start..pos])
            }
            b'.' if bytes[pos..].starts_with(b"...") => {
                pos += 3;
                SyntaxKind::Punctuation
            }
            c if c.is_ascii() => {
                pos += 1;
                SyntaxKind::Punctuation
            }
            _ => {
                pos += text[pos..].chars().next().map_or(1, char::len_utf8);
                SyntaxKind::Unknown
            }
        };

        tokens.push(Token {
            kind,
            full_start,
            start,
            end: pos,
        });
    }

    tokens
}

fn skip_trivia(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() {
        if bytes[pos].is_ascii_whitespace() {
            pos += 1;
        } else if bytes[pos..].starts_with(b"//") {
            pos = scan_while(bytes, pos, |c| c != b'\n');
        } else if bytes[pos..].starts_with(b"/*") {
            pos = bytes[pos + 2..]
                .windows(2)
                .position(|w| w == b"*/")
                .map_or(bytes.len(), |offset| pos + 2 + offset + 2);
        } else {
            break;
        }
    }
    pos
}

fn scan_while(bytes: &[u8], mut pos: usize, pred: impl Fn(u8) -> bool) -> usize {
    while pos < bytes.len() && pred(bytes[pos]) {
        pos += 1;
    }
    pos
}

/// Unterminated strings stop at the end of the line
fn scan_string(bytes: &[u8], start: usize, quote: u8) -> usize {
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'\n' => return pos,
            c if c == quote => return pos + 1,
            _ => pos += 1,
        }
    }
    bytes.len()
}

fn scan_template(bytes: &[u8], start: usize) -> (usize, bool) {
    let mut pos = start + 1;
    let mut has_substitution = false;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'`' => return (pos + 1, has_substitution),
            b'$' if bytes.get(pos + 1) == Some(&b'{') => {
                has_substitution = true;
                pos += 2;
            }
            _ => pos += 1,
        }
    }
    (bytes.len(), has_substitution)
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'$'
}

fn is_ident_part(c: u8) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

fn keyword_kind(word: &str) -> SyntaxKind {
    match word {
        "export" => SyntaxKind::ExportKeyword,
        "default" => SyntaxKind::DefaultKeyword,
        "const" | "let" | "var" | "import" | "from" | "return" | "async" | "await"
        | "function" => SyntaxKind::Keyword,
        _ => SyntaxKind::Identifier,
    }
}
