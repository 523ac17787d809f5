//! Syntax node handles and weak node references

use serde::{Deserialize, Serialize};
use tablelens_core::TextSpan;

/// Opaque handle to a node inside one source file snapshot
///
/// Only meaningful together with the file that produced it and only for the
/// duration of the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Opaque handle to a type known to the host's type checker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub u32);

/// Opaque handle to a symbol known to the host's type checker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

/// Node kinds tablelens distinguishes
///
/// Hosts map their own kinds onto these; anything tablelens never inspects
/// can be reported as [`SyntaxKind::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyntaxKind {
    SourceFile,

    /// `export default <expression>;`
    ExportAssignment,

    ExportKeyword,
    DefaultKeyword,

    /// Any other reserved word (`const`, `import`, `return`, ...)
    Keyword,

    Identifier,

    /// `'...'` or `"..."`
    StringLiteral,

    /// Template literal without `${...}` substitutions
    NoSubstitutionTemplateLiteral,

    /// Template literal with substitutions; never a table reference
    TemplateExpression,

    NumericLiteral,
    ObjectLiteralExpression,
    ArrayLiteralExpression,
    ParenthesizedExpression,

    /// `name: value` inside an object literal
    PropertyAssignment,

    /// `name` shorthand inside an object literal
    ShorthandPropertyAssignment,

    /// `...value` inside an object literal
    SpreadAssignment,

    /// Generic expression wrapper
    Expression,

    Punctuation,
    Unknown,
}

impl SyntaxKind {
    /// String literal or substitution-free template literal
    pub fn is_string_like(self) -> bool {
        matches!(self, Self::StringLiteral | Self::NoSubstitutionTemplateLiteral)
    }

    pub fn is_keyword(self) -> bool {
        matches!(self, Self::ExportKeyword | Self::DefaultKeyword | Self::Keyword)
    }
}

/// Weak reference to a syntax node: file identity plus its byte range
///
/// Safe to hold after the request's syntax tree is gone; to read the node's
/// text again, look the file up in the current program.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRef {
    pub file_name: String,

    /// Start including leading trivia (whitespace and comments)
    pub full_start: usize,

    /// Start of the node's first token
    pub start: usize,

    /// Exclusive end
    pub end: usize,
}

impl NodeRef {
    pub fn new(file_name: impl Into<String>, full_start: usize, start: usize, end: usize) -> Self {
        Self {
            file_name: file_name.into(),
            full_start,
            start,
            end,
        }
    }

    /// Width excluding leading trivia
    pub fn width(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn span(&self) -> TextSpan {
        TextSpan::from_bounds(self.start, self.end)
    }

    pub fn full_span(&self) -> TextSpan {
        TextSpan::from_bounds(self.full_start, self.end)
    }

    /// Same file and same start offset
    pub fn starts_at(&self, file_name: &str, start: usize) -> bool {
        self.file_name == file_name && self.start == start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_ref_widths() {
        let node = NodeRef::new("convex/schema.ts", 10, 14, 30);
        assert_eq!(node.width(), 16);
        assert_eq!(node.span(), TextSpan::new(14, 16));
        assert_eq!(node.full_span(), TextSpan::new(10, 20));
        assert!(node.starts_at("convex/schema.ts", 14));
        assert!(!node.starts_at("convex/schema.ts", 10));
        assert!(!node.starts_at("schema.ts", 14));
    }

    #[test]
    fn string_like_kinds() {
        assert!(SyntaxKind::StringLiteral.is_string_like());
        assert!(SyntaxKind::NoSubstitutionTemplateLiteral.is_string_like());
        assert!(!SyntaxKind::TemplateExpression.is_string_like());
    }
}
