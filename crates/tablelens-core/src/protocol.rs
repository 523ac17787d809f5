//! Result shapes exchanged with the host language service
//!
//! These mirror the host's find-references, definition and quick-info payloads.
//! Values produced by the host pass through untouched; values produced here
//! must be indistinguishable from host-produced ones once serialized.

use crate::span::TextSpan;
use serde::{Deserialize, Serialize};

/// Element kind tags understood by the host's presentation layer
///
/// Kinds tablelens never produces itself still round-trip through
/// [`ScriptElementKind::Other`] with their exact wire text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ScriptElementKind {
    #[default]
    Unknown,
    Keyword,
    ModuleElement,
    ClassElement,
    InterfaceElement,
    TypeElement,
    VariableElement,
    LocalVariableElement,
    ConstElement,
    LetElement,
    FunctionElement,
    MemberFunctionElement,

    /// Object property (`name: value` inside an object literal)
    MemberVariableElement,

    ParameterElement,
    PrimitiveType,
    Alias,
    String,

    /// Any other host kind (`getter`, `enum member`, ...)
    Other(String),
}

impl ScriptElementKind {
    /// Wire string for this kind
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unknown => "",
            Self::Keyword => "keyword",
            Self::ModuleElement => "module",
            Self::ClassElement => "class",
            Self::InterfaceElement => "interface",
            Self::TypeElement => "type",
            Self::VariableElement => "var",
            Self::LocalVariableElement => "local var",
            Self::ConstElement => "const",
            Self::LetElement => "let",
            Self::FunctionElement => "function",
            Self::MemberFunctionElement => "method",
            Self::MemberVariableElement => "property",
            Self::ParameterElement => "parameter",
            Self::PrimitiveType => "primitive type",
            Self::Alias => "alias",
            Self::String => "string",
            Self::Other(kind) => kind,
        }
    }

    /// Parse a wire string; never fails
    pub fn from_wire(kind: &str) -> Self {
        match kind {
            "" => Self::Unknown,
            "keyword" => Self::Keyword,
            "module" => Self::ModuleElement,
            "class" => Self::ClassElement,
            "interface" => Self::InterfaceElement,
            "type" => Self::TypeElement,
            "var" => Self::VariableElement,
            "local var" => Self::LocalVariableElement,
            "const" => Self::ConstElement,
            "let" => Self::LetElement,
            "function" => Self::FunctionElement,
            "method" => Self::MemberFunctionElement,
            "property" => Self::MemberVariableElement,
            "parameter" => Self::ParameterElement,
            "primitive type" => Self::PrimitiveType,
            "alias" => Self::Alias,
            "string" => Self::String,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for ScriptElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ScriptElementKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ScriptElementKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let kind = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&kind))
    }
}

/// Display part kinds used by quick-info payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolDisplayPartKind {
    Keyword,
    LineBreak,
    Operator,
    Punctuation,
    PropertyName,
    Space,
    StringLiteral,
    Text,
}

impl SymbolDisplayPartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::LineBreak => "lineBreak",
            Self::Operator => "operator",
            Self::Punctuation => "punctuation",
            Self::PropertyName => "propertyName",
            Self::Space => "space",
            Self::StringLiteral => "stringLiteral",
            Self::Text => "text",
        }
    }
}

/// One fragment of quick-info text
///
/// `kind` stays a free-form string so host parts with kinds we do not model
/// round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolDisplayPart {
    pub text: String,
    pub kind: String,
}

impl SymbolDisplayPart {
    pub fn new(kind: SymbolDisplayPartKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: kind.as_str().to_string(),
        }
    }

    /// Plain text part
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(SymbolDisplayPartKind::Text, text)
    }
}

/// A single usage reported by find-references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceEntry {
    pub file_name: String,
    pub text_span: TextSpan,
    pub is_write_access: bool,
    pub is_definition: bool,

    /// Set only for usages found inside string literals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_in_string: Option<bool>,
}

impl ReferenceEntry {
    /// Read-only usage located inside a string literal
    pub fn in_string(file_name: impl Into<String>, text_span: TextSpan) -> Self {
        Self {
            file_name: file_name.into(),
            text_span,
            is_write_access: false,
            is_definition: false,
            is_in_string: Some(true),
        }
    }
}

/// Definition header of one find-references group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencedSymbolDefinitionInfo {
    pub file_name: String,
    pub text_span: TextSpan,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_span: Option<TextSpan>,

    pub kind: ScriptElementKind,
    pub name: String,
    pub container_kind: ScriptElementKind,
    pub container_name: String,

    #[serde(default)]
    pub display_parts: Vec<SymbolDisplayPart>,
}

/// One find-references group: a definition and every usage of it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencedSymbol {
    pub definition: ReferencedSymbolDefinitionInfo,
    pub references: Vec<ReferenceEntry>,
}

/// A go-to-definition target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionInfo {
    pub file_name: String,
    pub text_span: TextSpan,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_span: Option<TextSpan>,

    pub kind: ScriptElementKind,
    pub name: String,
    pub container_kind: ScriptElementKind,
    pub container_name: String,
}

/// Go-to-definition result together with the span that was resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionInfoAndBoundSpan {
    pub text_span: TextSpan,
    pub definitions: Vec<DefinitionInfo>,
}

/// Hover payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickInfo {
    pub kind: ScriptElementKind,
    pub kind_modifiers: String,
    pub text_span: TextSpan,

    #[serde(default)]
    pub display_parts: Vec<SymbolDisplayPart>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<Vec<SymbolDisplayPart>>,
}

impl QuickInfo {
    /// Concatenated display text, as an editor would render it
    pub fn display_text(&self) -> String {
        self.display_parts.iter().map(|p| p.text.as_str()).collect()
    }
}

/// One completion candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionEntry {
    pub name: String,
    pub kind: ScriptElementKind,
    pub sort_text: String,
}

/// Completion list at a position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionInfo {
    pub is_global_completion: bool,
    pub is_member_completion: bool,
    pub entries: Vec<CompletionEntry>,
}
