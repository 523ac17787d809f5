//! Go-to-definition for table names in string literals

use crate::context::PluginContext;
use crate::resolver::resolve_at_string_literal;
use tablelens_core::{DefinitionInfo, DefinitionInfoAndBoundSpan, ScriptElementKind};
use tablelens_host::Program;

/// Container name the host reports for members of an anonymous object type
const OBJECT_CONTAINER_NAME: &str = "__object";

/// Definition pointing at the declaration of the table named at `position`
pub fn synthesize_definition<P: Program>(
    ctx: &PluginContext,
    program: &P,
    file_name: &str,
    position: usize,
) -> Option<DefinitionInfoAndBoundSpan> {
    let table = resolve_at_string_literal(ctx, program, file_name, position)?;
    let declaration = &table.declaration;

    let definition = DefinitionInfo {
        file_name: declaration.file_name.clone(),
        text_span: declaration.span(),
        context_span: Some(declaration.full_span()),
        kind: ScriptElementKind::MemberVariableElement,
        name: table.table_name.clone(),
        container_kind: ScriptElementKind::PrimitiveType,
        container_name: OBJECT_CONTAINER_NAME.to_string(),
    };

    Some(DefinitionInfoAndBoundSpan {
        text_span: table.text_span,
        definitions: vec![definition],
    })
}
