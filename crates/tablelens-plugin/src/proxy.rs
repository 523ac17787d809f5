//! Capability proxy over the host language service

use std::panic::{catch_unwind, AssertUnwindSafe};
use tablelens_core::{
    CompletionInfo, DefinitionInfoAndBoundSpan, Diagnostic, QuickInfo, ReferencedSymbol,
};
use tablelens_engine::{
    augment_references, synthesize_definition, synthesize_quick_info, AugmentError,
    PluginContext, Result,
};
use tablelens_host::LanguageService;

/// Wraps a host language service, adding table navigation
///
/// Every operation goes to the host first. Find-references, go-to-definition
/// and quick info may then be augmented; the rest are forwarded untouched.
/// An augmentation that fails in any way yields the host's own result.
pub struct CapabilityProxy<S> {
    service: S,
    ctx: PluginContext,
}

impl<S: LanguageService> CapabilityProxy<S> {
    /// Wrap `service` with a default context
    pub fn new(service: S) -> Self {
        Self::with_context(service, PluginContext::default())
    }

    pub fn with_context(service: S, ctx: PluginContext) -> Self {
        Self { service, ctx }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn context(&self) -> &PluginContext {
        &self.ctx
    }

    pub fn into_inner(self) -> S {
        self.service
    }

    /// Run an augmentation, containing both errors and panics
    fn contained<T>(&self, operation: &str, augment: impl FnOnce() -> Result<T>) -> Option<T> {
        let outcome = catch_unwind(AssertUnwindSafe(augment)).unwrap_or_else(|payload| {
            Err(AugmentError::from_panic(payload))
        });

        match outcome {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(operation, error = %e, "augmentation failed, using host result");
                None
            }
        }
    }
}

impl<S: LanguageService> LanguageService for CapabilityProxy<S> {
    type Program = S::Program;

    fn program(&self) -> Option<&S::Program> {
        self.service.program()
    }

    fn find_references(&self, file_name: &str, position: usize) -> Option<Vec<ReferencedSymbol>> {
        let host = self.service.find_references(file_name, position)?;
        let Some(program) = self.service.program() else {
            return Some(host);
        };

        self.contained("find_references", || {
            augment_references(&self.ctx, program, host.clone())
        })
        .or(Some(host))
    }

    fn get_definition_and_bound_span(
        &self,
        file_name: &str,
        position: usize,
    ) -> Option<DefinitionInfoAndBoundSpan> {
        if let Some(host) = self.service.get_definition_and_bound_span(file_name, position) {
            return Some(host);
        }
        let program = self.service.program()?;

        self.contained("get_definition_and_bound_span", || {
            Ok(synthesize_definition(&self.ctx, program, file_name, position))
        })
        .flatten()
    }

    fn get_quick_info_at_position(&self, file_name: &str, position: usize) -> Option<QuickInfo> {
        if let Some(host) = self.service.get_quick_info_at_position(file_name, position) {
            return Some(host);
        }
        let program = self.service.program()?;

        self.contained("get_quick_info_at_position", || {
            synthesize_quick_info(&self.ctx, program, file_name, position)
        })
        .flatten()
    }

    fn get_semantic_diagnostics(&self, file_name: &str) -> Vec<Diagnostic> {
        self.service.get_semantic_diagnostics(file_name)
    }

    fn get_completions_at_position(
        &self,
        file_name: &str,
        position: usize,
    ) -> Option<CompletionInfo> {
        self.service.get_completions_at_position(file_name, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablelens_core::TextSpan;
    use tablelens_host::MockLanguageService;

    const SCHEMA: &str = "export default defineSchema({\n  users: defineTable({}),\n});\n";
    const QUERY: &str = "ctx.db.query(\"users\");\n";

    #[test]
    fn contained_panic_becomes_none() {
        let proxy = CapabilityProxy::new(MockLanguageService::default());
        let result: Option<()> = proxy.contained("test", || panic!("boom"));
        assert_eq!(result, None);
    }

    #[test]
    fn contained_error_becomes_none() {
        let proxy = CapabilityProxy::new(MockLanguageService::default());
        let result: Option<()> =
            proxy.contained("test", || Err(AugmentError::MissingSourceFile("a.ts".into())));
        assert_eq!(result, None);
    }

    #[test]
    fn synthesizes_when_host_is_silent() {
        let service = MockLanguageService::builder()
            .file("convex/schema.ts", SCHEMA)
            .file("convex/query.ts", QUERY)
            .schema("convex/schema.ts", &["users"])
            .build();
        let proxy = CapabilityProxy::new(service);
        let position = QUERY.find("users").unwrap();

        let info = proxy.get_quick_info_at_position("convex/query.ts", position).unwrap();
        assert_eq!(info.display_text(), "users: defineTable({})");

        let definition = proxy
            .get_definition_and_bound_span("convex/query.ts", position)
            .unwrap();
        assert_eq!(definition.text_span, TextSpan::new(position, 5));
    }

    #[test]
    fn no_program_means_host_result() {
        let service = MockLanguageService::builder().without_program().build();
        let proxy = CapabilityProxy::new(service);
        assert_eq!(proxy.get_quick_info_at_position("convex/query.ts", 3), None);
        assert_eq!(proxy.find_references("convex/query.ts", 3), None);
    }
}
