//! Per-plugin-instance state

use std::sync::Mutex;
use tablelens_core::PluginConfig;

/// Last path at which the schema declaration was found
///
/// Only ever a hint: a stale value just falls through to the fallback
/// search on the next lookup.
#[derive(Debug, Default)]
pub struct SchemaLocationHint {
    slot: Mutex<Option<String>>,
}

impl SchemaLocationHint {
    pub fn new(initial: Option<String>) -> Self {
        Self {
            slot: Mutex::new(initial),
        }
    }

    pub fn get(&self) -> Option<String> {
        self.lock().clone()
    }

    pub fn set(&self, path: impl Into<String>) {
        *self.lock() = Some(path.into());
    }

    // A panic while holding the lock leaves a valid Option behind
    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.slot.lock().unwrap_or_else(|err| err.into_inner())
    }
}

/// Everything a resolver call needs beyond the program itself
///
/// Created once per project; independent instances never share a hint.
#[derive(Debug)]
pub struct PluginContext {
    config: PluginConfig,
    hint: SchemaLocationHint,
}

impl PluginContext {
    pub fn new(config: PluginConfig) -> Self {
        let hint = SchemaLocationHint::new(config.initial_schema_hint.clone());
        Self { config, hint }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn hint(&self) -> &SchemaLocationHint {
        &self.hint
    }
}

impl Default for PluginContext {
    fn default() -> Self {
        Self::new(PluginConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_starts_empty() {
        let ctx = PluginContext::default();
        assert_eq!(ctx.hint().get(), None);

        ctx.hint().set("convex/schema.ts");
        assert_eq!(ctx.hint().get().as_deref(), Some("convex/schema.ts"));
    }

    #[test]
    fn hint_seeded_from_config() {
        let config = PluginConfig {
            initial_schema_hint: Some("schema.ts".to_string()),
            ..PluginConfig::default()
        };
        let ctx = PluginContext::new(config);
        assert_eq!(ctx.hint().get().as_deref(), Some("schema.ts"));
    }

    #[test]
    fn instances_are_independent() {
        let a = PluginContext::default();
        let b = PluginContext::default();
        a.hint().set("a/convex/schema.ts");
        assert_eq!(b.hint().get(), None);
    }
}
