//! Function name resolution.

use std::collections::HashMap;
use std::sync::Arc;

use faas_protocol::FunctionHandler;

/// Maps function names to their handlers.
///
/// Built once at startup and read-only afterwards; resolution never blocks.
#[derive(Default, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<dyn FunctionHandler>>,
}

impl FunctionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under a name, replacing any previous binding.
    pub fn register(&mut self, name: impl Into<String>, handler: Arc<dyn FunctionHandler>) {
        self.functions.insert(name.into(), handler);
    }

    /// Resolve a function name to its handler.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn FunctionHandler>> {
        self.functions.get(name).cloned()
    }

    /// Registered function names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.keys().cloned().collect();
        names.sort();
        names
    }
}
