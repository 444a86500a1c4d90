//! Registry of named custom transformation functions.
//!
//! A `custom` transformation never evaluates user-supplied expressions. The
//! `custom_formula` option only selects a function registered here by the
//! host application.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A registered custom function.
pub type CustomFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Named custom functions available to `custom` transformations.
#[derive(Clone, Default)]
pub struct CustomFunctions {
    functions: BTreeMap<String, CustomFn>,
}

impl CustomFunctions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `function` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Arc::new(function));
    }

    #[must_use]
    pub fn with<F>(mut self, name: impl Into<String>, function: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.register(name, function);
        self
    }

    pub fn get(&self, name: &str) -> Option<&CustomFn> {
        self.functions.get(name.trim())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for CustomFunctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomFunctions")
            .field("names", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}
