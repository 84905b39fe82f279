//! String interning for entity names
//!
//! Entity names, path segments and anchor fragments are interned once and
//! compared as `Symbol` values everywhere else.

pub use lasso::Spur as Symbol;
use lasso::ThreadedRodeo;
use std::sync::{Arc, Mutex};

/// Thread-safe string interner
#[derive(Clone)]
pub struct Interner {
    inner: Arc<Mutex<ThreadedRodeo>>,
}

impl Interner {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ThreadedRodeo::new())),
        }
    }

    pub fn intern(&self, text: &str) -> Symbol {
        self.inner.lock().unwrap().get_or_intern(text)
    }

    pub fn resolve(&self, sym: &Symbol) -> String {
        self.inner.lock().unwrap().resolve(sym).to_string()
    }

    pub fn try_resolve(&self, sym: &Symbol) -> Option<String> {
        self.inner
            .lock()
            .unwrap()
            .try_resolve(sym)
            .map(|text| text.to_string())
    }

    /// Interns each `::`-separated segment of a qualified path.
    pub fn intern_path(&self, path: &str) -> Vec<Symbol> {
        path.split("::")
            .filter(|segment| !segment.is_empty())
            .map(|segment| self.intern(segment))
            .collect()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_path_splits_segments() {
        let interner = Interner::new();
        let path = interner.intern_path("Widget::show");
        assert_eq!(path.len(), 2);
        assert_eq!(interner.resolve(&path[0]), "Widget");
        assert_eq!(interner.resolve(&path[1]), "show");
    }

    #[test]
    fn test_intern_path_ignores_empty_segments() {
        let interner = Interner::new();
        assert!(interner.intern_path("").is_empty());
        assert_eq!(interner.intern_path("::Widget").len(), 1);
    }
}
