//! Per-run anchor registry

use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

/// Guarantees anchor uniqueness within one run
///
/// Anchors are compared case-insensitively; a collision between distinct
/// refs is resolved by appending `x` until the cleaned form is free.
/// Re-registering a ref returns the same cleaned string every time.
#[derive(Debug, Default)]
pub struct RefRegistry {
    /// Lowercased cleaned anchor → original ref it was issued for
    refs: FxHashMap<String, String>,
}

impl RefRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `reference` and returns its unique cleaned anchor.
    pub fn register(&mut self, reference: &str) -> String {
        let mut clean = clean_ref(reference);
        loop {
            match self.refs.entry(clean.to_lowercase()) {
                Entry::Vacant(slot) => {
                    slot.insert(reference.to_string());
                    return clean;
                }
                Entry::Occupied(slot) => {
                    if slot.get() == reference {
                        return clean;
                    }
                }
            }
            clean.push('x');
        }
    }
}

/// Reduces a ref to anchor-safe characters. The first character must start
/// an identifier; anything unsafe becomes `-`.
fn clean_ref(reference: &str) -> String {
    let mut clean = String::with_capacity(reference.len() + 1);
    let mut chars = reference.chars();
    let Some(first) = chars.next() else {
        return clean;
    };
    if first.is_ascii_alphabetic() || first == '_' {
        clean.push(first);
    } else {
        clean.push('A');
        if first.is_ascii_digit() {
            clean.push(first);
        } else {
            clean.push('-');
        }
    }
    for c in chars {
        if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
            clean.push(c);
        } else {
            clean.push('-');
        }
    }
    clean
}
