use std::collections::HashSet;

use crate::FieldName;

/// Records which fields have been interacted with (blurred at least once).
///
/// Errors for untouched fields are never shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TouchedFlags {
    touched: HashSet<FieldName>,
}

impl TouchedFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a field as touched. Returns `false` if it already was.
    pub fn touch(&mut self, field: impl Into<FieldName>) -> bool {
        self.touched.insert(field.into())
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldName> {
        self.touched.iter()
    }

    pub fn len(&self) -> usize {
        self.touched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.touched.is_empty()
    }

    /// Forget every touched field.
    pub fn clear(&mut self) {
        self.touched.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_is_idempotent() {
        let mut touched = TouchedFlags::new();
        assert!(touched.touch("email"));
        assert!(!touched.touch("email"));
        assert_eq!(touched.len(), 1);
        assert!(touched.is_touched("email"));
        assert!(!touched.is_touched("password"));
    }
}
