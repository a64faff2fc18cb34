use std::borrow::Borrow;
use std::fmt;

/// Key of the out-of-band error slot used for whole-submission failures.
///
/// It never names a schema field, so revalidation cannot overwrite it.
pub const GENERAL_KEY: &str = "general";

/// The name of a form field, e.g. `"confirmPassword"`.
///
/// Used as keys in `FormValues`, `TouchedFlags` and `FieldErrors`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldName {
    name: String,
}

impl FieldName {
    /// Create a new field name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The name of the out-of-band `general` slot.
    pub fn general() -> Self {
        Self::new(GENERAL_KEY)
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Check if this is the out-of-band `general` slot.
    pub fn is_general(&self) -> bool {
        self.name == GENERAL_KEY
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Borrow<str> for FieldName {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl From<&str> for FieldName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FieldName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&String> for FieldName {
    fn from(s: &String) -> Self {
        Self::new(s.clone())
    }
}

impl From<&FieldName> for FieldName {
    fn from(name: &FieldName) -> Self {
        name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn new() {
        let name = FieldName::new("email");
        assert_eq!(name.as_str(), "email");
        assert!(!name.is_general());
    }

    #[test]
    fn general() {
        assert!(FieldName::general().is_general());
        assert!(FieldName::from("general").is_general());
    }

    #[test]
    fn lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(FieldName::new("password"), 1);
        assert_eq!(map.get("password"), Some(&1));
    }

    #[test]
    fn display() {
        let name = FieldName::new("agreeToTerms");
        assert_eq!(format!("{}", name), "agreeToTerms");
    }
}
