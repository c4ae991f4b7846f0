//! Secret values that redact themselves when formatted
//!
//! Datasource secrets (basic auth password, TLS material, API keys) travel
//! through the config editor as `Sensitive<String>`. Formatting never reveals
//! them; serialization does, because the host has to receive the value.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Wrapper that prints `***REDACTED***` for Debug and Display
///
/// ```
/// use druid_builder_core_types::Sensitive;
///
/// let password = Sensitive::new("hunter2".to_string());
/// assert_eq!(format!("{:?}", password), "***REDACTED***");
/// assert_eq!(password.expose(), "hunter2");
/// ```
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the secret. Only call this where the value is actually handed over.
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T: Serialize> Serialize for Sensitive<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Sensitive<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_are_redacted() {
        let secret = Sensitive::new("api-key-12345".to_string());
        assert_eq!(format!("{:?}", secret), "***REDACTED***");
        assert_eq!(format!("{}", secret), "***REDACTED***");
    }

    #[test]
    fn test_redacted_inside_derived_debug() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct Auth {
            user: String,
            password: Sensitive<String>,
        }

        let auth = Auth {
            user: "admin".to_string(),
            password: Sensitive::new("s3cret".to_string()),
        };
        let out = format!("{:?}", auth);
        assert!(out.contains("admin"));
        assert!(!out.contains("s3cret"));
    }

    #[test]
    fn test_serializes_transparently() {
        let secret = Sensitive::new("s3cret".to_string());
        assert_eq!(serde_json::to_string(&secret).unwrap(), "\"s3cret\"");
        let back: Sensitive<String> = serde_json::from_str("\"other\"").unwrap();
        assert_eq!(back.into_inner(), "other");
    }
}
