use serde::{Deserialize, Serialize};
use std::fmt;

/// Registration plate used as the stable truck identifier (e.g. `JH-01-AB-1001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TruckId(pub String);

impl TruckId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TruckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TruckId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_string() {
        let id = TruckId::new("JH-01-AB-1001");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"JH-01-AB-1001\"");
    }

    #[test]
    fn display_matches_inner() {
        assert_eq!(TruckId::from("JH-05-ZZ-2233").to_string(), "JH-05-ZZ-2233");
    }
}
