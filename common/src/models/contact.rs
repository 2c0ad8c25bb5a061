//! Contact details shown in the footer and contact section.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Table holding the single contact row.
pub const CONTACT_TABLE: &str = "contact";

const DEFAULT_EMAIL: &str = "hello@dezacodex.in";
const DEFAULT_PHONE: &str = "+91 98765 43210";
const DEFAULT_LOCATION: &str = "India";

/// Resolved contact details. Always complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub location: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            email: DEFAULT_EMAIL.to_string(),
            phone: DEFAULT_PHONE.to_string(),
            location: DEFAULT_LOCATION.to_string(),
        }
    }
}

/// Contact row as stored; any column may be null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoredContact {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl ContactInfo {
    /// Overlays stored values on the defaults, field by field.
    pub fn from_stored(stored: StoredContact) -> Self {
        let defaults = Self::default();
        Self {
            email: non_empty(stored.email).unwrap_or(defaults.email),
            phone: non_empty(stored.phone).unwrap_or(defaults.phone),
            location: non_empty(stored.location).unwrap_or(defaults.location),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_row_keeps_defaults() {
        let info = ContactInfo::from_stored(StoredContact {
            email: Some("team@agency.dev".into()),
            phone: Some(String::new()),
            location: None,
        });
        assert_eq!(info.email, "team@agency.dev");
        assert_eq!(info.phone, DEFAULT_PHONE);
        assert_eq!(info.location, DEFAULT_LOCATION);
    }
}
