//! Enquiry models.
//!
//! An enquiry is created once by a visitor and afterwards only ever changes
//! through the admin `contacted` toggle or deletion.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::id::deserialize_id;

/// Table holding visitor enquiries.
pub const ENQUIRIES_TABLE: &str = "enquiries";

/// A persisted enquiry row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Enquiry {
    /// Store-assigned identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Only set by the project enquiry (modal) form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_title: Option<String>,
    pub message: String,
    /// Assigned by the store on insert.
    pub created_at: DateTime<Utc>,
    /// Whether staff have reached out. Rows written before the column
    /// existed come back as null.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub contacted: bool,
}

/// Insert payload for a new enquiry. The store fills in the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewEnquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_title: Option<String>,
    pub message: String,
}

impl NewEnquiry {
    /// Field name/value pairs, in form order, as sent to the email template.
    pub fn template_params(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut params = serde_json::Map::new();
        params.insert("name".into(), self.name.clone().into());
        params.insert("email".into(), self.email.clone().into());
        params.insert("phone".into(), self.phone.clone().into());
        if let Some(title) = &self.project_title {
            params.insert("project_title".into(), title.clone().into());
        }
        params.insert("message".into(), self.message.clone().into());
        params
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Dashboard filter on the `contacted` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Every enquiry, most recent first.
    #[default]
    #[serde(alias = "all")]
    Newest,
    /// Not yet contacted.
    Unresolved,
    /// Already contacted.
    Resolved,
}

impl StatusFilter {
    /// Required value of `contacted`, if the filter constrains it.
    pub fn contacted(self) -> Option<bool> {
        match self {
            StatusFilter::Newest => None,
            StatusFilter::Unresolved => Some(false),
            StatusFilter::Resolved => Some(true),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::Newest => write!(f, "newest"),
            StatusFilter::Unresolved => write!(f, "unresolved"),
            StatusFilter::Resolved => write!(f, "resolved"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "newest" | "all" => Ok(StatusFilter::Newest),
            "unresolved" => Ok(StatusFilter::Unresolved),
            "resolved" => Ok(StatusFilter::Resolved),
            other => Err(format!("unknown filter '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_with_numeric_id_and_null_contacted() {
        let row = serde_json::json!({
            "id": 42,
            "name": "Asha",
            "email": "asha@example.com",
            "phone": "+91 90000 00000",
            "message": "Need a site",
            "created_at": "2024-05-01T10:00:00.123456+00:00",
            "contacted": null
        });
        let enquiry: Enquiry = serde_json::from_value(row).unwrap();
        assert_eq!(enquiry.id, "42");
        assert!(!enquiry.contacted);
        assert_eq!(enquiry.project_title, None);
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::Newest));
        assert_eq!("".parse::<StatusFilter>(), Ok(StatusFilter::Newest));
        assert_eq!("Resolved".parse::<StatusFilter>(), Ok(StatusFilter::Resolved));
        assert!("pending".parse::<StatusFilter>().is_err());
        assert_eq!(StatusFilter::Unresolved.contacted(), Some(false));
    }

    #[test]
    fn test_template_params_skip_missing_title() {
        let enquiry = NewEnquiry {
            name: "A".into(),
            email: "a@b.c".into(),
            phone: "1".into(),
            project_title: None,
            message: "hi".into(),
        };
        let params = enquiry.template_params();
        assert_eq!(params.len(), 4);
        assert!(!params.contains_key("project_title"));
    }
}
