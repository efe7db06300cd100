use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Input structure for creating or updating a project.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProjectInput {
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    /// Maximum length of 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// A project as stored in the database and returned by the API.
///
/// `user_id` is fixed at creation; updates only ever touch `name` and `description`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_id: i32,
}

impl Project {
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_input_validation() {
        let valid = ProjectInput {
            name: "Home".to_string(),
            description: None,
        };
        assert!(valid.validate().is_ok());

        let empty_name = ProjectInput {
            name: "".to_string(),
            description: None,
        };
        assert!(empty_name.validate().is_err());

        let long_description = ProjectInput {
            name: "Home".to_string(),
            description: Some("d".repeat(1001)),
        };
        assert!(long_description.validate().is_err());
    }

    #[test]
    fn test_project_serializes_camel_case() {
        let project = Project {
            id: 3,
            name: "Home".to_string(),
            description: None,
            created_at: Utc::now(),
            user_id: 9,
        };
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["userId"], 9);
        assert!(json["createdAt"].is_string());
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_missing_name_is_rejected_at_deserialization() {
        let parsed: Result<ProjectInput, _> =
            serde_json::from_str(r#"{ "description": "no name" }"#);
        assert!(parsed.is_err());
    }
}
