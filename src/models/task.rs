use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Input structure for creating or updating a task.
///
/// `dueDate` may carry any offset; it is normalized to UTC while deserializing.
/// An absent, null or empty `dueDate` clears the due date on update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    /// The title of the task.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// An optional description for the task.
    /// Maximum length of 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Optional due date for the task, always UTC.
    #[serde(default, deserialize_with = "deserialize_due_date")]
    pub due_date: Option<DateTime<Utc>>,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    /// Parent project; never changes after creation.
    pub project_id: i32,
}

/// Parses a client-supplied due date into a UTC instant.
///
/// Accepted forms:
/// - RFC 3339 with an offset (`2025-01-01T09:00:00+02:00`), converted to UTC
/// - naive date-time (`2025-01-01T09:00:00`, `2025-01-01T09:00`), taken as UTC
/// - plain date (`2025-01-01`), midnight UTC
pub fn normalize_due_date(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Ok(with_offset.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(Utc.from_utc_datetime(&midnight));
    }

    Err(format!("invalid due date: {}", raw))
}

fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => normalize_due_date(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_task_validation() {
        let valid_input = TaskInput {
            title: "Buy milk".to_string(),
            description: Some("Semi-skimmed".to_string()),
            due_date: None,
        };
        assert!(valid_input.validate().is_ok());

        let empty_title = TaskInput {
            title: "".to_string(),
            description: None,
            due_date: None,
        };
        assert!(empty_title.validate().is_err());

        let long_title = TaskInput {
            title: "a".repeat(201),
            description: None,
            due_date: None,
        };
        assert!(long_title.validate().is_err());

        let long_description = TaskInput {
            title: "Valid".to_string(),
            description: Some("b".repeat(1001)),
            due_date: None,
        };
        assert!(long_description.validate().is_err());
    }

    #[test]
    fn test_due_date_offset_is_converted_to_utc() {
        assert_eq!(
            normalize_due_date("2025-01-01T09:30:00+02:00").unwrap(),
            utc(2025, 1, 1, 7, 30)
        );
        assert_eq!(
            normalize_due_date("2024-12-31T22:00:00-05:00").unwrap(),
            utc(2025, 1, 1, 3, 0)
        );
        assert_eq!(
            normalize_due_date("2025-01-01T00:00:00Z").unwrap(),
            utc(2025, 1, 1, 0, 0)
        );
    }

    #[test]
    fn test_due_date_without_offset_is_taken_as_utc() {
        assert_eq!(normalize_due_date("2025-01-01").unwrap(), utc(2025, 1, 1, 0, 0));
        assert_eq!(
            normalize_due_date("2025-01-01T18:45:00").unwrap(),
            utc(2025, 1, 1, 18, 45)
        );
        assert_eq!(
            normalize_due_date("2025-01-01T18:45").unwrap(),
            utc(2025, 1, 1, 18, 45)
        );
    }

    #[test]
    fn test_due_date_garbage_is_rejected() {
        assert!(normalize_due_date("tomorrow").is_err());
        assert!(normalize_due_date("2025-13-01").is_err());
    }

    #[test]
    fn test_task_input_deserialization() {
        let input: TaskInput =
            serde_json::from_str(r#"{ "title": "Buy milk", "dueDate": "2025-01-01" }"#).unwrap();
        assert_eq!(input.due_date, Some(utc(2025, 1, 1, 0, 0)));
        assert_eq!(input.description, None);

        let input: TaskInput =
            serde_json::from_str(r#"{ "title": "Buy milk", "dueDate": "" }"#).unwrap();
        assert_eq!(input.due_date, None);

        let input: TaskInput = serde_json::from_str(r#"{ "title": "Buy milk" }"#).unwrap();
        assert_eq!(input.due_date, None);

        let bad: Result<TaskInput, _> =
            serde_json::from_str(r#"{ "title": "Buy milk", "dueDate": "soon" }"#);
        assert!(bad.is_err());

        let missing_title: Result<TaskInput, _> = serde_json::from_str(r#"{ "description": "x" }"#);
        assert!(missing_title.is_err());
    }

    #[test]
    fn test_task_serializes_camel_case() {
        let task = Task {
            id: 1,
            title: "Buy milk".to_string(),
            description: None,
            is_completed: true,
            created_at: utc(2024, 12, 1, 0, 0),
            due_date: Some(utc(2025, 1, 1, 0, 0)),
            project_id: 2,
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["isCompleted"], true);
        assert_eq!(json["projectId"], 2);
        assert_eq!(json["dueDate"], "2025-01-01T00:00:00Z");
    }
}
