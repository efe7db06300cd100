//! Plain-text views for the terminal client.

use chrono::{DateTime, Utc};

use super::session::Identity;
use super::stats::TaskStats;
use crate::models::{Project, Task};

/// First name when there is a non-empty one, otherwise the email.
pub fn display_name(identity: &Identity) -> &str {
    identity
        .first_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(&identity.email)
}

pub fn greeting(identity: &Identity) -> String {
    format!("Hello {}!", display_name(identity))
}

pub fn project_line(project: &Project) -> String {
    let mut line = format!("#{:<4} {}", project.id, project.name);
    if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
        line.push_str(&format!(" - {}", description));
    }
    line.push_str(&format!(" (created {})", project.created_at.format("%Y-%m-%d")));
    line
}

pub fn project_list(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects yet.".to_string();
    }
    let mut out = format!("My projects ({})\n", projects.len());
    for project in projects {
        out.push_str(&project_line(project));
        out.push('\n');
    }
    out
}

/// A task that is past due and still open.
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    !task.is_completed && task.due_date.map_or(false, |due| due < now)
}

pub fn task_line(task: &Task, now: DateTime<Utc>) -> String {
    let marker = if task.is_completed { "[x]" } else { "[ ]" };
    let mut line = format!("{} #{:<4} {}", marker, task.id, task.title);
    if let Some(due) = task.due_date {
        line.push_str(&format!(" (due {})", due.format("%Y-%m-%d")));
        if is_overdue(task, now) {
            line.push_str(" OVERDUE");
        }
    }
    line
}

pub fn task_list(tasks: &[Task], now: DateTime<Utc>) -> String {
    if tasks.is_empty() {
        return "No tasks in this project.".to_string();
    }
    let stats = TaskStats::from_tasks(tasks);
    let mut out = format!(
        "{}/{} completed ({}%)\n",
        stats.completed, stats.total, stats.percent
    );
    for task in tasks {
        out.push_str(&task_line(task, now));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn identity(first_name: Option<&str>) -> Identity {
        Identity {
            email: "alice@test.com".into(),
            first_name: first_name.map(Into::into),
            expires_at: Utc::now(),
        }
    }

    fn task(is_completed: bool, due: Option<DateTime<Utc>>) -> Task {
        Task {
            id: 3,
            title: "Buy milk".into(),
            description: None,
            is_completed,
            created_at: Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap(),
            due_date: due,
            project_id: 1,
        }
    }

    #[test]
    fn test_greeting_falls_back_to_email() {
        assert_eq!(greeting(&identity(Some("Alice"))), "Hello Alice!");
        assert_eq!(greeting(&identity(None)), "Hello alice@test.com!");
        assert_eq!(greeting(&identity(Some(""))), "Hello alice@test.com!");
    }

    #[test]
    fn test_task_line_markers() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let due = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(
            task_line(&task(false, Some(due)), now),
            "[ ] #3    Buy milk (due 2025-01-01) OVERDUE"
        );
        assert_eq!(
            task_line(&task(true, Some(due)), now),
            "[x] #3    Buy milk (due 2025-01-01)"
        );
        assert_eq!(task_line(&task(false, None), now), "[ ] #3    Buy milk");
    }

    #[test]
    fn test_task_list_header_has_stats() {
        let now = Utc::now();
        let out = task_list(&[task(true, None), task(false, None)], now);
        assert!(out.starts_with("1/2 completed (50%)\n"));
        assert_eq!(task_list(&[], now), "No tasks in this project.");
    }

    #[test]
    fn test_project_list() {
        let project = Project {
            id: 1,
            name: "Home".into(),
            description: Some("Chores".into()),
            created_at: Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap(),
            user_id: 1,
        };
        assert_eq!(
            project_list(&[project]),
            "My projects (1)\n#1    Home - Chores (created 2025-01-02)\n"
        );
        assert_eq!(project_list(&[]), "No projects yet.");
    }
}
