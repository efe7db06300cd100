use crate::models::Task;

/// Progress summary shown above a task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    /// Rounded to the nearest integer; 0 for an empty list.
    pub percent: u32,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.is_completed).count();
        let percent = if total == 0 {
            0
        } else {
            (completed as f64 / total as f64 * 100.0).round() as u32
        };
        Self {
            total,
            completed,
            percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn tasks(flags: &[bool]) -> Vec<Task> {
        flags
            .iter()
            .enumerate()
            .map(|(i, done)| Task {
                id: i as i32 + 1,
                title: format!("task {}", i),
                description: None,
                is_completed: *done,
                created_at: Utc::now(),
                due_date: None,
                project_id: 1,
            })
            .collect()
    }

    #[test]
    fn test_empty_list_is_zero_percent() {
        assert_eq!(TaskStats::from_tasks(&[]), TaskStats::default());
    }

    #[test]
    fn test_percent_is_rounded() {
        let stats = TaskStats::from_tasks(&tasks(&[true, false, false]));
        assert_eq!((stats.total, stats.completed, stats.percent), (3, 1, 33));

        let stats = TaskStats::from_tasks(&tasks(&[true, true, false]));
        assert_eq!(stats.percent, 67);

        let stats = TaskStats::from_tasks(&tasks(&[true, false]));
        assert_eq!(stats.percent, 50);
    }
}
