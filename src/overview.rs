use std::collections::BTreeSet;

use serde::Serialize;

use crate::date_key::DateKey;
use crate::todo::Todo;
use crate::todo_store::TodoStore;

/// A todo on or after today, with the heading it is listed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingTodo {
    #[serde(flatten)]
    pub todo: Todo,
    pub label: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverviewStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub dates_with_todos: usize,
}

/// Every todo dated today or later, ordered by date, then pending before
/// completed, then id.
pub fn upcoming_todos(store: &TodoStore, today: DateKey) -> Vec<UpcomingTodo> {
    let mut upcoming: Vec<UpcomingTodo> = store
        .buckets()
        .filter(|(date, _)| **date >= today)
        .flat_map(|(date, todos)| {
            let label = date_label(*date, today);
            todos.iter().map(move |todo| UpcomingTodo {
                todo: todo.clone(),
                label: label.clone(),
            })
        })
        .collect();

    upcoming.sort_by(|a, b| {
        a.todo
            .date
            .cmp(&b.todo.date)
            .then(a.todo.completed.cmp(&b.todo.completed))
            .then(a.todo.id.cmp(&b.todo.id))
    });
    upcoming
}

pub fn overview_stats(upcoming: &[UpcomingTodo]) -> OverviewStats {
    let completed = upcoming.iter().filter(|u| u.todo.completed).count();
    let dates: BTreeSet<DateKey> = upcoming.iter().map(|u| u.todo.date).collect();
    OverviewStats {
        total: upcoming.len(),
        completed,
        pending: upcoming.len() - completed,
        dates_with_todos: dates.len(),
    }
}

pub fn date_label(date: DateKey, today: DateKey) -> String {
    if date == today {
        "Today".to_string()
    } else if Some(date) == today.offset_days(1) {
        "Tomorrow".to_string()
    } else {
        date.short_label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::TodoId;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn sample_store() -> TodoStore {
        TodoStore::new()
            .add_todo(key("2024-06-10"), "one", TodoId(1))
            .toggle_todo(TodoId(1), key("2024-06-10"))
            .add_todo(key("2024-06-10"), "two", TodoId(2))
            .add_todo(key("2024-06-09"), "three", TodoId(3))
    }

    #[test]
    fn test_sort_order() {
        let upcoming = upcoming_todos(&sample_store(), key("2024-06-09"));
        let ids: Vec<i64> = upcoming.iter().map(|u| u.todo.id.0).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_stats() {
        let upcoming = upcoming_todos(&sample_store(), key("2024-06-09"));
        assert_eq!(
            overview_stats(&upcoming),
            OverviewStats {
                total: 3,
                completed: 1,
                pending: 2,
                dates_with_todos: 2,
            }
        );
    }

    #[test]
    fn test_past_dates_are_excluded_from_list_and_stats() {
        let upcoming = upcoming_todos(&sample_store(), key("2024-06-10"));
        assert_eq!(upcoming.len(), 2);
        assert_eq!(overview_stats(&upcoming).dates_with_todos, 1);
    }

    #[test]
    fn test_empty_bucket_does_not_count_as_a_date() {
        let store = TodoStore::new()
            .add_todo(key("2024-06-12"), "gone", TodoId(1))
            .delete_todo(TodoId(1), key("2024-06-12"));
        let upcoming = upcoming_todos(&store, key("2024-06-09"));
        assert_eq!(overview_stats(&upcoming), OverviewStats::default());
    }

    #[test]
    fn test_serialized_shape() {
        let upcoming = upcoming_todos(&sample_store(), key("2024-06-09"));
        assert_eq!(
            serde_json::to_value(&upcoming[0]).unwrap(),
            serde_json::json!({
                "id": 3,
                "text": "three",
                "completed": false,
                "date": "2024-06-09",
                "label": "Today",
            })
        );
        assert_eq!(
            serde_json::to_value(overview_stats(&upcoming)).unwrap(),
            serde_json::json!({
                "total": 3,
                "completed": 1,
                "pending": 2,
                "dates_with_todos": 2,
            })
        );
    }

    #[test]
    fn test_labels() {
        let today = key("2024-06-09");
        let upcoming = upcoming_todos(&sample_store(), today);
        assert_eq!(upcoming[0].label, "Today");
        assert_eq!(upcoming[1].label, "Tomorrow");
        assert_eq!(date_label(key("2024-06-12"), today), "Wed, Jun 12, 2024");
    }
}
