use std::collections::BTreeMap;

use crate::date_key::DateKey;
use crate::todo::{Todo, TodoId};

/// Todos bucketed by date, each bucket in insertion order.
///
/// Every mutation takes `&self` and returns a new store. A bucket emptied by
/// deletion stays in the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoStore {
    buckets: BTreeMap<DateKey, Vec<Todo>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }

    /// Appends a todo to `date`. Blank `text` leaves the store unchanged.
    pub fn add_todo(&self, date: DateKey, text: &str, id: TodoId) -> Self {
        let text = text.trim();
        if text.is_empty() {
            log::debug!("Ignoring blank todo for {}", date);
            return self.clone();
        }

        let mut next = self.clone();
        if !next.buckets.contains_key(&date) {
            next.buckets.insert(date, Vec::new());
        }
        if let Some(bucket) = next.buckets.get_mut(&date) {
            bucket.push(Todo {
                id,
                text: text.to_string(),
                completed: false,
                date,
            });
        }
        next
    }

    pub fn delete_todo(&self, id: TodoId, date: DateKey) -> Self {
        let mut next = self.clone();
        match next.buckets.get_mut(&date) {
            Some(bucket) => bucket.retain(|t| t.id != id),
            None => log::debug!("No todos on {}, nothing to delete", date),
        }
        next
    }

    pub fn toggle_todo(&self, id: TodoId, date: DateKey) -> Self {
        let mut next = self.clone();
        if let Some(todo) = next
            .buckets
            .get_mut(&date)
            .and_then(|bucket| bucket.iter_mut().find(|t| t.id == id))
        {
            todo.completed = !todo.completed;
        } else {
            log::debug!("Todo {:?} not found on {}", id, date);
        }
        next
    }

    pub fn current_todos(&self, date: DateKey) -> &[Todo] {
        self.buckets.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_todos(&self, date: DateKey) -> bool {
        !self.current_todos(date).is_empty()
    }

    /// Buckets in ascending date order, empty ones included.
    pub fn buckets(&self) -> impl Iterator<Item = (&DateKey, &Vec<Todo>)> {
        self.buckets.iter()
    }

    pub fn contains_date(&self, date: DateKey) -> bool {
        self.buckets.contains_key(&date)
    }
}
