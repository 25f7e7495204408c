//! Session state and the transitions a user can trigger.
//!
//! [`AppState::apply`] is the only way state changes: it takes the current
//! state by value and returns the next one, so each user action is a single
//! atomic update.

use crate::calendar::{generate_calendar, CalendarGrid};
use crate::date_key::DateKey;
use crate::overview::{overview_stats, upcoming_todos, OverviewStats, UpcomingTodo};
use crate::todo::{Todo, TodoId};
use crate::todo_store::TodoStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Calendar,
    Overview,
}

impl View {
    pub fn other(self) -> Self {
        match self {
            View::Calendar => View::Overview,
            View::Overview => View::Calendar,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Calendar => "Calendar",
            View::Overview => "Overview",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub selected_date: DateKey,
    pub current_view: View,
    /// Draft text of the add box.
    pub input_value: String,
}

impl ViewState {
    pub fn new(today: DateKey) -> Self {
        Self {
            selected_date: today,
            current_view: View::Calendar,
            input_value: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectDate(DateKey),
    SetInput(String),
    InputChar(char),
    InputBackspace,
    /// Adds the draft to the selected date under the given id.
    AddTodo { id: TodoId },
    /// `date: None` means the selected date.
    ToggleTodo { id: TodoId, date: Option<DateKey> },
    /// `date: None` means the selected date.
    DeleteTodo { id: TodoId, date: Option<DateKey> },
    SwitchView(View),
    ToggleView,
    /// Selects `date` and switches to the calendar in one step.
    ShowInCalendar(DateKey),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub today: DateKey,
    pub store: TodoStore,
    pub view: ViewState,
}

impl AppState {
    pub fn new(today: DateKey) -> Self {
        Self {
            today,
            store: TodoStore::new(),
            view: ViewState::new(today),
        }
    }

    pub fn apply(self, action: Action) -> Self {
        let AppState {
            today,
            store,
            mut view,
        } = self;

        match action {
            Action::SelectDate(date) => {
                view.selected_date = date;
                AppState { today, store, view }
            }
            Action::SetInput(text) => {
                view.input_value = text;
                AppState { today, store, view }
            }
            Action::InputChar(c) => {
                view.input_value.push(c);
                AppState { today, store, view }
            }
            Action::InputBackspace => {
                view.input_value.pop();
                AppState { today, store, view }
            }
            Action::AddTodo { id } => {
                if view.input_value.trim().is_empty() {
                    return AppState { today, store, view };
                }
                let store = store.add_todo(view.selected_date, &view.input_value, id);
                log::info!("Added todo {:?} on {}", id, view.selected_date);
                view.input_value.clear();
                AppState { today, store, view }
            }
            Action::ToggleTodo { id, date } => {
                let date = date.unwrap_or(view.selected_date);
                let store = store.toggle_todo(id, date);
                AppState { today, store, view }
            }
            Action::DeleteTodo { id, date } => {
                let date = date.unwrap_or(view.selected_date);
                log::info!("Deleting todo {:?} on {}", id, date);
                let store = store.delete_todo(id, date);
                AppState { today, store, view }
            }
            Action::SwitchView(target) => {
                view.current_view = target;
                AppState { today, store, view }
            }
            Action::ToggleView => {
                view.current_view = view.current_view.other();
                AppState { today, store, view }
            }
            Action::ShowInCalendar(date) => {
                view.selected_date = date;
                view.current_view = View::Calendar;
                AppState { today, store, view }
            }
        }
    }

    pub fn current_todos(&self) -> &[Todo] {
        self.store.current_todos(self.view.selected_date)
    }

    pub fn upcoming_todos(&self) -> Vec<UpcomingTodo> {
        upcoming_todos(&self.store, self.today)
    }

    pub fn overview_stats(&self) -> OverviewStats {
        overview_stats(&self.upcoming_todos())
    }

    pub fn calendar(&self) -> CalendarGrid {
        generate_calendar(self.today, self.view.selected_date, &self.store)
    }

    /// e.g. `Saturday, June 15, 2024`
    pub fn format_selected_date(&self) -> String {
        self.view.selected_date.long_label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn state() -> AppState {
        AppState::new(key("2024-06-15"))
    }

    #[test]
    fn test_defaults() {
        let s = state();
        assert_eq!(s.view.selected_date, key("2024-06-15"));
        assert_eq!(s.view.current_view, View::Calendar);
        assert!(s.view.input_value.is_empty());
        assert!(s.current_todos().is_empty());
    }

    #[test]
    fn test_add_uses_draft_and_clears_it() {
        let s = state()
            .apply(Action::SetInput("  water plants ".into()))
            .apply(Action::AddTodo { id: TodoId(1) });
        assert!(s.view.input_value.is_empty());
        assert_eq!(s.current_todos()[0].text, "water plants");
        assert_eq!(s.current_todos()[0].date, key("2024-06-15"));
    }

    #[test]
    fn test_blank_add_keeps_draft_and_store() {
        let before = state().apply(Action::SetInput("   ".into()));
        let after = before.clone().apply(Action::AddTodo { id: TodoId(1) });
        assert_eq!(after, before);
    }

    #[test]
    fn test_input_editing() {
        let s = state()
            .apply(Action::InputChar('h'))
            .apply(Action::InputChar('i'))
            .apply(Action::InputChar('!'))
            .apply(Action::InputBackspace);
        assert_eq!(s.view.input_value, "hi");
        let s = s.apply(Action::InputBackspace).apply(Action::InputBackspace).apply(Action::InputBackspace);
        assert_eq!(s.view.input_value, "");
    }

    #[test]
    fn test_toggle_and_delete_default_to_selected_date() {
        let s = state()
            .apply(Action::SetInput("a".into()))
            .apply(Action::AddTodo { id: TodoId(1) })
            .apply(Action::ToggleTodo { id: TodoId(1), date: None });
        assert!(s.current_todos()[0].completed);

        let s = s.apply(Action::DeleteTodo { id: TodoId(1), date: None });
        assert!(s.current_todos().is_empty());
    }

    #[test]
    fn test_explicit_date_wins_over_selection() {
        let s = state()
            .apply(Action::SelectDate(key("2024-06-20")))
            .apply(Action::SetInput("later".into()))
            .apply(Action::AddTodo { id: TodoId(5) })
            .apply(Action::SelectDate(key("2024-06-15")));

        let untouched = s.clone().apply(Action::ToggleTodo { id: TodoId(5), date: None });
        assert_eq!(untouched, s);

        let toggled = s.apply(Action::ToggleTodo {
            id: TodoId(5),
            date: Some(key("2024-06-20")),
        });
        assert!(toggled.store.current_todos(key("2024-06-20"))[0].completed);
    }

    #[test]
    fn test_view_switching_keeps_selection_and_store() {
        let s = state()
            .apply(Action::SelectDate(key("2024-06-18")))
            .apply(Action::SetInput("x".into()))
            .apply(Action::AddTodo { id: TodoId(1) });
        let switched = s.clone().apply(Action::ToggleView);
        assert_eq!(switched.view.current_view, View::Overview);
        assert_eq!(switched.view.selected_date, s.view.selected_date);
        assert_eq!(switched.store, s.store);

        let back = switched.apply(Action::SwitchView(View::Calendar));
        assert_eq!(back, s);
    }

    #[test]
    fn test_show_in_calendar_updates_both_fields() {
        let s = state()
            .apply(Action::SwitchView(View::Overview))
            .apply(Action::ShowInCalendar(key("2024-07-04")));
        assert_eq!(s.view.current_view, View::Calendar);
        assert_eq!(s.view.selected_date, key("2024-07-04"));
    }

    #[test]
    fn test_selecting_overflow_day_keeps_month_label() {
        let s = state().apply(Action::SelectDate(key("2024-07-02")));
        let grid = s.calendar();
        assert_eq!(grid.month_label(), "June 2024");
        assert!(grid.days().any(|d| d.is_selected && !d.is_current_month));
    }

    #[test]
    fn test_format_selected_date() {
        assert_eq!(state().format_selected_date(), "Saturday, June 15, 2024");
    }
}
