//! Month grid for the calendar view.
//!
//! The grid always shows the month containing *today*, padded with days of
//! the neighbouring months so every row runs Sunday to Saturday.

use chrono::{Datelike, Duration, NaiveDate};

use crate::date_key::DateKey;
use crate::todo_store::TodoStore;

pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MAX_WEEKS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub key: DateKey,
    pub day: u32,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub has_todos: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<CalendarDay>>,
}

impl CalendarGrid {
    /// e.g. `June 2024`
    pub fn month_label(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }

    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks.iter().flatten()
    }

    pub fn day_at(&self, row: usize, col: usize) -> Option<&CalendarDay> {
        self.weeks.get(row).and_then(|week| week.get(col))
    }

    /// Row and column of `key`, if the grid shows it.
    pub fn position(&self, key: DateKey) -> Option<(usize, usize)> {
        self.weeks.iter().enumerate().find_map(|(row, week)| {
            week.iter()
                .position(|d| d.key == key)
                .map(|col| (row, col))
        })
    }

    pub fn contains(&self, key: DateKey) -> bool {
        self.position(key).is_some()
    }
}

pub fn generate_calendar(today: DateKey, selected: DateKey, store: &TodoStore) -> CalendarGrid {
    let month = today.month();
    let first_of_month = today.date() - Duration::days(i64::from(today.day()) - 1);
    let lead = first_of_month.weekday().num_days_from_sunday();
    let mut current = first_of_month - Duration::days(i64::from(lead));

    let mut weeks = Vec::with_capacity(MAX_WEEKS);
    for week in 0..MAX_WEEKS {
        let mut days = Vec::with_capacity(7);
        for _ in 0..7 {
            let key = DateKey::new(current);
            days.push(CalendarDay {
                date: current,
                key,
                day: current.day(),
                is_current_month: current.month() == month,
                is_today: key == today,
                is_selected: key == selected,
                has_todos: store.has_todos(key),
            });
            current += Duration::days(1);
        }
        weeks.push(days);
        // Drop the 6th row when the month already ended by the 5th.
        if current.month() != month && week >= 4 {
            break;
        }
    }

    CalendarGrid {
        year: today.year(),
        month,
        weeks,
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::TodoId;
    use chrono::Weekday;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn grid(today: &str) -> CalendarGrid {
        let today = key(today);
        generate_calendar(today, today, &TodoStore::new())
    }

    #[test]
    fn test_june_2024_shape() {
        let g = grid("2024-06-15");
        assert_eq!(g.weeks.len(), 6);
        assert_eq!(g.month_label(), "June 2024");
        for week in &g.weeks {
            assert_eq!(week.len(), 7);
            assert_eq!(week[0].date.weekday(), Weekday::Sun);
            assert_eq!(week[6].date.weekday(), Weekday::Sat);
        }
        assert_eq!(g.weeks[0][0].key, key("2024-05-26"));
        assert_eq!(g.weeks[5][6].key, key("2024-07-06"));
    }

    #[test]
    fn test_days_are_contiguous() {
        let g = grid("2024-06-15");
        let days: Vec<_> = g.days().collect();
        for pair in days.windows(2) {
            assert_eq!(pair[0].date + Duration::days(1), pair[1].date);
        }
    }

    #[test]
    fn test_stops_after_fifth_row_when_month_ended() {
        // August 2024 starts on a Thursday and fills exactly five rows.
        let g = grid("2024-08-20");
        assert_eq!(g.weeks.len(), 5);
        assert_eq!(g.weeks[4][6].key, key("2024-08-31"));
    }

    #[test]
    fn test_fifth_row_may_be_all_overflow() {
        // February 2026 starts on a Sunday; four rows cover it, the fifth is
        // entirely March and the break only triggers from row index 4.
        let g = grid("2026-02-10");
        assert_eq!(g.weeks.len(), 5);
        assert!(g.weeks[4].iter().all(|d| !d.is_current_month));
        assert_eq!(g.weeks[4][0].key, key("2026-03-01"));
    }

    #[test]
    fn test_december_rolls_into_january() {
        // December 2024 starts on a Sunday: 31 days span rows 0..=4.
        let g = grid("2024-12-25");
        assert_eq!(g.weeks.len(), 5);
        assert_eq!(g.weeks[4][6].key, key("2025-01-04"));
        assert!(!g.weeks[4][6].is_current_month);
    }

    #[test]
    fn test_flags() {
        let today = key("2024-06-15");
        let selected = key("2024-07-02");
        let store = TodoStore::new()
            .add_todo(key("2024-06-03"), "a", TodoId(1))
            .add_todo(key("2024-06-04"), "b", TodoId(2))
            .delete_todo(TodoId(2), key("2024-06-04"));
        let g = generate_calendar(today, selected, &store);

        let find = |k: &str| g.days().find(|d| d.key == key(k)).unwrap().clone();
        assert!(find("2024-06-15").is_today);
        assert!(!find("2024-06-15").is_selected);
        assert!(find("2024-07-02").is_selected);
        assert!(!find("2024-07-02").is_current_month);
        assert!(find("2024-06-03").has_todos);
        assert!(!find("2024-06-04").has_todos);
        assert_eq!(g.days().filter(|d| d.is_today).count(), 1);
    }

    #[test]
    fn test_month_follows_today_not_selection() {
        let g = generate_calendar(key("2024-06-15"), key("2024-09-01"), &TodoStore::new());
        assert_eq!(g.month, 6);
        assert!(g.days().all(|d| !d.is_selected));
    }

    #[test]
    fn test_position() {
        let g = grid("2024-06-15");
        assert_eq!(g.position(key("2024-05-26")), Some((0, 0)));
        assert_eq!(g.position(key("2024-06-15")), Some((2, 6)));
        assert_eq!(g.position(key("2024-08-01")), None);
        assert_eq!(g.day_at(2, 6).map(|d| d.day), Some(15));
    }
}
