// Deadline-ordered task collection and its display rows.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::model::{Category, Client, Priority, Task};

pub const DEADLINE_FORMAT: &str = "%d/%m/%Y %H:%M";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a task and re-sorts by deadline. Equal deadlines keep insertion order.
    pub fn append(&mut self, task: Task) {
        self.tasks.push(task);
        self.tasks.sort_by_key(|t| t.deadline);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn rows(&self) -> impl Iterator<Item = TaskRow<'_>> {
        self.iter().map(TaskRow::from_task)
    }
}

// Row background class. `Priority` is a closed enum, so every task maps
// to exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Warning,
    Caution,
    Success,
}

impl RowStyle {
    pub fn for_priority(priority: Priority) -> Self {
        match priority {
            Priority::High => RowStyle::Warning,
            Priority::Medium => RowStyle::Caution,
            Priority::Low => RowStyle::Success,
        }
    }

    pub fn background(&self) -> Color {
        match self {
            RowStyle::Warning => Priority::High.color(),
            RowStyle::Caution => Priority::Medium.color(),
            RowStyle::Success => Priority::Low.color(),
        }
    }
}

// One rendered entry of the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow<'a> {
    pub title: &'a str,
    pub deadline: String,
    pub priority: Priority,
    pub client: Client,
    pub category: Category,
    pub style: RowStyle,
}

impl<'a> TaskRow<'a> {
    fn from_task(task: &'a Task) -> Self {
        Self {
            title: &task.title,
            deadline: task.deadline.format(DEADLINE_FORMAT).to_string(),
            priority: task.priority,
            client: task.client,
            category: task.category,
            style: RowStyle::for_priority(task.priority),
        }
    }

    pub fn detail_lines(&self) -> [String; 4] {
        [
            format!("Prazo: {}", self.deadline),
            format!("Prioridade: {}", self.priority),
            format!("Cliente: {}", self.client),
            format!("Categoria: {}", self.category),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use proptest::prelude::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .unwrap()
    }

    fn task(title: &str, deadline: NaiveDateTime, priority: Priority) -> Task {
        Task::new(
            title.to_string(),
            deadline,
            priority,
            Client::default(),
            Category::default(),
        )
    }

    #[test]
    fn append_keeps_deadlines_non_decreasing() {
        let mut store = TaskStore::new();
        let deadlines = [
            at(2024, 6, 1, 9, 0),
            at(2023, 12, 31, 23, 59),
            at(2024, 6, 1, 8, 0),
            at(2025, 1, 1, 0, 0),
            at(2024, 6, 1, 9, 0),
            at(2020, 2, 29, 12, 0),
        ];
        for (i, deadline) in deadlines.into_iter().enumerate() {
            store.append(task(&format!("t{i}"), deadline, Priority::Low));
            let seen: Vec<_> = store.iter().map(|t| t.deadline).collect();
            assert!(seen.windows(2).all(|w| w[0] <= w[1]), "unsorted after {i}: {seen:?}");
            assert_eq!(store.len(), i + 1);
        }
    }

    #[test]
    fn equal_deadlines_keep_insertion_order() {
        let mut store = TaskStore::new();
        let when = at(2024, 1, 1, 12, 0);
        store.append(task("first", when, Priority::High));
        store.append(task("second", when, Priority::Low));
        store.append(task("earlier", at(2023, 1, 1, 12, 0), Priority::Low));
        let titles: Vec<_> = store.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["earlier", "first", "second"]);
    }

    // Small offset range so duplicate deadlines come up often.
    fn deadline_offsets() -> impl Strategy<Value = Vec<i64>> {
        prop::collection::vec(0i64..12, 0..40)
    }

    proptest! {
        #[test]
        fn prop_append_keeps_order_for_any_sequence(offsets in deadline_offsets()) {
            let base = at(2024, 1, 1, 0, 0);
            let mut store = TaskStore::new();
            for (seq, offset) in offsets.iter().enumerate() {
                let deadline = base + Duration::minutes(offset * 30);
                store.append(task(&seq.to_string(), deadline, Priority::Medium));
                prop_assert_eq!(store.len(), seq + 1);

                let tasks: Vec<&Task> = store.iter().collect();
                for pair in tasks.windows(2) {
                    prop_assert!(
                        pair[0].deadline <= pair[1].deadline,
                        "deadline went backwards: {} > {}",
                        pair[0].deadline,
                        pair[1].deadline
                    );
                    if pair[0].deadline == pair[1].deadline {
                        let a: usize = pair[0].title.parse().unwrap();
                        let b: usize = pair[1].title.parse().unwrap();
                        prop_assert!(a < b, "tie reordered: {} before {}", a, b);
                    }
                }
            }
        }
    }

    #[test]
    fn row_style_is_a_function_of_priority() {
        assert_eq!(RowStyle::for_priority(Priority::High), RowStyle::Warning);
        assert_eq!(RowStyle::for_priority(Priority::Medium), RowStyle::Caution);
        assert_eq!(RowStyle::for_priority(Priority::Low), RowStyle::Success);
        assert_eq!(RowStyle::Warning.background(), Priority::High.color());
    }

    #[test]
    fn rows_carry_formatted_details() {
        let mut store = TaskStore::new();
        store.append(task("Edit video", at(2024, 6, 1, 9, 0), Priority::High));
        let row = store.rows().next().unwrap();
        assert_eq!(row.title, "Edit video");
        assert_eq!(
            row.detail_lines(),
            [
                "Prazo: 01/06/2024 09:00".to_string(),
                "Prioridade: ALTA".to_string(),
                "Cliente: CONTRACS-DF".to_string(),
                "Categoria: IMAGEM".to_string(),
            ]
        );
    }
}
