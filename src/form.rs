// Uncommitted input: validation, commit and the deadline editing rules.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationFailure;
use crate::model::{Category, Client, Priority, Task};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub title: String,
    pub deadline: NaiveDateTime,
    pub priority: Option<Priority>,
    pub client: Client,
    pub category: Category,
}

impl FormState {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            title: String::new(),
            deadline: now,
            priority: None,
            client: Client::default(),
            category: Category::default(),
        }
    }

    // Title is checked as-is; whitespace-only titles are accepted.
    pub fn validate(&self) -> Result<Priority, ValidationFailure> {
        if self.title.is_empty() {
            return Err(ValidationFailure::MissingTitle);
        }
        self.priority.ok_or(ValidationFailure::MissingPriority)
    }

    /// Turns the form into a task and clears title, deadline and priority.
    /// Client and category carry over to the next task. On failure nothing changes.
    pub fn commit(&mut self, now: NaiveDateTime) -> Result<Task, ValidationFailure> {
        let priority = self.validate()?;
        let task = Task::new(
            std::mem::take(&mut self.title),
            self.deadline,
            priority,
            self.client,
            self.category,
        );
        self.deadline = now;
        self.priority = None;
        Ok(task)
    }

    // Replaces the calendar date, keeping the time of day.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.deadline = date.and_time(self.deadline.time());
    }

    // Replaces hour and minute, keeping the date and seconds.
    pub fn set_time(&mut self, time: NaiveTime) {
        if let Some(updated) = self
            .deadline
            .with_hour(time.hour())
            .and_then(|d| d.with_minute(time.minute()))
        {
            self.deadline = updated;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .unwrap()
    }

    #[test]
    fn empty_title_is_rejected_for_any_priority() {
        for priority in [None, Some(Priority::High), Some(Priority::Low)] {
            let mut form = FormState::new(at(2024, 3, 1, 10, 0));
            form.priority = priority;
            let before = form.clone();
            assert_eq!(
                form.commit(at(2024, 3, 2, 0, 0)),
                Err(ValidationFailure::MissingTitle)
            );
            assert_eq!(form, before);
        }
    }

    #[test]
    fn missing_priority_is_rejected() {
        let mut form = FormState::new(at(2024, 3, 1, 10, 0));
        form.title = "Review logo".into();
        let before = form.clone();
        assert_eq!(
            form.commit(at(2024, 3, 2, 0, 0)),
            Err(ValidationFailure::MissingPriority)
        );
        assert_eq!(form, before);
    }

    #[test]
    fn whitespace_title_is_accepted() {
        let mut form = FormState::new(at(2024, 3, 1, 10, 0));
        form.title = "   ".into();
        form.priority = Some(Priority::Medium);
        assert!(form.commit(at(2024, 3, 2, 0, 0)).is_ok());
    }

    #[test]
    fn commit_resets_title_deadline_priority_only() {
        let mut form = FormState::new(at(2024, 3, 1, 10, 0));
        form.title = "Edit video".into();
        form.priority = Some(Priority::High);
        form.client = Client::Saae;
        form.category = Category::Video;

        let now = at(2024, 3, 2, 8, 15);
        let task = form.commit(now).unwrap();

        assert_eq!(task.title, "Edit video");
        assert_eq!(task.deadline, at(2024, 3, 1, 10, 0));
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.client, Client::Saae);
        assert_eq!(task.category, Category::Video);
        assert!(!task.completed);

        assert!(form.title.is_empty());
        assert_eq!(form.priority, None);
        assert_eq!(form.deadline, now);
        assert_eq!(form.client, Client::Saae);
        assert_eq!(form.category, Category::Video);
    }

    #[test]
    fn date_and_time_are_set_independently() {
        let mut form = FormState::new(at(2024, 3, 1, 10, 0));
        form.set_date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(form.deadline, at(2024, 3, 5, 10, 0));

        form.set_time(NaiveTime::from_hms_opt(14, 30, 0).unwrap());
        assert_eq!(form.deadline, at(2024, 3, 5, 14, 30));
    }

    #[test]
    fn set_time_keeps_seconds() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(10, 0, 42))
            .unwrap();
        let mut form = FormState::new(start);
        form.set_time(NaiveTime::from_hms_opt(7, 5, 0).unwrap());
        assert_eq!(form.deadline.second(), 42);
        assert_eq!((form.deadline.hour(), form.deadline.minute()), (7, 5));
    }
}
