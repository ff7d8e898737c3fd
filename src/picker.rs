// Overlay widgets' state: calendar, clock and fixed-option list.
//
// Each picker consumes keys and, once the user is done, yields a
// `PickerOutcome`. Applying the outcome is the caller's job.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveTime, Timelike};
use crossterm::event::KeyCode;

use crate::model::Choice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerOutcome<T> {
    Selected(T),
    Cancelled,
}

pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = first.and_then(|d| d.checked_add_months(Months::new(1)));
    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 30,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePicker {
    cursor: NaiveDate,
    typed: String,
}

impl DatePicker {
    pub fn new(seed: NaiveDate) -> Self {
        Self {
            cursor: seed,
            typed: String::new(),
        }
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn year(&self) -> i32 {
        self.cursor.year()
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.cursor.month0() as usize]
    }

    // Monday-first rows of the visible month; `None` pads cells outside it.
    pub fn weeks(&self) -> Vec<[Option<NaiveDate>; 7]> {
        let Some(first) = self.cursor.with_day(1) else {
            return Vec::new();
        };
        let offset = first.weekday().num_days_from_monday() as usize;
        let days = days_in_month(first.year(), first.month()) as usize;
        let rows = (offset + days).div_ceil(7);

        let mut weeks = vec![[None; 7]; rows];
        for day in 0..days {
            let cell = offset + day;
            weeks[cell / 7][cell % 7] = first.with_day(day as u32 + 1);
        }
        weeks
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Option<PickerOutcome<NaiveDate>> {
        match key {
            KeyCode::Esc => return Some(PickerOutcome::Cancelled),
            KeyCode::Enter => return Some(PickerOutcome::Selected(self.cursor)),
            KeyCode::Left => self.shift_days(-1),
            KeyCode::Right => self.shift_days(1),
            KeyCode::Up => self.shift_days(-7),
            KeyCode::Down => self.shift_days(7),
            KeyCode::PageUp => self.shift_months(-1),
            KeyCode::PageDown => self.shift_months(1),
            KeyCode::Char(c) if c.is_ascii_digit() => self.type_digit(c),
            KeyCode::Backspace => {
                self.typed.pop();
            }
            _ => {}
        }
        None
    }

    fn shift_days(&mut self, days: i64) {
        self.typed.clear();
        if let Some(date) = self.cursor.checked_add_signed(Duration::days(days)) {
            self.cursor = date;
        }
    }

    // Month arithmetic clamps to the last valid day (31 Jan + 1 month = 29 Feb).
    fn shift_months(&mut self, months: i32) {
        self.typed.clear();
        let step = Months::new(months.unsigned_abs());
        let moved = if months < 0 {
            self.cursor.checked_sub_months(step)
        } else {
            self.cursor.checked_add_months(step)
        };
        if let Some(date) = moved {
            self.cursor = date;
        }
    }

    fn type_digit(&mut self, c: char) {
        if self.typed.len() >= 2 {
            self.typed.clear();
        }
        self.typed.push(c);
        let day = self.typed.parse::<u32>().ok().and_then(|d| self.cursor.with_day(d));
        match day {
            Some(date) => self.cursor = date,
            None => {
                // Start over from this digit, e.g. "4" then "5" on a 31-day month.
                self.typed.clear();
                self.typed.push(c);
                if let Some(date) = c.to_digit(10).and_then(|d| self.cursor.with_day(d)) {
                    self.cursor = date;
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Hour,
    Minute,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimePicker {
    hour: u32,
    minute: u32,
    field: TimeField,
    typed: String,
}

impl TimePicker {
    pub fn new(seed: NaiveTime) -> Self {
        Self {
            hour: seed.hour(),
            minute: seed.minute(),
            field: TimeField::Hour,
            typed: String::new(),
        }
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn field(&self) -> TimeField {
        self.field
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Option<PickerOutcome<NaiveTime>> {
        match key {
            KeyCode::Esc => return Some(PickerOutcome::Cancelled),
            KeyCode::Enter => {
                return NaiveTime::from_hms_opt(self.hour, self.minute, 0)
                    .map(PickerOutcome::Selected);
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_field();
            }
            KeyCode::Up => self.step(1),
            KeyCode::Down => self.step(-1),
            KeyCode::PageUp => self.step(10),
            KeyCode::PageDown => self.step(-10),
            KeyCode::Char(c) if c.is_ascii_digit() => self.type_digit(c),
            _ => {}
        }
        None
    }

    pub fn toggle_field(&mut self) {
        self.typed.clear();
        self.field = match self.field {
            TimeField::Hour => TimeField::Minute,
            TimeField::Minute => TimeField::Hour,
        };
    }

    fn limit(&self) -> u32 {
        match self.field {
            TimeField::Hour => 24,
            TimeField::Minute => 60,
        }
    }

    fn value_mut(&mut self) -> &mut u32 {
        match self.field {
            TimeField::Hour => &mut self.hour,
            TimeField::Minute => &mut self.minute,
        }
    }

    fn step(&mut self, delta: i32) {
        self.typed.clear();
        let limit = self.limit() as i32;
        let value = self.value_mut();
        *value = (*value as i32 + delta).rem_euclid(limit) as u32;
    }

    fn type_digit(&mut self, c: char) {
        if self.typed.len() >= 2 {
            self.typed.clear();
        }
        self.typed.push(c);
        let limit = self.limit();
        let parsed = self.typed.parse::<u32>().ok().filter(|v| *v < limit);
        match parsed {
            Some(v) => *self.value_mut() = v,
            None => {
                self.typed.clear();
                self.typed.push(c);
                if let Some(v) = c.to_digit(10) {
                    *self.value_mut() = v;
                }
            }
        }
    }
}

// Full-screen list of a fixed option set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionModal<T: Choice> {
    highlighted: usize,
    _choice: std::marker::PhantomData<T>,
}

impl<T: Choice> SelectionModal<T> {
    pub fn new(current: T) -> Self {
        Self {
            highlighted: current.index(),
            _choice: std::marker::PhantomData,
        }
    }

    pub fn options(&self) -> &'static [T] {
        T::ALL
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    // Picks the option at `index`, as a click on it would.
    pub fn choose(&self, index: usize) -> Option<PickerOutcome<T>> {
        T::ALL.get(index).copied().map(PickerOutcome::Selected)
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Option<PickerOutcome<T>> {
        let count = T::ALL.len();
        match key {
            KeyCode::Esc => return Some(PickerOutcome::Cancelled),
            KeyCode::Enter => return self.choose(self.highlighted),
            KeyCode::Up => self.highlighted = (self.highlighted + count - 1) % count,
            KeyCode::Down => self.highlighted = (self.highlighted + 1) % count,
            KeyCode::Home => self.highlighted = 0,
            KeyCode::End => self.highlighted = count - 1,
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Client};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn calendar_grid_starts_on_monday() {
        // March 2024 starts on a Friday.
        let picker = DatePicker::new(date(2024, 3, 10));
        let weeks = picker.weeks();
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][3], None);
        assert_eq!(weeks[0][4], Some(date(2024, 3, 1)));
        assert_eq!(weeks[4][6], Some(date(2024, 3, 31)));
        let filled = weeks.iter().flatten().flatten().count();
        assert_eq!(filled, 31);
    }

    #[test]
    fn date_picker_navigates_and_selects() {
        let mut picker = DatePicker::new(date(2024, 3, 1));
        assert_eq!(picker.handle_key(KeyCode::Right), None);
        assert_eq!(picker.handle_key(KeyCode::Down), None);
        assert_eq!(picker.cursor(), date(2024, 3, 9));
        picker.handle_key(KeyCode::PageDown);
        assert_eq!(picker.cursor(), date(2024, 4, 9));
        assert_eq!(
            picker.handle_key(KeyCode::Enter),
            Some(PickerOutcome::Selected(date(2024, 4, 9)))
        );
    }

    #[test]
    fn month_shift_clamps_day() {
        let mut picker = DatePicker::new(date(2024, 1, 31));
        picker.handle_key(KeyCode::PageDown);
        assert_eq!(picker.cursor(), date(2024, 2, 29));
        assert_eq!(picker.month_name(), "Fevereiro");
    }

    #[test]
    fn typed_digits_jump_to_day() {
        let mut picker = DatePicker::new(date(2024, 3, 1));
        picker.handle_key(KeyCode::Char('2'));
        assert_eq!(picker.cursor(), date(2024, 3, 2));
        picker.handle_key(KeyCode::Char('5'));
        assert_eq!(picker.cursor(), date(2024, 3, 25));
        picker.handle_key(KeyCode::Char('4'));
        picker.handle_key(KeyCode::Char('5'));
        // "45" is not a day, so the second digit starts a new entry.
        assert_eq!(picker.cursor(), date(2024, 3, 5));
    }

    #[test]
    fn date_picker_escape_cancels() {
        let mut picker = DatePicker::new(date(2024, 3, 1));
        picker.handle_key(KeyCode::Right);
        assert_eq!(picker.handle_key(KeyCode::Esc), Some(PickerOutcome::Cancelled));
    }

    #[test]
    fn time_picker_wraps_and_selects() {
        let mut picker = TimePicker::new(NaiveTime::from_hms_opt(23, 59, 0).unwrap());
        picker.handle_key(KeyCode::Up);
        assert_eq!(picker.hour(), 0);
        picker.handle_key(KeyCode::Right);
        assert_eq!(picker.field(), TimeField::Minute);
        picker.handle_key(KeyCode::Up);
        assert_eq!(picker.minute(), 0);
        picker.handle_key(KeyCode::Down);
        assert_eq!(picker.minute(), 59);
        assert_eq!(
            picker.handle_key(KeyCode::Enter),
            Some(PickerOutcome::Selected(NaiveTime::from_hms_opt(0, 59, 0).unwrap()))
        );
    }

    #[test]
    fn time_picker_accepts_typed_values() {
        let mut picker = TimePicker::new(NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        picker.handle_key(KeyCode::Char('1'));
        picker.handle_key(KeyCode::Char('4'));
        picker.handle_key(KeyCode::Tab);
        picker.handle_key(KeyCode::Char('3'));
        picker.handle_key(KeyCode::Char('0'));
        assert_eq!((picker.hour(), picker.minute()), (14, 30));
    }

    #[test]
    fn selection_modal_starts_on_current_and_wraps() {
        let mut modal = SelectionModal::new(Client::Sindcom);
        assert_eq!(modal.highlighted(), 3);
        modal.handle_key(KeyCode::Down);
        assert_eq!(modal.highlighted(), 0);
        modal.handle_key(KeyCode::Up);
        modal.handle_key(KeyCode::Up);
        assert_eq!(
            modal.handle_key(KeyCode::Enter),
            Some(PickerOutcome::Selected(Client::Saae))
        );
    }

    #[test]
    fn selection_modal_choose_and_close() {
        let mut modal = SelectionModal::new(Category::default());
        assert_eq!(modal.choose(1), Some(PickerOutcome::Selected(Category::Video)));
        assert_eq!(modal.choose(9), None);
        assert_eq!(modal.handle_key(KeyCode::Esc), Some(PickerOutcome::Cancelled));
    }
}
