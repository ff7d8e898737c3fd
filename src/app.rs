// Application state and the operations the input layer drives.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use tui_textarea::{CursorMove, TextArea};

use crate::form::FormState;
use crate::model::{Category, Choice, Client, Priority};
use crate::picker::{DatePicker, PickerOutcome, SelectionModal, TimeField, TimePicker};
use crate::store::TaskStore;

// Helper: source of "now" for the deadline field.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Focus {
    Title,
    Date,
    Time,
    Client,
    Category,
    Priority,
    Submit,
}

impl Focus {
    const ORDER: [Focus; 7] = [
        Focus::Title,
        Focus::Date,
        Focus::Time,
        Focus::Client,
        Focus::Category,
        Focus::Priority,
        Focus::Submit,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

// At most one picker or modal is on screen at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    DatePicker(DatePicker),
    TimePicker(TimePicker),
    ClientModal(SelectionModal<Client>),
    CategoryModal(SelectionModal<Category>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayKind {
    None,
    DatePicker,
    TimePicker,
    ClientModal,
    CategoryModal,
}

impl Overlay {
    pub fn kind(&self) -> OverlayKind {
        match self {
            Overlay::None => OverlayKind::None,
            Overlay::DatePicker(_) => OverlayKind::DatePicker,
            Overlay::TimePicker(_) => OverlayKind::TimePicker,
            Overlay::ClientModal(_) => OverlayKind::ClientModal,
            Overlay::CategoryModal(_) => OverlayKind::CategoryModal,
        }
    }
}

// Clickable areas recorded by the last draw.
#[derive(Debug, Default, Clone)]
pub struct Hitboxes {
    pub title: Rect,
    pub date: Rect,
    pub time: Rect,
    pub client: Rect,
    pub category: Rect,
    pub priorities: Vec<(Priority, Rect)>,
    pub submit: Rect,
    pub task_list: Rect,
    pub calendar_days: Vec<(NaiveDate, Rect)>,
    pub date_cancel: Rect,
    pub time_fields: Vec<(TimeField, Rect)>,
    pub time_confirm: Rect,
    pub time_cancel: Rect,
    pub modal_close: Rect,
    pub modal_options: Vec<(usize, Rect)>,
}

impl Hitboxes {
    pub fn clear_overlay(&mut self) {
        self.calendar_days.clear();
        self.date_cancel = Rect::default();
        self.time_fields.clear();
        self.time_confirm = Rect::default();
        self.time_cancel = Rect::default();
        self.modal_close = Rect::default();
        self.modal_options.clear();
    }
}

pub struct App {
    pub form: FormState,
    pub store: TaskStore,
    pub overlay: Overlay,
    // Blocking notification; while set, only a dismiss is accepted.
    pub alert: Option<String>,
    pub focus: Focus,
    pub title_input: TextArea<'static>,
    pub list_scroll: usize,
    pub hitboxes: Hitboxes,
    clock: Box<dyn Clock>,
}

impl App {
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            form: FormState::new(clock.now()),
            store: TaskStore::new(),
            overlay: Overlay::None,
            alert: None,
            focus: Focus::Title,
            title_input: TextArea::default(),
            list_scroll: 0,
            hitboxes: Hitboxes::default(),
            clock,
        }
    }

    pub fn overlay_kind(&self) -> OverlayKind {
        self.overlay.kind()
    }

    // Helper: mirror the title editor into the form.
    pub fn sync_title(&mut self) {
        self.form.title = self.title_input.lines().join("\n");
    }

    pub fn set_title(&mut self, title: &str) {
        let mut input = TextArea::new(vec![title.to_string()]);
        input.move_cursor(CursorMove::End);
        self.title_input = input;
        self.sync_title();
    }

    pub fn select_priority(&mut self, priority: Priority) {
        self.form.priority = Some(priority);
    }

    // Moves the priority selection left or right, starting from ALTA.
    pub fn cycle_priority(&mut self, forward: bool) {
        let all = Priority::ALL;
        let next = match self.form.priority {
            None => 0,
            Some(p) if forward => (p.index() + 1) % all.len(),
            Some(p) => (p.index() + all.len() - 1) % all.len(),
        };
        self.form.priority = Some(all[next]);
    }

    fn open(&mut self, overlay: Overlay) {
        if self.overlay.kind() != OverlayKind::None {
            debug!(from = ?self.overlay.kind(), to = ?overlay.kind(), "replacing open overlay");
        } else {
            debug!(overlay = ?overlay.kind(), "overlay opened");
        }
        self.overlay = overlay;
    }

    fn close_overlay(&mut self) {
        debug!(overlay = ?self.overlay.kind(), "overlay closed");
        self.overlay = Overlay::None;
        self.hitboxes.clear_overlay();
    }

    pub fn open_date_picker(&mut self) {
        self.focus = Focus::Date;
        self.open(Overlay::DatePicker(DatePicker::new(self.form.deadline.date())));
    }

    pub fn open_time_picker(&mut self) {
        self.focus = Focus::Time;
        self.open(Overlay::TimePicker(TimePicker::new(self.form.deadline.time())));
    }

    pub fn open_client_modal(&mut self) {
        self.focus = Focus::Client;
        self.open(Overlay::ClientModal(SelectionModal::new(self.form.client)));
    }

    pub fn open_category_modal(&mut self) {
        self.focus = Focus::Category;
        self.open(Overlay::CategoryModal(SelectionModal::new(self.form.category)));
    }

    // Dismisses the date picker, then applies the date if one was chosen.
    pub fn apply_date(&mut self, outcome: PickerOutcome<NaiveDate>) {
        self.close_overlay();
        if let PickerOutcome::Selected(date) = outcome {
            self.form.set_date(date);
        }
    }

    pub fn apply_time(&mut self, outcome: PickerOutcome<NaiveTime>) {
        self.close_overlay();
        if let PickerOutcome::Selected(time) = outcome {
            self.form.set_time(time);
        }
    }

    pub fn apply_client(&mut self, outcome: PickerOutcome<Client>) {
        self.close_overlay();
        if let PickerOutcome::Selected(client) = outcome {
            self.form.client = client;
        }
    }

    pub fn apply_category(&mut self, outcome: PickerOutcome<Category>) {
        self.close_overlay();
        if let PickerOutcome::Selected(category) = outcome {
            self.form.category = category;
        }
    }

    /// Commits the form. Returns false and raises the alert when validation fails.
    pub fn add_task(&mut self) -> bool {
        self.sync_title();
        match self.form.commit(self.clock.now()) {
            Ok(task) => {
                info!(
                    id = %task.id,
                    deadline = %task.deadline,
                    priority = %task.priority,
                    client = %task.client,
                    category = %task.category,
                    "task added"
                );
                self.store.append(task);
                self.set_title("");
                self.focus = Focus::Title;
                true
            }
            Err(failure) => {
                warn!(%failure, "task rejected");
                self.alert = Some(failure.user_message().to_string());
                false
            }
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn scroll_list(&mut self, delta: isize) {
        let max = self.store.len().saturating_sub(1);
        self.list_scroll = self.list_scroll.saturating_add_signed(delta).min(max);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// Serializable view of everything except widget internals and hitboxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    pub form: FormState,
    pub store: TaskStore,
    pub overlay: OverlayKind,
    pub alert: Option<String>,
    pub focus: Focus,
}

impl AppData {
    pub fn from_app(app: &App) -> Self {
        Self {
            form: app.form.clone(),
            store: app.store.clone(),
            overlay: app.overlay.kind(),
            alert: app.alert.clone(),
            focus: app.focus,
        }
    }
}
