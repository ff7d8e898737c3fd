// Task records and the fixed option sets a task is built from.

use std::fmt;

use chrono::NaiveDateTime;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Opaque task identifier. Only uniqueness matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fixed, ordered set of values a form field can take.
pub trait Choice: Copy + PartialEq + 'static {
    // Every option, in display order.
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    fn index(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Choice for Priority {
    const ALL: &'static [Self] = &[Priority::High, Priority::Medium, Priority::Low];

    fn label(&self) -> &'static str {
        match self {
            Priority::High => "ALTA",
            Priority::Medium => "MÉDIA",
            Priority::Low => "BAIXA",
        }
    }
}

impl Priority {
    // Background used for both the toggle button and the task row.
    pub fn color(&self) -> Color {
        match self {
            Priority::High => Color::Rgb(0xf8, 0xd7, 0xda),
            Priority::Medium => Color::Rgb(0xff, 0xf3, 0xcd),
            Priority::Low => Color::Rgb(0xd4, 0xed, 0xda),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Client {
    #[default]
    ContracsDf,
    Fenajufe,
    Saae,
    Sindcom,
}

impl Choice for Client {
    const ALL: &'static [Self] = &[
        Client::ContracsDf,
        Client::Fenajufe,
        Client::Saae,
        Client::Sindcom,
    ];

    fn label(&self) -> &'static str {
        match self {
            Client::ContracsDf => "CONTRACS-DF",
            Client::Fenajufe => "FENAJUFE",
            Client::Saae => "SAAE",
            Client::Sindcom => "SINDCOM",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Imagem,
    Video,
    Audio,
    Texto,
}

impl Choice for Category {
    const ALL: &'static [Self] = &[
        Category::Imagem,
        Category::Video,
        Category::Audio,
        Category::Texto,
    ];

    fn label(&self) -> &'static str {
        match self {
            Category::Imagem => "IMAGEM",
            Category::Video => "VÍDEO",
            Category::Audio => "ÁUDIO",
            Category::Texto => "TEXTO",
        }
    }
}

macro_rules! display_via_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_via_label!(Priority, Client, Category);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub deadline: NaiveDateTime,
    pub priority: Priority,
    pub client: Client,
    pub category: Category,
    // Reserved; nothing toggles it yet.
    pub completed: bool,
}

impl Task {
    pub fn new(
        title: String,
        deadline: NaiveDateTime,
        priority: Priority,
        client: Client,
        category: Category,
    ) -> Self {
        Self {
            id: TaskId::new(),
            title,
            deadline,
            priority,
            client,
            category,
            completed: false,
        }
    }
}
