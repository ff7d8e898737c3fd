// Keyboard and mouse dispatch.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tui_textarea::{Input, Key};

use crate::app::{App, Focus, Overlay};
use crate::model::Priority;
use crate::picker::PickerOutcome;

/// Handles one key press. Returns true when the app should exit.
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        return true;
    }

    // The alert blocks everything else until dismissed.
    if app.alert.is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
            app.dismiss_alert();
        }
        return false;
    }

    if handle_overlay_key(app, key.code) {
        return false;
    }

    if ctrl && key.code == KeyCode::Char('s') {
        app.add_task();
        return false;
    }

    match key.code {
        KeyCode::Tab => {
            app.focus = app.focus.next();
            return false;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return false;
        }
        KeyCode::PageUp => {
            app.scroll_list(-1);
            return false;
        }
        KeyCode::PageDown => {
            app.scroll_list(1);
            return false;
        }
        _ => {}
    }

    match app.focus {
        Focus::Title => handle_title_key(app, key),
        field => {
            let activate = matches!(key.code, KeyCode::Enter | KeyCode::Char(' '));
            match key.code {
                KeyCode::Up => app.focus = field.prev(),
                KeyCode::Down => app.focus = field.next(),
                _ if activate => activate_field(app, field),
                _ if field == Focus::Priority => handle_priority_key(app, key.code),
                _ => {}
            }
        }
    }
    false
}

// Helper: route the key to the open picker. Returns false when nothing is open.
fn handle_overlay_key(app: &mut App, code: KeyCode) -> bool {
    match &mut app.overlay {
        Overlay::None => return false,
        Overlay::DatePicker(picker) => {
            if let Some(outcome) = picker.handle_key(code) {
                app.apply_date(outcome);
            }
        }
        Overlay::TimePicker(picker) => {
            if let Some(outcome) = picker.handle_key(code) {
                app.apply_time(outcome);
            }
        }
        Overlay::ClientModal(modal) => {
            if let Some(outcome) = modal.handle_key(code) {
                app.apply_client(outcome);
            }
        }
        Overlay::CategoryModal(modal) => {
            if let Some(outcome) = modal.handle_key(code) {
                app.apply_category(outcome);
            }
        }
    }
    true
}

fn activate_field(app: &mut App, field: Focus) {
    match field {
        Focus::Title => {}
        Focus::Date => app.open_date_picker(),
        Focus::Time => app.open_time_picker(),
        Focus::Client => app.open_client_modal(),
        Focus::Category => app.open_category_modal(),
        Focus::Priority => {
            if app.form.priority.is_none() {
                app.select_priority(Priority::High);
            }
        }
        Focus::Submit => {
            app.add_task();
        }
    }
}

fn handle_priority_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Left => app.cycle_priority(false),
        KeyCode::Right => app.cycle_priority(true),
        KeyCode::Char('1') => app.select_priority(Priority::High),
        KeyCode::Char('2') => app.select_priority(Priority::Medium),
        KeyCode::Char('3') => app.select_priority(Priority::Low),
        _ => {}
    }
}

fn handle_title_key(app: &mut App, key: KeyEvent) {
    // Single-line field: Enter and Down move on instead of adding a line.
    if matches!(key.code, KeyCode::Enter | KeyCode::Down) {
        app.focus = Focus::Title.next();
        return;
    }
    if key.code == KeyCode::Up {
        app.focus = Focus::Title.prev();
        return;
    }

    let input = Input {
        key: match key.code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            _ => Key::Null,
        },
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        alt: key.modifiers.contains(KeyModifiers::ALT),
    };
    app.title_input.input(input);
    app.sync_title();
}

fn inside_rect(mouse: MouseEvent, rect: Rect) -> bool {
    (rect.left()..rect.right()).contains(&mouse.column)
        && (rect.top()..rect.bottom()).contains(&mouse.row)
}

fn find_clicked<T: Copy>(mouse: MouseEvent, items: &[(T, Rect)]) -> Option<T> {
    items
        .iter()
        .find(|(_, rect)| inside_rect(mouse, *rect))
        .map(|(item, _)| *item)
}

fn over_list(app: &App, mouse: MouseEvent) -> bool {
    app.alert.is_none()
        && matches!(app.overlay, Overlay::None)
        && inside_rect(mouse, app.hitboxes.task_list)
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_click(app, mouse),
        MouseEventKind::ScrollUp if over_list(app, mouse) => app.scroll_list(-1),
        MouseEventKind::ScrollDown if over_list(app, mouse) => app.scroll_list(1),
        _ => {}
    }
}

fn handle_click(app: &mut App, mouse: MouseEvent) {
    if app.alert.is_some() {
        app.dismiss_alert();
        return;
    }

    match &mut app.overlay {
        Overlay::None => {}
        Overlay::DatePicker(_) => {
            if let Some(date) = find_clicked(mouse, &app.hitboxes.calendar_days) {
                app.apply_date(PickerOutcome::Selected(date));
            } else if inside_rect(mouse, app.hitboxes.date_cancel) {
                app.apply_date(PickerOutcome::Cancelled);
            }
            return;
        }
        Overlay::TimePicker(picker) => {
            if let Some(field) = find_clicked(mouse, &app.hitboxes.time_fields) {
                if picker.field() != field {
                    picker.toggle_field();
                }
            } else if inside_rect(mouse, app.hitboxes.time_confirm) {
                if let Some(outcome) = picker.handle_key(KeyCode::Enter) {
                    app.apply_time(outcome);
                }
            } else if inside_rect(mouse, app.hitboxes.time_cancel) {
                app.apply_time(PickerOutcome::Cancelled);
            }
            return;
        }
        Overlay::ClientModal(modal) => {
            if inside_rect(mouse, app.hitboxes.modal_close) {
                app.apply_client(PickerOutcome::Cancelled);
            } else if let Some(outcome) = find_clicked(mouse, &app.hitboxes.modal_options)
                .and_then(|idx| modal.choose(idx))
            {
                app.apply_client(outcome);
            }
            return;
        }
        Overlay::CategoryModal(modal) => {
            if inside_rect(mouse, app.hitboxes.modal_close) {
                app.apply_category(PickerOutcome::Cancelled);
            } else if let Some(outcome) = find_clicked(mouse, &app.hitboxes.modal_options)
                .and_then(|idx| modal.choose(idx))
            {
                app.apply_category(outcome);
            }
            return;
        }
    }

    if let Some(priority) = find_clicked(mouse, &app.hitboxes.priorities) {
        app.focus = Focus::Priority;
        app.select_priority(priority);
        return;
    }

    let boxes = &app.hitboxes;
    let clicked = [
        (Focus::Title, boxes.title),
        (Focus::Date, boxes.date),
        (Focus::Time, boxes.time),
        (Focus::Client, boxes.client),
        (Focus::Category, boxes.category),
        (Focus::Submit, boxes.submit),
    ]
    .into_iter()
    .find(|(_, rect)| inside_rect(mouse, *rect))
    .map(|(field, _)| field);

    match clicked {
        Some(Focus::Title) => app.focus = Focus::Title,
        Some(Focus::Submit) => {
            app.focus = Focus::Submit;
            app.add_task();
        }
        Some(field) => activate_field(app, field),
        None => {}
    }
}
