// Rendering. Every draw also records the clickable areas in `app.hitboxes`.

use chrono::{Datelike, Local, NaiveDate};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use crate::app::{App, Focus, Hitboxes, Overlay};
use crate::model::{Choice, Priority};
use crate::picker::{DatePicker, SelectionModal, TimeField, TimePicker};
use crate::store::TaskRow;

const CALENDAR_CELL: u16 = 5;
const WEEKDAYS: [&str; 7] = ["Seg", "Ter", "Qua", "Qui", "Sex", "Sáb", "Dom"];

pub fn draw(frame: &mut Frame, app: &mut App) {
    app.hitboxes.clear_overlay();
    app.hitboxes.priorities.clear();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new("Gerenciador de Tarefas")
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(header, chunks[0]);

    draw_title_input(frame, app, chunks[1]);

    let date_row = split_equal_horizontal(chunks[2], 2);
    let date_text = format!("Data: {}", app.form.deadline.format("%d/%m/%Y"));
    let time_text = format!("Hora: {}", app.form.deadline.format("%H:%M"));
    render_field(frame, &date_text, date_row[0], app.focus == Focus::Date);
    render_field(frame, &time_text, date_row[1], app.focus == Focus::Time);
    app.hitboxes.date = date_row[0];
    app.hitboxes.time = date_row[1];

    let choice_row = split_equal_horizontal(chunks[3], 2);
    let client_text = format!("Cliente: {}", app.form.client);
    let category_text = format!("Categoria: {}", app.form.category);
    render_field(frame, &client_text, choice_row[0], app.focus == Focus::Client);
    render_field(frame, &category_text, choice_row[1], app.focus == Focus::Category);
    app.hitboxes.client = choice_row[0];
    app.hitboxes.category = choice_row[1];

    draw_priority_row(frame, app, chunks[4]);

    let submit_color = if app.focus == Focus::Submit {
        Color::Yellow
    } else {
        Color::Green
    };
    render_button(frame, "Adicionar Tarefa", chunks[5], submit_color);
    app.hitboxes.submit = chunks[5];

    draw_task_list(frame, app, chunks[6]);

    let footer = Paragraph::new(
        "Tab: próximo campo  Enter: abrir/confirmar  1-3: prioridade  Ctrl+S: adicionar  Ctrl+Q: sair",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[7]);

    match &app.overlay {
        Overlay::None => {}
        Overlay::DatePicker(picker) => draw_date_picker(frame, picker, &mut app.hitboxes),
        Overlay::TimePicker(picker) => draw_time_picker(frame, picker, &mut app.hitboxes),
        Overlay::ClientModal(modal) => draw_selection_modal(
            frame,
            "Selecione o cliente",
            modal,
            app.form.client,
            &mut app.hitboxes,
        ),
        Overlay::CategoryModal(modal) => draw_selection_modal(
            frame,
            "Selecione a categoria",
            modal,
            app.form.category,
            &mut app.hitboxes,
        ),
    }

    if let Some(message) = &app.alert {
        draw_alert_popup(frame, message);
    }
}

fn field_block(focused: bool) -> Block<'static> {
    let border = if focused { Color::Yellow } else { Color::Gray };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
}

fn render_field(frame: &mut Frame, text: &str, area: Rect, focused: bool) {
    let para = Paragraph::new(text.to_string()).block(field_block(focused));
    frame.render_widget(para, area);
}

fn render_button(frame: &mut Frame, text: &str, area: Rect, color: Color) {
    let btn = Paragraph::new(text.to_string())
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
    frame.render_widget(btn, area);
}

// Helper: `count` columns of equal width, remainder spread by the solver.
fn split_equal_horizontal(area: Rect, count: u32) -> Vec<Rect> {
    Layout::horizontal((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area)
        .to_vec()
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

// Single-line editor with a '|' caret when focused.
fn draw_title_input(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Title;
    let text = app.title_input.lines().join(" ");

    let line = if text.is_empty() && !focused {
        Line::from(Span::styled("Título da Tarefa", Style::default().fg(Color::DarkGray)))
    } else if focused {
        let (_, col) = app.title_input.cursor();
        let col = col.min(text.chars().count());
        let mut shown: String = text.chars().take(col).collect();
        shown.push('|');
        shown.extend(text.chars().skip(col));
        Line::from(Span::styled(shown, Style::default().fg(Color::Yellow)))
    } else {
        Line::from(text)
    };

    let para = Paragraph::new(line).block(field_block(focused));
    frame.render_widget(para, area);
    app.hitboxes.title = area;
}

fn draw_priority_row(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Priority;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(13),
            Constraint::Length(11),
            Constraint::Length(11),
            Constraint::Length(11),
            Constraint::Min(0),
        ])
        .split(area);

    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let label = Paragraph::new(vec![Line::from(""), Line::styled("Prioridade:", label_style)]);
    frame.render_widget(label, cols[0]);

    for (priority, area) in Priority::ALL.iter().zip(cols[1..4].iter()) {
        let selected = app.form.priority == Some(*priority);
        let block = if selected {
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(Color::White))
        } else {
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
        };
        let button = Paragraph::new(priority.label())
            .alignment(Alignment::Center)
            .block(block)
            .style(
                Style::default()
                    .bg(priority.color())
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(button, *area);
        app.hitboxes.priorities.push((*priority, *area));
    }
}

fn row_lines(row: &TaskRow<'_>, width: usize) -> Vec<Line<'static>> {
    let base = Style::default().bg(row.style.background()).fg(Color::Black);
    let pad = |text: String| format!(" {:<w$}", text, w = width.saturating_sub(1));

    let mut lines = vec![Line::styled(
        pad(row.title.to_string()),
        base.add_modifier(Modifier::BOLD),
    )];
    for detail in row.detail_lines() {
        lines.push(Line::styled(pad(detail), base));
    }
    lines.push(Line::from(""));
    lines
}

fn draw_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    app.hitboxes.task_list = area;
    let block = Block::default()
        .title(format!("Tarefas ({})", app.store.len()))
        .borders(Borders::ALL);

    if app.store.is_empty() {
        let empty = Paragraph::new("Nenhuma tarefa ainda. Preencha o formulário e adicione uma.")
            .block(block)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    }

    let width = area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .store
        .rows()
        .skip(app.list_scroll)
        .map(|row| ListItem::new(Text::from(row_lines(&row, width))))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn draw_date_picker(frame: &mut Frame, picker: &DatePicker, hitboxes: &mut Hitboxes) {
    let width = CALENDAR_CELL * 7 + 4;
    let area = centered(frame.size(), width, 18);
    frame.render_widget(Clear, area);

    let outer = Block::default()
        .title("Selecionar data (Esc para cancelar)")
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan).bg(Color::Black));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(inner);

    let header = vec![
        Line::from(vec![
            Span::styled("◄ ", Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("{} {}", picker.month_name(), picker.year()),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ►", Style::default().fg(Color::Cyan)),
        ]),
        Line::styled("Setas: dia  PgUp/PgDn: mês", Style::default().fg(Color::Gray)),
        Line::styled("Enter ou clique: escolher", Style::default().fg(Color::Gray)),
    ];
    frame.render_widget(Paragraph::new(header).alignment(Alignment::Center), layout[0]);

    draw_calendar_grid(frame, picker, layout[1], hitboxes);

    let cancel = centered(layout[2], 14, 3);
    render_button(frame, "Cancelar", cancel, Color::Red);
    hitboxes.date_cancel = cancel;
}

fn draw_calendar_grid(frame: &mut Frame, picker: &DatePicker, area: Rect, hitboxes: &mut Hitboxes) {
    let today = Local::now().date_naive();
    let grid_x = area.x + area.width.saturating_sub(CALENDAR_CELL * 7) / 2;

    let mut lines = Vec::new();
    lines.push(Line::from(
        WEEKDAYS
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let color = if i >= 5 { Color::Yellow } else { Color::Cyan };
                Span::styled(format!(" {name} "), Style::default().fg(color))
            })
            .collect::<Vec<_>>(),
    ));
    lines.push(Line::from(""));

    for (week_idx, week) in picker.weeks().iter().enumerate() {
        let mut spans = Vec::new();
        for (col, cell) in week.iter().enumerate() {
            let Some(date) = cell else {
                spans.push(Span::raw(" ".repeat(CALENDAR_CELL as usize)));
                continue;
            };
            spans.push(Span::styled(
                format!("  {:2} ", date.day()),
                day_style(*date, picker.cursor(), today, col),
            ));
            hitboxes.calendar_days.push((
                *date,
                Rect {
                    x: grid_x + col as u16 * CALENDAR_CELL,
                    y: area.y + 2 + week_idx as u16,
                    width: CALENDAR_CELL,
                    height: 1,
                },
            ));
        }
        lines.push(Line::from(spans));
    }

    let grid_area = Rect {
        x: grid_x,
        width: (CALENDAR_CELL * 7).min(area.width),
        ..area
    };
    frame.render_widget(Paragraph::new(lines), grid_area);
}

fn day_style(date: NaiveDate, cursor: NaiveDate, today: NaiveDate, col: usize) -> Style {
    if date == cursor {
        Style::default().bg(Color::Cyan).fg(Color::Black).add_modifier(Modifier::BOLD)
    } else if date == today {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else if col >= 5 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    }
}

fn draw_time_picker(frame: &mut Frame, picker: &TimePicker, hitboxes: &mut Hitboxes) {
    let area = centered(frame.size(), 34, 10);
    frame.render_widget(Clear, area);

    let outer = Block::default()
        .title("Selecionar hora (Esc para cancelar)")
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan).bg(Color::Black));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(3), Constraint::Length(3)])
        .split(inner);

    let hint = Paragraph::new("↑/↓: ajustar  ←/→: campo")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(hint, rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(0),
        ])
        .split(rows[1]);

    for (field, value, area) in [
        (TimeField::Hour, picker.hour(), cols[1]),
        (TimeField::Minute, picker.minute(), cols[3]),
    ] {
        let style = if picker.field() == field {
            Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let para = Paragraph::new(Span::styled(format!("{value:02}"), style))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(para, area);
        hitboxes.time_fields.push((field, area));
    }
    let colon = Paragraph::new(vec![Line::from(""), Line::from(":")]).alignment(Alignment::Center);
    frame.render_widget(colon, cols[2]);

    let buttons = split_equal_horizontal(rows[2], 2);
    render_button(frame, "OK", buttons[0], Color::Green);
    render_button(frame, "Cancelar", buttons[1], Color::Red);
    hitboxes.time_confirm = buttons[0];
    hitboxes.time_cancel = buttons[1];
}

fn draw_selection_modal<T: Choice + std::fmt::Display>(
    frame: &mut Frame,
    title: &str,
    modal: &SelectionModal<T>,
    current: T,
    hitboxes: &mut Hitboxes,
) {
    let area = frame.size();
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let close = Rect {
        x: inner.right().saturating_sub(4),
        y: inner.y,
        width: 3.min(inner.width),
        height: 1.min(inner.height),
    };
    let close_btn = Paragraph::new("X")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
    frame.render_widget(close_btn, close);
    hitboxes.modal_close = close;

    let options = modal.options();
    let total = options.len() as u16 * 2;
    let width = inner.width * 8 / 10;
    let x = inner.x + (inner.width - width) / 2;
    let start_y = inner.y + inner.height.saturating_sub(total) / 2;

    for (idx, option) in options.iter().enumerate() {
        let y = start_y + idx as u16 * 2;
        if y >= inner.bottom() {
            break;
        }
        let row = Rect { x, y, width, height: 1 };
        let marker = if *option == current { "● " } else { "" };
        let style = if idx == modal.highlighted() {
            Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        frame.render_widget(
            Paragraph::new(format!("{marker}{option}"))
                .alignment(Alignment::Center)
                .style(style),
            row,
        );
        hitboxes.modal_options.push((idx, row));

        if y + 1 < inner.bottom() {
            let rule = Paragraph::new("─".repeat(width as usize)).style(Style::default().fg(Color::DarkGray));
            frame.render_widget(rule, Rect { y: y + 1, ..row });
        }
    }
}

fn draw_alert_popup(frame: &mut Frame, message: &str) {
    let area = centered(frame.size(), 48, 7);

    let block = Block::default()
        .title("[!] Atenção")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::Red).bg(Color::Black));

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(1)])
        .split(inner);

    let para = Paragraph::new(message.to_string())
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White));
    frame.render_widget(para, chunks[0]);

    let hint = Paragraph::new("Enter ou Esc para fechar")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray).italic());
    frame.render_widget(hint, chunks[1]);
}
