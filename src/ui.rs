use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::board::Board;
use crate::task::{Task, STATUSES};

/// What the key loop is currently doing.
pub enum Mode {
    Normal,
    Form(FormState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Content,
    Status,
}

/// The form modal, reused for create and edit. `editing` holds the id of the
/// task being edited, or `None` when creating.
pub struct FormState {
    pub editing: Option<String>,
    pub title: String,
    pub content: String,
    pub status_index: usize,
    pub field: FormField,
}

impl FormState {
    pub fn create() -> Self {
        Self {
            editing: None,
            title: String::new(),
            content: String::new(),
            status_index: 0,
            field: FormField::Title,
        }
    }

    pub fn edit(task: &Task) -> Self {
        Self {
            editing: Some(task.id.clone()),
            title: task.title.clone(),
            content: task.content.clone(),
            status_index: STATUSES
                .iter()
                .position(|s| *s == task.status)
                .unwrap_or(0),
            field: FormField::Title,
        }
    }

    pub fn status(&self) -> &'static str {
        STATUSES[self.status_index]
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            FormField::Title => FormField::Content,
            FormField::Content => FormField::Status,
            FormField::Status => FormField::Title,
        };
    }

    pub fn cycle_status(&mut self, direction: isize) {
        let count = STATUSES.len() as isize;
        self.status_index = (self.status_index as isize + direction).rem_euclid(count) as usize;
    }

    /// The text buffer the cursor is in, if the focused field is editable.
    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Title => Some(&mut self.title),
            FormField::Content => Some(&mut self.content),
            FormField::Status => None,
        }
    }
}

pub fn draw(frame: &mut Frame, board: &Board, mode: &Mode, alert: Option<&str>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    draw_columns(frame, board, rows[0]);
    draw_footer(frame, mode, rows[1]);

    if let Mode::Form(form) = mode {
        draw_form(frame, form);
    }
    if let Some(message) = alert {
        draw_alert(frame, message);
    }
}

fn draw_columns(frame: &mut Frame, board: &Board, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    for (i, status) in STATUSES.iter().enumerate() {
        let tasks = board.tasks_in(status);
        let items: Vec<ListItem> = tasks
            .iter()
            .enumerate()
            .map(|(row, t)| {
                let selected = board.selected_status == i && board.selected_task == row;
                let title_style = if selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(vec![
                    Line::from(Span::styled(t.title.clone(), title_style)),
                    Line::from(Span::styled(
                        t.content.clone(),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title(format!("{} ({})", status, tasks.len()))
                .borders(Borders::ALL)
                .border_style(if board.selected_status == i {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default()
                }),
        );

        frame.render_widget(list, chunks[i]);
    }
}

fn draw_footer(frame: &mut Frame, mode: &Mode, area: Rect) {
    let hints = match mode {
        Mode::Normal => {
            "q quit | a add | e edit | d delete | enter/backspace move card | r refresh"
        }
        Mode::Form(_) => "tab next field | left/right status | enter save | esc cancel",
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn draw_form(frame: &mut Frame, form: &FormState) {
    let area = centered_rect(60, frame.area());
    frame.render_widget(Clear, area);

    let title = if form.editing.is_some() {
        "Edit task"
    } else {
        "New task"
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let fields = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(inner);

    draw_field(frame, "Title", &form.title, form.field == FormField::Title, fields[0]);
    draw_field(
        frame,
        "Content",
        &form.content,
        form.field == FormField::Content,
        fields[1],
    );
    draw_field(
        frame,
        "Status",
        form.status(),
        form.field == FormField::Status,
        fields[2],
    );
}

fn draw_field(frame: &mut Frame, label: &str, value: &str, focused: bool, area: Rect) {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    frame.render_widget(
        Paragraph::new(value.to_string()).block(
            Block::default()
                .title(label)
                .borders(Borders::ALL)
                .border_style(border),
        ),
        area,
    );
}

fn draw_alert(frame: &mut Frame, message: &str) {
    let area = centered_rect(50, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(message.to_string()),
            Line::from(""),
            Line::from(Span::styled(
                "press any key",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(
            Block::default()
                .title("Error")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        ),
        area,
    );
}

fn centered_rect(percent_x: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Min(1),
            Constraint::Length(11),
            Constraint::Min(1),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_form_starts_on_the_task_column() {
        let form = FormState::edit(&Task {
            id: "task_1".into(),
            title: "t".into(),
            content: "c".into(),
            status: "Concluído".into(),
        });
        assert_eq!(form.status(), "Concluído");
        assert_eq!(form.editing.as_deref(), Some("task_1"));
    }

    #[test]
    fn unknown_status_falls_back_to_the_first_column() {
        let form = FormState::edit(&Task {
            id: "task_1".into(),
            title: "t".into(),
            content: "c".into(),
            status: "Arquivado".into(),
        });
        assert_eq!(form.status(), "A Fazer");
    }

    #[test]
    fn status_cycles_in_both_directions() {
        let mut form = FormState::create();
        form.cycle_status(-1);
        assert_eq!(form.status(), "Concluído");
        form.cycle_status(1);
        assert_eq!(form.status(), "A Fazer");
    }

    #[test]
    fn tab_walks_the_fields_in_a_loop() {
        let mut form = FormState::create();
        form.next_field();
        assert_eq!(form.field, FormField::Content);
        form.next_field();
        form.next_field();
        assert_eq!(form.field, FormField::Title);
    }
}
