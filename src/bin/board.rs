use std::io;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use taskboard::board::Board;
use taskboard::client::{ApiClient, TaskApi};
use taskboard::task::TaskPayload;
use taskboard::ui::{self, FormField, FormState, Mode};

#[derive(Parser)]
#[command(name = "taskboard", about = "Terminal Kanban board for the task API")]
struct Args {
    /// Base URL of the task API
    #[arg(long, default_value = "http://localhost:3000")]
    api_url: String,
}

struct App {
    api: ApiClient,
    board: Board,
    mode: Mode,
    alert: Option<String>,
}

impl App {
    fn new(api: ApiClient) -> Self {
        Self {
            api,
            board: Board::new(),
            mode: Mode::Normal,
            alert: None,
        }
    }

    fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        if let Err(err) = self.board.refresh(&self.api) {
            self.alert = Some(format!("Could not load tasks: {err}"));
        }

        loop {
            terminal.draw(|f| ui::draw(f, &self.board, &self.mode, self.alert.as_deref()))?;

            if let Event::Key(key) = event::read()? {
                // An alert blocks everything until dismissed.
                if self.alert.take().is_some() {
                    continue;
                }
                match self.mode {
                    Mode::Normal => {
                        if !self.handle_board_key(key.code) {
                            return Ok(());
                        }
                    }
                    Mode::Form(_) => self.handle_form_key(key.code),
                }
            }
        }
    }

    fn handle_board_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return false,
            KeyCode::Char('a') => self.mode = Mode::Form(FormState::create()),
            KeyCode::Char('e') => {
                if let Some(task) = self.board.selected() {
                    self.mode = Mode::Form(FormState::edit(task));
                }
            }
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('r') => {
                if let Err(err) = self.board.refresh(&self.api) {
                    self.alert = Some(format!("Could not load tasks: {err}"));
                }
            }
            KeyCode::Left => self.board.select_column(-1),
            KeyCode::Right => self.board.select_column(1),
            KeyCode::Up => self.board.select_task(-1),
            KeyCode::Down => self.board.select_task(1),
            KeyCode::Enter => self.move_selected(1),
            KeyCode::Backspace => self.move_selected(-1),
            _ => {}
        }
        true
    }

    fn move_selected(&mut self, direction: isize) {
        if let Err(err) = self.board.move_selected(direction, &self.api) {
            self.alert = Some(format!("Could not move the task: {err}"));
        }
    }

    fn delete_selected(&mut self) {
        let Some(task) = self.board.selected() else {
            return;
        };
        let id = task.id.clone();
        match self.api.delete(&id) {
            Ok(()) => self.board.remove(&id),
            Err(err) => self.alert = Some(format!("Could not delete the task: {err}")),
        }
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        let Mode::Form(form) = &mut self.mode else {
            return;
        };
        match code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Tab => form.next_field(),
            KeyCode::Left if form.field == FormField::Status => form.cycle_status(-1),
            KeyCode::Right if form.field == FormField::Status => form.cycle_status(1),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Backspace => {
                if let Some(text) = form.focused_text_mut() {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(text) = form.focused_text_mut() {
                    text.push(c);
                }
            }
            _ => {}
        }
    }

    /// Validates and dispatches the form. On failure the form stays open with
    /// the entered values so nothing is lost.
    fn submit_form(&mut self) {
        let Mode::Form(form) = &self.mode else {
            return;
        };
        if form.title.trim().is_empty() || form.content.trim().is_empty() {
            self.alert = Some("Fill in the title and the content.".to_string());
            return;
        }
        let payload = TaskPayload {
            title: form.title.clone(),
            content: form.content.clone(),
            status: Some(form.status().to_string()),
        };
        let result = match &form.editing {
            Some(id) => self.api.update(id, &payload).map(|task| (task, true)),
            None => self.api.create(&payload).map(|task| (task, false)),
        };
        match result {
            Ok((task, existed)) => {
                if existed {
                    self.board.apply_updated(task);
                } else {
                    self.board.apply_created(task);
                }
                self.mode = Mode::Normal;
            }
            Err(err) => self.alert = Some(format!("Could not save the task: {err}")),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(ApiClient::new(args.api_url));
    let result = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
