use crate::session::Session;
use crate::todo::error::TaskError;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;

#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub selected_index: usize,
    pub should_quit: bool,
    pub input_mode: bool,
    pub input_buffer: String,
    pub help_mode: bool,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            selected_index: 0,
            should_quit: false,
            input_mode: false,
            input_buffer: String::new(),
            help_mode: false,
            status_message: None,
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        if self.help_mode {
            self.handle_help_mode_key(key_event)
        } else if self.input_mode {
            self.handle_input_mode_key(key_event)
        } else {
            self.handle_normal_mode_key(key_event)
        }
    }

    fn handle_normal_mode_key(&mut self, key_event: KeyEvent) -> Result<()> {
        match key_event.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('r') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.redo();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection_up();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection_down();
            }
            KeyCode::Enter | KeyCode::Char('x') => {
                self.mark_selected_done();
            }
            KeyCode::Char('a') => {
                self.input_mode = true;
                self.input_buffer.clear();
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                self.remove_selected();
            }
            KeyCode::Char('u') => {
                self.undo();
            }
            KeyCode::Char('r') => {
                self.redo();
            }
            KeyCode::Char('?') => {
                self.help_mode = true;
            }
            KeyCode::Esc => {
                self.status_message = None;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_help_mode_key(&mut self, key_event: KeyEvent) -> Result<()> {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('?') => {
                self.help_mode = false;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_input_mode_key(&mut self, key_event: KeyEvent) -> Result<()> {
        match key_event.code {
            KeyCode::Esc => {
                self.input_mode = false;
                self.input_buffer.clear();
            }
            KeyCode::Enter => {
                self.confirm_input()?;
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
            }
            _ => {}
        }
        Ok(())
    }

    fn confirm_input(&mut self) -> Result<()> {
        let description = self.input_buffer.trim().to_string();
        self.input_mode = false;
        self.input_buffer.clear();

        // Empty input is treated like a cancel
        if description.is_empty() {
            return Ok(());
        }

        self.session.add(description.clone())?;
        self.selected_index = self.session.store().len() - 1;
        self.status_message = Some(format!("Added \"{}\"", description));
        Ok(())
    }

    fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    fn move_selection_down(&mut self) {
        if self.selected_index < self.session.store().len().saturating_sub(1) {
            self.selected_index += 1;
        }
    }

    fn mark_selected_done(&mut self) {
        match self.session.mark_done(self.selected_index) {
            Ok(()) => {
                self.status_message = Some(format!("Marked task {} as done", self.selected_index));
            }
            Err(e) => self.report_error(e),
        }
    }

    fn remove_selected(&mut self) {
        match self.session.remove(self.selected_index) {
            Ok(()) => {
                self.status_message = Some(format!("Removed task {}", self.selected_index));
                self.clamp_selection();
            }
            Err(e) => self.report_error(e),
        }
    }

    fn undo(&mut self) {
        match self.session.undo() {
            Ok(Some(command)) => self.status_message = Some(format!("Undid {}", command)),
            Ok(None) => self.status_message = Some("Nothing to undo".to_string()),
            Err(e) => self.report_error(e),
        }
        self.clamp_selection();
    }

    fn redo(&mut self) {
        match self.session.redo() {
            Ok(Some(command)) => self.status_message = Some(format!("Redid {}", command)),
            Ok(None) => self.status_message = Some("Nothing to redo".to_string()),
            Err(e) => self.report_error(e),
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.session.store().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    fn report_error(&mut self, error: TaskError) {
        debug!("command rejected: {}", error);
        self.status_message = Some(error.to_string());
    }

    pub fn total_tasks(&self) -> usize {
        self.session.store().total_tasks()
    }

    pub fn completed_tasks(&self) -> usize {
        self.session.store().completed_tasks()
    }
}
