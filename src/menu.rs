use crate::session::Session;
use crate::todo::error::TaskError;
use anyhow::Result;
use log::debug;
use std::io::{BufRead, Write};

const MENU: &str = "\
===========================
Todo List Program:
1. Add task
2. Remove task
3. Mark task as done
4. Undo
5. Redo
6. Show tasks
7. Exit
===========================";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Add,
    Remove,
    MarkDone,
    Undo,
    Redo,
    Show,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::Remove),
            "3" => Some(Self::MarkDone),
            "4" => Some(Self::Undo),
            "5" => Some(Self::Redo),
            "6" => Some(Self::Show),
            "7" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Numbered text menu over a [`Session`]. Bad input is reported and the
/// loop carries on; end of input behaves like choosing Exit.
pub struct Menu<'a, R, W> {
    session: &'a mut Session,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(session: &'a mut Session, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(line) = self.prompt("Choose an option: ")? else {
                break;
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::Add) => self.add_task()?,
                Some(MenuChoice::Remove) => self.remove_task()?,
                Some(MenuChoice::MarkDone) => self.mark_done()?,
                Some(MenuChoice::Undo) => self.undo()?,
                Some(MenuChoice::Redo) => self.redo()?,
                Some(MenuChoice::Show) => self.show_tasks()?,
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                None => writeln!(self.output, "Invalid choice '{}', please pick 1-7.", line.trim())?,
            }
        }
        Ok(())
    }

    fn add_task(&mut self) -> Result<()> {
        let Some(description) = self.prompt("Enter task: ")? else {
            return Ok(());
        };
        let description = description.trim().to_string();
        self.session.add(description.clone())?;
        writeln!(self.output, "Added \"{}\".", description)?;
        Ok(())
    }

    fn remove_task(&mut self) -> Result<()> {
        self.show_tasks()?;
        let Some(index) = self.prompt_index("Enter the index of the task to remove: ")? else {
            return Ok(());
        };
        match self.session.remove(index) {
            Ok(()) => writeln!(self.output, "Removed task {}.", index)?,
            Err(e) => self.report_rejected(&e)?,
        }
        Ok(())
    }

    fn mark_done(&mut self) -> Result<()> {
        self.show_tasks()?;
        let Some(index) = self.prompt_index("Enter the index of the task to mark as done: ")? else {
            return Ok(());
        };
        match self.session.mark_done(index) {
            Ok(()) => writeln!(self.output, "Marked task {} as done.", index)?,
            Err(e) => self.report_rejected(&e)?,
        }
        Ok(())
    }

    fn undo(&mut self) -> Result<()> {
        match self.session.undo() {
            Ok(Some(command)) => writeln!(self.output, "Undid {}.", command)?,
            Ok(None) => writeln!(self.output, "Nothing to undo.")?,
            Err(e) => self.report_rejected(&e)?,
        }
        Ok(())
    }

    fn redo(&mut self) -> Result<()> {
        match self.session.redo() {
            Ok(Some(command)) => writeln!(self.output, "Redid {}.", command)?,
            Ok(None) => writeln!(self.output, "Nothing to redo.")?,
            Err(e) => self.report_rejected(&e)?,
        }
        Ok(())
    }

    fn show_tasks(&mut self) -> Result<()> {
        write!(self.output, "{}", render_tasks(&*self.session))?;
        Ok(())
    }

    fn report_rejected(&mut self, error: &TaskError) -> Result<()> {
        debug!("command rejected: {}", error);
        writeln!(self.output, "Invalid index: {}", error)?;
        Ok(())
    }

    /// `None` means the input was not a usable index (already reported) or
    /// input has ended.
    fn prompt_index(&mut self, prompt: &str) -> Result<Option<usize>> {
        let Some(line) = self.prompt(prompt)? else {
            return Ok(None);
        };
        match line.trim().parse::<usize>() {
            Ok(index) => Ok(Some(index)),
            Err(_) => {
                writeln!(self.output, "Invalid index '{}': expected a non-negative number.", line.trim())?;
                Ok(None)
            }
        }
    }

    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

pub fn render_tasks(session: &Session) -> String {
    let mut tasks = session.snapshot().peekable();
    if tasks.peek().is_none() {
        return "No tasks.\n".to_string();
    }

    tasks
        .map(|task| {
            let status = if task.done { "✓" } else { "✗" };
            format!("{}. [{}] {}\n", task.index, status, task.description)
        })
        .collect()
}
