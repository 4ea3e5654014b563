use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info};
use ratatui::{backend::Backend, Terminal};

use crate::controller::Controller;
use crate::fs_utils::{Filesystem, Launcher};

/// Discrete commands understood by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MoveUp,
    MoveDown,
    Confirm,
    Cancel,
    CreateFolder,
    Delete,
    Quit,
    /// Terminal resized or similar; repaint without touching the state.
    Redraw,
    Other,
}

/// Where events and prompt answers come from.
pub trait InputSource {
    /// Block until the next event.
    fn next_event(&mut self) -> io::Result<InputEvent>;
    /// Ask for one line of text. `None` means the user backed out.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
    /// Ask a yes/no question.
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
    /// Show a message and wait for any key.
    fn acknowledge(&mut self, message: &str) -> io::Result<()>;
}

pub fn key_to_event(key: &KeyEvent) -> InputEvent {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputEvent::Quit;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => InputEvent::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => InputEvent::MoveDown,
        KeyCode::Enter | KeyCode::Char('l') => InputEvent::Confirm,
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => InputEvent::Cancel,
        KeyCode::Insert | KeyCode::Char('n') => InputEvent::CreateFolder,
        KeyCode::Delete | KeyCode::Char('x') => InputEvent::Delete,
        KeyCode::Char('q') => InputEvent::Quit,
        _ => InputEvent::Other,
    }
}

/// Crossterm-backed input that draws its own prompts on `terminal`.
pub struct TerminalInput<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
}

impl<'a, B: Backend> TerminalInput<'a, B> {
    pub fn new(terminal: &'a mut Terminal<B>) -> Self {
        Self { terminal }
    }

    /// Next key press; releases and repeats reported by some platforms are
    /// skipped.
    fn next_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key);
                }
            }
        }
    }
}

impl<B: Backend> InputSource for TerminalInput<'_, B> {
    fn next_event(&mut self) -> io::Result<InputEvent> {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(key_to_event(&key)),
            Event::Key(_) => Ok(InputEvent::Other),
            _ => Ok(InputEvent::Redraw),
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut buffer = String::new();
        loop {
            self.terminal
                .draw(|f| crate::ui::draw_prompt(f, prompt, &buffer))?;
            let key = self.next_key()?;
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Ok(None);
            }
            match key.code {
                KeyCode::Char(c) => buffer.push(c),
                KeyCode::Backspace => {
                    buffer.pop();
                }
                KeyCode::Enter => return Ok(Some(buffer)),
                KeyCode::Esc => return Ok(None),
                _ => {}
            }
        }
    }

    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        loop {
            self.terminal
                .draw(|f| crate::ui::draw_popup(f, "Confirm", prompt))?;
            match self.next_key()?.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => return Ok(true),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Enter => {
                    return Ok(false)
                }
                _ => {}
            }
        }
    }

    fn acknowledge(&mut self, message: &str) -> io::Result<()> {
        self.terminal
            .draw(|f| crate::ui::draw_popup(f, "Open file", message))?;
        self.next_key()?;
        Ok(())
    }
}

/// Read one event and apply it. Returns `false` once the user quits.
pub fn dispatch<F: Filesystem, L: Launcher>(
    controller: &mut Controller<F, L>,
    input: &mut dyn InputSource,
) -> io::Result<bool> {
    let event = input.next_event()?;
    if event == InputEvent::Quit {
        info!("quit requested");
        return Ok(false);
    }
    if event == InputEvent::Redraw {
        return Ok(true);
    }
    debug!("input {event:?}");
    controller.handle_input(event, input);
    Ok(true)
}

/// Main event loop: draw, wait for one event, apply it.
pub fn run_app<B: Backend, F: Filesystem, L: Launcher>(
    terminal: &mut Terminal<B>,
    controller: &mut Controller<F, L>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| crate::ui::ui(f, controller.state(), controller.status()))?;
        let mut input = TerminalInput::new(terminal);
        if !dispatch(controller, &mut input)? {
            return Ok(());
        }
    }
}
