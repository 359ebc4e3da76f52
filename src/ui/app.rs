use super::game_view::{self, ViewContext};
use crate::engine::{GameCommand, GameSession, SessionEvent};
use crate::game::BOARD_SIZE;
use crate::settings::{difficulty, theme, SettingsRecord};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use std::io;
use tracing::debug;

pub struct App {
    session: GameSession,
    settings: SettingsRecord,
    cursor: (usize, usize),
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(mut session: GameSession) -> Self {
        let settings = session.settings();
        App {
            session,
            settings,
            // the middle cell holds a letter, start just above it
            cursor: (BOARD_SIZE / 2 - 1, BOARD_SIZE / 2),
            should_quit: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.draw(terminal)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Pick up session changes and redraw once.
    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        self.settings = self.session.settings();
        self.handle_session_events();
        terminal.draw(|f| self.render(f))?;
        Ok(())
    }

    fn handle_session_events(&mut self) {
        for session_event in self.session.drain_events() {
            match session_event {
                SessionEvent::ComputerThinking => self.message = None,
                SessionEvent::Error(error) => self.message = Some(format!("Error: {error}")),
            }
        }
    }

    /// Handle terminal events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                Event::FocusLost => self.session.send(GameCommand::SetShown(false)),
                Event::FocusGained => self.session.send(GameCommand::SetShown(true)),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        let (row, column) = self.cursor;
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Up => self.cursor = (row.saturating_sub(1), column),
            KeyCode::Down => self.cursor = ((row + 1).min(BOARD_SIZE - 1), column),
            KeyCode::Left => self.cursor = (row, column.saturating_sub(1)),
            KeyCode::Right => self.cursor = (row, (column + 1).min(BOARD_SIZE - 1)),
            KeyCode::Char(' ') => self.session.send(GameCommand::CellClick { row, column }),
            KeyCode::Char(letter) if letter.is_ascii_alphabetic() => {
                self.session.send(GameCommand::Letter(letter));
            }
            KeyCode::Backspace | KeyCode::Delete => self.session.send(GameCommand::Delete),
            KeyCode::Enter => self.session.send(GameCommand::Enter),
            KeyCode::Tab => {
                if self.session.playback().is_paused {
                    self.session.send(GameCommand::Resume);
                } else {
                    self.session.send(GameCommand::Pause);
                    self.message = Some("Paused, Tab resumes".to_string());
                }
            }
            KeyCode::F(2) => {
                self.session.send(GameCommand::NewGame);
                self.message = Some("New game started!".to_string());
            }
            KeyCode::F(3) => {
                let game_type = self.settings.game_type().next();
                debug!(%game_type, "game type selected");
                self.session.send(GameCommand::SetGameType(game_type));
                self.message = Some(format!("Next game: {game_type}"));
            }
            KeyCode::F(4) => {
                let index = difficulty::selection_index(&self.settings.computer_difficulty)
                    .map_or(0, |index| (index + 1) % difficulty::presets().len());
                self.session.send(GameCommand::SetPresetDifficulty(index));
                self.message = Some("Difficulty changed, applies to the next game".to_string());
            }
            KeyCode::F(5) => {
                let index = (self.settings.color_theme_index + 1) % theme::themes().len();
                self.session.send(GameCommand::SetColorTheme(index));
                self.message = Some(format!("Colors: {}", theme::theme(index).name));
            }
            _ => {}
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let context = ViewContext {
            cursor: self.cursor,
            is_paused: self.session.playback().is_paused,
            settings: &self.settings,
            message: &self.message,
        };
        game_view::render(frame, &self.session.state(), &context);
    }
}
