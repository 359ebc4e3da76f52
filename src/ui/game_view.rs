use super::board_widget::board_lines;
use super::messages;
use super::palette::Palette;
use crate::game::{GameState, Player, PlayerTurn, TurnStage};
use crate::settings::{difficulty, SettingsRecord};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Everything the game screen shows besides the game itself.
pub struct ViewContext<'a> {
    pub cursor: (usize, usize),
    pub is_paused: bool,
    pub settings: &'a SettingsRecord,
    pub message: &'a Option<String>,
}

pub fn render(frame: &mut Frame, game_state: &GameState, context: &ViewContext) {
    let palette = Palette::new(&context.settings.color_theme());
    frame.render_widget(Block::default().style(palette.base), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(11),   // Board and players
            Constraint::Length(4), // Status
            Constraint::Length(4), // Controls
        ])
        .split(frame.area());

    render_header(frame, game_state, context, &palette, chunks[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(50),
            Constraint::Percentage(25),
        ])
        .split(chunks[1]);
    render_player(frame, game_state, PlayerTurn::Player1, &palette, middle[0]);
    render_board(frame, game_state, context.cursor, &palette, middle[1]);
    render_player(frame, game_state, PlayerTurn::Player2, &palette, middle[2]);

    render_status(frame, game_state, context.message, &palette, chunks[2]);
    render_controls(frame, &palette, chunks[3]);
}

fn difficulty_label(settings: &SettingsRecord) -> String {
    let record = settings.computer_difficulty;
    let name = match difficulty::selection_index(&record) {
        Some(0) => "Easy",
        Some(1) => "Medium",
        Some(2) => "Hard",
        Some(_) => "Ultra",
        None => "Custom",
    };
    format!(
        "{name} ({} letters, {:.0}% of words)",
        record.max_word_length,
        record.max_vocabulary_normalized_size * 100.0
    )
}

fn render_header(
    frame: &mut Frame,
    game_state: &GameState,
    context: &ViewContext,
    palette: &Palette,
    area: Rect,
) {
    let mut text = format!(
        "Start: {}  |  Next game: {}, {}",
        game_state.starting_word().text().to_uppercase(),
        context.settings.game_type(),
        difficulty_label(context.settings)
    );
    if context.is_paused {
        text.push_str("  |  PAUSED");
    }

    let header = Paragraph::new(text)
        .style(palette.title)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border)
                .title("Letter Path"),
        );

    frame.render_widget(header, area);
}

fn is_highlighted(game_state: &GameState, turn: PlayerTurn) -> bool {
    match game_state.outcome() {
        Some(crate::game::GameOutcome::Winner(winner)) => winner == turn,
        Some(crate::game::GameOutcome::Draw) => true,
        None => game_state.player_turn == turn,
    }
}

fn render_player(
    frame: &mut Frame,
    game_state: &GameState,
    turn: PlayerTurn,
    palette: &Palette,
    area: Rect,
) {
    let (player, name): (&Player, &str) = match turn {
        PlayerTurn::Player1 => (
            &game_state.player1,
            messages::player1_name(&game_state.player1, &game_state.player2),
        ),
        _ => (
            &game_state.player2,
            messages::player2_name(&game_state.player1, &game_state.player2),
        ),
    };

    let mut lines = vec![Line::from(Span::styled(
        format!("Score: {}", player.score()),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.extend(
        player
            .played_words
            .iter()
            .map(|word| Line::from(word.text().to_uppercase())),
    );

    let border_style = if is_highlighted(game_state, turn) {
        palette.active_border
    } else {
        palette.border
    };
    let panel = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(name),
    );
    frame.render_widget(panel, area);
}

fn render_board(
    frame: &mut Frame,
    game_state: &GameState,
    cursor: (usize, usize),
    palette: &Palette,
    area: Rect,
) {
    let board = Paragraph::new(board_lines(&game_state.board, cursor, palette))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(palette.border));
    frame.render_widget(board, area);
}

fn render_status(
    frame: &mut Frame,
    game_state: &GameState,
    message: &Option<String>,
    palette: &Palette,
    area: Rect,
) {
    let notification = messages::notification(game_state);
    let notification_style = if game_state.error.is_some() {
        palette.error
    } else {
        palette.notice
    };
    let status_style = if game_state.turn_stage == TurnStage::GameOver {
        palette.game_over
    } else {
        Style::default()
    };

    let mut lines = vec![
        Line::from(Span::styled(messages::status(game_state), status_style)),
        Line::from(Span::styled(notification, notification_style)),
    ];
    if let Some(message) = message {
        lines[1] = Line::from(Span::styled(message.clone(), palette.message));
    }

    let status = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(palette.border));
    frame.render_widget(status, area);
}

fn render_controls(frame: &mut Frame, palette: &Palette, area: Rect) {
    let line1 = Line::from("Arrows: Move  |  Space: Select  |  A-Z: Letter  |  Backspace: Undo  |  Enter: Confirm");
    let line2 = Line::from(
        "Tab: Pause  |  F2: New game  |  F3: Game type  |  F4: Difficulty  |  F5: Colors  |  Esc: Quit",
    );

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Board;
    use crate::settings::DifficultyRecord;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_difficulty_label() {
        let mut settings = SettingsRecord::default();
        assert_eq!(difficulty_label(&settings), "Medium (5 letters, 15% of words)");
        settings.computer_difficulty = difficulty::default_custom();
        assert_eq!(difficulty_label(&settings), "Custom (6 letters, 20% of words)");
    }

    #[test]
    fn test_render_shows_board_and_status() {
        let difficulty = DifficultyRecord::default();
        let state = GameState::new(
            Board::with_starting_word("house").unwrap(),
            Player::human(&difficulty),
            Player::computer(&difficulty),
        );
        let settings = SettingsRecord::default();
        let context = ViewContext {
            cursor: (1, 1),
            is_paused: true,
            settings: &settings,
            message: &None,
        };

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, &state, &context)).unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Start: HOUSE"));
        assert!(screen.contains("PAUSED"));
        assert!(screen.contains(" H   O   U   S   E "));
        assert!(screen.contains("Player turn: place letter for your word"));
    }

    #[test]
    fn test_render_uses_selected_theme() {
        let difficulty = DifficultyRecord::default();
        let state = GameState::new(
            Board::with_starting_word("house").unwrap(),
            Player::human(&difficulty),
            Player::human(&difficulty),
        );
        let settings = SettingsRecord::default().with_color_theme(2);
        let context = ViewContext {
            cursor: (0, 0),
            is_paused: false,
            settings: &settings,
            message: &None,
        };

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, &state, &context)).unwrap();
        let background = Palette::new(&crate::settings::theme::SPRING).base.bg;
        let buffer = terminal.backend().buffer();
        assert_eq!(Some(buffer[(0, 0)].bg), background);
        assert_eq!(Some(buffer[(99, 29)].bg), background);
    }
}
