//! Text shown around the board, derived from the game state alone.

use crate::game::{GameState, Player, PlayerTurn, RuleViolation, TurnStage};

pub fn player1_name(player1: &Player, player2: &Player) -> &'static str {
    match (player1.is_computer, player2.is_computer) {
        (true, true) => "Computer 1",
        (false, false) => "Player 1",
        (true, false) => "Computer",
        (false, true) => "Player",
    }
}

pub fn player2_name(player1: &Player, player2: &Player) -> &'static str {
    match (player1.is_computer, player2.is_computer) {
        (true, true) => "Computer 2",
        (false, false) => "Player 2",
        (_, true) => "Computer",
        (_, false) => "Player",
    }
}

fn name_of(state: &GameState, turn: PlayerTurn) -> &'static str {
    match turn {
        PlayerTurn::Player1 => player1_name(&state.player1, &state.player2),
        _ => player2_name(&state.player1, &state.player2),
    }
}

/// Whose turn it is and what they should do, or how the game ended.
pub fn status(state: &GameState) -> String {
    if state.player_turn == PlayerTurn::GameOver {
        let outcome = match state.player1.score().cmp(&state.player2.score()) {
            std::cmp::Ordering::Greater => format!("{} won!", name_of(state, PlayerTurn::Player1)),
            std::cmp::Ordering::Less => format!("{} won!", name_of(state, PlayerTurn::Player2)),
            std::cmp::Ordering::Equal => "It's a draw!".to_string(),
        };
        return format!("Game over. {outcome}");
    }

    let now = name_of(state, state.player_turn);
    if state.turn_stage == TurnStage::GameOver {
        let other = name_of(state, state.player_turn.other());
        return format!("{now} gave up. {other} won!");
    }
    let instruction = if state.is_current_player_computer() {
        "computing"
    } else {
        match state.turn_stage {
            TurnStage::PlacingNewLetter => "place letter for your word",
            TurnStage::SelectingWord => "pick word with new letter",
            TurnStage::GameOver => "",
        }
    };
    format!("{now} turn: {instruction}")
}

/// Rule violation of the last attempt, or the word the previous player made
/// while it is still shown on the board. Empty otherwise.
pub fn notification(state: &GameState) -> String {
    let word_on_board = state.board.chosen_letter_cells_in_order().text();
    match state.error {
        Some(RuleViolation::NewLetterNotIncluded) => {
            return "New letter must be in the word".to_string()
        }
        Some(RuleViolation::WordAlreadyPlayed) => return format!("Already played: {word_on_board}"),
        Some(RuleViolation::WordNotAllowed) => return format!("Not allowed: {word_on_board}"),
        None => {}
    }

    let is_showing_last_turn = state.board.has_new_letter()
        && state.board.selected_cell_count() == 0
        && state.turn_stage != TurnStage::SelectingWord;
    let Some(last_word) = state.last_played_word().filter(|_| is_showing_last_turn) else {
        return String::new();
    };
    let previous = match state.player_turn {
        PlayerTurn::Player2 => PlayerTurn::Player1,
        PlayerTurn::Player1 => PlayerTurn::Player2,
        PlayerTurn::GameOver
            if state.player1.played_words.len() > state.player2.played_words.len() =>
        {
            PlayerTurn::Player1
        }
        PlayerTurn::GameOver => PlayerTurn::Player2,
    };
    format!("{} word was: {last_word}", name_of(state, previous))
}
