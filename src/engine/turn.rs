use tracing::{debug, info, instrument};

use super::Engine;
use crate::game::{
    check_word_allowed, Board, Direction, GameState, PlayerTurn, RuleViolation, TurnStage,
};

/// Appends a cell to the selected path.
///
/// When the cell touches the path somewhere before its end, the path is cut
/// back to the last cell the new one touches so it can turn towards it.
fn select_as_next(board: &Board, row: usize, column: usize) -> Board {
    let mut board_with_selection = board.clone();

    let touching = Direction::ALL
        .into_iter()
        .filter_map(|direction| direction.step(row, column))
        .find(|&(r, c)| board.is_cell_selected(r, c));
    if let Some(first_touching) = touching {
        let mut latest_touching = first_touching;
        let mut position = first_touching;
        let mut hops = 0;
        while let Some(next) = board.next_selected_cell(position.0, position.1) {
            if Direction::between(next, (row, column)) != Direction::None {
                latest_touching = next;
            }
            position = next;
            hops += 1;
            if hops > board.rows() * board.columns() {
                break;
            }
        }
        if let Some((next_row, next_column)) =
            board.next_selected_cell(latest_touching.0, latest_touching.1)
        {
            board_with_selection =
                board_with_selection.with_cell_and_all_next_unselected(next_row, next_column);
        }
        board_with_selection = board_with_selection.with_selected_letter_direction_updated(
            latest_touching.0,
            latest_touching.1,
            None,
            Direction::None,
        );
    }

    board_with_selection
        .with_cell_selected(row, column)
        .with_selected_neighbor_direction_to_updated(row, column)
        .with_direction_from_pointing_neighbor(row, column)
}

/// The board once the previous turn's overlay is dismissed.
fn without_previous_turn(board: &Board) -> Board {
    board
        .with_no_selections()
        .with_no_directions()
        .with_new_letter_unmarked()
}

impl Engine {
    /// Manual input is ignored while the computer is playing.
    fn ignores(&self, is_manual_input: bool) -> bool {
        is_manual_input && self.game.get().is_current_player_computer()
    }

    #[instrument(skip(self))]
    pub fn cell_click(&mut self, is_manual_input: bool, row: usize, column: usize) {
        if self.ignores(is_manual_input) {
            return;
        }
        let state = self.game.get();
        let board = &state.board;
        if board.get(row, column).is_none() {
            debug!("click outside the board");
            return;
        }
        let next_board = match state.turn_stage {
            TurnStage::PlacingNewLetter => {
                let is_placeable =
                    !board.is_cell_letter(row, column) && board.is_cell_next_to_letter(row, column);
                if !is_placeable {
                    return;
                }
                board
                    .with_no_selections()
                    .with_no_directions()
                    .with_cell_selected(row, column)
                    .with_new_letter_unmarked()
            }
            TurnStage::SelectingWord => {
                let is_selected = board.is_cell_selected(row, column);
                let is_appendable = board.is_cell_letter(row, column)
                    && !is_selected
                    && (!board.is_any_letter_selected()
                        || board.is_cell_next_to_selected(row, column));
                if is_appendable {
                    select_as_next(board, row, column)
                } else if is_selected {
                    board.with_cell_and_all_next_unselected(row, column)
                } else {
                    return;
                }
            }
            TurnStage::GameOver => return,
        };
        self.game.replace(GameState {
            board: next_board,
            error: None,
            ..state
        });
    }

    #[instrument(skip(self))]
    pub fn letter_input(&mut self, is_manual_input: bool, letter: char) {
        if self.ignores(is_manual_input) || !letter.is_ascii_alphabetic() {
            return;
        }
        let state = self.game.get();
        let board = &state.board;
        let can_place = match state.turn_stage {
            TurnStage::PlacingNewLetter => board.selected_cell_count() == 1,
            // retyping the new letter before the path grows
            TurnStage::SelectingWord => {
                board.selected_cell_count() == 1 && board.is_new_letter_selected()
            }
            TurnStage::GameOver => false,
        };
        if !can_place {
            return;
        }
        self.game.replace(GameState {
            board: board.with_new_letter_instead_of_selection(letter.to_ascii_lowercase()),
            turn_stage: TurnStage::SelectingWord,
            error: None,
            ..state
        });
    }

    #[instrument(skip(self))]
    pub fn delete_press(&mut self, is_manual_input: bool) {
        if self.ignores(is_manual_input) {
            return;
        }
        let state = self.game.get();
        let next = match state.turn_stage {
            TurnStage::PlacingNewLetter | TurnStage::GameOver => GameState {
                board: without_previous_turn(&state.board),
                ..state
            },
            TurnStage::SelectingWord => GameState {
                board: state
                    .board
                    .with_no_selections()
                    .with_no_directions()
                    .with_new_letter_cleared(),
                turn_stage: TurnStage::PlacingNewLetter,
                error: None,
                ..state
            },
        };
        self.game.replace(next);
    }

    /// Confirms the selected word, or dismisses the previous turn when no word
    /// is being selected. A finished turn may hand over to the computer, which
    /// calls `before_computer_move` before searching.
    #[instrument(skip(self, before_computer_move))]
    pub fn enter_press(&mut self, is_manual_input: bool, before_computer_move: &mut dyn FnMut()) {
        if self.ignores(is_manual_input) {
            return;
        }
        let state = self.game.get();
        match state.turn_stage {
            TurnStage::PlacingNewLetter | TurnStage::GameOver => {
                self.game.replace(GameState {
                    board: without_previous_turn(&state.board),
                    ..state
                });
            }
            TurnStage::SelectingWord => self.try_finish_turn(state, before_computer_move),
        }
    }

    fn try_finish_turn(&mut self, state: GameState, before_computer_move: &mut dyn FnMut()) {
        if state.board.selected_cell_count() <= 1 {
            return;
        }
        if !state.board.is_new_letter_selected() {
            self.show_error(state, RuleViolation::NewLetterNotIncluded);
            return;
        }

        let word = state.board.chosen_letter_cells_in_order();
        // humans may use the whole dictionary
        let use_part_of_dictionary = match state.current_player() {
            Some(player) if player.is_computer => player.computer_max_vocabulary_normalized_size,
            _ => 1.0,
        };
        match check_word_allowed(&state, &word.text(), use_part_of_dictionary, self.dictionary()) {
            Ok(()) => {
                let is_player1_turn = state.player_turn == PlayerTurn::Player1;
                let is_board_full = !state.board.has_empty_cells();
                info!(%word, turn = ?state.player_turn, "word played");

                let (player1, player2) = if is_player1_turn {
                    (state.player1.with_word_played(word), state.player2.clone())
                } else {
                    (state.player1.clone(), state.player2.with_word_played(word))
                };
                let (player_turn, turn_stage) = if is_board_full {
                    (PlayerTurn::GameOver, TurnStage::GameOver)
                } else {
                    (state.player_turn.other(), TurnStage::PlacingNewLetter)
                };
                self.game.replace(GameState {
                    board: state.board.with_no_selections().with_no_directions(),
                    player1,
                    player2,
                    player_turn,
                    turn_stage,
                    error: None,
                    ..state
                });
                self.queue_auto_play_inputs(before_computer_move);
            }
            Err(violation) => {
                debug!(%word, %violation, "word rejected");
                self.show_error(state, violation);
            }
        }
    }

    fn show_error(&self, state: GameState, violation: RuleViolation) {
        self.game.replace(GameState {
            error: Some(violation),
            ..state
        });
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{engine_with, no_hook};
    use super::*;
    use crate::game::{Cell, Player};
    use crate::settings::{DifficultyRecord, GameType};

    fn human_game(board: Board) -> Engine {
        let engine = engine_with(GameType::HumanVsHuman);
        let difficulty = DifficultyRecord::default();
        engine.restore(GameState::new(
            board,
            Player::human(&difficulty),
            Player::human(&difficulty),
        ));
        engine
    }

    fn house() -> Board {
        Board::with_starting_word("house").unwrap()
    }

    fn play(engine: &mut Engine, placement: (usize, usize), letter: char, path: &[(usize, usize)]) {
        engine.cell_click(true, placement.0, placement.1);
        engine.letter_input(true, letter);
        for &(row, column) in path {
            engine.cell_click(true, row, column);
        }
    }

    #[test]
    fn test_placing_selects_single_empty_cell() {
        let mut engine = human_game(house());
        engine.cell_click(true, 0, 0);
        assert_eq!(engine.state().board.selected_cell_count(), 0);
        engine.cell_click(true, 2, 0);
        assert_eq!(engine.state().board.selected_cell_count(), 0);
        engine.cell_click(true, 9, 9);
        engine.cell_click(true, 1, 0);
        engine.cell_click(true, 3, 4);
        let board = engine.state().board;
        assert_eq!(board.selected_cell_count(), 1);
        assert!(board.is_cell_selected(3, 4));
        assert_eq!(engine.state().turn_stage, TurnStage::PlacingNewLetter);
    }

    #[test]
    fn test_letter_moves_to_selecting() {
        let mut engine = human_game(house());
        engine.letter_input(true, 't');
        assert_eq!(engine.state().turn_stage, TurnStage::PlacingNewLetter);
        engine.cell_click(true, 1, 0);
        engine.letter_input(true, '7');
        assert_eq!(engine.state().turn_stage, TurnStage::PlacingNewLetter);
        engine.letter_input(true, 'T');
        let state = engine.state();
        assert_eq!(state.turn_stage, TurnStage::SelectingWord);
        let cell = state.board.get(1, 0).and_then(Cell::letter).copied().unwrap();
        assert_eq!(cell.letter, 't');
        assert!(cell.is_new);
    }

    #[test]
    fn test_retype_only_while_new_letter_alone() {
        let mut engine = human_game(house());
        play(&mut engine, (1, 0), 't', &[(1, 0)]);
        engine.letter_input(true, 'a');
        let board = engine.state().board;
        assert_eq!(board.get(1, 0).and_then(Cell::letter).unwrap().letter, 'a');

        engine.cell_click(true, 1, 0);
        engine.cell_click(true, 2, 0);
        engine.letter_input(true, 'b');
        let board = engine.state().board;
        assert_eq!(board.get(1, 0).and_then(Cell::letter).unwrap().letter, 'a');
    }

    #[test]
    fn test_scenario_a_single_letter_enter_is_noop() {
        let mut engine = human_game(house());
        play(&mut engine, (1, 1), 't', &[(1, 1)]);
        let before = engine.state();
        engine.enter_press(true, &mut no_hook());
        assert_eq!(engine.state(), before);

        // h, o, t
        let mut engine = human_game(house());
        play(&mut engine, (1, 1), 't', &[(2, 0), (2, 1), (1, 1)]);
        assert_eq!(engine.state().board.chosen_letter_cells_in_order().text(), "hot");
        engine.enter_press(true, &mut no_hook());
        let state = engine.state();
        assert_eq!(state.error, None);
        assert_eq!(state.player1.played_words.len(), 1);
        assert_eq!(state.player1.played_words[0].text(), "hot");
        assert_eq!(state.player_turn, PlayerTurn::Player2);
        assert_eq!(state.turn_stage, TurnStage::PlacingNewLetter);
        assert_eq!(state.board.selected_cell_count(), 0);
        // the played word stays marked until the next player acts
        assert!(state.board.has_new_letter());
        assert_eq!(state.last_played_word().map(|w| w.text()), Some("hot".to_string()));
    }

    #[test]
    fn test_new_letter_must_be_in_word() {
        let mut engine = human_game(house());
        play(&mut engine, (1, 0), 'x', &[(2, 0), (2, 1)]);
        engine.enter_press(true, &mut no_hook());
        assert_eq!(engine.state().error, Some(RuleViolation::NewLetterNotIncluded));
        assert_eq!(engine.state().turn_stage, TurnStage::SelectingWord);
    }

    #[test]
    fn test_scenario_b_starting_word_rejected() {
        let mut engine = human_game(house());
        play(
            &mut engine,
            (3, 3),
            'e',
            &[(2, 0), (2, 1), (2, 2), (2, 3), (3, 3)],
        );
        engine.enter_press(true, &mut no_hook());
        let state = engine.state();
        assert_eq!(state.error, Some(RuleViolation::WordAlreadyPlayed));
        assert_eq!(state.player_turn, PlayerTurn::Player1);
        assert!(state.player1.played_words.is_empty());
    }

    #[test]
    fn test_scenario_c_unknown_word_rejected() {
        let board = Board::from_rows(&[".....", ".....", "zzqzz", ".....", "....."]).unwrap();
        let mut engine = human_game(board);
        play(&mut engine, (1, 2), 'x', &[(2, 0), (2, 1), (2, 2), (1, 2)]);
        assert_eq!(engine.state().board.chosen_letter_cells_in_order().text(), "zzqx");
        engine.enter_press(true, &mut no_hook());
        assert_eq!(engine.state().error, Some(RuleViolation::WordNotAllowed));

        // the next successful action clears the error
        engine.cell_click(true, 1, 2);
        assert_eq!(engine.state().error, None);
    }

    #[test]
    fn test_scenario_d_full_board_ends_game() {
        let board =
            Board::from_rows(&["aaaaa", "a.aaa", "house", "aaaaa", "aaaaa"]).unwrap();
        let mut engine = human_game(board);
        play(&mut engine, (1, 1), 't', &[(2, 0), (2, 1), (1, 1)]);
        engine.enter_press(true, &mut no_hook());
        let state = engine.state();
        assert_eq!(state.error, None);
        assert!(!state.board.has_empty_cells());
        assert_eq!(state.player_turn, PlayerTurn::GameOver);
        assert_eq!(state.turn_stage, TurnStage::GameOver);
        assert_eq!(
            state.outcome(),
            Some(crate::game::GameOutcome::Winner(PlayerTurn::Player1))
        );

        // further input changes nothing but the overlay
        engine.cell_click(true, 0, 0);
        engine.letter_input(true, 'q');
        engine.enter_press(true, &mut no_hook());
        let after = engine.state();
        assert_eq!(after.turn_stage, TurnStage::GameOver);
        assert!(!after.board.has_new_letter());
    }

    #[test]
    fn test_clicking_selected_cell_truncates_path() {
        let mut engine = human_game(house());
        play(&mut engine, (1, 2), 'm', &[(1, 2), (2, 2), (2, 3)]);
        assert_eq!(engine.state().board.chosen_letter_cells_in_order().text(), "mus");
        engine.cell_click(true, 2, 2);
        let board = engine.state().board;
        assert_eq!(board.chosen_letter_cells_in_order().text(), "m");
        let head = board.get(1, 2).and_then(Cell::letter).unwrap();
        assert!(head.selected);
        assert_eq!(head.direction_to_next, Direction::None);
    }

    #[test]
    fn test_path_turns_towards_new_cell() {
        let mut engine = human_game(house());
        play(&mut engine, (1, 1), 'm', &[(2, 0), (2, 1), (2, 2)]);
        assert_eq!(engine.state().board.chosen_letter_cells_in_order().text(), "hou");
        // m touches o, so the path is cut after o and turns up
        engine.cell_click(true, 1, 1);
        let board = engine.state().board;
        assert_eq!(board.chosen_letter_cells_in_order().text(), "hom");
        assert!(!board.is_cell_selected(2, 2));
        let o = board.get(2, 1).and_then(Cell::letter).unwrap();
        assert_eq!(o.direction_to_next, Direction::Up);
        let m = board.get(1, 1).and_then(Cell::letter).unwrap();
        assert_eq!(m.direction_from_previous, Direction::Down);
    }

    #[test]
    fn test_far_cell_cannot_join_path() {
        let mut engine = human_game(house());
        play(&mut engine, (1, 0), 't', &[(2, 0)]);
        engine.cell_click(true, 2, 4);
        assert_eq!(engine.state().board.selected_cell_count(), 1);
    }

    #[test]
    fn test_delete_reverts_placement() {
        let mut engine = human_game(house());
        play(&mut engine, (1, 1), 't', &[(2, 0), (2, 1)]);
        engine.delete_press(true);
        let state = engine.state();
        assert_eq!(state.turn_stage, TurnStage::PlacingNewLetter);
        assert_eq!(state.board, house());
    }

    #[test]
    fn test_enter_dismisses_previous_turn() {
        let mut engine = human_game(house());
        play(&mut engine, (1, 1), 't', &[(2, 0), (2, 1), (1, 1)]);
        engine.enter_press(true, &mut no_hook());
        assert!(engine.state().board.has_new_letter());
        engine.enter_press(true, &mut no_hook());
        assert!(!engine.state().board.has_new_letter());
        assert_eq!(engine.state().player_turn, PlayerTurn::Player2);
    }

    #[test]
    fn test_manual_input_ignored_on_computer_turn() {
        let mut engine = engine_with(GameType::HumanVsComputer);
        let difficulty = DifficultyRecord::default();
        let mut state = GameState::new(house(), Player::human(&difficulty), Player::computer(&difficulty));
        state.player_turn = PlayerTurn::Player2;
        engine.restore(state.clone());

        engine.cell_click(true, 1, 0);
        engine.letter_input(true, 'a');
        engine.delete_press(true);
        engine.enter_press(true, &mut no_hook());
        assert_eq!(engine.state(), state);

        engine.cell_click(false, 1, 0);
        assert!(engine.state().board.is_cell_selected(1, 0));
    }
}
