use tracing::{debug, info, instrument, warn};

use super::Engine;
use crate::game::{AutoPlayInput, GameState, TurnStage};

impl Engine {
    /// Plans the computer's move when it is a computer's turn and nothing is
    /// queued yet. The planned move is stored as scripted input; with no legal
    /// word the computer gives up and the game ends.
    #[instrument(skip_all)]
    pub fn queue_auto_play_inputs(&mut self, before_computer_move: &mut dyn FnMut()) {
        let state = self.game.get();
        if !state.is_current_player_computer()
            || !state.queued_auto_play_inputs.is_empty()
            || state.turn_stage == TurnStage::GameOver
        {
            return;
        }

        before_computer_move();

        let planned = self.agent.plan_move(&state, self.dictionary.as_ref());
        let script = planned.as_ref().and_then(AutoPlayInput::script_for);
        match script {
            Some(inputs) => {
                debug!(steps = inputs.len(), "computer move queued");
                self.game.update(|current| GameState {
                    queued_auto_play_inputs: inputs,
                    ..current.clone()
                });
            }
            None => {
                if planned.is_some() {
                    warn!("planned word has no new letter");
                }
                info!(turn = ?state.player_turn, "computer gives up");
                self.game.update(|current| GameState {
                    turn_stage: TurnStage::GameOver,
                    ..current.clone()
                });
            }
        }
    }

    /// Replays the first queued input, if any, against the latest state.
    ///
    /// Nothing is replayed while the game is paused or hidden. Returns whether
    /// an input was replayed.
    pub fn consume_next_auto_play_input(&mut self, before_computer_move: &mut dyn FnMut()) -> bool {
        if !self.playback.get().is_active() {
            return false;
        }
        let state = self.game.get();
        let Some(&input) = state.queued_auto_play_inputs.first() else {
            return false;
        };
        self.game.replace(GameState {
            queued_auto_play_inputs: state.queued_auto_play_inputs[1..].to_vec(),
            ..state
        });

        debug!(?input, "replaying");
        match input {
            AutoPlayInput::Letter(letter) => self.letter_input(false, letter),
            AutoPlayInput::Select { row, column } => self.cell_click(false, row, column),
            AutoPlayInput::Enter => self.enter_press(false, before_computer_move),
        }
        true
    }

    /// Replays queued input until the queue is empty or playback stops.
    pub fn consume_all_auto_play_inputs(&mut self, before_computer_move: &mut dyn FnMut()) -> usize {
        let mut replayed = 0;
        while self.consume_next_auto_play_input(before_computer_move) {
            replayed += 1;
        }
        replayed
    }
}
