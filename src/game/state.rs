use super::{AutoPlayInput, Board, Player, PlayerTurn, RuleViolation, Word};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnStage {
    PlacingNewLetter,
    SelectingWord,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// Carries `PlayerTurn::Player1` or `PlayerTurn::Player2`.
    Winner(PlayerTurn),
    Draw,
}

/// The whole game at one point in time. Replaced wholesale on every change.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub board: Board,
    pub player1: Player,
    pub player2: Player,
    pub player_turn: PlayerTurn,
    pub turn_stage: TurnStage,
    pub error: Option<RuleViolation>,
    pub queued_auto_play_inputs: Vec<AutoPlayInput>,
}

impl GameState {
    /// Fresh game: player 1 to place a letter, nothing queued.
    pub fn new(board: Board, player1: Player, player2: Player) -> Self {
        GameState {
            board,
            player1,
            player2,
            player_turn: PlayerTurn::Player1,
            turn_stage: TurnStage::PlacingNewLetter,
            error: None,
            queued_auto_play_inputs: Vec::new(),
        }
    }

    /// The player to move, `None` once the board is played out.
    pub fn current_player(&self) -> Option<&Player> {
        match self.player_turn {
            PlayerTurn::Player1 => Some(&self.player1),
            PlayerTurn::Player2 => Some(&self.player2),
            PlayerTurn::GameOver => None,
        }
    }

    pub fn is_current_player_computer(&self) -> bool {
        self.current_player().is_some_and(|p| p.is_computer)
    }

    /// Check if game is over, by a full board or by a player giving up
    pub fn is_terminal(&self) -> bool {
        self.turn_stage == TurnStage::GameOver
    }

    /// A game is losable once someone has played a word and it is not over yet.
    pub fn is_losable(&self) -> bool {
        let anyone_moved =
            !self.player1.played_words.is_empty() || !self.player2.played_words.is_empty();
        !self.is_terminal() && anyone_moved
    }

    /// Get game outcome if game is over.
    ///
    /// A played-out board is decided by score. When only the stage is over,
    /// the player whose turn it was gave up and the opponent wins.
    pub fn outcome(&self) -> Option<GameOutcome> {
        if !self.is_terminal() {
            return None;
        }
        match self.player_turn {
            PlayerTurn::GameOver => {
                let (score1, score2) = (self.player1.score(), self.player2.score());
                Some(match score1.cmp(&score2) {
                    std::cmp::Ordering::Greater => GameOutcome::Winner(PlayerTurn::Player1),
                    std::cmp::Ordering::Less => GameOutcome::Winner(PlayerTurn::Player2),
                    std::cmp::Ordering::Equal => GameOutcome::Draw,
                })
            }
            gave_up => Some(GameOutcome::Winner(gave_up.other())),
        }
    }

    pub fn starting_word(&self) -> Word {
        self.board.starting_letter_cells_in_order()
    }

    /// The word that finished the previous turn, if any.
    pub fn last_played_word(&self) -> Option<&Word> {
        let previous = match self.player_turn {
            PlayerTurn::Player1 => &self.player2,
            PlayerTurn::Player2 => &self.player1,
            // player 1 always has the odd turns, so the last word of a full
            // board is whoever played more words
            PlayerTurn::GameOver if self.player1.played_words.len() > self.player2.played_words.len() => {
                &self.player1
            }
            PlayerTurn::GameOver => &self.player2,
        };
        previous.played_words.last()
    }
}
