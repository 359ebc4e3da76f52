use super::word::Word;

/// One scripted input the computer player replays through the turn engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoPlayInput {
    Letter(char),
    Select { row: usize, column: usize },
    Enter,
}

impl AutoPlayInput {
    /// The inputs a person would make to play `word`: dismiss the previous
    /// turn, place the new letter, trace the path, confirm.
    ///
    /// Returns `None` when the word has no new letter to place.
    pub fn script_for(word: &Word) -> Option<Vec<AutoPlayInput>> {
        let new_letter = word.new_letter()?;
        let mut inputs = Vec::with_capacity(word.len() + 4);
        inputs.push(AutoPlayInput::Enter);
        inputs.push(AutoPlayInput::Select {
            row: new_letter.row,
            column: new_letter.column,
        });
        inputs.push(AutoPlayInput::Letter(new_letter.letter));
        inputs.extend(word.letters.iter().map(|l| AutoPlayInput::Select {
            row: l.row,
            column: l.column,
        }));
        inputs.push(AutoPlayInput::Enter);
        Some(inputs)
    }
}
