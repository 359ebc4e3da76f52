use std::fmt;

/// One letter of a word together with the cell it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordLetter {
    pub letter: char,
    pub row: usize,
    pub column: usize,
    pub is_new: bool,
}

/// An ordered path of letters on the board, played or candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Word {
    pub letters: Vec<WordLetter>,
}

impl Word {
    pub fn new(letters: Vec<WordLetter>) -> Self {
        Word { letters }
    }

    pub fn text(&self) -> String {
        self.letters.iter().map(|l| l.letter).collect()
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// The letter placed this turn, if the path goes through it.
    pub fn new_letter(&self) -> Option<&WordLetter> {
        self.letters.iter().find(|l| l.is_new)
    }

    pub fn contains_cell(&self, row: usize, column: usize) -> bool {
        self.letters
            .iter()
            .any(|l| l.row == row && l.column == column)
    }

    pub fn first(&self) -> Option<&WordLetter> {
        self.letters.first()
    }

    pub fn last(&self) -> Option<&WordLetter> {
        self.letters.last()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in &self.letters {
            write!(f, "{}", letter.letter)?;
        }
        Ok(())
    }
}
