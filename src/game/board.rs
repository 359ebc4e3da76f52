use std::fmt;

use super::cell::{Cell, Direction, LetterCell};
use super::word::{Word, WordLetter};
use crate::error::BoardError;

/// Side length of a standard board.
pub const BOARD_SIZE: usize = 5;

/// Immutable grid of cells, row-major. Every transform returns a new board.
///
/// Selected letters are linked into a single path through their
/// `direction_to_next` / `direction_from_previous` pointers. The transforms
/// below keep those pointers symmetric; the data itself does not enforce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Vec<Cell>>,
}

impl Board {
    /// Standard 5×5 board with `word` in the middle row and empty rows around it.
    pub fn with_starting_word(word: &str) -> Result<Self, BoardError> {
        let letters: Vec<char> = word.trim().chars().collect();
        if letters.len() != BOARD_SIZE {
            return Err(BoardError::StartingWordLength {
                expected: BOARD_SIZE,
                actual: letters.len(),
            });
        }
        if let Some(&bad) = letters.iter().find(|c| !c.is_ascii_alphabetic()) {
            return Err(BoardError::InvalidLetter(bad));
        }

        let empty_row = vec![Cell::EMPTY; BOARD_SIZE];
        let mut cells = vec![empty_row.clone(); BOARD_SIZE / 2];
        cells.push(
            letters
                .iter()
                .map(|c| Cell::Letter(LetterCell::new(c.to_ascii_lowercase())))
                .collect(),
        );
        cells.extend(vec![empty_row; BOARD_SIZE / 2]);
        Ok(Board { cells })
    }

    /// Build a board from text rows, `.` marking an empty cell.
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardError> {
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut cells = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let row_cells = row
                .chars()
                .map(|c| match c {
                    '.' => Ok(Cell::EMPTY),
                    c if c.is_ascii_alphabetic() => {
                        Ok(Cell::Letter(LetterCell::new(c.to_ascii_lowercase())))
                    }
                    other => Err(BoardError::InvalidLetter(other)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            if row_cells.len() != width {
                return Err(BoardError::RaggedRows {
                    row: index,
                    expected: width,
                    actual: row_cells.len(),
                });
            }
            cells.push(row_cells);
        }
        Ok(Board { cells })
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn columns(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&Cell> {
        self.cells.get(row).and_then(|cells| cells.get(column))
    }

    /// All cells with their coordinates, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(column, cell)| (row, column, cell))
        })
    }

    fn cell_count(&self) -> usize {
        self.rows() * self.columns()
    }

    fn assert_in_bounds(&self, row: usize, column: usize) {
        assert!(
            row < self.rows() && column < self.columns(),
            "cell ({row}, {column}) is outside the {}x{} board",
            self.rows(),
            self.columns()
        );
    }

    /// In-bounds neighbors in up, down, left, right order.
    fn neighbors(
        &self,
        row: usize,
        column: usize,
    ) -> impl Iterator<Item = (Direction, usize, usize)> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            direction
                .step(row, column)
                .filter(|&(r, c)| r < self.rows() && c < self.columns())
                .map(|(r, c)| (direction, r, c))
        })
    }

    // --- Predicates ---

    pub fn is_cell_letter(&self, row: usize, column: usize) -> bool {
        self.get(row, column).is_some_and(Cell::is_letter)
    }

    pub fn is_cell_selected(&self, row: usize, column: usize) -> bool {
        self.get(row, column).is_some_and(Cell::is_selected)
    }

    pub fn is_cell_next_to_letter(&self, row: usize, column: usize) -> bool {
        self.neighbors(row, column)
            .any(|(_, r, c)| self.is_cell_letter(r, c))
    }

    pub fn is_cell_next_to_selected(&self, row: usize, column: usize) -> bool {
        self.neighbors(row, column)
            .any(|(_, r, c)| self.is_cell_selected(r, c))
    }

    pub fn selected_cell_count(&self) -> usize {
        self.cells().filter(|(_, _, cell)| cell.is_selected()).count()
    }

    pub fn has_new_letter(&self) -> bool {
        self.cells()
            .any(|(_, _, cell)| cell.letter().is_some_and(|l| l.is_new))
    }

    pub fn is_any_letter_selected(&self) -> bool {
        self.cells()
            .any(|(_, _, cell)| cell.selected_letter().is_some())
    }

    pub fn has_empty_cells(&self) -> bool {
        self.cells().any(|(_, _, cell)| !cell.is_letter())
    }

    pub fn is_new_letter_selected(&self) -> bool {
        self.cells()
            .any(|(_, _, cell)| cell.selected_letter().is_some_and(|l| l.is_new))
    }

    // --- Whole-board transforms ---

    fn map_cells(&self, f: impl Fn(&Cell) -> Cell) -> Board {
        Board {
            cells: self
                .cells
                .iter()
                .map(|row| row.iter().map(&f).collect())
                .collect(),
        }
    }

    fn map_letters(&self, f: impl Fn(LetterCell) -> LetterCell) -> Board {
        self.map_cells(|cell| match *cell {
            Cell::Letter(letter) => Cell::Letter(f(letter)),
            empty => empty,
        })
    }

    fn with_cell_replaced(&self, row: usize, column: usize, f: impl FnOnce(Cell) -> Cell) -> Board {
        self.assert_in_bounds(row, column);
        let mut board = self.clone();
        let cell = &mut board.cells[row][column];
        *cell = f(*cell);
        board
    }

    #[must_use]
    pub fn with_no_directions(&self) -> Board {
        self.map_letters(|letter| LetterCell {
            direction_to_next: Direction::None,
            direction_from_previous: Direction::None,
            ..letter
        })
    }

    #[must_use]
    pub fn with_no_selections(&self) -> Board {
        self.map_cells(|cell| cell.with_selected(false))
    }

    /// Removes this turn's placed letter, restoring the empty cell.
    #[must_use]
    pub fn with_new_letter_cleared(&self) -> Board {
        self.map_cells(|cell| match *cell {
            Cell::Letter(letter) if letter.is_new => Cell::EMPTY,
            other => other,
        })
    }

    /// Puts `letter` into the selected cell as this turn's new letter, unselected.
    #[must_use]
    pub fn with_new_letter_instead_of_selection(&self, letter: char) -> Board {
        let letter = letter.to_ascii_lowercase();
        self.map_cells(|cell| {
            if cell.is_selected() {
                Cell::Letter(LetterCell::new_letter(letter))
            } else {
                *cell
            }
        })
    }

    #[must_use]
    pub fn with_new_letter_unmarked(&self) -> Board {
        self.map_letters(|letter| LetterCell {
            is_new: false,
            ..letter
        })
    }

    #[must_use]
    pub fn with_selection_marked_as_new(&self) -> Board {
        self.map_letters(|letter| LetterCell {
            is_new: letter.selected,
            ..letter
        })
    }

    // --- Selection path ---

    /// Marks the cell selected. Panics outside the board.
    #[must_use]
    pub fn with_cell_selected(&self, row: usize, column: usize) -> Board {
        self.with_cell_replaced(row, column, |cell| cell.with_selected(true))
    }

    fn with_cell_unselected(&self, row: usize, column: usize) -> Board {
        self.with_cell_replaced(row, column, |cell| match cell {
            Cell::Letter(letter) => Cell::Letter(LetterCell {
                selected: false,
                direction_to_next: Direction::None,
                direction_from_previous: Direction::None,
                ..letter
            }),
            Cell::Empty { .. } => Cell::Empty { selected: false },
        })
    }

    /// Sets the outgoing direction of a selected letter, optionally only when it
    /// currently equals `condition`. Anything else, including coordinates off
    /// the board, is left untouched.
    #[must_use]
    pub fn with_selected_letter_direction_updated(
        &self,
        row: usize,
        column: usize,
        condition: Option<Direction>,
        direction_to_next: Direction,
    ) -> Board {
        let applies = self
            .get(row, column)
            .and_then(Cell::selected_letter)
            .is_some_and(|letter| condition.map_or(true, |d| letter.direction_to_next == d));
        if !applies {
            return self.clone();
        }
        self.with_cell_replaced(row, column, |cell| match cell {
            Cell::Letter(letter) => Cell::Letter(LetterCell {
                direction_to_next,
                ..letter
            }),
            empty => empty,
        })
    }

    /// Re-links the neighbors of a cell whose selection just changed.
    ///
    /// A selected letter becomes the target of any adjacent selected letter
    /// without an outgoing direction. Otherwise every adjacent selected letter
    /// pointing at it is made to point nowhere.
    #[must_use]
    pub fn with_selected_neighbor_direction_to_updated(&self, row: usize, column: usize) -> Board {
        self.assert_in_bounds(row, column);
        let is_selected_letter = self.cells[row][column].selected_letter().is_some();
        self.neighbors(row, column)
            .fold(self.clone(), |board, (direction, r, c)| {
                let towards_target = direction.opposite();
                if is_selected_letter {
                    board.with_selected_letter_direction_updated(
                        r,
                        c,
                        Some(Direction::None),
                        towards_target,
                    )
                } else {
                    board.with_selected_letter_direction_updated(
                        r,
                        c,
                        Some(towards_target),
                        Direction::None,
                    )
                }
            })
    }

    /// Sets the incoming direction of a cell when exactly one neighbor points at it.
    #[must_use]
    pub fn with_direction_from_pointing_neighbor(&self, row: usize, column: usize) -> Board {
        self.assert_in_bounds(row, column);
        let mut pointing = self
            .neighbors(row, column)
            .filter(|&(_, r, c)| self.next_selected_cell(r, c) == Some((row, column)));
        match (pointing.next(), pointing.next()) {
            (Some((direction, _, _)), None) => {
                self.with_cell_replaced(row, column, |cell| match cell {
                    Cell::Letter(letter) => Cell::Letter(LetterCell {
                        direction_from_previous: direction,
                        ..letter
                    }),
                    empty => empty,
                })
            }
            _ => self.clone(),
        }
    }

    /// Follows one outgoing link. Dangling or off-board pointers count as no link.
    pub fn next_selected_cell(&self, row: usize, column: usize) -> Option<(usize, usize)> {
        let letter = self.get(row, column)?.selected_letter()?;
        let (next_row, next_column) = letter.direction_to_next.step(row, column)?;
        self.get(next_row, next_column)?
            .selected_letter()
            .map(|_| (next_row, next_column))
    }

    /// Unselects the cell and everything after it along the path, clearing
    /// pointers into the removed cells.
    #[must_use]
    pub fn with_cell_and_all_next_unselected(&self, row: usize, column: usize) -> Board {
        let mut board = self.clone();
        let mut position = Some((row, column));
        while let Some((r, c)) = position.filter(|&(r, c)| board.is_cell_selected(r, c)) {
            let direction_to_next = board
                .get(r, c)
                .and_then(Cell::letter)
                .map_or(Direction::None, |letter| letter.direction_to_next);
            board = board
                .with_cell_unselected(r, c)
                .with_selected_neighbor_direction_to_updated(r, c);
            position = direction_to_next.step(r, c);
        }
        board
    }

    /// The path starting at a cell, following links while they stay on
    /// selected letters and never revisiting a cell.
    fn word_tail(&self, row: usize, column: usize) -> Vec<WordLetter> {
        let mut tail: Vec<WordLetter> = Vec::new();
        let mut position = self
            .get(row, column)
            .and_then(Cell::selected_letter)
            .map(|_| (row, column));
        while let Some((r, c)) = position {
            if tail.len() >= self.cell_count() || tail.iter().any(|l| (l.row, l.column) == (r, c)) {
                break;
            }
            if let Some(letter) = self.get(r, c).and_then(Cell::letter) {
                tail.push(WordLetter {
                    letter: letter.letter,
                    row: r,
                    column: c,
                    is_new: letter.is_new,
                });
            }
            position = self.next_selected_cell(r, c);
        }
        tail
    }

    /// The currently selected word in path order.
    ///
    /// Every selected letter leads to the end of the path, so the longest such
    /// tail starts at the first letter and is the whole word.
    pub fn chosen_letter_cells_in_order(&self) -> Word {
        let longest = self
            .cells()
            .map(|(row, column, _)| self.word_tail(row, column))
            .fold(Vec::new(), |longest, tail| {
                if tail.len() > longest.len() {
                    tail
                } else {
                    longest
                }
            });
        Word::new(longest)
    }

    /// The letters of the middle row, which hold the starting word.
    pub fn starting_letter_cells_in_order(&self) -> Word {
        let middle = self.rows() / 2;
        let letters = self
            .cells
            .get(middle)
            .into_iter()
            .flatten()
            .enumerate()
            .filter_map(|(column, cell)| {
                cell.letter().map(|letter| WordLetter {
                    letter: letter.letter,
                    row: middle,
                    column,
                    is_new: letter.is_new,
                })
            })
            .collect();
        Word::new(letters)
    }

    /// Letters present anywhere on the board.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.cells()
            .filter_map(|(_, _, cell)| cell.letter().map(|l| l.letter))
    }

    /// Empty cells next to a letter: the legal spots for a new letter.
    pub fn placements(&self) -> Vec<(usize, usize)> {
        self.cells()
            .filter(|&(row, column, cell)| !cell.is_letter() && self.is_cell_next_to_letter(row, column))
            .map(|(row, column, _)| (row, column))
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let symbol = match cell {
                    Cell::Empty { .. } => '.',
                    Cell::Letter(letter) => letter.letter,
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
