/// Link between two adjacent selected letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction pointing back the other way.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::None => Direction::None,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Coordinates one step away, or `None` when that would leave the
    /// non-negative quadrant. The caller checks the upper bounds.
    pub fn step(self, row: usize, column: usize) -> Option<(usize, usize)> {
        match self {
            Direction::None => None,
            Direction::Up => row.checked_sub(1).map(|r| (r, column)),
            Direction::Down => Some((row + 1, column)),
            Direction::Left => column.checked_sub(1).map(|c| (row, c)),
            Direction::Right => Some((row, column + 1)),
        }
    }

    /// Direction leading from `from` to the adjacent `to`, `None` if not adjacent.
    pub fn between(from: (usize, usize), to: (usize, usize)) -> Direction {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.step(from.0, from.1) == Some(to))
            .unwrap_or(Direction::None)
    }
}

/// A placed letter with its selection metadata.
///
/// Directions are only meaningful while the cell is selected; an unselected
/// letter keeps both of them at [`Direction::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterCell {
    pub letter: char,
    pub is_new: bool,
    pub selected: bool,
    pub direction_to_next: Direction,
    pub direction_from_previous: Direction,
}

impl LetterCell {
    pub fn new(letter: char) -> Self {
        LetterCell {
            letter,
            is_new: false,
            selected: false,
            direction_to_next: Direction::None,
            direction_from_previous: Direction::None,
        }
    }

    pub fn new_letter(letter: char) -> Self {
        LetterCell {
            is_new: true,
            ..LetterCell::new(letter)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty { selected: bool },
    Letter(LetterCell),
}

impl Cell {
    pub const EMPTY: Cell = Cell::Empty { selected: false };

    pub fn is_selected(&self) -> bool {
        match self {
            Cell::Empty { selected } => *selected,
            Cell::Letter(letter) => letter.selected,
        }
    }

    pub fn letter(&self) -> Option<&LetterCell> {
        match self {
            Cell::Letter(letter) => Some(letter),
            Cell::Empty { .. } => None,
        }
    }

    pub fn is_letter(&self) -> bool {
        matches!(self, Cell::Letter(_))
    }

    pub(crate) fn selected_letter(&self) -> Option<&LetterCell> {
        self.letter().filter(|letter| letter.selected)
    }

    pub(crate) fn with_selected(self, selected: bool) -> Cell {
        match self {
            Cell::Empty { .. } => Cell::Empty { selected },
            Cell::Letter(letter) => Cell::Letter(LetterCell { selected, ..letter }),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::EMPTY
    }
}
