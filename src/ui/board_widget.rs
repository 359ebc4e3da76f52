use super::palette::Palette;
use crate::game::{Board, Cell, Direction};
use ratatui::{
    style::Modifier,
    text::{Line, Span},
};

fn cell_span(cell: &Cell, is_cursor: bool, palette: &Palette) -> Span<'static> {
    let (text, mut style) = match cell {
        Cell::Empty { selected: false } => (" · ".to_string(), palette.empty_cell),
        Cell::Empty { selected: true } => (" _ ".to_string(), palette.selected),
        Cell::Letter(letter) => {
            let text = format!(" {} ", letter.letter.to_ascii_uppercase());
            let style = if letter.selected {
                palette.selected
            } else if letter.is_new {
                palette.new_letter
            } else {
                palette.letter
            };
            (text, style)
        }
    };
    if is_cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(text, style)
}

fn points(board: &Board, row: usize, column: usize, direction: Direction) -> bool {
    board
        .get(row, column)
        .and_then(Cell::letter)
        .is_some_and(|letter| letter.selected && letter.direction_to_next == direction)
}

/// Board lines with arrows along the selected word. `cursor` is highlighted.
pub fn board_lines(
    board: &Board,
    cursor: (usize, usize),
    palette: &Palette,
) -> Vec<Line<'static>> {
    let link = palette.link;
    let mut lines = Vec::new();

    for row in 0..board.rows() {
        let mut spans = Vec::new();
        for column in 0..board.columns() {
            if let Some(cell) = board.get(row, column) {
                spans.push(cell_span(cell, cursor == (row, column), palette));
            }
            if column + 1 < board.columns() {
                let arrow = if points(board, row, column, Direction::Right) {
                    "→"
                } else if points(board, row, column + 1, Direction::Left) {
                    "←"
                } else {
                    " "
                };
                spans.push(Span::styled(arrow, link));
            }
        }
        lines.push(Line::from(spans));

        if row + 1 < board.rows() {
            let mut spans = Vec::new();
            for column in 0..board.columns() {
                let arrow = if points(board, row, column, Direction::Down) {
                    " ↓ "
                } else if points(board, row + 1, column, Direction::Up) {
                    " ↑ "
                } else {
                    "   "
                };
                spans.push(Span::styled(arrow, link));
                if column + 1 < board.columns() {
                    spans.push(Span::raw(" "));
                }
            }
            lines.push(Line::from(spans));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::theme;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_board_lines_show_letters_and_links() {
        let board = Board::with_starting_word("house")
            .unwrap()
            .with_cell_selected(2, 0)
            .with_cell_selected(2, 1)
            .with_selected_letter_direction_updated(2, 0, None, Direction::Right);
        let lines = board_lines(&board, (0, 0), &Palette::new(&theme::DARK));
        // five cell rows with a link row between each pair
        assert_eq!(lines.len(), 9);
        assert_eq!(text(&lines[4]), " H → O   U   S   E ");
        assert_eq!(text(&lines[0]), " ·   ·   ·   ·   · ");
        assert_eq!(lines[0].spans[0].style.add_modifier, Modifier::REVERSED);
    }

    #[test]
    fn test_vertical_link() {
        let board = Board::from_rows(&[".....", "t....", "house", ".....", "....."])
            .unwrap()
            .with_cell_selected(1, 0)
            .with_cell_selected(2, 0)
            .with_selected_letter_direction_updated(2, 0, None, Direction::Up);
        let lines = board_lines(&board, (4, 4), &Palette::new(&theme::DARK));
        assert_eq!(text(&lines[3]), " ↑                 ");
    }

    #[test]
    fn test_cells_take_theme_colors() {
        let board = Board::with_starting_word("house")
            .unwrap()
            .with_cell_selected(1, 0)
            .with_new_letter_instead_of_selection('t')
            .with_cell_selected(2, 0);
        let palette = Palette::new(&theme::CYBER);
        let lines = board_lines(&board, (4, 4), &palette);
        assert_eq!(lines[0].spans[0].style, palette.empty_cell);
        // row 1 holds the new letter, row 2 the selected H
        assert_eq!(lines[2].spans[0].style, palette.new_letter);
        assert_eq!(lines[4].spans[0].style, palette.selected);
        assert_eq!(lines[4].spans[2].style, palette.letter);
    }
}
