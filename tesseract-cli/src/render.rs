//! Text rendering of the 4D board
//!
//! Same layout as the visualizer: 3 rows (w) x 3 columns (z) of 3x3 boards,
//! y down and x across inside each board. Winning cells are bracketed.

use tesseract_core::{Board, Coord, Game, Line, SIZE};

const BOARD_SEPARATOR: &str = "   ";

/// Render all 81 cells, bracketing those on `highlight`
pub fn render_board(board: &Board, highlight: Option<&Line>) -> String {
    let mut lines = Vec::new();

    for w in 0..SIZE as u8 {
        let labels: Vec<String> = (0..SIZE as u8)
            .map(|z| format!("{:<width$}", format!("w={w}, z={z}"), width = SIZE * 3))
            .collect();
        lines.push(labels.join(BOARD_SEPARATOR));

        for y in 0..SIZE as u8 {
            let rows: Vec<String> = (0..SIZE as u8)
                .map(|z| {
                    (0..SIZE as u8)
                        .map(|x| render_cell(board, Coord::new(x, y, z, w), highlight))
                        .collect()
                })
                .collect();
            lines.push(rows.join(BOARD_SEPARATOR));
        }

        if usize::from(w) + 1 < SIZE {
            lines.push(String::new());
        }
    }

    lines
        .iter()
        .map(|l| l.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_cell(board: &Board, coord: Coord, highlight: Option<&Line>) -> String {
    let symbol = match board.get(coord) {
        Ok(Some(mark)) => mark.to_string(),
        _ => ".".to_string(),
    };
    if highlight.is_some_and(|line| line.contains(coord)) {
        format!("[{symbol}]")
    } else {
        format!(" {symbol} ")
    }
}

/// Status line plus the winning cells when there are any
pub fn render_status(game: &Game) -> String {
    let mut status = game.state().to_string();
    if let Some(line) = game.winning_line() {
        let cells: Vec<String> = line.cells.iter().map(ToString::to_string).collect();
        status.push_str(&format!(" Line: {}", cells.join(" ")));
    }
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use tesseract_core::{Game, Mark};

    #[test]
    fn test_empty_board_layout() {
        let text = render_board(&Board::new(), None);
        let lines: Vec<&str> = text.lines().collect();

        // 3 w-rows of (label + 3 cell rows), blank lines between
        assert_eq!(lines.len(), 14);
        assert_eq!(lines[0], "w=0, z=0    w=0, z=1    w=0, z=2");
        assert_eq!(lines[1], " .  .  .     .  .  .     .  .  .");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "w=1, z=0    w=1, z=1    w=1, z=2");
    }

    #[test]
    fn test_marks_land_in_their_board() {
        let mut board = Board::new();
        // x=2, y=1 inside board w=0, z=1
        board.set(Coord::new(2, 1, 1, 0), Mark::O).unwrap();
        let text = render_board(&board, None);
        let row = text.lines().nth(2).unwrap();
        assert_eq!(row, " .  .  .     .  .  O     .  .  .");
    }

    #[test]
    fn test_winning_line_is_bracketed() {
        let game = Game::replay([
            Coord::new(0, 0, 0, 0),
            Coord::new(0, 1, 0, 0),
            Coord::new(1, 0, 0, 0),
            Coord::new(0, 2, 0, 0),
            Coord::new(2, 0, 0, 0),
        ])
        .unwrap();

        let text = render_board(game.board(), game.winning_line());
        assert_eq!(text.lines().nth(1).unwrap(), "[X][X][X]    .  .  .     .  .  .");
        assert_eq!(text.matches('[').count(), 3);

        assert_eq!(
            render_status(&game),
            "X wins! Line: (0, 0, 0, 0) (1, 0, 0, 0) (2, 0, 0, 0)"
        );
    }

    #[test]
    fn test_status_while_playing() {
        assert_eq!(render_status(&Game::new()), "X's turn");
    }
}
