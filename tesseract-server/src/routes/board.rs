//! Board geometry endpoint

use axum::Json;
use serde::Serialize;
use tesseract_core::{all_lines, Direction, CELL_COUNT, DIMENSIONS, DIRECTIONS, SIZE};

#[derive(Serialize)]
pub struct BoardInfo {
    pub size: usize,
    pub dimensions: usize,
    pub cell_count: usize,
    pub line_count: usize,
    pub directions: Vec<Direction>,
}

/// Get board geometry
pub async fn get_board() -> Json<BoardInfo> {
    Json(BoardInfo {
        size: SIZE,
        dimensions: DIMENSIONS,
        cell_count: CELL_COUNT,
        line_count: all_lines().count(),
        directions: DIRECTIONS.to_vec(),
    })
}
