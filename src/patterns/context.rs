//! 局部棋型
//!
//! 以某个位置为中心截取 7×7 窗口。棋盘外的格子记为 Edge，
//! 这样靠边的棋型不会和开阔区域的棋型混淆。

use crate::board::Board;
use crate::types::{Cell, Player, Position};
use serde::{Deserialize, Serialize};

/// 窗口半径（7×7）
pub const CONTEXT_RADIUS: i32 = 3;
/// 窗口边长
pub const CONTEXT_SIZE: usize = (CONTEXT_RADIUS * 2 + 1) as usize;
/// 判断"附近有子"的切比雪夫距离
pub const NEARBY_RADIUS: i32 = 2;

/// 靠近中心的格子权重
const CENTER_WEIGHT: u32 = 3;
const OUTER_WEIGHT: u32 = 1;

/// 棋型中的格子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCell {
    Empty,
    First,
    Second,
    /// 棋盘外
    Edge,
}

impl From<Cell> for PatternCell {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => PatternCell::Empty,
            Cell::Mark(Player::First) => PatternCell::First,
            Cell::Mark(Player::Second) => PatternCell::Second,
        }
    }
}

lazy_static::lazy_static! {
    /// 相似度权重表：曼哈顿距离中心 ≤ 1 的格子权重为 3，其余为 1
    static ref CONTEXT_WEIGHTS: [[u32; CONTEXT_SIZE]; CONTEXT_SIZE] = {
        let mut weights = [[OUTER_WEIGHT; CONTEXT_SIZE]; CONTEXT_SIZE];
        let center = Position::new(CONTEXT_RADIUS, CONTEXT_RADIUS);
        for (r, row) in weights.iter_mut().enumerate() {
            for (c, w) in row.iter_mut().enumerate() {
                if Position::new(r as i32, c as i32).manhattan(center) <= 1 {
                    *w = CENTER_WEIGHT;
                }
            }
        }
        weights
    };

    static ref TOTAL_WEIGHT: u32 = CONTEXT_WEIGHTS.iter().flatten().sum();
}

/// 7×7 局部棋型，按值比较（逐格完全相等）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternContext {
    cells: [[PatternCell; CONTEXT_SIZE]; CONTEXT_SIZE],
}

impl PatternContext {
    /// 以 center 为中心截取窗口
    pub fn extract(board: &Board, center: Position) -> Self {
        let mut cells = [[PatternCell::Edge; CONTEXT_SIZE]; CONTEXT_SIZE];
        for (r, row) in cells.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                let pos = center.offset(r as i32 - CONTEXT_RADIUS, c as i32 - CONTEXT_RADIUS);
                if let Some(board_cell) = board.at(pos) {
                    *cell = board_cell.into();
                }
            }
        }
        PatternContext { cells }
    }

    pub fn from_cells(cells: [[PatternCell; CONTEXT_SIZE]; CONTEXT_SIZE]) -> Self {
        PatternContext { cells }
    }

    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> PatternCell {
        self.cells[row][col]
    }

    pub fn rows(&self) -> &[[PatternCell; CONTEXT_SIZE]; CONTEXT_SIZE] {
        &self.cells
    }

    /// 加权相似度，范围 [0, 1]
    ///
    /// 对称：`a.similarity(&b) == b.similarity(&a)`
    pub fn similarity(&self, other: &PatternContext) -> f64 {
        let mut matched = 0u32;
        for (r, weights) in CONTEXT_WEIGHTS.iter().enumerate() {
            for (c, &w) in weights.iter().enumerate() {
                if self.cells[r][c] == other.cells[r][c] {
                    matched += w;
                }
            }
        }
        matched as f64 / *TOTAL_WEIGHT as f64
    }
}

/// 该位置是否值得学习：切比雪夫距离 2 以内有棋子
///
/// 孤立的落子没有局部信息
pub fn is_learnable(board: &Board, pos: Position) -> bool {
    board.has_neighbor(pos, NEARBY_RADIUS)
}
