//! 胜负判定
//!
//! 从刚落子的位置出发，沿四个方向双向数同色连子

use crate::board::Board;
use crate::types::{Cell, GameResult, Player, Position, WIN_LENGTH};

/// 四个方向：竖、横、正斜、反斜
pub const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// 从 pos 出发（不含 pos）沿 (dr, dc) 数 player 的连续棋子
///
/// 遇到异色、空格或棋盘边缘即停止
#[inline]
pub fn count_direction(board: &Board, pos: Position, dr: i32, dc: i32, player: Player) -> usize {
    let mut count = 0;
    let mut cur = pos.offset(dr, dc);
    while board.at(cur) == Some(Cell::Mark(player)) {
        count += 1;
        cur = cur.offset(dr, dc);
    }
    count
}

/// 假设 pos 属于 player 时，经过 pos 的该方向连子长度
#[inline]
pub fn run_through(board: &Board, pos: Position, dir: (i32, i32), player: Player) -> usize {
    1 + count_direction(board, pos, dir.0, dir.1, player)
        + count_direction(board, pos, -dir.0, -dir.1, player)
}

/// 经过 pos 的最长连子（四个方向取最大）
pub fn longest_run_through(board: &Board, pos: Position, player: Player) -> usize {
    DIRECTIONS
        .iter()
        .map(|&dir| run_through(board, pos, dir, player))
        .max()
        .unwrap_or(0)
}

/// pos 上的棋子是否形成五连
///
/// 空格或越界直接返回 false
pub fn check_win(board: &Board, pos: Position) -> bool {
    let player = match board.at(pos) {
        Some(Cell::Mark(p)) => p,
        _ => return false,
    };
    DIRECTIONS
        .iter()
        .any(|&dir| run_through(board, pos, dir, player) >= WIN_LENGTH)
}

/// 根据最后一步判断对局状态
pub fn game_result(board: &Board, last_move: Position) -> GameResult {
    if check_win(board, last_move) {
        if let Some(Cell::Mark(p)) = board.at(last_move) {
            return GameResult::Win(p);
        }
    }
    if board.is_full() {
        GameResult::Draw
    } else {
        GameResult::Ongoing
    }
}
