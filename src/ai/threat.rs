//! 威胁扫描
//!
//! 找出落子后能形成指定长度连子的空位，用于成五、堵五、做四、堵四。
//!
//! 注意：这里只数连续同色子，不区分"活四"和"冲四"。一端已被堵死的
//! 四连同样会被当成紧急威胁，这是已知的启发式误差。

use crate::board::Board;
use crate::rules::{run_through, DIRECTIONS};
use crate::types::{Player, Position};

/// 在 pos 落 player 的子是否能连成 target 个
#[inline]
pub fn forms_line(board: &Board, pos: Position, player: Player, target: usize) -> bool {
    DIRECTIONS
        .iter()
        .any(|&dir| run_through(board, pos, dir, player) >= target)
}

/// 行优先扫描，返回第一个满足条件的空位
pub fn find_line_move(board: &Board, player: Player, target: usize) -> Option<Position> {
    board
        .positions()
        .find(|&pos| board.is_empty(pos) && forms_line(board, pos, player, target))
}

/// 所有满足条件的空位，行优先
pub fn threat_cells(board: &Board, player: Player, target: usize) -> Vec<Position> {
    board
        .positions()
        .filter(|&pos| board.is_empty(pos) && forms_line(board, pos, player, target))
        .collect()
}
