//! Caro 测试局面库
//!
//! 提供命名的记谱局面，方便测试和调试
//!
//! 命名规范:
//! - EMPTY: 空棋盘
//! - EARLY_n: 开局几步
//! - MID_n: 中局
//! - 以威胁命名: 专门测试某一层策略
//! - 5×5 小棋盘: 满盘/残局边界情况

// =============================================================================
// 开局
// =============================================================================

/// 15×15 空棋盘
pub const EMPTY: &str = "15/15/15/15/15/15/15/15/15/15/15/15/15/15/15 x";

/// X 横向两连，O 斜下方应了一手
pub const EARLY_1: &str = "15/15/15/15/15/15/15/7XX6/8O6/15/15/15/15/15/15 o";

// =============================================================================
// 中局
// =============================================================================

/// X 五子、O 四子，双方都没有三连
pub const MID_1: &str = "15/15/15/15/5O9/6X1O6/5XOX7/6OX7/5X9/15/15/15/15/15/15 o";

// =============================================================================
// 威胁局面
// =============================================================================

/// X 在第 7 行连了四子 (7,7)-(7,10)，两端都空
pub const OPEN_FOUR_ROW: &str = "15/15/15/15/15/15/15/7XXXX4/15/15/15/15/15/15/15 o";

/// O 在第 3 行靠边四连，只剩 (3,4)；X 在第 10 行也有活四
pub const WIN_OR_BLOCK: &str = "15/15/15/OOOO11/15/15/15/15/15/15/5XXXX6/15/15/15/15 o";

/// X 在第 7 列竖向三连 (5,7)-(7,7)
pub const OPEN_THREE_COL: &str = "15/15/15/15/15/7X7/7XO6/7X7/15/15/15/15/15/15/15 o";

/// O 在第 10 行三连 (10,3)-(10,5)，X 零散
pub const OWN_THREE: &str = "X14/15/15/15/15/15/15/7X7/15/15/3OOO9/15/15/15/14X o";

// =============================================================================
// 小棋盘边界
// =============================================================================

/// 5×5 满盘，无人五连
pub const FULL_DRAW: &str = "XOXOX/OXOXO/OXOXO/XOXOX/XOXOX";

/// 5×5 只剩右下角 (4,4) 一个空位
pub const ONE_EMPTY: &str = "XOXOX/OXOXO/OXOXO/XOXOX/XOXO1 o";

/// 所有命名局面
pub const ALL_POSITIONS: &[(&str, &str)] = &[
    ("EMPTY", EMPTY),
    ("EARLY_1", EARLY_1),
    ("MID_1", MID_1),
    ("OPEN_FOUR_ROW", OPEN_FOUR_ROW),
    ("WIN_OR_BLOCK", WIN_OR_BLOCK),
    ("OPEN_THREE_COL", OPEN_THREE_COL),
    ("OWN_THREE", OWN_THREE),
    ("FULL_DRAW", FULL_DRAW),
    ("ONE_EMPTY", ONE_EMPTY),
];

/// 按名称查找局面（不区分大小写）
pub fn get_position(name: &str) -> Option<&'static str> {
    ALL_POSITIONS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, fen)| *fen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn test_all_positions_parse() {
        for (name, text) in ALL_POSITIONS {
            let board = Board::from_notation(text);
            assert!(board.is_ok(), "{} failed to parse: {:?}", name, board.err());
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(get_position("mid_1"), Some(MID_1));
        assert_eq!(get_position("nope"), None);
    }

    #[test]
    fn test_stone_counts() {
        let count = |s| Board::from_notation(s).unwrap().stone_count();
        assert_eq!(count(EMPTY), 0);
        assert_eq!(count(EARLY_1), 3);
        assert_eq!(count(MID_1), 9);
        assert_eq!(count(OPEN_FOUR_ROW), 4);
        assert_eq!(count(ONE_EMPTY), 24);
    }
}
