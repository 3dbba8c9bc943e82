//! 五子棋（Caro）核心类型定义
//!
//! 定义棋盘、走法、对局记录用到的基础数据类型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Caro 模式的棋盘边长
pub const CARO_BOARD_SIZE: usize = 15;

/// 连成多少子获胜
pub const WIN_LENGTH: usize = 5;

/// 玩家/阵营
///
/// First 执 X 先手，Second 执 O 后手
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// 获取对方
    pub fn opposite(&self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// 从记谱字符解析（不区分大小写）
    pub fn from_symbol(c: char) -> Option<Player> {
        match c.to_ascii_lowercase() {
            'x' => Some(Player::First),
            'o' => Some(Player::Second),
            _ => None,
        }
    }

    /// 转换为记谱字符（大写）
    pub fn symbol(&self) -> char {
        match self {
            Player::First => 'X',
            Player::Second => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// 棋盘格子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Mark(Player),
}

impl Cell {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    pub fn player(&self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Mark(p) => Some(*p),
        }
    }
}

/// 棋盘位置 (row, col)
///
/// 使用有符号坐标，方向扫描时越界的偏移量也能表示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    /// 位置加偏移量
    #[inline]
    pub fn offset(&self, row_delta: i32, col_delta: i32) -> Position {
        Position {
            row: self.row + row_delta,
            col: self.col + col_delta,
        }
    }

    /// 曼哈顿距离
    #[inline]
    pub fn manhattan(&self, other: Position) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// 切比雪夫距离
    #[inline]
    pub fn chebyshev(&self, other: Position) -> i32 {
        (self.row - other.row).abs().max((self.col - other.col).abs())
    }

    /// 从 "row,col" 字符串解析
    pub fn parse(s: &str) -> Option<Position> {
        let (r, c) = s.split_once(',')?;
        let row = r.trim().parse().ok()?;
        let col = c.trim().parse().ok()?;
        Some(Position { row, col })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// 一步棋：位置 + 落子方 + 时间戳，记录后不可变
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub position: Position,
    pub player: Player,
    pub played_at: DateTime<Utc>,
}

impl Move {
    pub fn new(position: Position, player: Player) -> Self {
        Move {
            position,
            player,
            played_at: Utc::now(),
        }
    }
}

/// 对局结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Ongoing,
    Win(Player),
    Draw,
}

/// 一局棋的走法记录
///
/// 由对局会话独占，结束后交给棋型库学习再清空
#[derive(Debug, Clone, Default)]
pub struct GameRecord {
    /// 记录时的棋盘边长，回放时用
    pub board_size: usize,
    pub moves: Vec<Move>,
    /// 仅在对局结束时设置，None 表示和棋或未决
    pub winner: Option<Player>,
}

impl GameRecord {
    pub fn new(board_size: usize) -> Self {
        GameRecord {
            board_size,
            moves: Vec::new(),
            winner: None,
        }
    }

    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
        self.winner = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_symbols() {
        assert_eq!(Player::from_symbol('x'), Some(Player::First));
        assert_eq!(Player::from_symbol('O'), Some(Player::Second));
        assert_eq!(Player::from_symbol('z'), None);
        assert_eq!(Player::First.symbol(), 'X');
        assert_eq!(Player::Second.opposite(), Player::First);
    }

    #[test]
    fn test_position_distances() {
        let a = Position::new(7, 7);
        let b = Position::new(5, 8);
        assert_eq!(a.manhattan(b), 3);
        assert_eq!(a.chebyshev(b), 2);
        assert_eq!(a.offset(-1, 2), Position::new(6, 9));
    }

    #[test]
    fn test_position_parse() {
        assert_eq!(Position::parse("7,8"), Some(Position::new(7, 8)));
        assert_eq!(Position::parse(" 0 , 14 "), Some(Position::new(0, 14)));
        assert_eq!(Position::parse("7"), None);
        assert_eq!(Position::parse("a,b"), None);
    }

    #[test]
    fn test_record_clear() {
        let mut record = GameRecord::new(15);
        record.push(Move::new(Position::new(7, 7), Player::First));
        record.winner = Some(Player::First);
        assert_eq!(record.len(), 1);

        record.clear();
        assert!(record.is_empty());
        assert!(record.winner.is_none());
        assert_eq!(record.board_size, 15);
    }
}
