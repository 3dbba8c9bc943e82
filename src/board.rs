//! Caro 棋盘
//!
//! N×N 的格子数组，行优先存储。棋盘只负责读写和坐标校验，
//! 规则（能否落子、是否获胜）由 `make_move` 和 `rules` 模块处理。

use crate::error::{CaroError, Result};
use crate::notation::{cells_to_notation, parse_notation, NotationState};
use crate::types::{Cell, Player, Position, CARO_BOARD_SIZE};

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Board::new(CARO_BOARD_SIZE)
    }
}

impl Board {
    /// 创建空棋盘
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// 从记谱字符串创建棋盘
    pub fn from_notation(text: &str) -> Result<Board> {
        parse_notation(text).map(Board::from)
    }

    /// 导出记谱字符串
    pub fn to_notation(&self, turn: Option<Player>) -> String {
        cells_to_notation(self.size, &self.cells, turn)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// 中心点
    #[inline]
    pub fn center(&self) -> Position {
        let c = (self.size / 2) as i32;
        Position::new(c, c)
    }

    /// 检查位置是否在棋盘范围内
    #[inline]
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let n = self.size as i32;
        (0..n).contains(&pos.row) && (0..n).contains(&pos.col)
    }

    #[inline]
    fn index(&self, pos: Position) -> Result<usize> {
        if !self.is_in_bounds(pos) {
            return Err(CaroError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                size: self.size,
            });
        }
        Ok(pos.row as usize * self.size + pos.col as usize)
    }

    /// 获取某位置的格子，越界返回 OutOfBounds
    pub fn get(&self, pos: Position) -> Result<Cell> {
        Ok(self.cells[self.index(pos)?])
    }

    /// 扫描用：越界返回 None
    #[inline]
    pub fn at(&self, pos: Position) -> Option<Cell> {
        self.index(pos).ok().map(|i| self.cells[i])
    }

    /// 直接写入格子，不检查规则
    pub fn set(&mut self, pos: Position, cell: Cell) -> Result<()> {
        let idx = self.index(pos)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// 位置在棋盘内且为空
    #[inline]
    pub fn is_empty(&self, pos: Position) -> bool {
        matches!(self.at(pos), Some(Cell::Empty))
    }

    /// 落子：格子已有棋子时返回 IllegalMove，棋盘保持不变
    pub fn make_move(&mut self, pos: Position, player: Player) -> Result<()> {
        let idx = self.index(pos)?;
        if !self.cells[idx].is_empty() {
            return Err(CaroError::IllegalMove { position: pos });
        }
        self.cells[idx] = Cell::Mark(player);
        Ok(())
    }

    /// 所有位置，行优先
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let n = self.size as i32;
        (0..n).flat_map(move |row| (0..n).map(move |col| Position::new(row, col)))
    }

    /// 所有空位，行优先
    pub fn empty_positions(&self) -> Vec<Position> {
        self.positions().filter(|&p| self.is_empty(p)).collect()
    }

    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// 以 pos 为中心、切比雪夫距离 radius 内（不含自身）是否有棋子
    pub fn has_neighbor(&self, pos: Position, radius: i32) -> bool {
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if let Some(Cell::Mark(_)) = self.at(pos.offset(dr, dc)) {
                    return true;
                }
            }
        }
        false
    }

    /// 文本棋盘，调试和命令行用
    pub fn render(&self) -> String {
        let mut out = String::from("   ");
        for col in 0..self.size {
            out.push_str(&format!("{:>3}", col));
        }
        out.push('\n');

        for row in 0..self.size {
            out.push_str(&format!("{:>3}", row));
            for col in 0..self.size {
                let ch = match self.cells[row * self.size + col] {
                    Cell::Empty => '.',
                    Cell::Mark(p) => p.symbol(),
                };
                out.push_str(&format!("{:>3}", ch));
            }
            out.push('\n');
        }
        out
    }
}

/// 已解析的记谱直接转成棋盘，行棋方由调用方另行处理
impl From<NotationState> for Board {
    fn from(state: NotationState) -> Self {
        Board {
            size: state.size,
            cells: state.cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::default();
        assert_eq!(board.size(), 15);
        assert_eq!(board.stone_count(), 0);
        assert_eq!(board.empty_positions().len(), 225);
        assert_eq!(board.center(), Position::new(7, 7));
    }

    #[test]
    fn test_bounds() {
        let board = Board::new(15);
        assert!(board.is_in_bounds(Position::new(0, 14)));
        assert!(!board.is_in_bounds(Position::new(15, 0)));
        assert!(!board.is_in_bounds(Position::new(-1, 3)));
        assert!(matches!(
            board.get(Position::new(3, 15)),
            Err(CaroError::OutOfBounds { row: 3, col: 15, size: 15 })
        ));
        assert_eq!(board.at(Position::new(-1, -1)), None);
        assert!(!board.is_empty(Position::new(20, 20)));
    }

    #[test]
    fn test_make_move_rejects_occupied() {
        let mut board = Board::new(15);
        let pos = Position::new(7, 7);
        board.make_move(pos, Player::First).unwrap();

        let before = board.clone();
        let err = board.make_move(pos, Player::Second).unwrap_err();
        assert!(matches!(err, CaroError::IllegalMove { position } if position == pos));
        assert_eq!(board, before);
        assert_eq!(board.get(pos).unwrap(), Cell::Mark(Player::First));
    }

    #[test]
    fn test_make_move_out_of_bounds() {
        let mut board = Board::new(15);
        let before = board.clone();
        assert!(board.make_move(Position::new(15, 15), Player::First).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut board = Board::new(15);
        let copy = board.clone();
        board.set(Position::new(1, 1), Cell::Mark(Player::Second)).unwrap();
        assert!(copy.is_empty(Position::new(1, 1)));
        assert!(!board.is_empty(Position::new(1, 1)));
    }

    #[test]
    fn test_is_full() {
        let mut board = Board::new(5);
        for (i, pos) in board.clone().positions().enumerate() {
            assert!(!board.is_full());
            let player = if i % 2 == 0 { Player::First } else { Player::Second };
            board.make_move(pos, player).unwrap();
        }
        assert!(board.is_full());
        assert!(board.empty_positions().is_empty());
    }

    #[test]
    fn test_has_neighbor() {
        let board = Board::from_notation("5/5/2X2/5/5").unwrap();
        assert!(board.has_neighbor(Position::new(0, 0), 2));
        assert!(!board.has_neighbor(Position::new(0, 0), 1));
        assert!(!board.has_neighbor(Position::new(2, 2), 2));
    }

    #[test]
    fn test_notation_roundtrip() {
        let text = "X4/1O3/5/3XX/O4";
        let board = Board::from_notation(text).unwrap();
        assert_eq!(board.to_notation(None), text);
        assert_eq!(board.stone_count(), 5);
    }

    #[test]
    fn test_from_parsed_notation() {
        let state = parse_notation("X4/5/2O2/5/5 x").unwrap();
        let turn = state.turn;
        let board = Board::from(state);
        assert_eq!(turn, Some(Player::First));
        assert_eq!(board.size(), 5);
        assert_eq!(board.get(Position::new(2, 2)).unwrap(), Cell::Mark(Player::Second));
    }
}
