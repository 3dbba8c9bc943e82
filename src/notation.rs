//! 棋盘记谱解析和生成
//!
//! 格式: `<棋盘> [<回合>]`
//!
//! 棋盘符号：
//! - 先手（First）：X
//! - 后手（Second）：O
//! - 空格：十进制数字，可以多位（如 15 表示连续 15 个空格）
//! - 行之间用 `/` 分隔，从第 0 行开始
//!
//! 回合为可选的 `x` 或 `o`，表示轮到哪一方

use crate::error::{CaroError, Result};
use crate::types::{Cell, Player};

/// 记谱解析后的状态
#[derive(Debug, Clone)]
pub struct NotationState {
    pub size: usize,
    /// 行优先存储的格子
    pub cells: Vec<Cell>,
    pub turn: Option<Player>,
}

/// 解析记谱字符串
pub fn parse_notation(text: &str) -> Result<NotationState> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.is_empty() || parts.len() > 2 {
        return Err(CaroError::notation(format!(
            "expected '<board> [<turn>]', got: {:?}",
            text
        )));
    }

    let (size, cells) = parse_board(parts[0])?;
    let turn = match parts.get(1) {
        None => None,
        Some(t) => {
            let mut chars = t.chars();
            match (chars.next().and_then(Player::from_symbol), chars.next()) {
                (Some(p), None) => Some(p),
                _ => return Err(CaroError::notation(format!("invalid turn: {}", t))),
            }
        }
    };

    Ok(NotationState { size, cells, turn })
}

/// 解析棋盘部分，要求为正方形
fn parse_board(board_str: &str) -> Result<(usize, Vec<Cell>)> {
    let rows: Vec<&str> = board_str.split('/').collect();
    let size = rows.len();
    let mut cells = Vec::with_capacity(size * size);

    for (row, row_str) in rows.iter().enumerate() {
        let mut width = 0usize;
        let mut run = 0usize;

        for ch in row_str.chars() {
            if let Some(d) = ch.to_digit(10) {
                run = run
                    .checked_mul(10)
                    .and_then(|r| r.checked_add(d as usize))
                    .filter(|r| width + r <= size)
                    .ok_or_else(|| too_wide(row, size))?;
                continue;
            }
            width += flush_empty(&mut cells, &mut run);
            if width >= size {
                return Err(too_wide(row, size));
            }

            let player = Player::from_symbol(ch).ok_or_else(|| {
                CaroError::notation(format!("invalid character in row {}: {:?}", row, ch))
            })?;
            cells.push(Cell::Mark(player));
            width += 1;
        }
        width += flush_empty(&mut cells, &mut run);

        if width != size {
            return Err(CaroError::notation(format!(
                "row {} has {} columns, expected {}",
                row, width, size
            )));
        }
    }

    Ok((size, cells))
}

fn too_wide(row: usize, size: usize) -> CaroError {
    CaroError::notation(format!("row {} has more than {} columns", row, size))
}

fn flush_empty(cells: &mut Vec<Cell>, run: &mut usize) -> usize {
    let n = *run;
    cells.extend(std::iter::repeat(Cell::Empty).take(n));
    *run = 0;
    n
}

/// 根据格子生成记谱字符串
pub fn cells_to_notation(size: usize, cells: &[Cell], turn: Option<Player>) -> String {
    let mut rows = Vec::with_capacity(size);

    for row in cells.chunks(size) {
        let mut row_str = String::new();
        let mut empty = 0;

        for cell in row {
            match cell {
                Cell::Empty => empty += 1,
                Cell::Mark(p) => {
                    if empty > 0 {
                        row_str.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row_str.push(p.symbol());
                }
            }
        }
        if empty > 0 {
            row_str.push_str(&empty.to_string());
        }
        rows.push(row_str);
    }

    let board = rows.join("/");
    match turn {
        Some(p) => format!("{} {}", board, p.symbol().to_ascii_lowercase()),
        None => board,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_small_board() {
        let state = parse_notation("X4/5/2O2/5/4X o").unwrap();
        assert_eq!(state.size, 5);
        assert_eq!(state.cells.len(), 25);
        assert_eq!(state.cells[0], Cell::Mark(Player::First));
        assert_eq!(state.cells[12], Cell::Mark(Player::Second));
        assert_eq!(state.cells[24], Cell::Mark(Player::First));
        assert_eq!(state.turn, Some(Player::Second));
    }

    #[test]
    fn test_multi_digit_runs() {
        let empty_row = "15";
        let text = vec![empty_row; 15].join("/");
        let state = parse_notation(&text).unwrap();
        assert_eq!(state.size, 15);
        assert!(state.cells.iter().all(|c| c.is_empty()));
        assert!(state.turn.is_none());
    }

    #[test]
    fn test_reject_bad_rows() {
        assert!(parse_notation("X4/5/5/5").is_err());
        assert!(parse_notation("X3/5/5/5/5").is_err());
        assert!(parse_notation("Z4/5/5/5/5").is_err());
        assert!(parse_notation("5/5/5/5/5 q").is_err());
    }

    #[test]
    fn test_reject_oversized_runs() {
        // 超长数字不能溢出，也不能先按数字分配格子
        assert!(parse_notation("99999999999999999999999/5").is_err());
        assert!(parse_notation("100000000000/1").is_err());
        assert!(parse_notation("6/5/5/5/5").is_err());
        assert!(parse_notation("5X/5/5/5/5").is_err());
        assert!(parse_notation("XXXXXX/5/5/5/5").is_err());
    }

    #[test]
    fn test_notation_roundtrip() {
        let text = "X4/1O3/5/3XX/O4 x";
        let state = parse_notation(text).unwrap();
        assert_eq!(cells_to_notation(state.size, &state.cells, state.turn), text);
    }
}
