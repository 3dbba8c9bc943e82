//! 错误类型
//!
//! 非法落子、越界坐标由调用方处理；持久化失败在本地降级，不会中断对局

use crate::types::Position;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaroError {
    /// 目标格子已有棋子
    #[error("illegal move: {position} is already occupied")]
    IllegalMove { position: Position },

    /// 坐标不在棋盘内（调用方逻辑错误）
    #[error("position ({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: i32, col: i32, size: usize },

    /// 棋盘记谱格式错误
    #[error("invalid board notation: {message}")]
    Notation { message: String },

    /// 棋型库文件读写失败
    #[error("pattern store {path:?}: {message}")]
    Persistence { path: PathBuf, message: String },
}

impl CaroError {
    pub(crate) fn notation(message: impl Into<String>) -> Self {
        CaroError::Notation {
            message: message.into(),
        }
    }

    pub(crate) fn persistence(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        CaroError::Persistence {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CaroError>;
