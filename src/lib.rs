//! Caro (Gomoku) AI Engine
//!
//! 五子棋引擎 - 15×15 棋盘五连获胜，AI 通过记忆人类获胜棋型不断改进

pub mod ai;
pub mod board;
pub mod error;
pub mod notation;
pub mod patterns;
pub mod rules;
pub mod session;
pub mod test_positions;
pub mod types;

pub use ai::{
    AIConfig, AIEngine, AIStrategy, HeuristicAI, HeuristicWeights, MoveReason, RandomAI,
    ScoredMove, TieredAI, AVAILABLE_STRATEGIES, DEFAULT_STRATEGY,
};
pub use board::Board;
pub use error::{CaroError, Result};
pub use patterns::{default_pattern_path, PatternConfig, PatternContext, PatternEntry, PatternStore};
pub use rules::{check_win, game_result};
pub use session::{CaroSession, GameLogic, SessionConfig};
pub use types::{Cell, GameRecord, GameResult, Move, Player, Position, CARO_BOARD_SIZE, WIN_LENGTH};
