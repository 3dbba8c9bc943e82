//! AI 策略模块
//!
//! 提供分层策略（默认）、纯评分策略和随机策略。
//! 所有策略都是单层扫描，不做博弈树搜索。

mod heuristic;
mod random;
mod threat;
mod tiered;

pub use heuristic::{line_potential, score_cell, strategic_move, HeuristicAI};
pub use random::RandomAI;
pub use threat::{find_line_move, forms_line, threat_cells};
pub use tiered::TieredAI;

use crate::board::Board;
use crate::patterns::PatternStore;
use crate::types::{Player, Position};
use rand::prelude::*;
use std::fmt;

/// 可用策略名
pub const AVAILABLE_STRATEGIES: &[&str] = &["tiered", "heuristic", "random"];

/// 默认策略
pub const DEFAULT_STRATEGY: &str = "tiered";

/// 启发式评分权重
#[derive(Debug, Clone, Copy)]
pub struct HeuristicWeights {
    /// 己方连子潜力
    pub offense: i64,
    /// 对方连子潜力（堵截价值）
    pub defense: i64,
    /// 靠近中心
    pub center: i64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        HeuristicWeights {
            offense: 2,
            defense: 1,
            center: 2,
        }
    }
}

/// AI 配置
#[derive(Debug, Clone)]
pub struct AIConfig {
    /// 随机种子，None 时从系统熵初始化
    pub seed: Option<u64>,
    /// 是否参考棋型库
    pub learning: bool,
    /// 参考棋型库的概率
    pub pattern_probability: f64,
    /// 棋型库条目数超过该值才会参考
    pub min_patterns: usize,
    /// 从评分最高的几个不同分数中随机选
    pub top_k: usize,
    pub weights: HeuristicWeights,
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            seed: None,
            learning: true,
            pattern_probability: 0.4,
            min_patterns: 10,
            top_k: 3,
            weights: HeuristicWeights::default(),
        }
    }
}

impl AIConfig {
    pub(crate) fn make_rng(&self) -> StdRng {
        match self.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        }
    }
}

/// 走法来源（哪一层策略给出的）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveReason {
    /// 一步成五
    Win,
    /// 堵对方成五
    BlockWin,
    /// 堵对方四连
    BlockFour,
    /// 自己做四连
    CreateFour,
    /// 棋型库预测
    Pattern,
    /// 启发式评分
    Heuristic,
    /// 中心/邻接兜底
    Strategic,
    /// 随机兜底
    Random,
}

impl fmt::Display for MoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveReason::Win => "win",
            MoveReason::BlockWin => "block-win",
            MoveReason::BlockFour => "block-four",
            MoveReason::CreateFour => "create-four",
            MoveReason::Pattern => "pattern",
            MoveReason::Heuristic => "heuristic",
            MoveReason::Strategic => "strategic",
            MoveReason::Random => "random",
        };
        write!(f, "{}", name)
    }
}

/// 带评分的走法
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    pub position: Position,
    pub score: f64,
    pub reason: MoveReason,
}

impl ScoredMove {
    pub fn new(position: Position, score: f64, reason: MoveReason) -> Self {
        ScoredMove {
            position,
            score,
            reason,
        }
    }
}

/// AI 策略接口
pub trait AIStrategy {
    /// 为 player 选一个空位；只有棋盘已满时返回 None
    fn select_move(&mut self, board: &Board, player: Player, patterns: &PatternStore)
        -> Option<ScoredMove>;

    /// 只要位置
    fn select_position(
        &mut self,
        board: &Board,
        player: Player,
        patterns: &PatternStore,
    ) -> Option<Position> {
        self.select_move(board, player, patterns).map(|sm| sm.position)
    }
}

/// AI 引擎 - 统一的 AI 接口
pub struct AIEngine {
    strategy: Box<dyn AIStrategy + Send>,
}

impl AIEngine {
    /// 创建分层 AI
    pub fn tiered(config: &AIConfig) -> Self {
        AIEngine {
            strategy: Box::new(TieredAI::new(config)),
        }
    }

    /// 创建纯评分 AI
    pub fn heuristic(config: &AIConfig) -> Self {
        AIEngine {
            strategy: Box::new(HeuristicAI::new(config)),
        }
    }

    /// 创建随机 AI
    pub fn random(seed: Option<u64>) -> Self {
        AIEngine {
            strategy: Box::new(RandomAI::new(seed)),
        }
    }

    /// 从策略名称创建
    pub fn from_strategy(name: &str, config: &AIConfig) -> Result<Self, String> {
        match name.to_lowercase().as_str() {
            "tiered" => Ok(Self::tiered(config)),
            "heuristic" => Ok(Self::heuristic(config)),
            "random" => Ok(Self::random(config.seed)),
            _ => Err(format!(
                "Unknown strategy: {}. Available: {}",
                name,
                AVAILABLE_STRATEGIES.join(", ")
            )),
        }
    }

    pub fn select_move(
        &mut self,
        board: &Board,
        player: Player,
        patterns: &PatternStore,
    ) -> Option<ScoredMove> {
        self.strategy.select_move(board, player, patterns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_positions;

    fn config(seed: u64) -> AIConfig {
        AIConfig {
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_all_strategies_from_name() {
        for name in AVAILABLE_STRATEGIES {
            let result = AIEngine::from_strategy(name, &config(1));
            assert!(result.is_ok(), "Failed to create strategy: {}", name);
        }
        assert!(AIEngine::from_strategy("minimax", &config(1)).is_err());
    }

    #[test]
    fn test_every_strategy_returns_empty_cell() {
        let board = Board::from_notation(test_positions::MID_1).unwrap();
        let store = PatternStore::default();
        for name in AVAILABLE_STRATEGIES {
            for seed in 0..10 {
                let mut ai = AIEngine::from_strategy(name, &config(seed)).unwrap();
                let mv = ai.select_move(&board, Player::Second, &store).unwrap();
                assert!(board.is_empty(mv.position), "{} picked occupied {}", name, mv.position);
            }
        }
    }

    #[test]
    fn test_full_board_returns_none() {
        let board = Board::from_notation(test_positions::FULL_DRAW).unwrap();
        let store = PatternStore::default();
        for name in AVAILABLE_STRATEGIES {
            let mut ai = AIEngine::from_strategy(name, &config(3)).unwrap();
            assert!(ai.select_move(&board, Player::First, &store).is_none());
        }
    }

    #[test]
    fn test_last_empty_cell() {
        let board = Board::from_notation(test_positions::ONE_EMPTY).unwrap();
        let store = PatternStore::default();
        for name in AVAILABLE_STRATEGIES {
            let mut ai = AIEngine::from_strategy(name, &config(5)).unwrap();
            let pos = ai.select_move(&board, Player::Second, &store).unwrap().position;
            assert_eq!(pos, Position::new(4, 4));
        }
    }
}
