//! 分层 AI 策略
//!
//! 按优先级逐层尝试，第一层给出结果即返回：
//! 1. 一步成五
//! 2. 堵对方成五
//! 3. 堵对方四连
//! 4. 自己做四连
//! 5. 棋型库预测（开启学习且库中条目足够时，按概率触发）
//! 6. 启发式评分，前 3 个不同分数中随机
//! 7. 中心/邻接兜底
//! 8. 随机空位
//!
//! 1-4 层取行优先扫描遇到的第一个位置。

use super::heuristic::fallback_move;
use super::threat::find_line_move;
use super::{AIConfig, AIStrategy, MoveReason, ScoredMove};
use crate::board::Board;
use crate::patterns::PatternStore;
use crate::types::{Player, WIN_LENGTH};
use log::debug;
use rand::prelude::*;

/// 分层 AI
pub struct TieredAI {
    config: AIConfig,
    rng: StdRng,
}

impl TieredAI {
    pub fn new(config: &AIConfig) -> Self {
        TieredAI {
            rng: config.make_rng(),
            config: config.clone(),
        }
    }

    /// 指定随机源
    pub fn with_rng(config: &AIConfig, rng: StdRng) -> Self {
        TieredAI {
            config: config.clone(),
            rng,
        }
    }

    /// 1-4 层：必须立刻处理的位置
    fn critical_move(board: &Board, player: Player) -> Option<ScoredMove> {
        let opponent = player.opposite();
        let checks = [
            (player, WIN_LENGTH, MoveReason::Win),
            (opponent, WIN_LENGTH, MoveReason::BlockWin),
            (opponent, WIN_LENGTH - 1, MoveReason::BlockFour),
            (player, WIN_LENGTH - 1, MoveReason::CreateFour),
        ];

        checks.iter().find_map(|&(who, target, reason)| {
            find_line_move(board, who, target).map(|pos| ScoredMove::new(pos, f64::INFINITY, reason))
        })
    }

    /// 5 层：棋型库预测
    fn pattern_move(&mut self, board: &Board, patterns: &PatternStore) -> Option<ScoredMove> {
        if !self.config.learning || patterns.len() <= self.config.min_patterns {
            return None;
        }
        let p = self.config.pattern_probability.clamp(0.0, 1.0);
        if !self.rng.gen_bool(p) {
            return None;
        }

        let pos = patterns.predict(board)?;
        if !board.is_empty(pos) {
            return None;
        }
        Some(ScoredMove::new(pos, 0.0, MoveReason::Pattern))
    }
}

impl AIStrategy for TieredAI {
    fn select_move(&mut self, board: &Board, player: Player, patterns: &PatternStore) -> Option<ScoredMove> {
        let chosen = Self::critical_move(board, player)
            .or_else(|| self.pattern_move(board, patterns))
            .or_else(|| fallback_move(board, player, &self.config, &mut self.rng));

        if let Some(mv) = &chosen {
            debug!("{} plays {} ({})", player, mv.position, mv.reason);
        }
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{PatternCell, PatternContext, CONTEXT_SIZE};
    use crate::test_positions;
    use crate::types::Position;
    use chrono::Utc;

    fn seeded(seed: u64) -> TieredAI {
        TieredAI::new(&AIConfig {
            seed: Some(seed),
            ..Default::default()
        })
    }

    /// 在 target 附近塞满高权重的棋型，让预测指向 target
    fn store_pointing_at(board: &Board, target: Position) -> PatternStore {
        let mut store = PatternStore::default();
        let ctx = PatternContext::extract(board, target);
        for _ in 0..20 {
            store.learn(ctx, target, Utc::now());
        }
        // 凑够条目数：几乎全是 Edge 的棋型，和盘上任何位置的相似度都低于阈值
        for i in 0..12 {
            let mut cells = [[PatternCell::Edge; CONTEXT_SIZE]; CONTEXT_SIZE];
            cells[i / CONTEXT_SIZE][i % CONTEXT_SIZE] = PatternCell::Second;
            store.learn(PatternContext::from_cells(cells), Position::new(0, 0), Utc::now());
        }
        store
    }

    #[test]
    fn test_blocks_open_four_from_either_end() {
        let board = Board::from_notation(test_positions::OPEN_FOUR_ROW).unwrap();
        let store = PatternStore::default();
        for seed in 0..20 {
            let mv = seeded(seed).select_move(&board, Player::Second, &store).unwrap();
            assert!(
                mv.position == Position::new(7, 6) || mv.position == Position::new(7, 11),
                "unexpected {}",
                mv.position
            );
            assert_eq!(mv.reason, MoveReason::BlockWin);
        }
    }

    #[test]
    fn test_win_beats_block_and_patterns() {
        let board = Board::from_notation(test_positions::WIN_OR_BLOCK).unwrap();
        let store = store_pointing_at(&board, Position::new(2, 2));
        assert!(store.len() > 10);

        let config = AIConfig {
            seed: Some(11),
            pattern_probability: 1.0,
            ..Default::default()
        };
        let mv = TieredAI::new(&config).select_move(&board, Player::Second, &store).unwrap();
        assert_eq!(mv.position, Position::new(3, 4));
        assert_eq!(mv.reason, MoveReason::Win);
    }

    #[test]
    fn test_blocks_three_before_building() {
        let board = Board::from_notation(test_positions::OPEN_THREE_COL).unwrap();
        let mv = seeded(4).select_move(&board, Player::Second, &PatternStore::default()).unwrap();
        assert_eq!(mv.reason, MoveReason::BlockFour);
        assert_eq!(mv.position, Position::new(4, 7));
    }

    #[test]
    fn test_creates_four() {
        let board = Board::from_notation(test_positions::OWN_THREE).unwrap();
        let mv = seeded(4).select_move(&board, Player::Second, &PatternStore::default()).unwrap();
        assert_eq!(mv.reason, MoveReason::CreateFour);
        assert_eq!(mv.position, Position::new(10, 2));
    }

    #[test]
    fn test_pattern_tier() {
        let board = Board::from_notation(test_positions::EARLY_1).unwrap();
        let target = Position::new(6, 8);
        let store = store_pointing_at(&board, target);

        let config = AIConfig {
            seed: Some(2),
            pattern_probability: 1.0,
            ..Default::default()
        };
        let mv = TieredAI::new(&config).select_move(&board, Player::Second, &store).unwrap();
        assert_eq!(mv.reason, MoveReason::Pattern);
        assert_eq!(mv.position, target);

        // 关闭学习后不再参考
        let config = AIConfig {
            learning: false,
            ..config
        };
        let mv = TieredAI::new(&config).select_move(&board, Player::Second, &store).unwrap();
        assert_eq!(mv.reason, MoveReason::Heuristic);
    }

    #[test]
    fn test_small_store_is_ignored() {
        let board = Board::from_notation(test_positions::EARLY_1).unwrap();
        let mut store = PatternStore::default();
        store.learn(PatternContext::extract(&board, Position::new(6, 8)), Position::new(6, 8), Utc::now());

        let config = AIConfig {
            seed: Some(2),
            pattern_probability: 1.0,
            ..Default::default()
        };
        let mv = TieredAI::new(&config).select_move(&board, Player::Second, &store).unwrap();
        assert_eq!(mv.reason, MoveReason::Heuristic);
    }

    #[test]
    fn test_seeded_games_are_reproducible() {
        let board = Board::from_notation(test_positions::MID_1).unwrap();
        let store = PatternStore::default();
        let a = seeded(99).select_position(&board, Player::First, &store);
        let b = TieredAI::with_rng(&AIConfig::default(), StdRng::seed_from_u64(99))
            .select_position(&board, Player::First, &store);
        assert_eq!(a, b);
    }
}
