//! 随机 AI 策略

use super::{AIStrategy, MoveReason, ScoredMove};
use crate::board::Board;
use crate::patterns::PatternStore;
use crate::types::{Player, Position};
use rand::prelude::*;

/// 在所有空位中等概率选一个，满盘返回 None
pub(crate) fn random_move<R: Rng>(board: &Board, rng: &mut R) -> Option<Position> {
    board.empty_positions().choose(rng).copied()
}

/// 随机 AI - 随机选择空位
pub struct RandomAI {
    rng: StdRng,
}

impl RandomAI {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        RandomAI { rng }
    }
}

impl AIStrategy for RandomAI {
    fn select_move(&mut self, board: &Board, _player: Player, _patterns: &PatternStore) -> Option<ScoredMove> {
        random_move(board, &mut self.rng).map(|pos| ScoredMove::new(pos, self.rng.gen::<f64>(), MoveReason::Random))
    }
}
