//! 启发式评分策略
//!
//! 每个空位的分数 = 进攻权重 × 己方连子潜力 + 防守权重 × 对方连子潜力
//! + 中心权重 × (N - 到中心的曼哈顿距离)
//!
//! 从分数最高的几个不同分数中随机选一个，避免走法被对手摸透。

use super::random::random_move;
use super::{AIConfig, AIStrategy, HeuristicWeights, MoveReason, ScoredMove};
use crate::board::Board;
use crate::patterns::PatternStore;
use crate::rules::{run_through, DIRECTIONS};
use crate::types::{Cell, Player, Position};
use rand::prelude::*;

/// 连子数对应的潜力分
#[inline]
fn run_value(run: usize) -> i64 {
    match run {
        0 => 0,
        1 => 10,
        2 => 100,
        3 => 1000,
        _ => 10000,
    }
}

/// pos 对 player 的连子潜力
///
/// 四个方向分别数落子后经过 pos 的连子长度（含 pos 本身），换算成分数求和
pub fn line_potential(board: &Board, pos: Position, player: Player) -> i64 {
    DIRECTIONS
        .iter()
        .map(|&dir| run_value(run_through(board, pos, dir, player)))
        .sum()
}

/// 单个空位的总分
pub fn score_cell(board: &Board, pos: Position, player: Player, weights: &HeuristicWeights) -> i64 {
    let offense = line_potential(board, pos, player);
    let defense = line_potential(board, pos, player.opposite());
    let center = board.size() as i64 - pos.manhattan(board.center()) as i64;

    weights.offense * offense + weights.defense * defense + weights.center * center
}

/// 所有空位评分，行优先
fn score_all(board: &Board, player: Player, weights: &HeuristicWeights) -> Vec<(Position, i64)> {
    board
        .empty_positions()
        .into_iter()
        .map(|pos| (pos, score_cell(board, pos, player, weights)))
        .collect()
}

/// 取前 k 个不同分数，每个分数取行优先第一个位置
///
/// 只保留正分
fn top_distinct(scored: &[(Position, i64)], k: usize) -> Vec<(Position, i64)> {
    let mut sorted: Vec<(Position, i64)> = scored.iter().copied().filter(|&(_, s)| s > 0).collect();
    // 稳定排序，同分保持行优先顺序
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted.dedup_by_key(|&mut (_, s)| s);
    sorted.truncate(k);
    sorted
}

/// 按评分选位置；没有正分时返回 None
pub(crate) fn heuristic_move<R: Rng>(
    board: &Board,
    player: Player,
    weights: &HeuristicWeights,
    top_k: usize,
    rng: &mut R,
) -> Option<ScoredMove> {
    let scored = score_all(board, player, weights);
    let candidates = top_distinct(&scored, top_k.max(1));
    let &(pos, score) = candidates.choose(rng)?;
    Some(ScoredMove::new(pos, score as f64, MoveReason::Heuristic))
}

/// 兜底走法：中心 → 中心周围 8 格 → 任意已有棋子旁边的空位
pub fn strategic_move(board: &Board) -> Option<Position> {
    let center = board.center();
    if board.is_empty(center) {
        return Some(center);
    }

    for dr in -1..=1 {
        for dc in -1..=1 {
            let pos = center.offset(dr, dc);
            if board.is_empty(pos) {
                return Some(pos);
            }
        }
    }

    board
        .positions()
        .filter(|&pos| matches!(board.at(pos), Some(Cell::Mark(_))))
        .find_map(|pos| {
            (-1..=1)
                .flat_map(|dr| (-1..=1).map(move |dc| pos.offset(dr, dc)))
                .find(|&n| board.is_empty(n))
        })
}

/// 评分 → 中心/邻接 → 随机，三层兜底共用
pub(crate) fn fallback_move<R: Rng>(
    board: &Board,
    player: Player,
    config: &AIConfig,
    rng: &mut R,
) -> Option<ScoredMove> {
    if let Some(mv) = heuristic_move(board, player, &config.weights, config.top_k, rng) {
        return Some(mv);
    }
    if let Some(pos) = strategic_move(board) {
        return Some(ScoredMove::new(pos, 0.0, MoveReason::Strategic));
    }
    random_move(board, rng).map(|pos| ScoredMove::new(pos, 0.0, MoveReason::Random))
}

/// 纯评分 AI - 不看威胁和棋型库
pub struct HeuristicAI {
    config: AIConfig,
    rng: StdRng,
}

impl HeuristicAI {
    pub fn new(config: &AIConfig) -> Self {
        HeuristicAI {
            rng: config.make_rng(),
            config: config.clone(),
        }
    }
}

impl AIStrategy for HeuristicAI {
    fn select_move(&mut self, board: &Board, player: Player, _patterns: &PatternStore) -> Option<ScoredMove> {
        fallback_move(board, player, &self.config, &mut self.rng)
    }
}
