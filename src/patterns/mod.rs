//! 棋型学习库
//!
//! 记录人类获胜对局中人类每一步的局部棋型。AI 走棋时用相似度
//! 在库中查找，偏向那些曾经帮助对手获胜的位置。
//!
//! 容量有限，超出后按 `success_rate × frequency` 保留前 N 条。

mod context;
mod persist;

pub use context::{is_learnable, PatternCell, PatternContext, CONTEXT_SIZE, NEARBY_RADIUS};
pub use persist::default_pattern_path;

use crate::board::Board;
use crate::types::{GameRecord, Player, Position};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 棋型库配置
#[derive(Debug, Clone)]
pub struct PatternConfig {
    /// 最多保留的棋型数
    pub capacity: usize,
    /// 每次重复观察时 success_rate 的增量
    pub reinforce_step: f64,
    /// 预测时计入的最低相似度（不含）
    pub similarity_threshold: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        PatternConfig {
            capacity: 2000,
            reinforce_step: 0.1,
            similarity_threshold: 0.7,
        }
    }
}

/// 一条学到的棋型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternEntry {
    pub context: PatternContext,
    /// 该棋型下实际走的位置
    #[serde(rename = "move")]
    pub position: Position,
    pub frequency: u32,
    pub success_rate: f64,
    pub last_used: DateTime<Utc>,
}

impl PatternEntry {
    fn new(context: PatternContext, position: Position, now: DateTime<Utc>) -> Self {
        PatternEntry {
            context,
            position,
            frequency: 1,
            success_rate: 1.0,
            last_used: now,
        }
    }

    /// 排序/淘汰用的权重
    #[inline]
    pub fn weight(&self) -> f64 {
        self.success_rate * self.frequency as f64
    }
}

/// 棋型库
///
/// 条目数量有上限，线性扫描即可
#[derive(Debug, Clone, Default)]
pub struct PatternStore {
    config: PatternConfig,
    entries: Vec<PatternEntry>,
}

impl PatternStore {
    pub fn new(config: PatternConfig) -> Self {
        PatternStore {
            config,
            entries: Vec::new(),
        }
    }

    pub(crate) fn from_entries(config: PatternConfig, entries: Vec<PatternEntry>) -> Self {
        let mut store = PatternStore { config, entries };
        store.evict();
        store
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    /// 按权重排序的前 n 条
    pub fn top_entries(&self, n: usize) -> Vec<&PatternEntry> {
        let mut sorted: Vec<&PatternEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| by_weight_desc(a, b));
        sorted.truncate(n);
        sorted
    }

    /// 记录一次观察
    ///
    /// 完全相同的棋型已存在时加强它，否则插入新条目并按容量淘汰。
    /// 返回是否插入了新条目。
    pub fn learn(&mut self, context: PatternContext, position: Position, now: DateTime<Utc>) -> bool {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.context == context) {
            entry.frequency += 1;
            entry.success_rate += self.config.reinforce_step;
            entry.last_used = now;
            return false;
        }

        self.entries.push(PatternEntry::new(context, position, now));
        self.evict();
        true
    }

    /// 超出容量时只保留权重最高的 capacity 条
    ///
    /// 稳定排序：权重相同时先入库的保留
    fn evict(&mut self) {
        if self.entries.len() <= self.config.capacity {
            return;
        }
        let before = self.entries.len();
        self.entries.sort_by(by_weight_desc);
        self.entries.truncate(self.config.capacity);
        debug!("evicted {} patterns", before - self.entries.len());
    }

    /// 学习一局棋
    ///
    /// 只有 `human` 获胜时才学习：回放对局，对人类的每一步取落子前的局部棋型。
    /// 返回学到（新增或加强）的棋型数。
    pub fn observe(&mut self, record: &GameRecord, human: Player) -> usize {
        if record.winner != Some(human) {
            return 0;
        }

        let mut board = Board::new(record.board_size);
        let now = Utc::now();
        let mut learned = 0;
        let mut inserted = 0;

        for mv in &record.moves {
            if mv.player == human && board.is_empty(mv.position) && is_learnable(&board, mv.position) {
                let context = PatternContext::extract(&board, mv.position);
                if self.learn(context, mv.position, now) {
                    inserted += 1;
                }
                learned += 1;
            }
            // 记录来自会话，理论上都合法；异常的步直接跳过
            if board.make_move(mv.position, mv.player).is_err() {
                debug!("skipping invalid recorded move {}", mv.position);
            }
        }

        info!(
            "learned {} patterns from {} moves ({} new, store size {})",
            learned,
            record.len(),
            inserted,
            self.entries.len()
        );
        learned
    }

    /// 预测最佳位置
    ///
    /// 对每个附近有子的空位截取棋型，与库中相似度超过阈值的条目累计
    /// `similarity × frequency × success_rate`，再按匹配数取平均。
    /// 返回平均分最高的空位；没有任何匹配时返回 None。
    pub fn predict(&self, board: &Board) -> Option<Position> {
        if self.entries.is_empty() {
            return None;
        }

        let mut best: Option<(Position, f64)> = None;

        for pos in board.positions() {
            if !board.is_empty(pos) || !is_learnable(board, pos) {
                continue;
            }
            let context = PatternContext::extract(board, pos);

            let mut total = 0.0;
            let mut matches = 0u32;
            for entry in &self.entries {
                let sim = context.similarity(&entry.context);
                if sim > self.config.similarity_threshold {
                    total += sim * entry.weight();
                    matches += 1;
                }
            }
            if matches == 0 {
                continue;
            }

            let score = total / matches as f64;
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((pos, score));
            }
        }

        if let Some((pos, score)) = best {
            debug!("pattern prediction {} (score {:.3})", pos, score);
        }
        best.map(|(pos, _)| pos)
    }
}

fn by_weight_desc(a: &PatternEntry, b: &PatternEntry) -> Ordering {
    b.weight().partial_cmp(&a.weight()).unwrap_or(Ordering::Equal)
}
