//! 对局会话
//!
//! 界面层通过 [`GameLogic`] 调用引擎：落子、判胜、让 AI 走棋、告知胜者、重置。
//! 会话在学习模式下记录每一步；重置时如果上一局已分出胜负，
//! 就把整局记录交给棋型库学习并保存到磁盘。
//!
//! 棋盘归调用方所有，会话只保存走法记录和棋型库。

use crate::ai::{AIConfig, AIEngine, ScoredMove};
use crate::board::Board;
use crate::patterns::{PatternConfig, PatternStore};
use crate::rules;
use crate::types::{GameRecord, Move, Player, Position, CARO_BOARD_SIZE};
use log::{debug, info};
use std::path::PathBuf;

/// 引擎对界面层暴露的接口
pub trait GameLogic {
    /// 清空本局状态；若已设置胜者则先学习
    fn reset(&mut self);

    /// 在调用方的棋盘上落子，返回是否成功
    fn make_move(&mut self, pos: Position, is_first_player_turn: bool, board: &mut Board) -> bool;

    /// (row, col) 上的棋子是否连成五子
    fn check_win(&self, row: i32, col: i32, board: &Board) -> bool;

    /// AI 的走法，只有满盘时返回 None
    fn get_ai_move(&mut self, board: &Board) -> Option<Position>;

    /// 告知胜者，None 表示和棋
    fn set_game_winner(&mut self, winner: Option<Player>);
}

/// 会话配置
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// 人类执哪一方，AI 执另一方
    pub human: Player,
    /// 是否记录对局并学习
    pub learning: bool,
    /// 棋型库文件，None 时只在内存中学习
    pub pattern_path: Option<PathBuf>,
    pub strategy: String,
    pub ai: AIConfig,
    pub patterns: PatternConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            human: Player::First,
            learning: true,
            pattern_path: None,
            strategy: crate::ai::DEFAULT_STRATEGY.to_string(),
            ai: AIConfig::default(),
            patterns: PatternConfig::default(),
        }
    }
}

/// Caro 对局会话
pub struct CaroSession {
    config: SessionConfig,
    engine: AIEngine,
    patterns: PatternStore,
    record: GameRecord,
    last_ai_move: Option<ScoredMove>,
}

impl CaroSession {
    /// 创建会话；配置了棋型库路径时从磁盘读取
    pub fn new(config: SessionConfig) -> Result<Self, String> {
        let patterns = match &config.pattern_path {
            Some(path) => PatternStore::load(path, config.patterns.clone()),
            None => PatternStore::new(config.patterns.clone()),
        };
        Self::with_patterns(config, patterns)
    }

    /// 使用现成的棋型库
    pub fn with_patterns(config: SessionConfig, patterns: PatternStore) -> Result<Self, String> {
        let engine = AIEngine::from_strategy(&config.strategy, &config.ai)?;
        Ok(CaroSession {
            config,
            engine,
            patterns,
            record: GameRecord::new(CARO_BOARD_SIZE),
            last_ai_move: None,
        })
    }

    pub fn human(&self) -> Player {
        self.config.human
    }

    pub fn ai_player(&self) -> Player {
        self.config.human.opposite()
    }

    pub fn is_learning(&self) -> bool {
        self.config.learning
    }

    /// 切换学习模式；关闭后不再记录走法，AI 也不再参考棋型库
    pub fn set_learning(&mut self, learning: bool) {
        self.config.learning = learning;
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    pub fn patterns(&self) -> &PatternStore {
        &self.patterns
    }

    /// 上一次 AI 走法及其来源
    pub fn last_ai_move(&self) -> Option<&ScoredMove> {
        self.last_ai_move.as_ref()
    }

    /// 学习上一局并持久化
    fn learn_from_record(&mut self) {
        let learned = self.patterns.observe(&self.record, self.config.human);
        if learned == 0 {
            return;
        }
        if let Some(path) = &self.config.pattern_path {
            self.patterns.save_or_warn(path);
        }
    }
}

impl GameLogic for CaroSession {
    fn reset(&mut self) {
        if self.record.winner.is_some() {
            self.learn_from_record();
        }
        debug!("session reset after {} moves", self.record.len());
        self.record.clear();
        self.last_ai_move = None;
    }

    fn make_move(&mut self, pos: Position, is_first_player_turn: bool, board: &mut Board) -> bool {
        let player = if is_first_player_turn { Player::First } else { Player::Second };
        match board.make_move(pos, player) {
            Ok(()) => {
                if self.config.learning {
                    if self.record.is_empty() {
                        self.record.board_size = board.size();
                    }
                    self.record.push(Move::new(pos, player));
                }
                true
            }
            Err(e) => {
                debug!("rejected move: {}", e);
                false
            }
        }
    }

    fn check_win(&self, row: i32, col: i32, board: &Board) -> bool {
        rules::check_win(board, Position::new(row, col))
    }

    fn get_ai_move(&mut self, board: &Board) -> Option<Position> {
        // 棋型层按当前的学习开关决定是否参考库
        let empty;
        let patterns = if self.config.learning {
            &self.patterns
        } else {
            empty = PatternStore::new(self.patterns.config().clone());
            &empty
        };
        let mv = self.engine.select_move(board, self.ai_player(), patterns);
        self.last_ai_move = mv;
        mv.map(|m| m.position)
    }

    fn set_game_winner(&mut self, winner: Option<Player>) {
        if let Some(p) = winner {
            info!("game over, winner {}", p);
        }
        self.record.winner = winner;
    }
}
