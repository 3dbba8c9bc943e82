//! 棋型库持久化
//!
//! 整个库以 JSON 数组保存在用户数据目录下的 `patterns.json`。
//! 文件格式没有版本号，结构变化时需要删除旧文件。
//!
//! 读取失败（文件不存在、损坏）得到空库；保存失败只记日志。

use super::{PatternConfig, PatternEntry, PatternStore};
use crate::error::{CaroError, Result};
use directories::ProjectDirs;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

const PATTERN_FILENAME: &str = "patterns.json";

/// 默认棋型库路径
///
/// 例如 Linux 下为 `~/.local/share/caro-ai/patterns.json`，
/// 找不到系统目录时退回当前目录
pub fn default_pattern_path() -> PathBuf {
    match ProjectDirs::from("org", "caro", "caro-ai") {
        Some(dirs) => dirs.data_dir().join(PATTERN_FILENAME),
        None => PathBuf::from(PATTERN_FILENAME),
    }
}

impl PatternStore {
    /// 读取棋型库，失败返回错误
    pub fn try_load(path: &Path, config: PatternConfig) -> Result<PatternStore> {
        let contents = fs::read_to_string(path).map_err(|e| CaroError::persistence(path, e))?;
        let entries: Vec<PatternEntry> =
            serde_json::from_str(&contents).map_err(|e| CaroError::persistence(path, e))?;
        Ok(PatternStore::from_entries(config, entries))
    }

    /// 读取棋型库，任何失败都退化为空库
    pub fn load(path: &Path, config: PatternConfig) -> PatternStore {
        if !path.exists() {
            info!("No pattern file at {:?}, starting empty", path);
            return PatternStore::new(config);
        }
        match PatternStore::try_load(path, config.clone()) {
            Ok(store) => {
                info!("Loaded {} patterns from {:?}", store.len(), path);
                store
            }
            Err(e) => {
                warn!("{}. Starting with an empty pattern store.", e);
                PatternStore::new(config)
            }
        }
    }

    /// 整体写入文件，必要时创建目录
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| CaroError::persistence(parent, e))?;
            }
        }
        let json = serde_json::to_string(&self.entries).map_err(|e| CaroError::persistence(path, e))?;
        fs::write(path, json).map_err(|e| CaroError::persistence(path, e))?;
        info!("Saved {} patterns to {:?}", self.len(), path);
        Ok(())
    }

    /// 保存，失败只记录警告
    pub fn save_or_warn(&self, path: &Path) {
        if let Err(e) = self.save(path) {
            warn!("{}. Learned patterns were not saved.", e);
        }
    }
}
