// ==========================================
// Maur WMS - 配置管理器
// ==========================================
// 职责: 配置查询、覆写、快照
// 存储: config_kv 表 (key-value + scope)
// ==========================================
// 说明: 只读取 scope_id='global'；配置缺失或格式错误时回退默认值
// ==========================================

use crate::db::open_sqlite_connection;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 库位批量生成上限
    pub const SLOT_BATCH_MAX_SHELF_COUNT: &str = "slot_batch.max_shelf_count";
    pub const SLOT_BATCH_MAX_LEVEL_COUNT: &str = "slot_batch.max_level_count";
    pub const SLOT_BATCH_MAX_BATCH_SIZE: &str = "slot_batch.max_batch_size";

    // 界面
    pub const UI_LOCALE: &str = "ui.locale";

    // 检索
    pub const SEARCH_MAX_RESULTS: &str = "search.max_results";
}

// ==========================================
// 默认值
// ==========================================
pub mod config_defaults {
    pub const SLOT_BATCH_MAX_SHELF_COUNT: u32 = 99;
    pub const SLOT_BATCH_MAX_LEVEL_COUNT: u32 = 99;
    /// 单批次组合总数（字母数 × 货架数 × 层数）
    pub const SLOT_BATCH_MAX_BATCH_SIZE: u64 = 10_000;
    pub const UI_LOCALE: &str = "pt-BR";
    /// 0 = 不限制
    pub const SEARCH_MAX_RESULTS: usize = 0;
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 按数据库文件路径创建
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建
    ///
    /// 会对传入连接再次应用统一 PRAGMA（幂等）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 读取 global scope 的配置值
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_global_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 解析数值配置；格式错误时告警并回退默认值
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> Result<T, Box<dyn Error>>
    where
        T: std::str::FromStr + std::fmt::Display + Copy,
    {
        let raw = match self.get_global_config_value(key)? {
            Some(v) => v,
            None => return Ok(default),
        };
        match raw.trim().parse::<T>() {
            Ok(v) => Ok(v),
            Err(_) => {
                tracing::warn!(
                    config_key = key,
                    raw_value = %raw,
                    default = %default,
                    "配置格式错误，使用默认值"
                );
                Ok(default)
            }
        }
    }

    /// 写入（覆写）global scope 配置
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let key = key.trim();
        if key.is_empty() {
            return Err("配置键不能为空".into());
        }

        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at)
             VALUES ('global', ?1, ?2, datetime('now'))
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;

        tracing::info!(config_key = key, value, "配置已更新");
        Ok(())
    }

    /// 获取所有 global 配置的快照（JSON，按键排序）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }

    // ===== 库位批量生成 =====

    /// 单次批量生成允许的最大货架数
    pub fn get_max_shelf_count(&self) -> Result<u32, Box<dyn Error>> {
        self.get_parsed_or_default(
            config_keys::SLOT_BATCH_MAX_SHELF_COUNT,
            config_defaults::SLOT_BATCH_MAX_SHELF_COUNT,
        )
    }

    /// 单次批量生成允许的最大层数
    pub fn get_max_level_count(&self) -> Result<u32, Box<dyn Error>> {
        self.get_parsed_or_default(
            config_keys::SLOT_BATCH_MAX_LEVEL_COUNT,
            config_defaults::SLOT_BATCH_MAX_LEVEL_COUNT,
        )
    }

    /// 单次批量生成允许的组合总数
    pub fn get_max_batch_size(&self) -> Result<u64, Box<dyn Error>> {
        self.get_parsed_or_default(
            config_keys::SLOT_BATCH_MAX_BATCH_SIZE,
            config_defaults::SLOT_BATCH_MAX_BATCH_SIZE,
        )
    }

    // ===== 界面 / 检索 =====

    pub fn get_ui_locale(&self) -> Result<String, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::UI_LOCALE, config_defaults::UI_LOCALE)?;
        let value = value.trim();
        if value.is_empty() {
            Ok(config_defaults::UI_LOCALE.to_string())
        } else {
            Ok(value.to_string())
        }
    }

    /// 检索结果上限（0 = 不限制）
    pub fn get_search_max_results(&self) -> Result<usize, Box<dyn Error>> {
        self.get_parsed_or_default(
            config_keys::SEARCH_MAX_RESULTS,
            config_defaults::SEARCH_MAX_RESULTS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ConfigManager {
        let conn = crate::db::open_in_memory().unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_defaults_when_missing() {
        let cfg = manager();
        assert_eq!(cfg.get_max_shelf_count().unwrap(), 99);
        assert_eq!(cfg.get_max_level_count().unwrap(), 99);
        assert_eq!(cfg.get_max_batch_size().unwrap(), 10_000);
        assert_eq!(cfg.get_ui_locale().unwrap(), "pt-BR");
        assert_eq!(cfg.get_search_max_results().unwrap(), 0);
        assert_eq!(cfg.get_global_config_value("nao.existe").unwrap(), None);
    }

    #[test]
    fn test_set_overrides_and_upserts() {
        let cfg = manager();
        cfg.set_global_config_value(config_keys::SLOT_BATCH_MAX_SHELF_COUNT, "10").unwrap();
        assert_eq!(cfg.get_max_shelf_count().unwrap(), 10);

        cfg.set_global_config_value(config_keys::SLOT_BATCH_MAX_SHELF_COUNT, "20").unwrap();
        assert_eq!(cfg.get_max_shelf_count().unwrap(), 20);

        cfg.set_global_config_value(config_keys::UI_LOCALE, "en").unwrap();
        assert_eq!(cfg.get_ui_locale().unwrap(), "en");
    }

    #[test]
    fn test_malformed_value_falls_back() {
        let cfg = manager();
        cfg.set_global_config_value(config_keys::SLOT_BATCH_MAX_LEVEL_COUNT, "muitos").unwrap();
        assert_eq!(cfg.get_max_level_count().unwrap(), 99);

        cfg.set_global_config_value(config_keys::SEARCH_MAX_RESULTS, "-1").unwrap();
        assert_eq!(cfg.get_search_max_results().unwrap(), 0);
    }

    #[test]
    fn test_empty_key_rejected() {
        let cfg = manager();
        assert!(cfg.set_global_config_value("  ", "1").is_err());
    }

    #[test]
    fn test_snapshot_sorted() {
        let cfg = manager();
        cfg.set_global_config_value("ui.locale", "en").unwrap();
        cfg.set_global_config_value("search.max_results", "5").unwrap();

        let snapshot = cfg.get_config_snapshot().unwrap();
        assert_eq!(snapshot, r#"{"search.max_results":"5","ui.locale":"en"}"#);
    }
}
