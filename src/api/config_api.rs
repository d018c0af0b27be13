// ==========================================
// Maur WMS - 配置管理 API
// ==========================================
// 职责: 配置查询、更新（仅白名单键）
// ==========================================

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::json;

use crate::api::error::{ApiError, ApiResult};
use crate::api::record_action;
use crate::config::{config_keys, ConfigManager};
use crate::domain::action_log::{ActionLog, ActionType};
use crate::engine::slot_batch::MAX_BATCH_COMBINATIONS;
use crate::i18n;
use crate::repository::ActionLogRepository;

/// 可通过 API 修改的配置键
pub const EDITABLE_KEYS: &[&str] = &[
    config_keys::SLOT_BATCH_MAX_SHELF_COUNT,
    config_keys::SLOT_BATCH_MAX_LEVEL_COUNT,
    config_keys::SLOT_BATCH_MAX_BATCH_SIZE,
    config_keys::UI_LOCALE,
    config_keys::SEARCH_MAX_RESULTS,
];

/// 配置管理API
pub struct ConfigApi {
    config_manager: Arc<ConfigManager>,
    action_log_repo: Arc<ActionLogRepository>,
}

impl ConfigApi {
    pub fn new(config_manager: Arc<ConfigManager>, action_log_repo: Arc<ActionLogRepository>) -> Self {
        Self {
            config_manager,
            action_log_repo,
        }
    }

    /// 当前已写入的全部配置（按键排序）
    pub fn list_configs(&self) -> ApiResult<BTreeMap<String, String>> {
        let snapshot = self
            .config_manager
            .get_config_snapshot()
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        serde_json::from_str(&snapshot).map_err(|e| ApiError::InternalError(e.to_string()))
    }

    /// 更新配置
    ///
    /// 数值键须为非负整数（上限类须大于0）; ui.locale 须为已支持语言,更新后立即生效
    pub fn update_config(&self, key: &str, value: &str, actor: &str) -> ApiResult<()> {
        let key = key.trim();
        let value = value.trim();
        Self::validate_entry(key, value)?;

        let previous = self
            .config_manager
            .get_global_config_value(key)
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        self.config_manager
            .set_global_config_value(key, value)
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        if key == config_keys::UI_LOCALE {
            i18n::set_locale(value);
        }

        record_action(
            &self.action_log_repo,
            ActionLog::new(ActionType::UpdateConfig, actor).with_payload(json!({
                "key": key,
                "from": previous,
                "to": value,
            })),
        );
        Ok(())
    }

    fn validate_entry(key: &str, value: &str) -> ApiResult<()> {
        match key {
            config_keys::SLOT_BATCH_MAX_SHELF_COUNT | config_keys::SLOT_BATCH_MAX_LEVEL_COUNT => {
                match value.parse::<u32>() {
                    Ok(n) if n > 0 => Ok(()),
                    _ => Err(ApiError::ValidationError(format!(
                        "{} 必须为正整数: '{}'",
                        key, value
                    ))),
                }
            }
            config_keys::SLOT_BATCH_MAX_BATCH_SIZE => match value.parse::<u64>() {
                Ok(n) if n > 0 && n <= MAX_BATCH_COMBINATIONS => Ok(()),
                _ => Err(ApiError::ValidationError(format!(
                    "{} 必须在 1..={} 之间: '{}'",
                    key, MAX_BATCH_COMBINATIONS, value
                ))),
            },
            config_keys::SEARCH_MAX_RESULTS => value.parse::<usize>().map(|_| ()).map_err(|_| {
                ApiError::ValidationError(format!("{} 必须为非负整数: '{}'", key, value))
            }),
            config_keys::UI_LOCALE => {
                if i18n::SUPPORTED_LOCALES.contains(&value) {
                    Ok(())
                } else {
                    Err(ApiError::ValidationError(format!("不支持的语言: '{}'", value)))
                }
            }
            _ => Err(ApiError::InvalidInput(format!("不可修改的配置键: '{}'", key))),
        }
    }
}
