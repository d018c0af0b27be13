// ==========================================
// Maur WMS - 操作日志领域模型
// ==========================================
// 红线: API 层所有写入必须记录
// 对齐: schema action_log 表
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// ==========================================
// ActionLog - 操作日志
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLog {
    pub action_id: String,              // 日志ID (UUID v4)
    pub action_type: String,            // 操作类型 (存储为字符串)
    pub action_ts: NaiveDateTime,       // 操作时间戳
    pub actor: String,                  // 操作人
    pub payload_json: Option<JsonValue>, // 操作参数 (JSON)
    pub detail: Option<String>,         // 详细描述
}

// ==========================================
// ActionType - 操作类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    RegisterProduct, // 商品登记
    UpdateQuantity,  // 数量调整
    AssignSlot,      // 库位分配
    BuildSlots,      // 批量生成库位
    CreateOrder,     // 创建订单
    UpdateOrderStatus, // 订单状态变更
    ImportProducts,  // CSV 导入商品
    UpdateConfig,    // 配置变更
}

impl ActionType {
    /// 转换为字符串 (用于数据库存储)
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::RegisterProduct => "RegisterProduct",
            ActionType::UpdateQuantity => "UpdateQuantity",
            ActionType::AssignSlot => "AssignSlot",
            ActionType::BuildSlots => "BuildSlots",
            ActionType::CreateOrder => "CreateOrder",
            ActionType::UpdateOrderStatus => "UpdateOrderStatus",
            ActionType::ImportProducts => "ImportProducts",
            ActionType::UpdateConfig => "UpdateConfig",
        }
    }

    /// 从字符串解析
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "RegisterProduct" => Some(ActionType::RegisterProduct),
            "UpdateQuantity" => Some(ActionType::UpdateQuantity),
            "AssignSlot" => Some(ActionType::AssignSlot),
            "BuildSlots" => Some(ActionType::BuildSlots),
            "CreateOrder" => Some(ActionType::CreateOrder),
            "UpdateOrderStatus" => Some(ActionType::UpdateOrderStatus),
            "ImportProducts" => Some(ActionType::ImportProducts),
            "UpdateConfig" => Some(ActionType::UpdateConfig),
            _ => None,
        }
    }
}

impl ActionLog {
    /// 创建新的操作日志（自动生成 UUID 与时间戳）
    pub fn new(action_type: ActionType, actor: &str) -> Self {
        Self {
            action_id: uuid::Uuid::new_v4().to_string(),
            action_type: action_type.as_str().to_string(),
            action_ts: chrono::Utc::now().naive_utc(),
            actor: actor.to_string(),
            payload_json: None,
            detail: None,
        }
    }

    pub fn with_payload(mut self, payload: JsonValue) -> Self {
        self.payload_json = Some(payload);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
