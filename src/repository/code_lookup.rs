// ==========================================
// Maur WMS - 编码查重接口
// ==========================================
// 职责: 供编码生成器判断某字段下编码是否已存在
// 约束: 字段名走白名单映射,不拼接进 SQL
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};

/// 编码查重
///
/// 由各集合仓储实现; `field` 为集合中的唯一编码字段名
pub trait CodeLookup {
    /// 集合名（日志用）
    fn collection_name(&self) -> &'static str;

    /// 判断 `field` 字段下是否已存在 `code`
    fn code_exists(&self, field: &str, code: &str) -> RepositoryResult<bool>;
}

/// 未知字段错误
pub(crate) fn unknown_field(collection: &str, field: &str) -> RepositoryError {
    RepositoryError::FieldValueError {
        field: field.to_string(),
        message: format!("集合 {} 不支持按该字段查重", collection),
    }
}
