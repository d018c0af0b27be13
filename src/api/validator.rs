// ==========================================
// Maur WMS - 输入校验器
// ==========================================
// 职责: 表单原始字符串 → 类型化参数
// 原则: 校验失败时不发生任何写入
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::OrderStatus;

/// 解析库存数量（非负整数）
pub fn parse_quantity(raw: &str) -> ApiResult<i64> {
    let value = raw.trim();
    let qty = value
        .parse::<i64>()
        .map_err(|_| ApiError::InvalidInput(format!("数量必须为整数: '{}'", value)))?;
    if qty < 0 {
        return Err(ApiError::ValidationError(format!("数量不能为负数: {}", qty)));
    }
    Ok(qty)
}

/// 解析正整数计数（货架数/层数）
pub fn parse_count(field: &str, raw: &str) -> ApiResult<u32> {
    let value = raw.trim();
    let count = value
        .parse::<u32>()
        .map_err(|_| ApiError::InvalidInput(format!("{}必须为正整数: '{}'", field, value)))?;
    if count == 0 {
        return Err(ApiError::ValidationError(format!("{}必须大于0", field)));
    }
    Ok(count)
}

/// 计数上限校验
pub fn check_count_limit(field: &str, value: u32, max: u32) -> ApiResult<()> {
    if value > max {
        return Err(ApiError::ValidationError(format!(
            "{}超出上限: {} > {}",
            field, value, max
        )));
    }
    Ok(())
}

/// 解析仓库号（非负整数）
pub fn parse_depot(raw: &str) -> ApiResult<u32> {
    let value = raw.trim();
    value
        .parse::<u32>()
        .map_err(|_| ApiError::InvalidInput(format!("仓库号必须为非负整数: '{}'", value)))
}

/// 解析单个字母（转大写,限 A-Z）
pub fn parse_letter(field: &str, raw: &str) -> ApiResult<char> {
    let value = raw.trim();
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_uppercase()),
        _ => Err(ApiError::InvalidInput(format!(
            "{}必须为单个字母 A-Z: '{}'",
            field, value
        ))),
    }
}

/// 校验商品名称（非空）
pub fn require_name(raw: &str) -> ApiResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ApiError::ValidationError("商品名称不能为空".to_string()));
    }
    Ok(name.to_string())
}

/// 解析订单状态
///
/// 接受规范值（PENDING/PICKING/SHIPPED）及葡语别名
/// （PENDENTE/SEPARANDO/EXPEDIDO）,大小写不敏感
pub fn parse_order_status(raw: &str) -> ApiResult<OrderStatus> {
    let value = raw.trim();
    if let Some(status) = OrderStatus::parse(value) {
        return Ok(status);
    }
    match value.to_uppercase().as_str() {
        "PENDENTE" => Ok(OrderStatus::Pending),
        "SEPARANDO" | "SEPARACAO" | "SEPARAÇÃO" => Ok(OrderStatus::Picking),
        "EXPEDIDO" => Ok(OrderStatus::Shipped),
        _ => Err(ApiError::InvalidInput(format!("未知的订单状态: '{}'", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(" 5 ").unwrap(), 5);
        assert_eq!(parse_quantity("0").unwrap(), 0);
        assert!(matches!(parse_quantity("abc"), Err(ApiError::InvalidInput(_))));
        assert!(matches!(parse_quantity(""), Err(ApiError::InvalidInput(_))));
        assert!(matches!(parse_quantity("-1"), Err(ApiError::ValidationError(_))));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("货架数", "3").unwrap(), 3);
        assert!(matches!(parse_count("货架数", "0"), Err(ApiError::ValidationError(_))));
        assert!(matches!(parse_count("货架数", "-2"), Err(ApiError::InvalidInput(_))));
        assert!(matches!(parse_count("层数", "x"), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_check_count_limit() {
        assert!(check_count_limit("层数", 99, 99).is_ok());
        assert!(check_count_limit("层数", 100, 99).is_err());
    }

    #[test]
    fn test_parse_letter() {
        assert_eq!(parse_letter("起始字母", "a").unwrap(), 'A');
        assert_eq!(parse_letter("起始字母", " Z ").unwrap(), 'Z');
        assert!(parse_letter("起始字母", "AB").is_err());
        assert!(parse_letter("起始字母", "1").is_err());
        assert!(parse_letter("起始字母", "").is_err());
        assert!(parse_letter("起始字母", "Ç").is_err());
    }

    #[test]
    fn test_parse_depot() {
        assert_eq!(parse_depot("1").unwrap(), 1);
        assert!(parse_depot("-1").is_err());
        assert!(parse_depot("um").is_err());
    }

    #[test]
    fn test_require_name() {
        assert_eq!(require_name("  Parafuso ").unwrap(), "Parafuso");
        assert!(require_name("   ").is_err());
    }

    #[test]
    fn test_parse_order_status_aliases() {
        assert_eq!(parse_order_status("shipped").unwrap(), OrderStatus::Shipped);
        assert_eq!(parse_order_status("EXPEDIDO").unwrap(), OrderStatus::Shipped);
        assert_eq!(parse_order_status("pendente").unwrap(), OrderStatus::Pending);
        assert_eq!(parse_order_status("Separando").unwrap(), OrderStatus::Picking);
        assert!(parse_order_status("CANCELADO").is_err());
    }
}
