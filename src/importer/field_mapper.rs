// ==========================================
// Maur WMS - 字段映射器
// ==========================================
// 职责: 原始行 → ProductImportRow + 类型转换
// 表头别名:
// - name:      name / nome
// - quantity:  quantity / quantidade / qtd
// - slot_code: slot_code / slot / posicao / posição
// ==========================================

use crate::domain::product::normalize_slot_ref;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const NAME_ALIASES: &[&str] = &["name", "nome"];
pub const QUANTITY_ALIASES: &[&str] = &["quantity", "quantidade", "qtd"];
pub const SLOT_ALIASES: &[&str] = &["slot_code", "slot", "posicao", "posição"];

/// 映射后的商品行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImportRow {
    pub row_number: usize,
    pub name: String,
    pub quantity: i64,
    pub slot_code: Option<String>,
}

pub struct FieldMapper;

impl FieldMapper {
    /// 校验表头包含必需列（name、quantity）
    pub fn check_headers(&self, headers: &[String]) -> ImportResult<()> {
        for (canonical, aliases) in [("name", NAME_ALIASES), ("quantity", QUANTITY_ALIASES)] {
            if !aliases.iter().any(|a| headers.iter().any(|h| h == a)) {
                return Err(ImportError::MissingColumn(canonical.to_string()));
            }
        }
        Ok(())
    }

    pub fn map_to_product_row(&self, record: &RawRecord) -> ImportResult<ProductImportRow> {
        let row = record.row_number;

        let name = self
            .get_string(&record.fields, NAME_ALIASES)
            .ok_or_else(|| ImportError::MissingField {
                row,
                field: "name".to_string(),
            })?;

        let raw_qty = self
            .get_string(&record.fields, QUANTITY_ALIASES)
            .ok_or_else(|| ImportError::MissingField {
                row,
                field: "quantity".to_string(),
            })?;
        let quantity = raw_qty
            .parse::<i64>()
            .map_err(|_| ImportError::TypeConversionError {
                row,
                field: "quantity".to_string(),
                message: format!("无法解析为整数: {}", raw_qty),
            })?;
        if quantity < 0 {
            return Err(ImportError::NegativeValue {
                row,
                field: "quantity".to_string(),
                value: quantity,
            });
        }

        let slot_code = self
            .get_string(&record.fields, SLOT_ALIASES)
            .and_then(|s| normalize_slot_ref(&s));

        Ok(ProductImportRow {
            row_number: row,
            name,
            quantity,
            slot_code,
        })
    }

    /// 按别名顺序取第一个非空值
    fn get_string(&self, fields: &HashMap<String, String>, aliases: &[&str]) -> Option<String> {
        aliases
            .iter()
            .filter_map(|alias| fields.get(*alias))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
            .map(|v| v.to_string())
    }
}
