// ==========================================
// Maur WMS - 商品检索
// ==========================================
// 匹配规则:
// - 检索词（去首尾空白）大小写不敏感地包含于商品名称,或
// - 检索词与 SKU 完全相等（大小写敏感）
// 空检索词返回 NoInput,不返回全部商品
// 结果保持集合插入顺序
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// 检索结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchOutcome {
    /// 未输入检索词
    NoInput,
    /// 匹配结果（可能为空）
    Matches(Vec<Product>),
}

impl SearchOutcome {
    /// 匹配到的商品（NoInput 视为空）
    pub fn items(&self) -> &[Product] {
        match self {
            SearchOutcome::NoInput => &[],
            SearchOutcome::Matches(items) => items,
        }
    }
}

/// 已规范化的检索词
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    lower: String,
}

impl SearchTerm {
    /// 去首尾空白; 空白检索词返回 None
    pub fn parse(term: &str) -> Option<Self> {
        let raw = term.trim();
        if raw.is_empty() {
            return None;
        }
        Some(Self {
            raw: raw.to_string(),
            lower: raw.to_lowercase(),
        })
    }

    /// 单个商品是否匹配（可直接用作仓储 search 的谓词）
    pub fn matches(&self, product: &Product) -> bool {
        product.name.to_lowercase().contains(&self.lower) || product.sku == self.raw
    }
}

/// 在商品序列上执行检索
pub fn search_products<I>(products: I, term: &str) -> SearchOutcome
where
    I: IntoIterator<Item = Product>,
{
    match SearchTerm::parse(term) {
        None => SearchOutcome::NoInput,
        Some(term) => SearchOutcome::Matches(
            products.into_iter().filter(|p| term.matches(p)).collect(),
        ),
    }
}
