// ==========================================
// Maur WMS - 唯一编码生成器
// ==========================================
// 规则: 在 [1, 999999] 内均匀随机取数,左补零到6位,
//       若集合中该字段已存在则重抽,直到不重复
// 约束: 单用户假设,不保证并发调用方之间的唯一性
// ==========================================

use crate::repository::code_lookup::CodeLookup;
use crate::repository::error::RepositoryResult;
use rand::Rng;
use tracing::debug;

/// 编码取值下界
pub const CODE_MIN: u32 = 1;
/// 编码取值上界
pub const CODE_MAX: u32 = 999_999;

/// 生成一个在 `collection` 的 `field` 字段下不存在的6位数字编码
///
/// # 示例
/// ```no_run
/// use maur_wms::engine::code_generator::generate_unique_code;
/// use maur_wms::repository::ProductRepository;
///
/// let repo = ProductRepository::open("wms.db").unwrap();
/// let sku = generate_unique_code(&repo, "sku").unwrap();
/// assert_eq!(sku.len(), 6);
/// ```
pub fn generate_unique_code<L>(collection: &L, field: &str) -> RepositoryResult<String>
where
    L: CodeLookup + ?Sized,
{
    generate_unique_code_with(&mut rand::thread_rng(), collection, field)
}

/// 使用指定随机源生成编码（测试可传入固定种子）
pub fn generate_unique_code_with<R, L>(
    rng: &mut R,
    collection: &L,
    field: &str,
) -> RepositoryResult<String>
where
    R: Rng + ?Sized,
    L: CodeLookup + ?Sized,
{
    let mut attempts: u64 = 0;
    loop {
        attempts += 1;
        let code = format_code(rng.gen_range(CODE_MIN..=CODE_MAX));
        if !collection.code_exists(field, &code)? {
            debug!(
                collection = collection.collection_name(),
                field,
                attempts,
                "生成唯一编码"
            );
            return Ok(code);
        }
    }
}

/// 左补零到6位
pub fn format_code(n: u32) -> String {
    format!("{:06}", n)
}
