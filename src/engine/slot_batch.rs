// ==========================================
// Maur WMS - 库位批量生成引擎
// ==========================================
// 输入: 仓库号 + 字母区间(含两端) + 货架数 + 层数
// 输出: 新建库位记录 + 批次报告
// ==========================================
// 红线: 遍历顺序固定 字母(外) → 货架 1..=N(中) → 层 1..=M(内)
// 红线: 幂等,已存在的编码跳过,重叠批次只补差集
// 红线: 参数非法时返回错误,不写入任何数据
// 红线: 组合总数超过 MAX_BATCH_COMBINATIONS 时拒绝,不预分配
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::domain::types::SlotCode;
use crate::engine::error::{EngineError, EngineResult};
use crate::repository::slot_repo::SlotRepository;

/// 单个批次允许的组合总数硬上限
pub const MAX_BATCH_COMBINATIONS: u64 = 1_000_000;

// ==========================================
// SlotBatchSpec - 批次参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotBatchSpec {
    pub depot: u32,
    pub letter_from: char,
    pub letter_to: char,
    pub shelf_count: u32,
    pub level_count: u32,
}

impl SlotBatchSpec {
    pub fn new(depot: u32, letter_from: char, letter_to: char, shelf_count: u32, level_count: u32) -> Self {
        Self {
            depot,
            letter_from,
            letter_to,
            shelf_count,
            level_count,
        }
    }

    /// 校验前置条件
    pub fn validate(&self) -> EngineResult<()> {
        if !self.letter_from.is_ascii_uppercase()
            || !self.letter_to.is_ascii_uppercase()
            || self.letter_from > self.letter_to
        {
            return Err(EngineError::InvalidLetterRange {
                from: self.letter_from,
                to: self.letter_to,
            });
        }
        if self.shelf_count == 0 {
            return Err(EngineError::InvalidCount {
                field: "shelf_count",
                value: self.shelf_count,
            });
        }
        if self.level_count == 0 {
            return Err(EngineError::InvalidCount {
                field: "level_count",
                value: self.level_count,
            });
        }
        let requested = self.combination_count();
        if requested > u128::from(MAX_BATCH_COMBINATIONS) {
            return Err(EngineError::BatchTooLarge {
                requested,
                max: MAX_BATCH_COMBINATIONS,
            });
        }
        Ok(())
    }

    /// 批次组合总数 = 字母数 × 货架数 × 层数
    ///
    /// u128 下三个因子之积不会溢出（26 × u32::MAX × u32::MAX < 2^70）
    pub fn combination_count(&self) -> u128 {
        if self.letter_from > self.letter_to {
            return 0;
        }
        let letters = u128::from(self.letter_to) - u128::from(self.letter_from) + 1;
        letters * u128::from(self.shelf_count) * u128::from(self.level_count)
    }
}

/// 按固定顺序枚举批次内全部库位编码（不访问数据库）
pub fn enumerate_slot_codes(spec: &SlotBatchSpec) -> EngineResult<Vec<SlotCode>> {
    spec.validate()?;

    // validate 之后组合总数不超过 MAX_BATCH_COMBINATIONS
    let capacity = usize::try_from(spec.combination_count()).unwrap_or(0);
    let mut codes = Vec::with_capacity(capacity);
    for letter in spec.letter_from..=spec.letter_to {
        for shelf in 1..=spec.shelf_count {
            for level in 1..=spec.level_count {
                codes.push(SlotCode::new(spec.depot, letter, shelf, level));
            }
        }
    }
    Ok(codes)
}

// ==========================================
// SlotBatchReport - 批次结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotBatchReport {
    pub requested: usize,           // 批次组合总数
    pub created: usize,             // 新建数量
    pub skipped: usize,             // 已存在而跳过的数量
    pub created_codes: Vec<String>, // 新建编码（按生成顺序）
}

// ==========================================
// SlotBatchBuilder - 库位批量生成器
// ==========================================
pub struct SlotBatchBuilder {
    slot_repo: Arc<SlotRepository>,
}

impl SlotBatchBuilder {
    pub fn new(slot_repo: Arc<SlotRepository>) -> Self {
        Self { slot_repo }
    }

    /// 批量生成库位
    ///
    /// # 参数
    /// - depot: 仓库号（原样输出,不补零）
    /// - letter_from / letter_to: 大写字母区间,含两端
    /// - shelf_count / level_count: 必须大于0
    ///
    /// # 返回
    /// - Ok(SlotBatchReport): 新建/跳过统计
    /// - Err(EngineError): 参数非法或存储失败
    pub fn build_slots(
        &self,
        depot: u32,
        letter_from: char,
        letter_to: char,
        shelf_count: u32,
        level_count: u32,
    ) -> EngineResult<SlotBatchReport> {
        self.build(&SlotBatchSpec::new(
            depot,
            letter_from,
            letter_to,
            shelf_count,
            level_count,
        ))
    }

    #[instrument(skip(self), fields(depot = spec.depot))]
    pub fn build(&self, spec: &SlotBatchSpec) -> EngineResult<SlotBatchReport> {
        let codes = enumerate_slot_codes(spec)?;
        let requested = codes.len();

        let created_codes = self.slot_repo.insert_missing(&codes)?;
        let created = created_codes.len();

        info!(
            requested,
            created,
            skipped = requested - created,
            "库位批量生成完成: {}-{}..{}",
            spec.depot,
            spec.letter_from,
            spec.letter_to
        );

        Ok(SlotBatchReport {
            requested,
            created,
            skipped: requested - created,
            created_codes,
        })
    }
}
