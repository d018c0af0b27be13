// ==========================================
// Maur WMS - 商品导入 API
// ==========================================
// 职责: 封装 CSV 批量导入,记录 ActionLog
// ==========================================

use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use tracing::instrument;

use crate::api::error::ApiResult;
use crate::api::record_action;
use crate::domain::action_log::{ActionLog, ActionType};
use crate::importer::{ProductImportReport, ProductImporter};
use crate::repository::ActionLogRepository;

pub struct ImportApi {
    importer: Arc<ProductImporter>,
    action_log_repo: Arc<ActionLogRepository>,
}

impl ImportApi {
    pub fn new(importer: Arc<ProductImporter>, action_log_repo: Arc<ActionLogRepository>) -> Self {
        Self {
            importer,
            action_log_repo,
        }
    }

    /// 从 CSV 导入商品
    ///
    /// 表头: name,quantity,slot_code（或 nome,quantidade,posicao）
    /// 非法行跳过并记入报告; 文件级错误不写入任何数据
    #[instrument(skip(self))]
    pub fn import_products(&self, file_path: &str, actor: &str) -> ApiResult<ProductImportReport> {
        let _perf = crate::perf::PerfGuard::new("import_api.import_products");

        let report = self.importer.import_file(Path::new(file_path))?;

        record_action(
            &self.action_log_repo,
            ActionLog::new(ActionType::ImportProducts, actor)
                .with_payload(json!({
                    "file_path": file_path,
                    "total_rows": report.total_rows,
                    "imported": report.imported(),
                    "failed": report.failures.len(),
                    "unknown_slot_refs": report.unknown_slot_refs,
                }))
                .with_detail(format!("导入 {} 行", report.imported())),
        );

        Ok(report)
    }
}
