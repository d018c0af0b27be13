// ==========================================
// Maur WMS - 商品批量导入器
// ==========================================
// 流程:
// 1) 解析文件 → 原始行
// 2) 校验表头
// 3) 逐行映射; 行级错误记入报告并跳过该行
// 4) 合法行生成 SKU（库内及本批次内均不重复）
// 5) 单事务写入 product; 存储失败整体回滚,不留部分数据
// ==========================================

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::domain::product::NewProduct;
use crate::engine::code_generator::generate_unique_code;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::repository::code_lookup::CodeLookup;
use crate::repository::error::RepositoryResult;
use crate::repository::{ProductRepository, SlotRepository};

/// 被跳过的行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowFailure {
    pub row_number: usize,
    pub message: String,
}

/// 导入报告
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductImportReport {
    pub total_rows: usize,
    pub imported_skus: Vec<String>,
    pub failures: Vec<RowFailure>,
    /// 引用了未登记库位的行数（仍会导入）
    pub unknown_slot_refs: usize,
}

impl ProductImportReport {
    pub fn imported(&self) -> usize {
        self.imported_skus.len()
    }
}

/// SKU 查重: 已落库的 + 本批次已分配的
struct BatchSkuLookup<'a> {
    repo: &'a ProductRepository,
    reserved: &'a HashSet<String>,
}

impl CodeLookup for BatchSkuLookup<'_> {
    fn collection_name(&self) -> &'static str {
        self.repo.collection_name()
    }

    fn code_exists(&self, field: &str, code: &str) -> RepositoryResult<bool> {
        Ok(self.reserved.contains(code) || self.repo.code_exists(field, code)?)
    }
}

pub struct ProductImporter {
    product_repo: Arc<ProductRepository>,
    slot_repo: Arc<SlotRepository>,
    parser: UniversalFileParser,
    mapper: FieldMapper,
}

impl ProductImporter {
    pub fn new(product_repo: Arc<ProductRepository>, slot_repo: Arc<SlotRepository>) -> Self {
        Self {
            product_repo,
            slot_repo,
            parser: UniversalFileParser,
            mapper: FieldMapper,
        }
    }

    /// 从文件导入商品
    ///
    /// 文件级错误（不存在、格式不支持、表头缺失）直接返回 Err,不写入任何数据;
    /// 写入阶段的存储错误同样返回 Err,已处理的行随事务回滚
    #[instrument(skip(self, file_path), fields(path = %file_path.as_ref().display()))]
    pub fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<ProductImportReport> {
        let parsed = self.parser.parse(file_path.as_ref())?;
        self.mapper.check_headers(&parsed.headers)?;

        let mut report = ProductImportReport {
            total_rows: parsed.records.len(),
            ..Default::default()
        };
        let mut pending: Vec<NewProduct> = Vec::new();
        let mut reserved: HashSet<String> = HashSet::new();

        for record in &parsed.records {
            let row = match self.mapper.map_to_product_row(record) {
                Ok(row) => row,
                Err(e) if e.is_row_level() => {
                    warn!(row = record.row_number, error = %e, "导入行被跳过");
                    report.failures.push(RowFailure {
                        row_number: record.row_number,
                        message: e.to_string(),
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };

            if let Some(code) = row.slot_code.as_deref() {
                if !self.slot_repo.exists(code)? {
                    warn!(row = row.row_number, slot_code = code, "引用了未登记的库位");
                    report.unknown_slot_refs += 1;
                }
            }

            let lookup = BatchSkuLookup {
                repo: self.product_repo.as_ref(),
                reserved: &reserved,
            };
            let sku = generate_unique_code(&lookup, "sku")?;
            reserved.insert(sku.clone());
            pending.push(NewProduct {
                sku,
                name: row.name,
                quantity: row.quantity,
                slot_code: row.slot_code,
            });
        }

        let saved = self.product_repo.insert_batch(&pending)?;
        report.imported_skus = saved.into_iter().map(|p| p.sku).collect();

        info!(
            total = report.total_rows,
            imported = report.imported(),
            failed = report.failures.len(),
            "商品导入完成"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::error::ImportError;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::Builder;

    fn importer_with_conn() -> (ProductImporter, Arc<ProductRepository>, Arc<Mutex<rusqlite::Connection>>) {
        let conn = Arc::new(Mutex::new(crate::db::open_in_memory().unwrap()));
        let products = Arc::new(ProductRepository::new(conn.clone()));
        let slots = Arc::new(SlotRepository::new(conn.clone()));
        (ProductImporter::new(products.clone(), slots), products, conn)
    }

    fn importer() -> (ProductImporter, Arc<ProductRepository>) {
        let (importer, products, _) = importer_with_conn();
        (importer, products)
    }

    fn csv_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_import_skips_bad_rows() {
        let (importer, products) = importer();
        let file = csv_file("nome,quantidade,posicao\nParafuso,10,1-A-01-01\nPorca,abc,\nArruela,0,\n");

        let report = importer.import_file(file.path()).unwrap();
        assert_eq!(report.total_rows, 3);
        assert_eq!(report.imported(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].row_number, 3);
        assert_eq!(report.unknown_slot_refs, 1);

        assert_eq!(products.count().unwrap(), 2);
        for sku in &report.imported_skus {
            assert_eq!(sku.len(), 6);
            assert!(products.find_by_sku(sku).unwrap().is_some());
        }
    }

    #[test]
    fn test_missing_column_writes_nothing() {
        let (importer, products) = importer();
        let file = csv_file("nome,posicao\nParafuso,1-A-01-01\n");

        let err = importer.import_file(file.path()).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn(_)));
        assert_eq!(products.count().unwrap(), 0);
    }

    #[test]
    fn test_storage_error_rolls_back_whole_file() {
        let (importer, products, conn) = importer_with_conn();
        conn.lock()
            .unwrap()
            .execute_batch(
                "CREATE TRIGGER reject_falha BEFORE INSERT ON product
                 WHEN NEW.name = 'Falha'
                 BEGIN SELECT RAISE(ABORT, 'falha simulada'); END;",
            )
            .unwrap();

        let file = csv_file("nome,quantidade\nParafuso,1\nPorca,2\nFalha,3\nArruela,4\n");
        let err = importer.import_file(file.path()).unwrap_err();
        assert!(matches!(err, ImportError::Repository(_)));
        assert_eq!(products.count().unwrap(), 0);
    }

    #[test]
    fn test_batch_sku_lookup_sees_reserved() {
        let (_, products) = importer();
        products
            .insert(&NewProduct {
                sku: "000001".to_string(),
                name: "A".to_string(),
                quantity: 1,
                slot_code: None,
            })
            .unwrap();

        let reserved: HashSet<String> = ["000002".to_string()].into_iter().collect();
        let lookup = BatchSkuLookup {
            repo: products.as_ref(),
            reserved: &reserved,
        };
        assert!(lookup.code_exists("sku", "000001").unwrap());
        assert!(lookup.code_exists("sku", "000002").unwrap());
        assert!(!lookup.code_exists("sku", "000003").unwrap());
    }
}
