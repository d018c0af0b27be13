// ==========================================
// Maur WMS - 导入层
// ==========================================
// 职责: 外部文件 → 商品登记
// 支持: CSV
// ==========================================

pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod product_importer;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::{FieldMapper, ProductImportRow};
pub use file_parser::{CsvParser, FileParser, ParsedFile, RawRecord, UniversalFileParser};
pub use product_importer::{ProductImportReport, ProductImporter, RowFailure};
