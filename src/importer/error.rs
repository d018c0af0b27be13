// ==========================================
// Maur WMS - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::i18n;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 数据映射错误 =====
    #[error("表头缺失: 需要列 {0}")]
    MissingColumn(String),

    #[error("必填字段为空 (行 {row}, 字段 {field})")]
    MissingField { row: usize, field: String },

    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("数值范围错误 (行 {row}, 字段 {field}): 值 {value} 不能为负数")]
    NegativeValue { row: usize, field: String, value: i64 },

    // ===== 仓储错误 =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ImportError {
    /// 行级错误（只影响单行,不中断整个文件）
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            ImportError::MissingField { .. }
                | ImportError::TypeConversionError { .. }
                | ImportError::NegativeValue { .. }
        )
    }

    /// 面向用户的提示文案（文件级错误按当前语言,其余沿用错误描述）
    pub fn user_message(&self) -> String {
        match self {
            ImportError::FileNotFound(path) => {
                i18n::t_with_args("import.file_not_found", &[("path", path.as_str())])
            }
            ImportError::UnsupportedFormat(ext) => {
                i18n::t_with_args("import.unsupported_format", &[("ext", ext.as_str())])
            }
            ImportError::MissingColumn(column) => {
                i18n::t_with_args("import.missing_column", &[("column", column.as_str())])
            }
            other => other.to_string(),
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
