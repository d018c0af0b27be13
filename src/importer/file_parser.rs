// ==========================================
// Maur WMS - 文件解析器
// ==========================================
// 支持: CSV (.csv)
// 输出: 表头 + 按表头键控的原始行（值已去首尾空白）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 原始行（row_number 为文件中的行号,表头为第1行）
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub row_number: usize,
    pub fields: HashMap<String, String>,
}

/// 解析结果
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

// ==========================================
// FileParser Trait
// ==========================================
pub trait FileParser {
    fn parse_file(&self, file_path: &Path) -> ImportResult<ParsedFile>;
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_file(&self, file_path: &Path) -> ImportResult<ParsedFile> {
        let path = file_path;

        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .trim(csv::Trim::All)
            .from_reader(file);

        // 表头统一小写,兼容 "Nome"/"NOME"
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_lowercase())
            .collect();

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let mut fields = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    fields.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if fields.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(RawRecord {
                row_number: idx + 2,
                fields,
            });
        }

        Ok(ParsedFile { headers, records })
    }
}

// ==========================================
// 通用文件解析器（根据扩展名选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<ParsedFile> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_file(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
