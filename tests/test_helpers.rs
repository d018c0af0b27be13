// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时数据库初始化
// ==========================================

#![allow(dead_code)]

use rusqlite::Connection;
use std::error::Error;
use tempfile::NamedTempFile;

use maur_wms::db::{configure_sqlite_connection, ensure_schema};

/// 创建临时测试数据库并建表
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("临时文件路径不是合法 UTF-8")?
        .to_string();

    let conn = open_test_connection(&db_path)?;
    ensure_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开测试连接（统一 PRAGMA）
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 统计表行数
pub fn count_rows(conn: &Connection, table: &str) -> Result<i64, Box<dyn Error>> {
    let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })?;
    Ok(n)
}
