// ==========================================
// Maur WMS - 库位数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 红线: 库位编码唯一（先查后插 + UNIQUE 兜底）
// ==========================================

use crate::db::{open_sqlite_connection, TS_FORMAT};
use crate::domain::slot::Slot;
use crate::domain::types::SlotCode;
use crate::repository::code_lookup::{unknown_field, CodeLookup};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::product_repo::parse_ts;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const SLOT_COLUMNS: &str = "id, code, depot, letter, shelf, level, created_at";

// ==========================================
// SlotRepository - 库位仓储
// ==========================================
pub struct SlotRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SlotRepository {
    /// 从共享连接创建仓储
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 独立打开数据库文件
    pub fn open(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self::new(Arc::new(Mutex::new(conn))))
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 批量插入库位,已存在的编码跳过
    ///
    /// 按传入顺序逐个"先查后插",整批在同一事务内完成
    ///
    /// # 返回
    /// - Ok(Vec<String>): 本次新建的库位编码（保持传入顺序）
    pub fn insert_missing(&self, codes: &[SlotCode]) -> RepositoryResult<Vec<String>> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let ts = Utc::now().naive_utc().format(TS_FORMAT).to_string();
        let mut created = Vec::new();
        {
            let mut exists_stmt =
                tx.prepare("SELECT EXISTS(SELECT 1 FROM slot WHERE code = ?1)")?;
            let mut insert_stmt = tx.prepare(
                r#"
                INSERT INTO slot (code, depot, letter, shelf, level, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )?;

            for code in codes {
                let text = code.to_string();
                let exists: bool = exists_stmt.query_row(params![text], |row| row.get(0))?;
                if exists {
                    continue;
                }
                insert_stmt.execute(params![
                    text,
                    code.depot,
                    code.letter.to_string(),
                    code.shelf,
                    code.level,
                    ts,
                ])?;
                created.push(text);
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(created)
    }

    // ==========================================
    // 查询操作
    // ==========================================

    /// 按编码查询
    pub fn find_by_code(&self, code: &str) -> RepositoryResult<Option<Slot>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM slot WHERE code = ?1", SLOT_COLUMNS);
        let slot = conn.query_row(&sql, params![code], map_slot_row).optional()?;
        Ok(slot)
    }

    /// 编码是否存在
    pub fn exists(&self, code: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM slot WHERE code = ?1)",
            params![code],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// 查询全部库位（按插入顺序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Slot>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM slot ORDER BY id ASC", SLOT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let slots = stmt
            .query_map([], map_slot_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(slots)
    }

    /// 查询某仓库的库位（按插入顺序）
    pub fn list_by_depot(&self, depot: u32) -> RepositoryResult<Vec<Slot>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM slot WHERE depot = ?1 ORDER BY id ASC",
            SLOT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let slots = stmt
            .query_map(params![depot], map_slot_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(slots)
    }

    /// 全部库位编码
    pub fn list_codes(&self) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT code FROM slot ORDER BY id ASC")?;
        let codes = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(codes)
    }

    /// 库位总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM slot", [], |row| row.get(0))?;
        Ok(n)
    }
}

impl CodeLookup for SlotRepository {
    fn collection_name(&self) -> &'static str {
        "slot"
    }

    fn code_exists(&self, field: &str, code: &str) -> RepositoryResult<bool> {
        match field {
            "code" => self.exists(code),
            _ => Err(unknown_field(self.collection_name(), field)),
        }
    }
}

fn map_slot_row(row: &Row) -> SqliteResult<Slot> {
    Ok(Slot {
        id: row.get(0)?,
        code: row.get(1)?,
        depot: row.get(2)?,
        letter: row.get(3)?,
        shelf: row.get(4)?,
        level: row.get(5)?,
        created_at: parse_ts(row, 6)?,
    })
}
