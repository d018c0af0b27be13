// ==========================================
// Maur WMS - 订单数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 说明: 订单仅用于履约统计,状态原样存储
// ==========================================

use crate::db::{open_sqlite_connection, TS_FORMAT};
use crate::domain::order::Order;
use crate::domain::types::OrderStatus;
use crate::repository::code_lookup::{unknown_field, CodeLookup};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::product_repo::parse_ts;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const ORDER_COLUMNS: &str = "id, order_no, status, created_at, updated_at";

// ==========================================
// OrderRepository - 订单仓储
// ==========================================
pub struct OrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl OrderRepository {
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

    /// 插入订单
    pub fn insert(&self, order_no: &str, status: OrderStatus) -> RepositoryResult<Order> {
        let conn = self.get_conn()?;
        let ts = Utc::now().naive_utc().format(TS_FORMAT).to_string();
        conn.execute(
            r#"
            INSERT INTO customer_order (order_no, status, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            "#,
            params![order_no, status.to_db_str(), ts],
        )?;
        let id = conn.last_insert_rowid();

        let sql = format!("SELECT {} FROM customer_order WHERE id = ?1", ORDER_COLUMNS);
        let order = conn.query_row(&sql, params![id], map_order_row)?;
        Ok(order)
    }

    /// 更新订单状态
    ///
    /// # 返回
    /// - Ok(rows): 受影响行数（0 表示订单不存在）
    pub fn update_status(&self, order_no: &str, status: OrderStatus) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            "UPDATE customer_order SET status = ?1, updated_at = ?2 WHERE order_no = ?3",
            params![
                status.to_db_str(),
                Utc::now().naive_utc().format(TS_FORMAT).to_string(),
                order_no
            ],
        )?;
        Ok(rows)
    }

    /// 按订单号查询
    pub fn find_by_order_no(&self, order_no: &str) -> RepositoryResult<Option<Order>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM customer_order WHERE order_no = ?1",
            ORDER_COLUMNS
        );
        let order = conn
            .query_row(&sql, params![order_no], map_order_row)
            .optional()?;
        Ok(order)
    }

    /// 查询全部订单（按插入顺序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Order>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM customer_order ORDER BY id ASC", ORDER_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let orders = stmt
            .query_map([], map_order_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(orders)
    }

    /// 按状态计数
    pub fn count_by_status(&self, status: OrderStatus) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row(
            "SELECT COUNT(*) FROM customer_order WHERE status = ?1",
            params![status.to_db_str()],
            |row| row.get(0),
        )?;
        Ok(n)
    }

    /// 订单总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM customer_order", [], |row| row.get(0))?;
        Ok(n)
    }
}

impl CodeLookup for OrderRepository {
    fn collection_name(&self) -> &'static str {
        "customer_order"
    }

    fn code_exists(&self, field: &str, code: &str) -> RepositoryResult<bool> {
        let sql = match field {
            "order_no" => "SELECT EXISTS(SELECT 1 FROM customer_order WHERE order_no = ?1)",
            _ => return Err(unknown_field(self.collection_name(), field)),
        };
        let conn = self.get_conn()?;
        let exists: bool = conn.query_row(sql, params![code], |row| row.get(0))?;
        Ok(exists)
    }
}

fn map_order_row(row: &Row) -> SqliteResult<Order> {
    let status_raw: String = row.get(2)?;
    // 未识别的状态一律按待处理对待
    let status = OrderStatus::parse(&status_raw).unwrap_or(OrderStatus::Pending);
    Ok(Order {
        id: row.get(0)?,
        order_no: row.get(1)?,
        status,
        created_at: parse_ts(row, 3)?,
        updated_at: parse_ts(row, 4)?,
    })
}
