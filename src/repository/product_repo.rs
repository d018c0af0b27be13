// ==========================================
// Maur WMS - 商品数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化
// ==========================================

use crate::db::{open_sqlite_connection, TS_FORMAT};
use crate::domain::product::{NewProduct, Product};
use crate::repository::code_lookup::{unknown_field, CodeLookup};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const PRODUCT_COLUMNS: &str = "id, sku, name, quantity, slot_code, created_at, updated_at";

// ==========================================
// ProductRepository - 商品仓储
// ==========================================
/// 商品仓储
/// 职责: 管理 product 表的 CRUD 操作
pub struct ProductRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProductRepository {
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

    /// 插入商品,返回带行号的完整记录
    pub fn insert(&self, product: &NewProduct) -> RepositoryResult<Product> {
        let conn = self.get_conn()?;
        let now = Utc::now().naive_utc();
        let ts = now.format(TS_FORMAT).to_string();

        conn.execute(
            r#"
            INSERT INTO product (sku, name, quantity, slot_code, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            "#,
            params![
                product.sku,
                product.name,
                product.quantity,
                product.slot_code,
                ts,
            ],
        )?;
        let id = conn.last_insert_rowid();

        // 与读回的精度保持一致（秒级）
        let stamp = NaiveDateTime::parse_from_str(&ts, TS_FORMAT).unwrap_or(now);
        Ok(Product {
            id,
            sku: product.sku.clone(),
            name: product.name.clone(),
            quantity: product.quantity,
            slot_code: product.slot_code.clone(),
            created_at: stamp,
            updated_at: stamp,
        })
    }

    /// 更新库存数量
    ///
    /// # 返回
    /// - Ok(rows): 受影响行数（0 表示 SKU 不存在）
    pub fn update_quantity(&self, sku: &str, quantity: i64) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            "UPDATE product SET quantity = ?1, updated_at = ?2 WHERE sku = ?3",
            params![
                quantity,
                Utc::now().naive_utc().format(TS_FORMAT).to_string(),
                sku
            ],
        )?;
        Ok(rows)
    }

    /// 更新库位分配（None 表示清空）
    pub fn update_slot_code(&self, sku: &str, slot_code: Option<&str>) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            "UPDATE product SET slot_code = ?1, updated_at = ?2 WHERE sku = ?3",
            params![
                slot_code,
                Utc::now().naive_utc().format(TS_FORMAT).to_string(),
                sku
            ],
        )?;
        Ok(rows)
    }

    // ==========================================
    // 查询操作
    // ==========================================

    /// 按 SKU 查询
    pub fn find_by_sku(&self, sku: &str) -> RepositoryResult<Option<Product>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM product WHERE sku = ?1", PRODUCT_COLUMNS);
        let product = conn
            .query_row(&sql, params![sku], map_product_row)
            .optional()?;
        Ok(product)
    }

    /// 批量插入（单事务,任一行失败则整体回滚）
    pub fn insert_batch(&self, products: &[NewProduct]) -> RepositoryResult<Vec<Product>> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let now = Utc::now().naive_utc();
        let ts = now.format(TS_FORMAT).to_string();
        let stamp = NaiveDateTime::parse_from_str(&ts, TS_FORMAT).unwrap_or(now);

        let mut saved = Vec::with_capacity(products.len());
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO product (sku, name, quantity, slot_code, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?5)
                "#,
            )?;
            for product in products {
                stmt.execute(params![
                    product.sku,
                    product.name,
                    product.quantity,
                    product.slot_code,
                    ts,
                ])?;
                saved.push(Product {
                    id: tx.last_insert_rowid(),
                    sku: product.sku.clone(),
                    name: product.name.clone(),
                    quantity: product.quantity,
                    slot_code: product.slot_code.clone(),
                    created_at: stamp,
                    updated_at: stamp,
                });
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(saved)
    }

    /// 查询全部商品（按插入顺序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Product>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM product ORDER BY id ASC", PRODUCT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let products = stmt
            .query_map([], map_product_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(products)
    }

    /// 按谓词过滤（按插入顺序）
    pub fn search<F>(&self, predicate: F) -> RepositoryResult<Vec<Product>>
    where
        F: Fn(&Product) -> bool,
    {
        Ok(self.list_all()?.into_iter().filter(|p| predicate(p)).collect())
    }

    /// 查询某库位上数量大于0的商品
    pub fn find_in_stock_by_slot(&self, slot_code: &str) -> RepositoryResult<Vec<Product>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM product WHERE slot_code = ?1 AND quantity > 0 ORDER BY id ASC",
            PRODUCT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let products = stmt
            .query_map(params![slot_code], map_product_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(products)
    }

    /// 商品总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM product", [], |row| row.get(0))?;
        Ok(n)
    }
}

impl CodeLookup for ProductRepository {
    fn collection_name(&self) -> &'static str {
        "product"
    }

    fn code_exists(&self, field: &str, code: &str) -> RepositoryResult<bool> {
        let sql = match field {
            "sku" => "SELECT EXISTS(SELECT 1 FROM product WHERE sku = ?1)",
            _ => return Err(unknown_field(self.collection_name(), field)),
        };
        let conn = self.get_conn()?;
        let exists: bool = conn.query_row(sql, params![code], |row| row.get(0))?;
        Ok(exists)
    }
}

fn map_product_row(row: &Row) -> SqliteResult<Product> {
    Ok(Product {
        id: row.get(0)?,
        sku: row.get(1)?,
        name: row.get(2)?,
        quantity: row.get(3)?,
        slot_code: row.get(4)?,
        created_at: parse_ts(row, 5)?,
        updated_at: parse_ts(row, 6)?,
    })
}

/// 解析 TEXT 时间戳列
pub(crate) fn parse_ts(row: &Row, idx: usize) -> SqliteResult<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&raw, TS_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    fn setup() -> ProductRepository {
        ProductRepository::new(Arc::new(Mutex::new(open_in_memory().unwrap())))
    }

    fn new_product(sku: &str, name: &str, quantity: i64, slot: Option<&str>) -> NewProduct {
        NewProduct {
            sku: sku.to_string(),
            name: name.to_string(),
            quantity,
            slot_code: slot.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_insert_and_find_by_sku() {
        let repo = setup();
        let saved = repo
            .insert(&new_product("000123", "Parafuso", 5, Some("1-A-01-01")))
            .unwrap();
        assert!(saved.id > 0);

        let found = repo.find_by_sku("000123").unwrap().unwrap();
        assert_eq!(found, saved);
        assert!(repo.find_by_sku("999999").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_sku_rejected() {
        let repo = setup();
        repo.insert(&new_product("000001", "A", 1, None)).unwrap();
        let err = repo.insert(&new_product("000001", "B", 1, None)).unwrap_err();
        assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
    }

    #[test]
    fn test_negative_quantity_rejected_by_schema() {
        let repo = setup();
        let err = repo.insert(&new_product("000001", "A", -1, None)).unwrap_err();
        assert!(matches!(err, RepositoryError::ConstraintViolation(_)));
    }

    #[test]
    fn test_insert_batch_all_or_nothing() {
        let repo = setup();
        let saved = repo
            .insert_batch(&[
                new_product("000001", "A", 1, None),
                new_product("000002", "B", 2, Some("1-A-01-01")),
            ])
            .unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(repo.find_by_sku("000002").unwrap().unwrap(), saved[1]);

        // 第二行与已有 SKU 冲突: 第一行也不落库
        let err = repo
            .insert_batch(&[
                new_product("000003", "C", 1, None),
                new_product("000001", "D", 1, None),
            ])
            .unwrap_err();
        assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
        assert!(repo.find_by_sku("000003").unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 2);

        assert!(repo.insert_batch(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_list_all_keeps_insert_order() {
        let repo = setup();
        repo.insert(&new_product("000300", "C", 1, None)).unwrap();
        repo.insert(&new_product("000100", "A", 1, None)).unwrap();
        repo.insert(&new_product("000200", "B", 1, None)).unwrap();

        let skus: Vec<_> = repo.list_all().unwrap().into_iter().map(|p| p.sku).collect();
        assert_eq!(skus, vec!["000300", "000100", "000200"]);
        assert_eq!(repo.count().unwrap(), 3);
    }

    #[test]
    fn test_search_by_predicate() {
        let repo = setup();
        repo.insert(&new_product("000001", "Parafuso", 0, Some("1-A-01-01"))).unwrap();
        repo.insert(&new_product("000002", "Porca", 4, None)).unwrap();
        repo.insert(&new_product("000003", "Parafuso longo", 7, None)).unwrap();

        let skus: Vec<_> = repo
            .search(|p| p.name.starts_with("Parafuso"))
            .unwrap()
            .into_iter()
            .map(|p| p.sku)
            .collect();
        assert_eq!(skus, vec!["000001", "000003"]);

        assert_eq!(repo.search(|p| p.quantity > 0).unwrap().len(), 2);
        assert!(repo.search(|p| p.slot_code.as_deref() == Some("9-Z-01-01")).unwrap().is_empty());
        assert_eq!(repo.search(|_| true).unwrap().len(), 3);
    }

    #[test]
    fn test_find_in_stock_by_slot() {
        let repo = setup();
        repo.insert(&new_product("000001", "A", 3, Some("1-A-01-01"))).unwrap();
        repo.insert(&new_product("000002", "B", 0, Some("1-A-01-01"))).unwrap();
        repo.insert(&new_product("000003", "C", 2, Some("1-A-01-02"))).unwrap();

        let items = repo.find_in_stock_by_slot("1-A-01-01").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].sku, "000001");
        assert!(repo.find_in_stock_by_slot("9-Z-99-99").unwrap().is_empty());
    }

    #[test]
    fn test_updates() {
        let repo = setup();
        repo.insert(&new_product("000001", "A", 3, None)).unwrap();

        assert_eq!(repo.update_quantity("000001", 10).unwrap(), 1);
        assert_eq!(repo.update_slot_code("000001", Some("2-B-01-01")).unwrap(), 1);
        assert_eq!(repo.update_quantity("999999", 10).unwrap(), 0);

        let p = repo.find_by_sku("000001").unwrap().unwrap();
        assert_eq!(p.quantity, 10);
        assert_eq!(p.slot_code.as_deref(), Some("2-B-01-01"));

        repo.update_slot_code("000001", None).unwrap();
        assert!(repo.find_by_sku("000001").unwrap().unwrap().slot_code.is_none());
    }

    #[test]
    fn test_code_lookup() {
        let repo = setup();
        repo.insert(&new_product("000042", "A", 1, None)).unwrap();
        assert!(repo.code_exists("sku", "000042").unwrap());
        assert!(!repo.code_exists("sku", "000043").unwrap());
        assert!(matches!(
            repo.code_exists("name", "A"),
            Err(RepositoryError::FieldValueError { .. })
        ));
    }
}
