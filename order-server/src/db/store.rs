//! redb-based storage for the ordering system
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `products` | `product_id` | `Product` | Menu catalog |
//! | `members` | `member_id` | `Member` | Loyalty ledger |
//! | `member_phones` | `phone` | `member_id` | Phone lookup index |
//! | `orders` | `order_id` | `Order` | Order headers |
//! | `order_items` | `(order_id, line)` | `OrderItem` | Order lines |
//!
//! Values are JSON-serialized. redb runs one write transaction at a time,
//! which is what makes the read-check-write point debit race-safe: two
//! concurrent redemptions against the same member serialize at the storage
//! layer, and the second one sees the balance left by the first.
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate` by default. The database file
//! is always in a consistent state, which matters for a shop counter box
//! that gets unplugged at closing time.

use redb::{Database, ReadableDatabase, TableDefinition, WriteTransaction};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use shared::{AppError, ErrorCode};

/// Menu catalog: key = product_id, value = JSON-serialized Product
pub(crate) const PRODUCTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("products");

/// Loyalty ledger: key = member_id, value = JSON-serialized Member
pub(crate) const MEMBERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("members");

/// Phone lookup index: key = phone, value = member_id
pub(crate) const MEMBER_PHONES_TABLE: TableDefinition<&str, &str> =
    TableDefinition::new("member_phones");

/// Order headers: key = order_id, value = JSON-serialized Order
pub(crate) const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

/// Order lines: key = (order_id, line index), value = JSON-serialized OrderItem
pub(crate) const ORDER_ITEMS_TABLE: TableDefinition<(&str, u32), &[u8]> =
    TableDefinition::new("order_items");

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Insufficient points: balance={balance}, required={required}")]
    InsufficientPoints { balance: i64, required: i64 },
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::OrderNotFound(id) => AppError::order_not_found(id),
            StoreError::MemberNotFound(phone) => AppError::member_not_found(phone),
            StoreError::ProductNotFound(id) => AppError::product_not_found(id),
            StoreError::InsufficientPoints { balance, required } => {
                AppError::insufficient_points(balance, required)
            }
            other => AppError::with_message(ErrorCode::DatabaseError, other.to_string()),
        }
    }
}

/// Embedded database handle, cheap to clone
#[derive(Clone)]
pub struct Store {
    db: Arc<Database>,
}

impl Store {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Self::init_tables(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init_tables(db)
    }

    fn init_tables(db: Database) -> StoreResult<Self> {
        // Create all tables up front so readers never hit TableDoesNotExist
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(PRODUCTS_TABLE)?;
            let _ = write_txn.open_table(MEMBERS_TABLE)?;
            let _ = write_txn.open_table(MEMBER_PHONES_TABLE)?;
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(ORDER_ITEMS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StoreResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    /// Begin a read transaction
    pub fn begin_read(&self) -> StoreResult<redb::ReadTransaction> {
        Ok(self.db.begin_read()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory_initializes_tables() {
        let store = Store::open_in_memory().unwrap();

        // All tables readable immediately after open
        let read_txn = store.begin_read().unwrap();
        assert!(read_txn.open_table(PRODUCTS_TABLE).is_ok());
        assert!(read_txn.open_table(MEMBERS_TABLE).is_ok());
        assert!(read_txn.open_table(MEMBER_PHONES_TABLE).is_ok());
        assert!(read_txn.open_table(ORDERS_TABLE).is_ok());
        assert!(read_txn.open_table(ORDER_ITEMS_TABLE).is_ok());
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.redb");

        let store = Store::open(&path).unwrap();
        drop(store);

        // Reopen works
        let store = Store::open(&path).unwrap();
        let read_txn = store.begin_read().unwrap();
        assert!(read_txn.open_table(ORDERS_TABLE).is_ok());
    }

    #[test]
    fn test_error_mapping() {
        let err: AppError = StoreError::InsufficientPoints {
            balance: 50,
            required: 100,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientPoints);

        let err: AppError = StoreError::OrderNotFound("o-1".into()).into();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }
}
