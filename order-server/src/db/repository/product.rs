//! Product repository

use redb::{ReadableTable, ReadableTableMetadata};

use crate::db::store::PRODUCTS_TABLE;
use crate::db::{Store, StoreResult};
use shared::models::Product;

/// Menu catalog access
#[derive(Clone)]
pub struct ProductRepository {
    store: Store,
}

impl ProductRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Look up a product by ID
    pub fn find_by_id(&self, product_id: &str) -> StoreResult<Option<Product>> {
        let read_txn = self.store.begin_read()?;
        let table = read_txn.open_table(PRODUCTS_TABLE)?;

        match table.get(product_id)? {
            Some(value) => {
                let product: Product = serde_json::from_slice(value.value())?;
                Ok(Some(product))
            }
            None => Ok(None),
        }
    }

    /// All products, sorted by name for stable menu rendering
    pub fn find_all(&self) -> StoreResult<Vec<Product>> {
        let read_txn = self.store.begin_read()?;
        let table = read_txn.open_table(PRODUCTS_TABLE)?;

        let mut products = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let product: Product = serde_json::from_slice(value.value())?;
            products.push(product);
        }

        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    /// Insert or replace a product (menu maintenance / seeding)
    pub fn upsert(&self, product: &Product) -> StoreResult<()> {
        let txn = self.store.begin_write()?;
        {
            let mut table = txn.open_table(PRODUCTS_TABLE)?;
            let value = serde_json::to_vec(product)?;
            table.insert(product.id.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Number of products in the catalog
    pub fn count(&self) -> StoreResult<u64> {
        let read_txn = self.store.begin_read()?;
        let table = read_txn.open_table(PRODUCTS_TABLE)?;
        Ok(table.len()?)
    }
}
