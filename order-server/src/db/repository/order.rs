//! Order repository
//!
//! Order headers and their items are written in a single transaction, so
//! an order is either fully visible (header plus every line) or absent.
//! A crash between the two can never leave a half-written order behind.

use redb::{ReadTransaction, ReadableTable};

use crate::db::store::{ORDERS_TABLE, ORDER_ITEMS_TABLE};
use crate::db::{Store, StoreError, StoreResult};
use shared::models::{Order, OrderDetail, OrderItem, OrderStatus};

#[derive(Clone)]
pub struct OrderRepository {
    store: Store,
}

impl OrderRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Persist an order with its items atomically
    pub fn create(&self, order: &Order, items: &[OrderItem]) -> StoreResult<()> {
        let txn = self.store.begin_write()?;
        {
            let mut orders = txn.open_table(ORDERS_TABLE)?;
            let value = serde_json::to_vec(order)?;
            orders.insert(order.id.as_str(), value.as_slice())?;

            let mut lines = txn.open_table(ORDER_ITEMS_TABLE)?;
            for (i, item) in items.iter().enumerate() {
                let value = serde_json::to_vec(item)?;
                lines.insert((order.id.as_str(), i as u32), value.as_slice())?;
            }
        }
        txn.commit()?;
        Ok(())
    }

    /// Fetch an order with its items
    pub fn find_by_id(&self, order_id: &str) -> StoreResult<Option<OrderDetail>> {
        let read_txn = self.store.begin_read()?;
        let orders = read_txn.open_table(ORDERS_TABLE)?;

        let order: Order = match orders.get(order_id)? {
            Some(value) => serde_json::from_slice(value.value())?,
            None => return Ok(None),
        };

        let items = Self::items_for(&read_txn, order_id)?;
        Ok(Some(OrderDetail { order, items }))
    }

    /// Orders still waiting for a receipt: accepted and not yet printed
    ///
    /// Oldest first, so the printer works through the backlog in the order
    /// customers placed it.
    pub fn find_pending_print(&self) -> StoreResult<Vec<OrderDetail>> {
        let mut details = self.find_where(|order| {
            order.status == OrderStatus::Pending && !order.is_printed
        })?;
        details.sort_by_key(|d| d.order.created_at);
        Ok(details)
    }

    /// Active (non-archived) orders for a phone number, newest first
    pub fn find_by_phone(&self, phone: &str) -> StoreResult<Vec<OrderDetail>> {
        let mut details = self.find_where(|order| {
            order.customer_phone == phone && !order.status.is_archived()
        })?;
        details.sort_by_key(|d| std::cmp::Reverse(d.order.created_at));
        Ok(details)
    }

    /// Archived orders created at or after the cutoff, newest first
    pub fn find_archived_since(&self, cutoff_millis: i64) -> StoreResult<Vec<OrderDetail>> {
        let mut details = self.find_where(|order| {
            order.status.is_archived() && order.created_at >= cutoff_millis
        })?;
        details.sort_by_key(|d| std::cmp::Reverse(d.order.created_at));
        Ok(details)
    }

    /// Move an order to a new status
    pub fn update_status(&self, order_id: &str, status: OrderStatus) -> StoreResult<Order> {
        self.mutate(order_id, |order| {
            order.status = status;
        })
    }

    /// Record that a receipt was printed for this order
    ///
    /// Returns whether the order had already been marked, so callers can
    /// distinguish the first acknowledgement from a duplicate. Both cases
    /// succeed: the printer bridge retries marks it is unsure about.
    pub fn mark_printed(&self, order_id: &str) -> StoreResult<bool> {
        let mut already = false;
        self.mutate(order_id, |order| {
            already = order.is_printed;
            order.is_printed = true;
        })?;
        Ok(already)
    }

    fn mutate(&self, order_id: &str, apply: impl FnOnce(&mut Order)) -> StoreResult<Order> {
        let txn = self.store.begin_write()?;
        let order = {
            let mut orders = txn.open_table(ORDERS_TABLE)?;

            let mut order: Order = match orders.get(order_id)? {
                Some(value) => serde_json::from_slice(value.value())?,
                None => return Err(StoreError::OrderNotFound(order_id.to_string())),
            };

            apply(&mut order);

            let value = serde_json::to_vec(&order)?;
            orders.insert(order.id.as_str(), value.as_slice())?;
            order
        };
        txn.commit()?;
        Ok(order)
    }

    /// Scan order headers with a predicate, attaching items to matches
    fn find_where(&self, matches: impl Fn(&Order) -> bool) -> StoreResult<Vec<OrderDetail>> {
        let read_txn = self.store.begin_read()?;
        let orders = read_txn.open_table(ORDERS_TABLE)?;

        let mut details = Vec::new();
        for result in orders.iter()? {
            let (_key, value) = result?;
            let order: Order = serde_json::from_slice(value.value())?;
            if matches(&order) {
                let items = Self::items_for(&read_txn, &order.id)?;
                details.push(OrderDetail { order, items });
            }
        }
        Ok(details)
    }

    fn items_for(read_txn: &ReadTransaction, order_id: &str) -> StoreResult<Vec<OrderItem>> {
        let lines = read_txn.open_table(ORDER_ITEMS_TABLE)?;

        let mut items = Vec::new();
        for result in lines.range((order_id, 0u32)..=(order_id, u32::MAX))? {
            let (_key, value) = result?;
            let item: OrderItem = serde_json::from_slice(value.value())?;
            items.push(item);
        }
        Ok(items)
    }
}
