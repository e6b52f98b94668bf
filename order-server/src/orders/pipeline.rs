//! Order submission pipeline
//!
//! One entry point, [`OrderPipeline::submit`], runs the whole intake flow:
//!
//! 1. Validate and price the draft from the catalog
//! 2. Get or create the loyalty member (signup bonus on first contact)
//! 3. Backfill the signup bonus for pre-bonus members
//! 4. Attempt the noodle redemption if requested
//! 5. Persist the order with its items atomically
//! 6. Broadcast the new order to connected viewers
//!
//! Redemption is best-effort: an order below the minimum total or a balance
//! below the cost skips the redemption with a log line instead of failing
//! the whole order. The customer still gets their food.

use rust_decimal::Decimal;

use crate::broadcast::BroadcastHub;
use crate::db::repository::{MemberRepository, OrderRepository, ProductRepository};
use crate::db::StoreError;
use crate::orders::pricer::{self, OrderDraft};
use shared::models::{Member, Order, OrderDetail, OrderItem, OrderStatus};
use shared::util::{new_id, now_millis};
use shared::{AppResult, RealtimeMessage};

/// Points debited for a noodle redemption
pub const REDEEM_COST: i64 = 100;

/// Minimum order total required before redemption applies
pub const REDEEM_MIN_TOTAL: Decimal = Decimal::from_parts(200, 0, 0, false, 0);

/// Synthetic product ID for the redeemed free item
pub const FREE_ITEM_PRODUCT_ID: &str = "FREE_WANG_ZI_NOODLES";

/// Display name of the redeemed free item
pub const FREE_ITEM_NAME: &str = "王子麵（贈品）";

/// Note suffix recording a redemption on the receipt
const REDEEM_NOTE: &str = "（使用 100 點兌換王子麵）";

/// What the caller gets back after a successful submission
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderOutcome {
    pub order_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub calculated_total: Decimal,
    /// Member balance after bonus and redemption settled
    pub member_points: i64,
}

/// Order intake service
#[derive(Clone)]
pub struct OrderPipeline {
    products: ProductRepository,
    members: MemberRepository,
    orders: OrderRepository,
    hub: BroadcastHub,
}

impl OrderPipeline {
    pub fn new(
        products: ProductRepository,
        members: MemberRepository,
        orders: OrderRepository,
        hub: BroadcastHub,
    ) -> Self {
        Self {
            products,
            members,
            orders,
            hub,
        }
    }

    /// Run the full intake flow for one draft
    pub fn submit(&self, draft: OrderDraft) -> AppResult<OrderOutcome> {
        let priced = pricer::validate_and_price(&draft, |id| self.products.find_by_id(id))?;

        let mut member = self.members.get_or_create(&draft.customer_phone)?;
        if !member.first_bonus_awarded {
            member = self.members.apply_first_bonus_if_missing(&member.id)?;
            tracing::info!(
                member_id = %member.id,
                points = member.points,
                "Signup bonus backfilled"
            );
        }

        let mut items = priced.items;
        let mut notes = priced.notes;
        let mut redeemed_points = 0;

        if draft.redeem_requested {
            if let Some(updated) = self.try_redeem(&member, priced.total) {
                member = updated;
                redeemed_points = REDEEM_COST;
                items.push(free_noodle_item());
                notes = Some(match notes {
                    Some(existing) => format!("{} {}", existing, REDEEM_NOTE),
                    None => REDEEM_NOTE.to_string(),
                });
            }
        }

        let order = Order {
            id: new_id(),
            customer_name: draft.customer_name.trim().to_string(),
            customer_phone: draft.customer_phone.trim().to_string(),
            order_number: priced.order_number,
            total_price: priced.total,
            status: OrderStatus::Pending,
            notes,
            is_printed: false,
            redeemed_points,
            created_at: now_millis(),
            pickup_at: priced.pickup_at,
        };

        if let Err(err) = self.orders.create(&order, &items) {
            // Points were already debited in their own transaction. Surface
            // the mismatch loudly so the counter staff can settle it.
            if redeemed_points > 0 {
                tracing::error!(
                    order_id = %order.id,
                    member_id = %member.id,
                    redeemed_points,
                    error = %err,
                    "Order persistence failed after points were debited"
                );
            }
            return Err(err.into());
        }

        tracing::info!(
            order_id = %order.id,
            order_number = %order.order_number,
            total = %order.total_price,
            redeemed_points,
            "Order accepted"
        );

        let detail = OrderDetail {
            order,
            items,
        };
        self.hub.publish(&RealtimeMessage::new_order(detail.clone()));

        Ok(OrderOutcome {
            order_id: detail.order.id,
            calculated_total: detail.order.total_price,
            member_points: member.points,
        })
    }

    /// Attempt the redemption, returning the updated member on success
    ///
    /// Skips (returning None) when the total is below the minimum or the
    /// balance cannot cover the cost. Storage failures also skip, logged at
    /// error, since redemption must never sink an otherwise valid order.
    fn try_redeem(&self, member: &Member, total: Decimal) -> Option<Member> {
        if total < REDEEM_MIN_TOTAL {
            tracing::info!(
                member_id = %member.id,
                %total,
                "Redemption skipped, order total below minimum"
            );
            return None;
        }

        match self.members.debit(&member.id, REDEEM_COST) {
            Ok(updated) => {
                tracing::info!(
                    member_id = %member.id,
                    points = updated.points,
                    "Redeemed points for free noodles"
                );
                Some(updated)
            }
            Err(StoreError::InsufficientPoints { balance, required }) => {
                tracing::info!(
                    member_id = %member.id,
                    balance,
                    required,
                    "Redemption skipped, insufficient points"
                );
                None
            }
            Err(err) => {
                tracing::error!(
                    member_id = %member.id,
                    error = %err,
                    "Redemption debit failed, continuing without it"
                );
                None
            }
        }
    }
}

fn free_noodle_item() -> OrderItem {
    OrderItem {
        product_id: FREE_ITEM_PRODUCT_ID.to_string(),
        name: FREE_ITEM_NAME.to_string(),
        quantity: 1,
        unit_price: Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;
    use crate::orders::pricer::DraftItem;
    use shared::models::Product;
    use shared::ErrorCode;

    fn pipeline() -> (OrderPipeline, MemberRepository, OrderRepository) {
        let store = Store::open_in_memory().unwrap();
        let products = ProductRepository::new(store.clone());
        let members = MemberRepository::new(store.clone());
        let orders = OrderRepository::new(store);

        products
            .upsert(&Product {
                id: "p-1".to_string(),
                name: "滷味拼盤".to_string(),
                price: Decimal::from(150),
                is_available: true,
                created_at: now_millis(),
            })
            .unwrap();
        products
            .upsert(&Product {
                id: "p-2".to_string(),
                name: "滷蛋".to_string(),
                price: Decimal::from(15),
                is_available: true,
                created_at: now_millis(),
            })
            .unwrap();

        let pipeline = OrderPipeline::new(
            products,
            members.clone(),
            orders.clone(),
            BroadcastHub::new(8),
        );
        (pipeline, members, orders)
    }

    fn draft(items: Vec<(&str, u32)>, redeem: bool) -> OrderDraft {
        OrderDraft {
            customer_name: "王小明".to_string(),
            customer_phone: "0912345678".to_string(),
            items: items
                .into_iter()
                .map(|(id, quantity)| DraftItem {
                    product_id: id.to_string(),
                    quantity,
                })
                .collect(),
            notes: None,
            pickup_time: None,
            redeem_requested: redeem,
        }
    }

    #[test]
    fn test_first_order_awards_bonus_and_prices_from_catalog() {
        let (pipeline, members, orders) = pipeline();

        let outcome = pipeline.submit(draft(vec![("p-1", 2)], false)).unwrap();

        assert_eq!(outcome.calculated_total, Decimal::from(300));
        assert_eq!(outcome.member_points, 5000);

        let member = members.find_by_phone("0912345678").unwrap().unwrap();
        assert_eq!(member.points, 5000);

        let detail = orders.find_by_id(&outcome.order_id).unwrap().unwrap();
        assert_eq!(detail.order.order_number, "345678");
        assert_eq!(detail.order.status, OrderStatus::Pending);
        assert!(!detail.order.is_printed);
        assert_eq!(detail.items.len(), 1);
    }

    #[test]
    fn test_redemption_debits_and_adds_free_item() {
        let (pipeline, _, orders) = pipeline();

        // Total 300 >= 200, fresh member has 5000 points
        let outcome = pipeline.submit(draft(vec![("p-1", 2)], true)).unwrap();

        assert_eq!(outcome.calculated_total, Decimal::from(300));
        assert_eq!(outcome.member_points, 4900);

        let detail = orders.find_by_id(&outcome.order_id).unwrap().unwrap();
        assert_eq!(detail.order.redeemed_points, 100);
        assert_eq!(detail.items.len(), 2);

        let free = detail
            .items
            .iter()
            .find(|i| i.product_id == FREE_ITEM_PRODUCT_ID)
            .unwrap();
        assert_eq!(free.name, "王子麵（贈品）");
        assert_eq!(free.quantity, 1);
        assert_eq!(free.unit_price, Decimal::ZERO);

        assert!(detail
            .order
            .notes
            .unwrap()
            .contains("使用 100 點兌換王子麵"));
    }

    #[test]
    fn test_redemption_skipped_below_minimum_total() {
        let (pipeline, members, orders) = pipeline();

        // 2 eggs = 30, below the 200 minimum
        let outcome = pipeline.submit(draft(vec![("p-2", 2)], true)).unwrap();

        assert_eq!(outcome.member_points, 5000);
        let member = members.find_by_phone("0912345678").unwrap().unwrap();
        assert_eq!(member.points, 5000);

        let detail = orders.find_by_id(&outcome.order_id).unwrap().unwrap();
        assert_eq!(detail.order.redeemed_points, 0);
        assert_eq!(detail.items.len(), 1);
    }

    #[test]
    fn test_redemption_skipped_on_insufficient_balance() {
        let (pipeline, members, orders) = pipeline();

        // Drain the member to below the redemption cost first
        let member = members.get_or_create("0912345678").unwrap();
        members.debit(&member.id, 4950).unwrap();

        let outcome = pipeline.submit(draft(vec![("p-1", 2)], true)).unwrap();

        // Order succeeds, no redemption happened
        assert_eq!(outcome.member_points, 50);
        let detail = orders.find_by_id(&outcome.order_id).unwrap().unwrap();
        assert_eq!(detail.order.redeemed_points, 0);
        assert_eq!(detail.items.len(), 1);
    }

    #[test]
    fn test_unknown_product_fails_before_ledger_changes() {
        let (pipeline, members, _) = pipeline();

        let err = pipeline
            .submit(draft(vec![("p-unknown", 1)], false))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductNotFound);

        // No member was created for a rejected draft
        assert!(members.find_by_phone("0912345678").unwrap().is_none());
    }

    #[test]
    fn test_concurrent_redemptions_debit_once() {
        let (pipeline, members, orders) = pipeline();

        // Seed a member with exactly 150 points: one redemption fits, two don't
        let member = members.get_or_create("0912345678").unwrap();
        members.debit(&member.id, member.points - 150).unwrap();

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let pipeline = pipeline.clone();
                std::thread::spawn(move || {
                    pipeline.submit(draft(vec![("p-1", 2)], true)).unwrap()
                })
            })
            .collect();

        let outcomes: Vec<OrderOutcome> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        // Both orders were accepted; exactly one carries the redemption
        let redeemed = outcomes
            .iter()
            .filter(|o| {
                let detail = orders.find_by_id(&o.order_id).unwrap().unwrap();
                detail.order.redeemed_points == REDEEM_COST
            })
            .count();
        assert_eq!(redeemed, 1);

        let final_member = members.find_by_phone("0912345678").unwrap().unwrap();
        assert_eq!(final_member.points, 50);
    }

    #[test]
    fn test_pickup_and_notes_flow_through() {
        let (pipeline, _, orders) = pipeline();

        let mut d = draft(vec![("p-1", 2)], false);
        d.pickup_time = Some("2026-08-30 18:30".to_string());
        d.notes = Some("切小塊".to_string());

        let outcome = pipeline.submit(d).unwrap();
        let detail = orders.find_by_id(&outcome.order_id).unwrap().unwrap();

        assert!(detail.order.pickup_at.is_some());
        assert_eq!(
            detail.order.notes.as_deref(),
            Some("預計 18:30 領取 | 切小塊")
        );
    }
}
