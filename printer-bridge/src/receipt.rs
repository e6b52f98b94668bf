//! Receipt layout
//!
//! Turns an order into ESC/POS bytes ready to send to the printer.

use chrono::DateTime;
use shared::models::OrderDetail;

use crate::escpos::EscPosBuilder;

/// Taipei is UTC+8, applied directly to the stored UTC milliseconds.
const TZ_OFFSET_MILLIS: i64 = 8 * 3600 * 1000;

/// 收據排版器
pub struct ReceiptRenderer {
    width: usize,
    shop_name: String,
}

impl ReceiptRenderer {
    pub fn new(width: usize, shop_name: impl Into<String>) -> Self {
        Self {
            width,
            shop_name: shop_name.into(),
        }
    }

    /// Render a full receipt for one order
    pub fn render(&self, detail: &OrderDetail) -> Vec<u8> {
        let order = &detail.order;
        let mut b = EscPosBuilder::new(self.width);

        // 店名
        b.center()
            .double_size()
            .line(&self.shop_name)
            .reset_size()
            .newline();

        // 取餐號碼（放大顯示方便叫號）
        b.double_size()
            .line(&format!("單號 {}", order.order_number))
            .reset_size()
            .left()
            .newline();

        b.line(&format!("姓名：{}", order.customer_name));
        b.line(&format!("電話：{}", order.customer_phone));
        b.line(&format!("時間：{}", format_local(order.created_at)));

        b.sep_double();

        for item in &detail.items {
            b.line_lr(
                &format!("{} x{}", item.name, item.quantity),
                &format!("${}", item.line_total()),
            );
        }

        b.sep_single();

        if let Some(notes) = &order.notes {
            b.line(&format!("備註：{notes}"));
            b.sep_single();
        }

        b.bold();
        b.line_lr("合計", &format!("${}", order.total_price));
        b.bold_off();

        b.cut_feed(4);
        b.build()
    }
}

/// Format UTC millis as local wall-clock time
fn format_local(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis + TZ_OFFSET_MILLIS)
        .map(|dt| dt.naive_utc().format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{Order, OrderItem, OrderStatus};

    fn sample_detail() -> OrderDetail {
        OrderDetail {
            order: Order {
                id: "o-1".to_string(),
                customer_name: "王小明".to_string(),
                customer_phone: "0912345678".to_string(),
                order_number: "345678".to_string(),
                total_price: Decimal::from(165),
                status: OrderStatus::Pending,
                notes: Some("不要辣".to_string()),
                is_printed: false,
                redeemed_points: 0,
                created_at: 1_700_000_000_000,
                pickup_at: None,
            },
            items: vec![
                OrderItem {
                    product_id: "p-platter".to_string(),
                    name: "滷味拼盤".to_string(),
                    quantity: 1,
                    unit_price: Decimal::from(150),
                },
                OrderItem {
                    product_id: "p-egg".to_string(),
                    name: "滷蛋".to_string(),
                    quantity: 1,
                    unit_price: Decimal::from(15),
                },
            ],
        }
    }

    #[test]
    fn test_render_contains_key_fields() {
        let renderer = ReceiptRenderer::new(32, "測試店");
        let data = renderer.render(&sample_detail());
        assert!(!data.is_empty());

        // Big5 output, but the ASCII parts survive as-is
        let s = String::from_utf8_lossy(&data);
        assert!(s.contains("345678"));
        assert!(s.contains("0912345678"));
        assert!(s.contains("$165"));
    }

    #[test]
    fn test_render_ends_with_cut() {
        let renderer = ReceiptRenderer::new(32, "測試店");
        let data = renderer.render(&sample_detail());
        // GS V 66 before the trailing FS . sequence
        assert!(data.windows(3).any(|w| w == [0x1D, 0x56, 0x42]));
    }

    #[test]
    fn test_format_local_applies_offset() {
        // 2023-11-14 22:13:20 UTC is 2023-11-15 06:13 in Taipei
        assert_eq!(format_local(1_700_000_000_000), "2023-11-15 06:13");
    }
}
