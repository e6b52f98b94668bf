//! Draft validation and authoritative pricing
//!
//! Client-submitted prices are ignored entirely. Every line is re-priced
//! from the catalog, and unknown products reject the whole draft.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use shared::models::{OrderItem, Product};
use shared::{AppError, AppResult};

/// Shop-local timezone (Taipei, no DST)
const TZ_OFFSET_SECS: i32 = 8 * 3600;

/// Incoming order draft, already deserialized from the request
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub customer_name: String,
    pub customer_phone: String,
    pub items: Vec<DraftItem>,
    pub notes: Option<String>,
    pub pickup_time: Option<String>,
    pub redeem_requested: bool,
}

/// One requested line: product reference plus quantity
#[derive(Debug, Clone)]
pub struct DraftItem {
    pub product_id: String,
    pub quantity: u32,
}

/// A validated, fully priced draft
#[derive(Debug, Clone)]
pub struct PricedOrder {
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub notes: Option<String>,
    pub pickup_at: Option<i64>,
    pub order_number: String,
}

/// Validate a draft and price it from the catalog
///
/// `resolve` looks a product up by ID; pricing fails fast on the first
/// unknown product so the caller gets a precise complaint.
pub fn validate_and_price<E>(
    draft: &OrderDraft,
    resolve: impl Fn(&str) -> Result<Option<Product>, E>,
) -> AppResult<PricedOrder>
where
    E: Into<AppError>,
{
    if draft.customer_name.trim().is_empty() {
        return Err(AppError::required_field("customerName"));
    }
    if draft.customer_phone.trim().is_empty() {
        return Err(AppError::required_field("customerPhone"));
    }
    if draft.items.is_empty() {
        return Err(AppError::new(shared::ErrorCode::OrderEmpty));
    }

    let mut items = Vec::with_capacity(draft.items.len());
    let mut total = Decimal::ZERO;

    for line in &draft.items {
        if line.quantity == 0 {
            return Err(AppError::validation(format!(
                "Quantity must be at least 1 for product {}",
                line.product_id
            )));
        }

        let product = resolve(&line.product_id)
            .map_err(Into::into)?
            .ok_or_else(|| AppError::product_not_found(line.product_id.clone()))?;

        // Availability only hides items from the menu. An order that names a
        // sold-out product is still accepted and priced; the counter sorts
        // out substitutions in person.
        let item = OrderItem {
            product_id: product.id,
            name: product.name,
            quantity: line.quantity,
            unit_price: product.price,
        };
        total += item.line_total();
        items.push(item);
    }

    let (pickup_at, pickup_note) = parse_pickup_time(draft.pickup_time.as_deref());
    let notes = combine_notes(pickup_note, draft.notes.as_deref());

    Ok(PricedOrder {
        items,
        total,
        notes,
        pickup_at,
        order_number: order_number_from_phone(&draft.customer_phone),
    })
}

/// Short pickup code: the last six digits of the phone number
pub fn order_number_from_phone(phone: &str) -> String {
    let digits: Vec<char> = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let start = digits.len().saturating_sub(6);
    digits[start..].iter().collect()
}

/// Parse a requested pickup time into epoch millis plus a receipt note
///
/// Accepts `YYYY-MM-DD HH:MM` and `YYYY-MM-DDTHH:MM`, interpreted in shop
/// local time. Unparseable input degrades to a note carrying the raw text,
/// so a typo on the order form still reaches the kitchen.
fn parse_pickup_time(raw: Option<&str>) -> (Option<i64>, Option<String>) {
    let raw = match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => raw,
        None => return (None, None),
    };

    let parsed = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"));

    match parsed {
        Ok(naive) => {
            // Local wall-clock time shifted to UTC epoch millis
            let millis =
                naive.and_utc().timestamp_millis() - i64::from(TZ_OFFSET_SECS) * 1000;
            let note = format!("預計 {} 領取", naive.format("%H:%M"));
            (Some(millis), Some(note))
        }
        Err(_) => {
            tracing::warn!(pickup_time = %raw, "Unparseable pickup time, keeping raw text");
            (None, Some(format!("預計 {} 領取", raw)))
        }
    }
}

fn combine_notes(pickup_note: Option<String>, customer_notes: Option<&str>) -> Option<String> {
    let customer = customer_notes.map(str::trim).filter(|s| !s.is_empty());
    match (pickup_note, customer) {
        (Some(pickup), Some(customer)) => Some(format!("{} | {}", pickup, customer)),
        (Some(pickup), None) => Some(pickup),
        (None, Some(customer)) => Some(customer.to_string()),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::util::now_millis;
    use shared::ErrorCode;

    fn catalog(id: &str) -> Result<Option<Product>, AppError> {
        let product = |name: &str, price: i64, available: bool| Product {
            id: id.to_string(),
            name: name.to_string(),
            price: Decimal::from(price),
            is_available: available,
            created_at: now_millis(),
        };
        Ok(match id {
            "p-1" => Some(product("滷味拼盤", 150, true)),
            "p-2" => Some(product("滷蛋", 15, true)),
            "p-off" => Some(product("休售品項", 50, false)),
            _ => None,
        })
    }

    fn draft(items: Vec<DraftItem>) -> OrderDraft {
        OrderDraft {
            customer_name: "王小明".to_string(),
            customer_phone: "0912345678".to_string(),
            items,
            notes: None,
            pickup_time: None,
            redeem_requested: false,
        }
    }

    fn line(product_id: &str, quantity: u32) -> DraftItem {
        DraftItem {
            product_id: product_id.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_prices_come_from_catalog() {
        let priced =
            validate_and_price(&draft(vec![line("p-1", 2), line("p-2", 3)]), catalog).unwrap();

        assert_eq!(priced.total, Decimal::from(2 * 150 + 3 * 15));
        assert_eq!(priced.items.len(), 2);
        assert_eq!(priced.items[0].unit_price, Decimal::from(150));
        assert_eq!(priced.order_number, "345678");
    }

    #[test]
    fn test_unknown_product_rejects_draft() {
        let err =
            validate_and_price(&draft(vec![line("p-1", 1), line("p-missing", 1)]), catalog)
                .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductNotFound);
        assert_eq!(
            err.details.unwrap().get("productId").unwrap(),
            "p-missing"
        );
    }

    #[test]
    fn test_unavailable_product_still_priced() {
        let priced = validate_and_price(&draft(vec![line("p-off", 2)]), catalog).unwrap();

        assert_eq!(priced.total, Decimal::from(100));
        assert_eq!(priced.items[0].name, "休售品項");
    }

    #[test]
    fn test_missing_fields() {
        let mut d = draft(vec![line("p-1", 1)]);
        d.customer_name = "  ".to_string();
        let err = validate_and_price(&d, catalog).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        let mut d = draft(vec![line("p-1", 1)]);
        d.customer_phone = String::new();
        let err = validate_and_price(&d, catalog).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        let err = validate_and_price(&draft(vec![]), catalog).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderEmpty);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let err = validate_and_price(&draft(vec![line("p-1", 0)]), catalog).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_pickup_time_parsed_into_note() {
        let mut d = draft(vec![line("p-1", 1)]);
        d.pickup_time = Some("2026-08-30 18:30".to_string());

        let priced = validate_and_price(&d, catalog).unwrap();
        assert!(priced.pickup_at.is_some());
        assert_eq!(priced.notes.as_deref(), Some("預計 18:30 領取"));
    }

    #[test]
    fn test_pickup_time_iso_variant() {
        let mut d = draft(vec![line("p-1", 1)]);
        d.pickup_time = Some("2026-08-30T09:05".to_string());

        let priced = validate_and_price(&d, catalog).unwrap();
        assert!(priced.pickup_at.is_some());
        assert_eq!(priced.notes.as_deref(), Some("預計 09:05 領取"));
    }

    #[test]
    fn test_unparseable_pickup_time_degrades_to_raw_note() {
        let mut d = draft(vec![line("p-1", 1)]);
        d.pickup_time = Some("六點半".to_string());

        let priced = validate_and_price(&d, catalog).unwrap();
        assert!(priced.pickup_at.is_none());
        assert_eq!(priced.notes.as_deref(), Some("預計 六點半 領取"));
    }

    #[test]
    fn test_notes_combined_with_pickup() {
        let mut d = draft(vec![line("p-1", 1)]);
        d.pickup_time = Some("2026-08-30 18:30".to_string());
        d.notes = Some("不要辣".to_string());

        let priced = validate_and_price(&d, catalog).unwrap();
        assert_eq!(priced.notes.as_deref(), Some("預計 18:30 領取 | 不要辣"));
    }

    #[test]
    fn test_order_number_short_phone() {
        assert_eq!(order_number_from_phone("12345"), "12345");
        assert_eq!(order_number_from_phone("0912-345-678"), "345678");
    }

    #[test]
    fn test_resolver_error_propagates() {
        let failing = |_: &str| -> Result<Option<Product>, AppError> {
            Err(AppError::database("boom"))
        };
        let err = validate_and_price(&draft(vec![line("p-1", 1)]), failing).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
