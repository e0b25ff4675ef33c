//! Checkout
//!
//! Pricing is computed from the database, never from client supplied prices:
//! line totals, subtotal, coupon, shipping on the pre-discount subtotal, total.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use shared::models::{
    CheckoutItem, CheckoutRequest, Discount, Order, OrderDetail, OrderItem, OrderPreview,
    OrderStatus, PricedLine, ShippingQuote,
};
use shared::util::{now_millis, order_code, snowflake_id};
use sqlx::{SqliteConnection, SqlitePool};

use crate::db::repository::{
    RepoError, address, cart, discount as discount_repo, order as order_repo, product, ship_config,
};
use crate::pricing::{DiscountOutcome, apply_discount, calculate_shipping_fee, check_eligibility};
use crate::utils::money::{line_total, to_decimal, to_f64};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, validate_email, validate_optional_text,
    validate_phone, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

const MAX_LINE_QUANTITY: i64 = 999;

/// Where the order lines come from
#[derive(Debug, Clone)]
pub enum CheckoutSource {
    /// Explicit lines from the request body
    Items(Vec<CheckoutItem>),
    /// The logged-in customer's cart (cleared on success)
    Cart(i64),
}

impl CheckoutSource {
    /// Explicit items win; otherwise a logged-in user's cart is used
    pub fn resolve(items: Option<Vec<CheckoutItem>>, user_id: Option<i64>) -> AppResult<Self> {
        match (items, user_id) {
            (Some(items), _) => Ok(CheckoutSource::Items(items)),
            (None, Some(user_id)) => Ok(CheckoutSource::Cart(user_id)),
            (None, None) => Err(AppError::new(ErrorCode::OrderEmpty)),
        }
    }
}

/// Priced order before anything is written
struct Quote {
    lines: Vec<PricedLine>,
    subtotal: Decimal,
    discount: Option<(Discount, DiscountOutcome)>,
    shipping: ShippingQuote,
    total: Decimal,
}

impl Quote {
    fn discount_amount(&self) -> f64 {
        self.discount
            .as_ref()
            .map(|(_, outcome)| outcome.discount_amount)
            .unwrap_or(0.0)
    }

    fn into_preview(self) -> OrderPreview {
        OrderPreview {
            discount_amount: self.discount_amount(),
            discount_code: self.discount.as_ref().map(|(d, _)| d.code.clone()),
            subtotal: to_f64(self.subtotal),
            total: to_f64(self.total),
            shipping: self.shipping,
            items: self.lines,
        }
    }
}

/// Collapse repeated SKUs and check quantities
fn merge_lines(items: &[CheckoutItem]) -> AppResult<Vec<(i64, i64)>> {
    if items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    let mut merged: BTreeMap<i64, i64> = BTreeMap::new();
    let mut order: Vec<i64> = Vec::new();
    for item in items {
        if item.quantity < 1 || item.quantity > MAX_LINE_QUANTITY {
            return Err(AppError::new(ErrorCode::CartQuantityInvalid)
                .with_detail("sku_id", item.sku_id));
        }
        let qty = merged.entry(item.sku_id).or_insert_with(|| {
            order.push(item.sku_id);
            0
        });
        *qty += item.quantity;
        if *qty > MAX_LINE_QUANTITY {
            return Err(AppError::new(ErrorCode::CartQuantityInvalid)
                .with_detail("sku_id", item.sku_id));
        }
    }
    Ok(order
        .into_iter()
        .map(|sku_id| (sku_id, merged[&sku_id]))
        .collect())
}

async fn requested_lines(conn: &mut SqliteConnection, source: &CheckoutSource) -> AppResult<Vec<(i64, i64)>> {
    match source {
        CheckoutSource::Items(items) => merge_lines(items),
        CheckoutSource::Cart(user_id) => {
            let items: Vec<CheckoutItem> = cart::checkout_items(conn, *user_id)
                .await?
                .into_iter()
                .map(|(sku_id, quantity)| CheckoutItem { sku_id, quantity })
                .collect();
            if items.is_empty() {
                return Err(AppError::new(ErrorCode::CartEmpty));
            }
            merge_lines(&items)
        }
    }
}

async fn price_lines(conn: &mut SqliteConnection, requested: &[(i64, i64)]) -> AppResult<Vec<PricedLine>> {
    let mut lines = Vec::with_capacity(requested.len());
    for &(sku_id, quantity) in requested {
        let sku = product::find_sellable(conn, sku_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::SkuNotFound).with_detail("sku_id", sku_id))?;
        if !sku.is_active {
            return Err(AppError::new(ErrorCode::SkuInactive).with_detail("sku_id", sku_id));
        }
        if sku.stock < quantity {
            return Err(AppError::new(ErrorCode::InsufficientStock)
                .with_detail("sku_id", sku_id)
                .with_detail("available", sku.stock));
        }
        lines.push(PricedLine {
            sku_id,
            product_name: sku.product_name,
            sku_name: sku.sku_name,
            unit_price: sku.price,
            quantity,
            line_total: to_f64(line_total(sku.price, quantity)),
        });
    }
    Ok(lines)
}

async fn quote(
    conn: &mut SqliteConnection,
    source: &CheckoutSource,
    discount_code: Option<&str>,
    user_id: Option<i64>,
    now: i64,
) -> AppResult<Quote> {
    let requested = requested_lines(conn, source).await?;
    let lines = price_lines(conn, &requested).await?;
    let subtotal: Decimal = lines.iter().map(|l| to_decimal(l.line_total)).sum();
    let subtotal_f64 = to_f64(subtotal);

    let discount = match discount_code.map(str::trim).filter(|c| !c.is_empty()) {
        Some(code) => {
            let discount = discount_repo::find_by_code(conn, code)
                .await?
                .ok_or_else(|| AppError::new(ErrorCode::DiscountNotFound))?;
            let used = match user_id {
                Some(uid) => discount_repo::user_usage_count(conn, discount.id, uid).await?,
                None => 0,
            };
            check_eligibility(&discount, subtotal_f64, now, used)?;
            let outcome = apply_discount(&discount, subtotal_f64);
            Some((discount, outcome))
        }
        None => None,
    };

    let active = ship_config::find_active(conn).await?;
    let shipping = calculate_shipping_fee(active.as_ref(), subtotal_f64);

    let discount_amount = discount
        .as_ref()
        .map(|(_, o)| to_decimal(o.discount_amount))
        .unwrap_or(Decimal::ZERO);
    let total = (subtotal - discount_amount + to_decimal(shipping.shipping_fee)).max(Decimal::ZERO);

    Ok(Quote {
        lines,
        subtotal,
        discount,
        shipping,
        total,
    })
}

/// Price a prospective order without writing anything
pub async fn preview_order(
    pool: &SqlitePool,
    source: CheckoutSource,
    discount_code: Option<&str>,
    user_id: Option<i64>,
) -> AppResult<OrderPreview> {
    let mut conn = pool.acquire().await.map_err(RepoError::from)?;
    let quote = quote(&mut *conn, &source, discount_code, user_id, now_millis()).await?;
    Ok(quote.into_preview())
}

fn validate_customer(req: &CheckoutRequest) -> AppResult<()> {
    validate_required_text(&req.customer_name, "customer_name", MAX_NAME_LEN)?;
    validate_phone(req.customer_phone.trim())?;
    if let Some(email) = req.customer_email.as_deref().filter(|e| !e.trim().is_empty()) {
        validate_email(email.trim())?;
    }
    validate_required_text(&req.street, "street", MAX_ADDRESS_LEN)?;
    validate_optional_text(&req.note, "note", MAX_NOTE_LEN)?;
    Ok(())
}

/// Place an order.
///
/// In one transaction: resolve the address, price the lines, reserve stock,
/// claim the coupon, write the order with its line snapshots and usage row,
/// and clear the cart when it was the source. Any failure rolls everything back.
pub async fn place_order(
    pool: &SqlitePool,
    req: CheckoutRequest,
    source: CheckoutSource,
    user_id: Option<i64>,
) -> AppResult<OrderDetail> {
    validate_customer(&req)?;

    let now = now_millis();
    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    let place = address::resolve(&mut *tx, &req.province_code, &req.district_code, &req.ward_code).await?;
    let quote = quote(&mut *tx, &source, req.discount_code.as_deref(), user_id, now).await?;

    for line in &quote.lines {
        product::reserve_stock(&mut *tx, line.sku_id, line.quantity).await?;
    }

    let order_id = snowflake_id();
    if let Some((discount, _)) = &quote.discount {
        discount_repo::claim(&mut *tx, discount.id).await?;
    }

    let order = Order {
        id: order_id,
        code: order_code(),
        user_id,
        status: OrderStatus::Pending,
        customer_name: req.customer_name.trim().to_string(),
        customer_phone: req.customer_phone.trim().to_string(),
        customer_email: req
            .customer_email
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty()),
        province_code: req.province_code,
        province_name: place.province_name,
        district_code: req.district_code,
        district_name: place.district_name,
        ward_code: req.ward_code,
        ward_name: place.ward_name,
        street: req.street.trim().to_string(),
        note: req.note.filter(|n| !n.trim().is_empty()),
        payment_method: req.payment_method,
        subtotal: to_f64(quote.subtotal),
        discount_code: quote.discount.as_ref().map(|(d, _)| d.code.clone()),
        discount_amount: quote.discount_amount(),
        shipping_fee: quote.shipping.shipping_fee,
        total: to_f64(quote.total),
        created_at: now,
        updated_at: now,
    };
    order_repo::insert(&mut *tx, &order).await?;

    let mut items = Vec::with_capacity(quote.lines.len());
    for line in &quote.lines {
        let item = OrderItem {
            id: snowflake_id(),
            order_id,
            sku_id: line.sku_id,
            product_name: line.product_name.clone(),
            sku_name: line.sku_name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
            line_total: line.line_total,
        };
        order_repo::insert_item(&mut *tx, &item).await?;
        items.push(item);
    }

    if let Some((discount, _)) = &quote.discount {
        discount_repo::record_usage(&mut *tx, discount.id, user_id, order_id).await?;
    }

    if let CheckoutSource::Cart(cart_user) = source {
        cart::clear(&mut *tx, cart_user).await?;
    }

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(
        order_id,
        code = %order.code,
        total = order.total,
        items = items.len(),
        discount = ?order.discount_code,
        "Order placed"
    );

    Ok(OrderDetail { order, items })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(sku_id: i64, quantity: i64) -> CheckoutItem {
        CheckoutItem { sku_id, quantity }
    }

    #[test]
    fn test_merge_lines_sums_repeated_skus() {
        let merged = merge_lines(&[item(2, 1), item(1, 3), item(2, 4)]).unwrap();
        assert_eq!(merged, vec![(2, 5), (1, 3)]);
    }

    #[test]
    fn test_merge_lines_rejects_bad_quantities() {
        assert_eq!(merge_lines(&[]).unwrap_err().code, ErrorCode::OrderEmpty);
        assert_eq!(
            merge_lines(&[item(1, 0)]).unwrap_err().code,
            ErrorCode::CartQuantityInvalid
        );
        assert_eq!(
            merge_lines(&[item(1, 600), item(1, 600)]).unwrap_err().code,
            ErrorCode::CartQuantityInvalid
        );
    }

    #[test]
    fn test_source_resolution() {
        assert!(matches!(
            CheckoutSource::resolve(None, Some(9)).unwrap(),
            CheckoutSource::Cart(9)
        ));
        assert!(matches!(
            CheckoutSource::resolve(Some(vec![item(1, 1)]), Some(9)).unwrap(),
            CheckoutSource::Items(_)
        ));
        assert_eq!(
            CheckoutSource::resolve(None, None).unwrap_err().code,
            ErrorCode::OrderEmpty
        );
    }
}
