//! Discount (coupon) rules
//!
//! Pure functions: eligibility, amount calculation and input validation.
//! Usage accounting lives in the checkout transaction.

use rust_decimal::prelude::*;
use shared::models::{Discount, DiscountCreate, DiscountType, DiscountUpdate};

use crate::utils::money::{round, to_decimal, to_f64};
use crate::utils::validation::{MAX_NOTE_LEN, validate_amount, validate_optional_text};
use crate::utils::{AppError, ErrorCode};

const CODE_MIN_LEN: usize = 3;
const CODE_MAX_LEN: usize = 30;

/// Result of applying a discount to an order value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountOutcome {
    pub discount_amount: f64,
    pub final_amount: f64,
}

/// Compute the discount for `order_value`.
///
/// Percentage discounts are capped by `max_discount_amount`; no discount
/// ever exceeds the order value.
pub fn apply_discount(discount: &Discount, order_value: f64) -> DiscountOutcome {
    let order = to_decimal(order_value).max(Decimal::ZERO);

    let raw = match discount.discount_type {
        DiscountType::Percentage => {
            let rate = (to_decimal(discount.value) / Decimal::ONE_HUNDRED).clamp(Decimal::ZERO, Decimal::ONE);
            let amount = order.checked_mul(rate).unwrap_or(order);
            match discount.max_discount_amount {
                Some(cap) => amount.min(to_decimal(cap)),
                None => amount,
            }
        }
        DiscountType::Fixed => to_decimal(discount.value),
    };

    let amount = round(raw.max(Decimal::ZERO).min(order));
    DiscountOutcome {
        discount_amount: to_f64(amount),
        final_amount: to_f64(order - amount),
    }
}

/// Check whether `discount` may be used now, in this order
///
/// Checks run in a fixed order so the first failing rule is reported.
pub fn check_eligibility(
    discount: &Discount,
    order_value: f64,
    now: i64,
    user_usage_count: i64,
) -> Result<(), AppError> {
    if !discount.is_active {
        return Err(AppError::new(ErrorCode::DiscountInactive));
    }
    if now < discount.start_date {
        return Err(AppError::new(ErrorCode::DiscountNotStarted));
    }
    if now > discount.end_date {
        return Err(AppError::new(ErrorCode::DiscountExpired));
    }
    if let Some(limit) = discount.usage_limit
        && discount.used_count >= limit
    {
        return Err(AppError::new(ErrorCode::DiscountUsageLimitReached));
    }
    if order_value < discount.min_order_value {
        return Err(AppError::new(ErrorCode::DiscountMinOrderNotMet)
            .with_detail("min_order_value", discount.min_order_value));
    }
    if let Some(limit) = discount.per_user_limit
        && user_usage_count >= limit
    {
        return Err(AppError::new(ErrorCode::DiscountUserLimitReached));
    }
    Ok(())
}

/// Upper-case and check a coupon code
pub fn normalize_code(code: &str) -> Result<String, AppError> {
    let code = code.trim().to_uppercase();
    let len = code.chars().count();
    let charset_ok = code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if !(CODE_MIN_LEN..=CODE_MAX_LEN).contains(&len) || !charset_ok {
        return Err(AppError::validation(format!(
            "Discount code must be {CODE_MIN_LEN}-{CODE_MAX_LEN} characters of A-Z, 0-9, _ or -"
        ))
        .with_detail("field", "code"));
    }
    Ok(code)
}

/// Validate a complete discount row (after create defaults or update merge)
pub fn validate_discount(d: &Discount) -> Result<(), AppError> {
    validate_optional_text(&d.description, "description", MAX_NOTE_LEN)?;

    if d.end_date <= d.start_date {
        return Err(AppError::new(ErrorCode::DiscountInvalidDateRange).with_detail("field", "end_date"));
    }

    validate_amount(d.value, "value")?;
    let value_ok = match d.discount_type {
        DiscountType::Percentage => d.value > 0.0 && d.value <= 100.0,
        DiscountType::Fixed => d.value > 0.0,
    };
    if !value_ok {
        let msg = match d.discount_type {
            DiscountType::Percentage => "Percentage value must be in (0, 100]",
            DiscountType::Fixed => "Fixed value must be greater than 0",
        };
        return Err(AppError::validation(msg).with_detail("field", "value"));
    }

    if let Some(cap) = d.max_discount_amount {
        validate_amount(cap, "max_discount_amount")?;
    }
    validate_amount(d.min_order_value, "min_order_value")?;
    if d.usage_limit.is_some_and(|l| l < 1) {
        return Err(AppError::validation("usage_limit must be at least 1").with_detail("field", "usage_limit"));
    }
    if d.per_user_limit.is_some_and(|l| l < 1) {
        return Err(AppError::validation("per_user_limit must be at least 1")
            .with_detail("field", "per_user_limit"));
    }
    Ok(())
}

/// Build a validated row from a create payload (id and timestamps filled by the repository)
pub fn discount_from_create(data: DiscountCreate) -> Result<Discount, AppError> {
    let discount = Discount {
        id: 0,
        code: normalize_code(&data.code)?,
        description: data.description,
        discount_type: data.discount_type,
        value: data.value,
        max_discount_amount: data.max_discount_amount,
        min_order_value: data.min_order_value.unwrap_or(0.0),
        usage_limit: data.usage_limit,
        used_count: 0,
        per_user_limit: data.per_user_limit,
        start_date: data.start_date,
        end_date: data.end_date,
        is_active: data.is_active.unwrap_or(true),
        created_at: 0,
        updated_at: 0,
    };
    validate_discount(&discount)?;
    Ok(discount)
}

/// Merge an update into the stored row and validate the result
pub fn merge_update(mut d: Discount, data: DiscountUpdate) -> Result<Discount, AppError> {
    if let Some(code) = data.code {
        d.code = normalize_code(&code)?;
    }
    if data.description.is_some() {
        d.description = data.description;
    }
    if let Some(t) = data.discount_type {
        d.discount_type = t;
    }
    if let Some(v) = data.value {
        d.value = v;
    }
    if data.max_discount_amount.is_some() {
        d.max_discount_amount = data.max_discount_amount;
    }
    if let Some(v) = data.min_order_value {
        d.min_order_value = v;
    }
    if data.usage_limit.is_some() {
        d.usage_limit = data.usage_limit;
    }
    if data.per_user_limit.is_some() {
        d.per_user_limit = data.per_user_limit;
    }
    if let Some(v) = data.start_date {
        d.start_date = v;
    }
    if let Some(v) = data.end_date {
        d.end_date = v;
    }
    if let Some(v) = data.is_active {
        d.is_active = v;
    }
    validate_discount(&d)?;
    if let Some(limit) = d.usage_limit
        && d.used_count > limit
    {
        return Err(AppError::validation(format!(
            "usage_limit cannot be below the {} uses already made",
            d.used_count
        ))
        .with_detail("field", "usage_limit"));
    }
    Ok(d)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400_000;

    fn discount(discount_type: DiscountType, value: f64) -> Discount {
        Discount {
            id: 1,
            code: "TEA10".into(),
            description: None,
            discount_type,
            value,
            max_discount_amount: None,
            min_order_value: 0.0,
            usage_limit: None,
            used_count: 0,
            per_user_limit: None,
            start_date: 10 * DAY,
            end_date: 20 * DAY,
            is_active: true,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_percentage_discount() {
        let d = discount(DiscountType::Percentage, 10.0);
        let out = apply_discount(&d, 350_000.0);
        assert_eq!(out.discount_amount, 35_000.0);
        assert_eq!(out.final_amount, 315_000.0);
    }

    #[test]
    fn test_percentage_discount_is_capped() {
        let mut d = discount(DiscountType::Percentage, 20.0);
        d.max_discount_amount = Some(50_000.0);
        let out = apply_discount(&d, 1_000_000.0);
        assert_eq!(out.discount_amount, 50_000.0);
        assert_eq!(out.final_amount, 950_000.0);
    }

    #[test]
    fn test_fixed_discount_never_exceeds_order() {
        let d = discount(DiscountType::Fixed, 100_000.0);
        let out = apply_discount(&d, 60_000.0);
        assert_eq!(out.discount_amount, 60_000.0);
        assert_eq!(out.final_amount, 0.0);

        let out = apply_discount(&d, 250_000.0);
        assert_eq!(out.discount_amount, 100_000.0);
        assert_eq!(out.final_amount, 150_000.0);
    }

    #[test]
    fn test_fractional_percentage_rounds_to_two_places() {
        let d = discount(DiscountType::Percentage, 15.0);
        let out = apply_discount(&d, 33.33);
        assert_eq!(out.discount_amount, 5.0);
        assert_eq!(out.final_amount, 28.33);
    }

    #[test]
    fn test_eligibility_order() {
        let now = 15 * DAY;
        let mut d = discount(DiscountType::Fixed, 10_000.0);
        assert!(check_eligibility(&d, 100_000.0, now, 0).is_ok());

        d.is_active = false;
        d.end_date = DAY * 11;
        // inactive is reported before expiry
        assert_eq!(
            check_eligibility(&d, 100_000.0, now, 0).unwrap_err().code,
            ErrorCode::DiscountInactive
        );
        d.is_active = true;
        assert_eq!(
            check_eligibility(&d, 100_000.0, now, 0).unwrap_err().code,
            ErrorCode::DiscountExpired
        );
        assert_eq!(
            check_eligibility(&d, 100_000.0, 5 * DAY, 0).unwrap_err().code,
            ErrorCode::DiscountNotStarted
        );
    }

    #[test]
    fn test_usage_limits() {
        let now = 15 * DAY;
        let mut d = discount(DiscountType::Fixed, 10_000.0);
        d.usage_limit = Some(5);
        d.used_count = 5;
        assert_eq!(
            check_eligibility(&d, 100_000.0, now, 0).unwrap_err().code,
            ErrorCode::DiscountUsageLimitReached
        );

        d.used_count = 1;
        d.per_user_limit = Some(1);
        assert_eq!(
            check_eligibility(&d, 100_000.0, now, 1).unwrap_err().code,
            ErrorCode::DiscountUserLimitReached
        );
        assert!(check_eligibility(&d, 100_000.0, now, 0).is_ok());
    }

    #[test]
    fn test_min_order_value() {
        let mut d = discount(DiscountType::Fixed, 10_000.0);
        d.min_order_value = 200_000.0;
        let err = check_eligibility(&d, 199_999.0, 15 * DAY, 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::DiscountMinOrderNotMet);
        assert!(err.details.unwrap().contains_key("min_order_value"));
        assert!(check_eligibility(&d, 200_000.0, 15 * DAY, 0).is_ok());
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code(" tet_2025 ").unwrap(), "TET_2025");
        assert!(normalize_code("ab").is_err());
        assert!(normalize_code("SALE 10").is_err());
        assert!(normalize_code(&"X".repeat(31)).is_err());
    }

    #[test]
    fn test_validate_date_range() {
        let mut d = discount(DiscountType::Fixed, 1.0);
        d.end_date = d.start_date - 1;
        let err = validate_discount(&d).unwrap_err();
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
        d.end_date = d.start_date;
        assert!(validate_discount(&d).is_err());
    }

    #[test]
    fn test_validate_values() {
        assert!(validate_discount(&discount(DiscountType::Percentage, 100.0)).is_ok());
        assert!(validate_discount(&discount(DiscountType::Percentage, 100.5)).is_err());
        assert!(validate_discount(&discount(DiscountType::Percentage, 0.0)).is_err());
        assert!(validate_discount(&discount(DiscountType::Fixed, -5.0)).is_err());

        let mut d = discount(DiscountType::Fixed, 5.0);
        d.usage_limit = Some(0);
        assert!(validate_discount(&d).is_err());
    }

    #[test]
    fn test_huge_order_value_does_not_overflow() {
        let d = discount(DiscountType::Percentage, 50.0);
        let out = apply_discount(&d, 7.0e28);
        assert!(out.discount_amount > 0.0);
        assert!(out.final_amount > 0.0);

        let mut d = discount(DiscountType::Fixed, 1.0);
        d.max_discount_amount = Some(1e20);
        assert_eq!(
            validate_discount(&d).unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
    }

    #[test]
    fn test_merge_update_revalidates() {
        let d = discount(DiscountType::Percentage, 10.0);
        let update = DiscountUpdate {
            code: None,
            description: None,
            discount_type: None,
            value: None,
            max_discount_amount: None,
            min_order_value: None,
            usage_limit: None,
            per_user_limit: None,
            start_date: Some(30 * DAY),
            end_date: None,
            is_active: None,
        };
        assert!(merge_update(d, update).is_err());
    }
}
