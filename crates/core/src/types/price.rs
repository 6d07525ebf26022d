//! Whole-unit catalog pricing.
//!
//! Prices are non-negative integers in the store's currency unit. The
//! discount is a whole percentage between 0 and 100.

/// Largest valid discount percentage.
pub const MAX_DISCOUNT: u8 = 100;

/// Compute the selling price after applying a percentage discount.
///
/// Equals `round(mrp * (1 - discount / 100))` with halves rounded up, using
/// integer arithmetic. Discounts above 100 are clamped to 100.
///
/// ```
/// use showroom_core::final_price;
///
/// assert_eq!(final_price(100, 20), 80);
/// assert_eq!(final_price(999, 10), 899);
/// assert_eq!(final_price(1499, 15), 1274);
/// ```
#[must_use]
pub fn final_price(mrp: u32, discount: u8) -> u32 {
    let discount = u64::from(discount.min(MAX_DISCOUNT));
    let kept = u64::from(mrp) * (100 - discount);
    // kept / 100 rounded half-up; never exceeds mrp so it fits in u32
    u32::try_from((kept + 50) / 100).unwrap_or(mrp)
}
