//! Pricing normalizer
//!
//! Monetary amounts travel as `f64` but every calculation goes through
//! `Decimal`. Amounts are rounded to 2 fractional digits with
//! round-half-away-from-zero, so `1.005 -> 1.01` and `-1.005 -> -1.01`.
//!
//! No amount is ever replaced by a default: a value `Decimal` cannot hold,
//! or a total that overflows, is a [`PricingError`].

use rust_decimal::prelude::*;
use shared::error::{AppError, ErrorCode};
use shared::models::MAX_PRICE;
use thiserror::Error;

/// Fractional digits kept on every stored amount
pub const DECIMAL_PLACES: u32 = 2;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("amount {0} is not a finite number")]
    NonFinite(f64),

    #[error("amount {0} is out of range")]
    OutOfRange(f64),

    #[error("total of amounts is out of range")]
    Overflow,
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::Overflow => {
                AppError::with_message(ErrorCode::InternalError, err.to_string())
            }
            other => AppError::with_message(ErrorCode::FoodInvalidPrice, other.to_string()),
        }
    }
}

/// Convert f64 to Decimal for calculation.
///
/// Goes through the shortest decimal representation of the float so that a
/// literal such as `1.005` is seen as exactly 1.005 and not as its binary
/// neighbour 1.00499999...
pub fn to_decimal(value: f64) -> Result<Decimal, PricingError> {
    if !value.is_finite() {
        return Err(PricingError::NonFinite(value));
    }
    Decimal::from_str(&value.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(value))
        .ok_or(PricingError::OutOfRange(value))
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round a raw amount to 2 fractional digits, half away from zero
pub fn normalize_price(value: f64) -> Result<f64, PricingError> {
    to_decimal(value).map(to_f64)
}

/// Normalize an optional amount, as carried by partial updates
pub fn normalize_opt(value: Option<f64>) -> Result<Option<f64>, PricingError> {
    value.map(normalize_price).transpose()
}

/// Admit a submitted price: finite, within `0..=MAX_PRICE`, then normalized
pub fn check_price(value: f64) -> Result<f64, PricingError> {
    if !value.is_finite() {
        return Err(PricingError::NonFinite(value));
    }
    if !(0.0..=MAX_PRICE).contains(&value) {
        return Err(PricingError::OutOfRange(value));
    }
    normalize_price(value)
}

/// Sum amounts with precise arithmetic, normalizing the total
pub fn sum_prices<I>(amounts: I) -> Result<f64, PricingError>
where
    I: IntoIterator<Item = f64>,
{
    let mut total = Decimal::ZERO;
    for amount in amounts {
        total = total
            .checked_add(to_decimal(amount)?)
            .ok_or(PricingError::Overflow)?;
    }
    Ok(to_f64(total))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fractional_digits(value: f64) -> u32 {
        to_decimal(value).unwrap().normalize().scale()
    }

    #[test]
    fn test_half_away_from_zero() {
        assert_eq!(normalize_price(1.005), Ok(1.01));
        assert_eq!(normalize_price(-1.005), Ok(-1.01));
        assert_eq!(normalize_price(2.675), Ok(2.68));
        assert_eq!(normalize_price(0.125), Ok(0.13));
        assert_eq!(normalize_price(-0.125), Ok(-0.13));
    }

    #[test]
    fn test_rounds_down_below_midpoint() {
        assert_eq!(normalize_price(1.004), Ok(1.0));
        assert_eq!(normalize_price(-1.004), Ok(-1.0));
        assert_eq!(normalize_price(19.994), Ok(19.99));
    }

    #[test]
    fn test_idempotent_and_two_digits() {
        for x in [0.0, 0.1, 1.005, 3.14159, -7.777, 12345.6789, 99.995, 0.3333] {
            let once = normalize_price(x).unwrap();
            assert_eq!(normalize_price(once), Ok(once), "not idempotent for {x}");
            assert!(fractional_digits(once) <= DECIMAL_PLACES, "{once} has too many digits");
        }
    }

    #[test]
    fn test_non_finite_is_rejected() {
        assert!(matches!(normalize_price(f64::NAN), Err(PricingError::NonFinite(_))));
        assert_eq!(
            normalize_price(f64::INFINITY),
            Err(PricingError::NonFinite(f64::INFINITY))
        );
        assert!(check_price(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_out_of_range_is_rejected_not_zeroed() {
        assert_eq!(normalize_price(1e30), Err(PricingError::OutOfRange(1e30)));
        assert_eq!(to_decimal(f64::MAX), Err(PricingError::OutOfRange(f64::MAX)));
    }

    #[test]
    fn test_check_price_bounds() {
        assert_eq!(check_price(0.0), Ok(0.0));
        assert_eq!(check_price(MAX_PRICE), Ok(MAX_PRICE));
        assert_eq!(check_price(12.345), Ok(12.35));
        assert_eq!(check_price(-0.01), Err(PricingError::OutOfRange(-0.01)));
        assert_eq!(check_price(5e28), Err(PricingError::OutOfRange(5e28)));
    }

    #[test]
    fn test_invalid_price_maps_to_food_invalid_price() {
        let err = AppError::from(PricingError::OutOfRange(1e30));
        assert_eq!(err.code, ErrorCode::FoodInvalidPrice);
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);

        let err = AppError::from(PricingError::Overflow);
        assert_eq!(err.code, ErrorCode::InternalError);
    }

    #[test]
    fn test_sum_prices_avoids_float_drift() {
        assert_ne!(0.1_f64 + 0.2_f64, 0.3);
        assert_eq!(sum_prices([0.1, 0.2]), Ok(0.3));
        assert_eq!(sum_prices(std::iter::repeat_n(0.01, 1000)), Ok(10.0));
        assert_eq!(sum_prices(Vec::<f64>::new()), Ok(0.0));
    }

    #[test]
    fn test_sum_prices_overflow_is_an_error() {
        assert_eq!(sum_prices([5e28, 5e28]), Err(PricingError::Overflow));
        assert_eq!(sum_prices([1.0, 1e30]), Err(PricingError::OutOfRange(1e30)));
    }

    #[test]
    fn test_normalize_opt() {
        assert_eq!(normalize_opt(None), Ok(None));
        assert_eq!(normalize_opt(Some(4.445)), Ok(Some(4.45)));
        assert!(normalize_opt(Some(f64::NAN)).is_err());
    }
}
