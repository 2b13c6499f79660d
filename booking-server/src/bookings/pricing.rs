//! Booking price calculation
//!
//! price = Σ(resource hourly rate) × duration_hours，Decimal 精确计算。

use rust_decimal::Decimal;

/// Total price for a window over the given per-hour rates
pub fn window_price(hourly_rates: &[Decimal], duration_hours: u32) -> Decimal {
    let rate_sum: Decimal = hourly_rates.iter().copied().sum();
    rate_sum * Decimal::from(duration_hours)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_room_two_hours() {
        // $30/h room for 2h
        let price = window_price(&[Decimal::new(30, 0)], 2);
        assert_eq!(price, Decimal::new(60, 0));
    }

    #[test]
    fn test_two_rooms_two_hours() {
        let price = window_price(&[Decimal::new(30, 0), Decimal::new(30, 0)], 2);
        assert_eq!(price, Decimal::new(120, 0));
    }

    #[test]
    fn test_chairs_fractional_rate() {
        // 3 chairs at $2.50/h for 4h = $30
        let rates = vec![Decimal::new(250, 2); 3];
        assert_eq!(window_price(&rates, 4), Decimal::new(30, 0));
    }

    #[test]
    fn test_zero_rate_is_free() {
        assert_eq!(window_price(&[Decimal::ZERO], 3), Decimal::ZERO);
    }
}
