//! Integration tests for Money and Currency
//!
//! Tests cover minor-unit construction, checked arithmetic, display and
//! serialization of amounts as they travel through claim payloads.

use core_kernel::{Money, Currency, MoneyError};
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_from_minor_keeps_whole_units() {
        let m = Money::from_minor(5000, Currency::IDR);
        assert_eq!(m.minor_units(), 5000);
        assert_eq!(m.currency(), Currency::IDR);
    }

    #[test]
    fn test_to_major_uses_currency_scale() {
        assert_eq!(Money::from_minor(12345, Currency::USD).to_major(), dec!(123.45));
        assert_eq!(Money::from_minor(12345, Currency::IDR).to_major(), dec!(12345));
    }

    #[test]
    fn test_zero() {
        let m = Money::zero(Currency::EUR);
        assert!(m.is_zero());
        assert!(!m.is_positive());
        assert!(!m.is_negative());
    }

    #[test]
    fn test_default_currency_is_rupiah() {
        assert_eq!(Currency::default(), Currency::IDR);
        assert_eq!(Currency::IDR.decimal_places(), 0);
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_line_total() {
        let unit = Money::from_minor(500, Currency::IDR);
        let line = unit.checked_mul(10).unwrap();
        assert_eq!(line, Money::from_minor(5000, Currency::IDR));
    }

    #[test]
    fn test_sum_of_lines() {
        let lines = vec![
            Money::from_minor(5000, Currency::IDR),
            Money::from_minor(3000, Currency::IDR),
            Money::from_minor(1500, Currency::IDR),
        ];
        let total = Money::checked_sum(&lines, Currency::IDR).unwrap();
        assert_eq!(total.minor_units(), 9500);
    }

    #[test]
    fn test_sum_rejects_mixed_currencies() {
        let lines = vec![
            Money::from_minor(5000, Currency::IDR),
            Money::from_minor(100, Currency::USD),
        ];
        let result = Money::checked_sum(&lines, Currency::IDR);
        assert!(matches!(result, Err(MoneyError::CurrencyMismatch(_, _))));
    }

    #[test]
    fn test_add_overflow_is_reported() {
        let big = Money::from_minor(i64::MAX, Currency::IDR);
        let one = Money::from_minor(1, Currency::IDR);
        assert_eq!(big.checked_add(&one), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_checked_sub() {
        let a = Money::from_minor(900, Currency::IDR);
        let b = Money::from_minor(1000, Currency::IDR);
        let diff = a.checked_sub(&b).unwrap();
        assert!(diff.is_negative());
        assert_eq!(diff.minor_units(), -100);
    }
}

mod serialization {
    use super::*;

    #[test]
    fn test_currency_serializes_as_code() {
        let json = serde_json::to_string(&Currency::IDR).unwrap();
        assert_eq!(json, "\"IDR\"");
    }

    #[test]
    fn test_money_round_trips_through_json() {
        let m = Money::from_minor(5000, Currency::IDR);
        let json = serde_json::to_string(&m).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(1999, Currency::USD).to_string(), "$ 19.99");
    }
}
