//! Fixed-rate currency conversion.
//!
//! Every rate is an exact ratio of "units of the currency per one USD". A
//! conversion goes through USD and truncates toward zero at each of the two
//! steps, so converting there and back can lose value.

use crate::models::currency::Currency;

/// The converted amount does not fit in an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{amount} {from} is too large to convert to {to}")]
pub struct ConversionOverflow {
    pub amount: i64,
    pub from: Currency,
    pub to: Currency,
}

/// `(numerator, denominator)` of the currency's units per one USD.
fn units_per_usd(currency: Currency) -> (i128, i128) {
    match currency {
        Currency::Usd => (1, 1),
        Currency::Eur => (9, 10),
        Currency::Cad => (10, 7),
        Currency::Inr => (80, 1),
    }
}

/// Convert `amount` minor units of `from` into minor units of `to`.
///
/// Returns `amount` unchanged when the currencies match.
pub fn convert(amount: i64, from: Currency, to: Currency) -> Result<i64, ConversionOverflow> {
    if from == to {
        return Ok(amount);
    }

    let (from_num, from_den) = units_per_usd(from);
    let (to_num, to_den) = units_per_usd(to);

    // Integer division truncates toward zero.
    let usd = i128::from(amount) * from_den / from_num;
    let converted = usd * to_num / to_den;

    i64::try_from(converted).map_err(|_| ConversionOverflow { amount, from, to })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(100, Currency::Usd, Currency::Eur, 90)]
    #[case(100, Currency::Eur, Currency::Usd, 111)]
    #[case(100, Currency::Usd, Currency::Cad, 142)]
    #[case(70, Currency::Cad, Currency::Usd, 49)]
    #[case(1, Currency::Usd, Currency::Inr, 80)]
    #[case(8000, Currency::Inr, Currency::Usd, 100)]
    #[case(79, Currency::Inr, Currency::Usd, 0)]
    #[case(90, Currency::Eur, Currency::Inr, 8000)]
    fn converts_through_usd(
        #[case] amount: i64,
        #[case] from: Currency,
        #[case] to: Currency,
        #[case] expected: i64,
    ) {
        assert_eq!(convert(amount, from, to), Ok(expected));
    }

    #[test]
    fn truncates_at_each_step() {
        // 10 EUR -> trunc(10 / 0.9) = 11 USD -> trunc(11 * 10 / 7) = 15 CAD
        assert_eq!(convert(10, Currency::Eur, Currency::Cad), Ok(15));
    }

    #[test]
    fn round_trip_is_lossy() {
        let eur = convert(100, Currency::Usd, Currency::Eur).unwrap();
        assert_eq!(eur, 90);
        assert_eq!(convert(eur, Currency::Eur, Currency::Usd), Ok(100));

        let cad = convert(1, Currency::Usd, Currency::Cad).unwrap();
        assert_eq!(cad, 1);
        assert_eq!(convert(cad, Currency::Cad, Currency::Usd), Ok(0));
    }

    #[test]
    fn negative_amounts_truncate_toward_zero() {
        assert_eq!(convert(-100, Currency::Usd, Currency::Cad), Ok(-142));
    }

    #[rstest]
    #[case(922_337_203_685_477_580, Currency::Usd, Currency::Inr)]
    #[case(i64::MAX, Currency::Eur, Currency::Usd)]
    #[case(i64::MIN, Currency::Usd, Currency::Cad)]
    fn out_of_range_result_is_an_error(
        #[case] amount: i64,
        #[case] from: Currency,
        #[case] to: Currency,
    ) {
        assert_eq!(
            convert(amount, from, to),
            Err(ConversionOverflow { amount, from, to })
        );
    }

    #[test]
    fn largest_amount_that_fits() {
        let max_usd = i64::MAX / 80;
        assert_eq!(
            convert(max_usd, Currency::Usd, Currency::Inr),
            Ok(max_usd * 80)
        );
        assert!(convert(max_usd + 1, Currency::Usd, Currency::Inr).is_err());
    }

    fn any_currency() -> impl Strategy<Value = Currency> {
        prop::sample::select(Currency::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn same_currency_is_identity(amount in any::<i64>(), currency in any_currency()) {
            prop_assert_eq!(convert(amount, currency, currency), Ok(amount));
        }

        #[test]
        fn non_negative_and_deterministic(
            amount in 0i64..=1_000_000_000_000,
            from in any_currency(),
            to in any_currency(),
        ) {
            let first = convert(amount, from, to).unwrap();
            prop_assert!(first >= 0);
            prop_assert_eq!(Ok(first), convert(amount, from, to));
        }
    }
}
