use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::RetirementError;
use crate::types::{Money, Rate};
use crate::RetirementResult;

pub(crate) const MONTHS_PER_YEAR: i64 = 12;

/// Monthly rates closer to zero than this are treated as exactly zero so the
/// annuity formulas degenerate to simple sums instead of dividing by ~0.
pub(crate) const RATE_EPSILON: Decimal = dec!(0.0000000001);

/// Compute (1 + rate)^n via iterative multiplication (avoids Decimal::powd
/// drift). Overflow is reported, never wrapped.
pub(crate) fn compound(rate: Rate, n: u32) -> RetirementResult<Decimal> {
    let factor = Decimal::ONE + rate;
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = result
            .checked_mul(factor)
            .ok_or_else(|| RetirementError::Overflow {
                context: format!("compound factor (1 + {rate})^{n}"),
            })?;
    }
    Ok(result)
}

pub(crate) fn check_rate(field: &str, rate: Rate) -> RetirementResult<()> {
    if rate <= dec!(-1) {
        return Err(RetirementError::InvalidInput {
            field: field.into(),
            reason: "rate must be greater than -100%".into(),
        });
    }
    Ok(())
}

/// Future value of a lump sum: FV = PV * (1 + r)^years.
///
/// `years <= 0` returns the present value unchanged; there is no
/// negative-time extrapolation.
pub fn fv_lump_sum(present_value: Money, annual_rate: Rate, years: i64) -> RetirementResult<Money> {
    check_rate("annual_rate", annual_rate)?;
    if years <= 0 {
        return Ok(present_value);
    }
    let factor = compound(annual_rate, years as u32)?;
    present_value
        .checked_mul(factor)
        .ok_or_else(|| RetirementError::Overflow {
            context: "lump-sum future value".into(),
        })
}

/// Future value of a fixed monthly contribution (ordinary annuity, monthly
/// compounding): FV = P * ((1+r)^n - 1) / r with r = annual/12, n = years*12.
pub fn fv_monthly_annuity(payment: Money, annual_rate: Rate, years: i64) -> RetirementResult<Money> {
    check_rate("annual_rate", annual_rate)?;
    let n = years * MONTHS_PER_YEAR;
    if n <= 0 {
        return Ok(Decimal::ZERO);
    }

    let monthly_rate = annual_rate / Decimal::from(MONTHS_PER_YEAR);
    if monthly_rate.abs() < RATE_EPSILON {
        // No growth: the contributions just stack up
        return payment
            .checked_mul(Decimal::from(n))
            .ok_or_else(|| RetirementError::Overflow {
                context: "zero-rate annuity future value".into(),
            });
    }

    let annuity_factor = (compound(monthly_rate, n as u32)? - Decimal::ONE) / monthly_rate;
    payment
        .checked_mul(annuity_factor)
        .ok_or_else(|| RetirementError::Overflow {
            context: "annuity future value".into(),
        })
}

/// Grow a present-day amount at the inflation rate over the given years.
/// `years <= 0` returns the amount unchanged.
pub fn inflation_adjust(amount_today: Money, inflation_rate: Rate, years: i64) -> RetirementResult<Money> {
    check_rate("inflation_rate", inflation_rate)?;
    if years <= 0 {
        return Ok(amount_today);
    }
    let factor = compound(inflation_rate, years as u32)?;
    amount_today
        .checked_mul(factor)
        .ok_or_else(|| RetirementError::Overflow {
            context: "inflation adjustment".into(),
        })
}

/// Nominal -> real rate: (1 + nominal) / (1 + inflation) - 1.
pub fn real_rate(nominal_rate: Rate, inflation_rate: Rate) -> RetirementResult<Rate> {
    check_rate("inflation_rate", inflation_rate)?;
    Ok((Decimal::ONE + nominal_rate) / (Decimal::ONE + inflation_rate) - Decimal::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_compound_basic() {
        // 1.1^3 = 1.331
        assert_eq!(compound(dec!(0.10), 3).unwrap(), dec!(1.331));
    }

    #[test]
    fn test_fv_lump_sum_basic() {
        // 100_000 * 1.07^10 ≈ 196_715.14
        let fv = fv_lump_sum(dec!(100_000), dec!(0.07), 10).unwrap();
        assert!((fv - dec!(196_715.14)).abs() < dec!(0.01), "fv={fv}");
    }

    #[test]
    fn test_fv_lump_sum_zero_horizon_identity() {
        assert_eq!(fv_lump_sum(dec!(12_345.67), dec!(0.08), 0).unwrap(), dec!(12_345.67));
    }

    #[test]
    fn test_fv_lump_sum_negative_years_no_extrapolation() {
        assert_eq!(fv_lump_sum(dec!(500), dec!(0.10), -5).unwrap(), dec!(500));
    }

    #[test]
    fn test_fv_annuity_zero_horizon_is_zero() {
        assert_eq!(fv_monthly_annuity(dec!(5_000), dec!(0.12), 0).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_fv_annuity_zero_rate_linearity() {
        // p * years * 12 when the rate is exactly zero
        assert_eq!(
            fv_monthly_annuity(dec!(1_000), Decimal::ZERO, 7).unwrap(),
            dec!(84_000)
        );
    }

    #[test]
    fn test_fv_annuity_near_zero_rate_treated_as_zero() {
        let fv = fv_monthly_annuity(dec!(1_000), dec!(0.0000000001), 7).unwrap();
        assert_eq!(fv, dec!(84_000));
    }

    #[test]
    fn test_fv_annuity_known_value() {
        // 10_000/month at 12% nominal (1%/month) for 10 years (120 months):
        // factor = (1.01^120 - 1) / 0.01 ≈ 230.0387
        let fv = fv_monthly_annuity(dec!(10_000), dec!(0.12), 10).unwrap();
        assert!((fv - dec!(2_300_387)).abs() < dec!(100), "fv={fv}");
    }

    #[test]
    fn test_inflation_adjust_basic() {
        // 60_000 * 1.06^35 ≈ 461_165.19
        let adjusted = inflation_adjust(dec!(60_000), dec!(0.06), 35).unwrap();
        assert!((adjusted - dec!(461_165.19)).abs() < dec!(1), "adjusted={adjusted}");
    }

    #[test]
    fn test_inflation_adjust_zero_years() {
        assert_eq!(inflation_adjust(dec!(42_000), dec!(0.06), 0).unwrap(), dec!(42_000));
    }

    #[test]
    fn test_real_rate_basic() {
        // (1.06 / 1.06) - 1 = 0
        assert_eq!(real_rate(dec!(0.06), dec!(0.06)).unwrap(), Decimal::ZERO);
        // (1.10 / 1.06) - 1 ≈ 0.037735
        let rr = real_rate(dec!(0.10), dec!(0.06)).unwrap();
        assert!((rr - dec!(0.037735)).abs() < dec!(0.000001), "rr={rr}");
    }

    #[test]
    fn test_rate_below_minus_one_rejected() {
        assert!(fv_lump_sum(dec!(100), dec!(-1.5), 10).is_err());
        assert!(fv_monthly_annuity(dec!(100), dec!(-1.5), 10).is_err());
        assert!(real_rate(dec!(0.05), dec!(-1)).is_err());
    }

    #[test]
    fn test_compound_overflow_is_reported() {
        let result = fv_lump_sum(dec!(1), dec!(10_000_000_000_000_000_000), 2);
        assert!(matches!(result, Err(RetirementError::Overflow { .. })));
    }
}
