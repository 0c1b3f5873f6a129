//! Exact decimal money helpers shared by the ledger and its services.
//!
//! All monetary values are carried as [`Decimal`] end to end. Display and
//! persisted figures are rounded half-up to two places, matching the
//! original receipts.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

/// ISO 4217 code used on every receipt and report.
pub const CURRENCY_CODE: &str = "AED";

/// UAE VAT applied to every order subtotal.
pub const VAT_RATE: Decimal = dec!(0.05);

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Subtotal plus its VAT share, both rounded to cent precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VatBreakdown {
    pub subtotal: Decimal,
    pub vat_amount: Decimal,
    pub total: Decimal,
}

/// Derives the VAT line and grand total for a raw subtotal.
pub fn vat_breakdown(subtotal: Decimal) -> VatBreakdown {
    let subtotal = round2(subtotal);
    let vat_amount = round2(subtotal * VAT_RATE);
    VatBreakdown {
        subtotal,
        vat_amount,
        total: subtotal + vat_amount,
    }
}

/// Renders an amount as `AED 31.50`.
pub fn format_amount(value: Decimal) -> String {
    format!("{} {:.2}", CURRENCY_CODE, round2(value))
}

/// Clamps a balance at zero; owed amounts are never displayed negative.
pub fn clamp_non_negative(value: Decimal) -> Decimal {
    if value.is_sign_negative() {
        Decimal::ZERO
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vat_breakdown_is_five_percent() {
        let breakdown = vat_breakdown(dec!(30.00));
        assert_eq!(breakdown.vat_amount, dec!(1.50));
        assert_eq!(breakdown.total, dec!(31.50));
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round2(dec!(1.005)), dec!(1.01));
        assert_eq!(round2(dec!(1.004)), dec!(1.00));
    }

    #[test]
    fn vat_rounds_before_totalling() {
        // 0.30 * 0.05 = 0.015 -> 0.02, so total carries the rounded VAT.
        let breakdown = vat_breakdown(dec!(0.30));
        assert_eq!(breakdown.vat_amount, dec!(0.02));
        assert_eq!(breakdown.total, dec!(0.32));
    }

    #[test]
    fn negative_balances_clamp_to_zero() {
        assert_eq!(clamp_non_negative(dec!(-4.20)), Decimal::ZERO);
        assert_eq!(clamp_non_negative(dec!(4.20)), dec!(4.20));
    }

    #[test]
    fn amounts_format_with_currency_code() {
        assert_eq!(format_amount(dec!(31.5)), "AED 31.50");
    }
}
