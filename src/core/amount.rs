use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Threshold under which a balance, edge weight or remaining settlement
/// amount is treated as zero.
///
/// Settlement, point lookup and edge enumeration all share this constant so
/// that an edge the settlement pass considers absent is never reported by a
/// lookup.
pub const EPSILON: Decimal = dec!(0.001);

/// Returns true if `amount` is within [`EPSILON`] of zero.
///
/// # Examples
///
/// ```
/// use debt_graph::core::amount::is_negligible;
/// use rust_decimal_macros::dec;
///
/// assert!(is_negligible(dec!(0.0005)));
/// assert!(is_negligible(dec!(-0.001)));
/// assert!(!is_negligible(dec!(0.01)));
/// ```
pub fn is_negligible(amount: Decimal) -> bool {
    amount.abs() <= EPSILON
}

/// Render an amount as dollars with exactly two decimal places, e.g. `$25.00`.
///
/// Half-cent midpoints round away from zero.
pub fn format_dollars(amount: Decimal) -> String {
    let cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${:.2}", cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon_boundary() {
        assert!(is_negligible(Decimal::ZERO));
        assert!(is_negligible(EPSILON));
        assert!(!is_negligible(dec!(0.0011)));
    }

    #[test]
    fn test_format_dollars_pads() {
        assert_eq!(format_dollars(dec!(25)), "$25.00");
        assert_eq!(format_dollars(dec!(3.5)), "$3.50");
    }

    #[test]
    fn test_format_dollars_rounds() {
        assert_eq!(format_dollars(dec!(10.006)), "$10.01");
        assert_eq!(format_dollars(dec!(33.3333)), "$33.33");
        assert_eq!(format_dollars(dec!(0.125)), "$0.13");
    }
}
