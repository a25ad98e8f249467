// src/common/money.rs

use rust_decimal::{Decimal, RoundingStrategy};

/// Arredonda para centavos (meio para longe do zero, como na nota fiscal).
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Sempre duas casas: `12` -> `"12.00"`, `-3.5` -> `"-3.50"`.
pub fn format_decimal_2(value: Decimal) -> String {
    let mut rounded = round_cents(value);
    rounded.rescale(2);
    rounded.to_string()
}

/// Soma que satura em vez de estourar; os valores vêm do backend sem limite.
pub fn saturating_sum<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}
