use thiserror::Error;

/// Fixed-point scale of amounts and rates: 1 unit = 1e8.
pub const PRECISION: u64 = 100_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("rate cannot be zero")]
    ZeroRate,

    #[error("converted amount does not fit in 64 bits")]
    Overflow,
}

/// Converts `amount` of an asset priced at `from_rate` into an asset priced at
/// `to_rate`. Rounds toward zero. Exact: the intermediate product is 128-bit.
pub fn convert(amount: u64, from_rate: u64, to_rate: u64) -> Result<u64, ConversionError> {
    if from_rate == 0 || to_rate == 0 {
        return Err(ConversionError::ZeroRate);
    }

    let value = u128::from(amount) * u128::from(from_rate) / u128::from(to_rate);
    u64::try_from(value).map_err(|_| ConversionError::Overflow)
}
