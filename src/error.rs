use thiserror::Error;

/// Configuration failures. Degenerate inputs (empty corpus, empty query,
/// empty judgment lists) are defined outputs, not errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A numeric parameter was negative or non-finite.
    #[error("invalid parameter {name}: {value} (must be finite and non-negative)")]
    InvalidParameter { name: &'static str, value: f64 },
}
