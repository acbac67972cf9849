use thiserror::Error;

/// Errors raised by finite field construction and arithmetic.
///
/// A [FieldError::FieldMismatch] is never returned by arithmetic: combining
/// elements of different fields is a bug in the caller and panics with the
/// same message. It is only produced by the explicit validation calls
/// [Zp::check_field](crate::domains::zp::Zp::check_field) and
/// [ZSet::check_field](crate::zset::ZSet::check_field).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("invalid integer {0:?}")]
    InvalidInteger(String),
    #[error("{value} is not invertible mod {modulus}")]
    NotInvertible { value: String, modulus: String },
    #[error("expected finite field Z({expected}), was Z({actual})")]
    FieldMismatch { expected: String, actual: String },
    #[error("invalid modulus {0}: must be greater than 1")]
    InvalidModulus(String),
    #[error("unknown field strength {0:?}")]
    UnknownStrength(String),
}
