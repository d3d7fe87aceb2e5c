//! Source of verification code values.

/// Produces uniformly distributed values in `0..CODE_SPACE`.
///
/// See [`crate::domain::CODE_SPACE`].
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Next code value.
    fn next_value(&self) -> u32;
}
