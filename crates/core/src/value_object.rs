//! Value object traits: equality by value, and a defined "no data" value.
//!
//! Summaries coming back from upstream services are value objects: they have
//! **no identity** and are defined entirely by their figures. Two summaries with
//! the same figures are equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
///
/// The trait requires:
/// - **Clone**: summaries are small and copied freely between layers
/// - **PartialEq**: compared by their attribute values
/// - **Debug**: debuggable in logs and assertions
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// The domain-appropriate zero of a value object.
///
/// Used when an upstream cannot be reached: the reporting layer never exposes
/// a missing field, it exposes the zero value instead.
///
/// ```ignore
/// let hr = HrSummary::zero();
/// assert_eq!(hr.total_employees, 0);
/// assert!(hr.is_zero());
/// ```
pub trait ZeroValue: ValueObject {
    /// Every field at its zero / identity value.
    fn zero() -> Self;

    /// True when every field equals the zero value (numerically, so `0.00 == 0`).
    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}
