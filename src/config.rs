use geo::GeoFloat;

use crate::SweepError;

/// Tolerance used by the orientation test and the determinant check.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// How the active segments are ordered during the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveOrder {
    /// Order by the position of each segment on the sweep line.
    ///
    /// Segments are split at every crossing found ahead of the sweep, so
    /// the active order always matches the vertical order at the current
    /// sweep position. Reports every crossing of segments in general
    /// position.
    SweepPosition,
    /// Order by the `(y, x)` of the end point a segment was inserted with.
    ///
    /// The order is never updated after insertion, so crossing segments
    /// that swap height before they become adjacent can go unreported.
    /// Every reported pair is a true intersection.
    InsertionKey,
}

impl Default for ActiveOrder {
    fn default() -> Self {
        ActiveOrder::SweepPosition
    }
}

/// Which contacts between two segments count as an intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Only proper crossings: the end points of each segment lie strictly on
    /// opposite sides of the other's line.
    Crossing,
    /// Proper crossings, plus end points touching the other segment and
    /// collinear overlaps.
    Touching,
}

impl Default for Contact {
    fn default() -> Self {
        Contact::Crossing
    }
}

/// Parameters of an intersection sweep.
///
/// ```rust
/// use segment_crossings::{ActiveOrder, Contact, SweepConfig};
/// let config = SweepConfig::new()
///     .with_epsilon(1e-12)
///     .with_order(ActiveOrder::InsertionKey)
///     .with_contact(Contact::Touching);
/// assert_eq!(config.epsilon, 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepConfig {
    pub epsilon: f64,
    pub order: ActiveOrder,
    pub contact: Contact,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            epsilon: DEFAULT_EPSILON,
            order: ActiveOrder::default(),
            contact: Contact::default(),
        }
    }
}

impl SweepConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_order(mut self, order: ActiveOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contact = contact;
        self
    }

    /// The tolerance converted to the coordinate type.
    pub(crate) fn tolerance<T: GeoFloat>(&self) -> Result<T, SweepError> {
        if !self.epsilon.is_finite() || self.epsilon < 0. {
            return Err(SweepError::InvalidEpsilon(self.epsilon));
        }
        T::from(self.epsilon).ok_or(SweepError::InvalidEpsilon(self.epsilon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SweepConfig::default();
        assert_eq!(config.epsilon, DEFAULT_EPSILON);
        assert_eq!(config.order, ActiveOrder::SweepPosition);
        assert_eq!(config.contact, Contact::Crossing);
        assert_eq!(config.tolerance::<f64>(), Ok(1e-9));
    }

    #[test]
    fn test_invalid_tolerance() {
        for eps in [-1., f64::NAN, f64::INFINITY] {
            let config = SweepConfig::new().with_epsilon(eps);
            assert!(config.tolerance::<f64>().is_err());
        }
        assert_eq!(SweepConfig::new().with_epsilon(0.).tolerance::<f32>(), Ok(0.));
    }
}
