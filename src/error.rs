use std::fmt;

/// Errors reported by the intersection sweeps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SweepError {
    /// The segment with this identity has coincident end points.
    DegenerateSegment { id: usize },
    /// The segment with this identity has a NaN or infinite coordinate.
    NonFiniteCoordinate { id: usize },
    /// The tolerance is negative, not finite, or not representable in the
    /// coordinate type.
    InvalidEpsilon(f64),
    /// A right end point was processed for a segment that is not in the
    /// active structure.
    ///
    /// Every right event is preceded by the left event of the same segment,
    /// so this indicates a broken event order rather than bad input.
    InactiveSegment { id: usize },
    /// A segment was inserted into the active structure twice.
    DuplicateActive { id: usize },
    /// An active segment could not be located by its ordering item: the
    /// order of the active structure no longer matches the order the
    /// segments were inserted in.
    UnorderedActive { id: usize },
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepError::DegenerateSegment { id } => {
                write!(f, "segment {} has coincident end points", id)
            }
            SweepError::NonFiniteCoordinate { id } => {
                write!(f, "segment {} has a non-finite coordinate", id)
            }
            SweepError::InvalidEpsilon(eps) => write!(f, "invalid tolerance: {}", eps),
            SweepError::InactiveSegment { id } => {
                write!(f, "right end of segment {} reached while it is not active", id)
            }
            SweepError::DuplicateActive { id } => {
                write!(f, "segment {} is already active", id)
            }
            SweepError::UnorderedActive { id } => {
                write!(f, "segment {} is out of order in the active structure", id)
            }
        }
    }
}

impl std::error::Error for SweepError {}
