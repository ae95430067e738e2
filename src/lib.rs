//! Finds all pairwise intersections of a set of line segments with a
//! plane sweep.
//!
//! # Line Crossings
//!
//! A vertical sweep line moves from left to right over the plane. The
//! segments it currently crosses are kept ordered, and only segments that
//! become adjacent in this order are tested against each other. This is
//! typically much faster than testing every pair, and the same pair test
//! is used either way.
//!
//! The simplest usage is [`find_all_intersections`], which returns every
//! intersecting pair of input indices once, with a witnessed point.
//!
//! ```rust
//! use geo::Line;
//! use segment_crossings::find_all_intersections;
//! let input = vec![
//!     Line::from([(1., 0.), (0., 1.)]),
//!     Line::from([(0., 0.7), (1., 0.5)]),
//!     Line::from([(0., 0.), (1., 1.)]),
//! ];
//! let found = find_all_intersections(&input).unwrap();
//! // All pairs intersect
//! assert_eq!(found.len(), 3);
//! ```
//!
//! ## Configuration
//!
//! [`find_intersections_with`] takes a [`SweepConfig`] to choose
//!
//! - the tolerance used by the orientation and determinant tests,
//! - how active segments are ordered ([`ActiveOrder`]): by their position
//! on the sweep line ([`Sweep`], the default, which reports every
//! crossing), or by a key fixed when they are inserted ([`InsertionSweep`],
//! which may miss crossings once segments swap order), and
//! - which contacts count ([`Contact`]): proper crossings only, or also
//! touching and collinear contacts.
//!
//! Both controllers can also be driven one event at a time, and keep
//! [`SweepStats`] about the work done.
//!
//! Segments must have distinct, finite end points; anything else is
//! rejected with a [`SweepError`].
//!
//! [`Line`]: geo::Line
//! [`Coordinate`]: geo::Coordinate
pub mod primitives;
pub use primitives::Predicates;

pub mod events;
pub use events::{Event, EventType, SweepPoint};

mod line;
pub use line::SweepLine;

mod active;
pub use active::{ActiveSet, InsertionKey};

mod results;
pub use results::{Intersection, IntersectionSet};

pub mod crossings;
pub use crossings::{
    brute_force_intersections, find_all_intersections, find_intersections_with, InsertionSweep,
    Sweep, SweepStats,
};

mod config;
pub use config::{ActiveOrder, Contact, SweepConfig, DEFAULT_EPSILON};

mod error;
pub use error::SweepError;

#[cfg(test)]
#[path = "../benches/utils/random.rs"]
pub mod random;
