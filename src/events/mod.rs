//! Event scheduling
//!
//! This module contains the min-ordered [`PriorityQueue`] and the
//! [`RideEvent`] variants the engine schedules in it.
//!
//! # Usage Example
//!
//! ```rust
//! use bikeshare_simulator::events::{PriorityQueue, RideEvent};
//! use bikeshare_simulator::network::Ride;
//! use bikeshare_simulator::types::{parse_timestamp, RideId};
//!
//! let ride = Ride::new(
//!     "7000",
//!     "7001",
//!     parse_timestamp("2017-06-01 07:00").unwrap(),
//!     parse_timestamp("2017-06-01 07:20").unwrap(),
//! )
//! .unwrap();
//!
//! let mut queue = PriorityQueue::new();
//! queue.insert(RideEvent::end_of(RideId(0), &ride));
//! queue.insert(RideEvent::start_of(RideId(0), &ride));
//!
//! let first = queue.extract_min().unwrap();
//! assert_eq!(first.time(), ride.start_time());
//! ```

pub mod queue;
pub mod ride_event;

// Re-export all public types for convenience
pub use queue::*;
pub use ride_event::*;
