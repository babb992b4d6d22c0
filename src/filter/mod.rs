//! Standalone filters over parameter streams and generic byte streams.
//!
//! Unlike the scene transforms, these do not interpret the scene format.
pub mod chunk;
pub mod interval;
pub mod vote;

pub use self::chunk::{cut, cut_stream};
pub use self::interval::{format_intervals, merge_intervals, Interval, IntervalInput, IntervalStats};
pub use self::vote::{best_by_rms, ranking, read_costs, tally_votes, Votes};
