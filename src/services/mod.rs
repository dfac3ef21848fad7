//! Event producers feeding the aggregator.

/// MPRIS media player discovery and monitoring
pub mod mpris;
/// Process signal handling
pub mod signals;
/// D-Bus "shift active player" listener
pub mod shift;

pub use mpris::MprisSource;
pub use shift::ShiftListener;
