//! MPRIS players on the D-Bus session bus.
//!
//! Discovers players, tracks their recency order and forwards their
//! playback and metadata changes into the aggregator's event queue.

/// Player discovery and lifecycle events
pub mod discovery;
/// Media player error types
pub mod error;
/// Track metadata types
pub mod metadata;
/// Player property monitoring
pub mod monitoring;
/// Recency ordering of known players
pub mod order;
/// D-Bus proxy trait definitions
pub mod proxy;
/// `PlayerSource` implementation backed by MPRIS
pub mod source;
/// Player identity and playback status
pub mod types;

pub use error::*;
pub use metadata::*;
pub use order::PlayerOrder;
pub use proxy::*;
pub use source::MprisSource;
pub use types::*;
