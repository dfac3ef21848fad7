//! Status line rendering: formatting player state and writing lines.

/// Player state to status text
pub mod format;
/// Line-oriented output writer
pub mod sink;

pub use format::Formatter;
pub use sink::OutputSink;
