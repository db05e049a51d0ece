// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod display;

pub use display::{
    CollectingDisplaySink, DisplayEvent, DisplaySink, LoggingDisplaySink, NoOpDisplaySink,
};
