// ============================================================================
// Domain Models Module
// Contains all core domain entities and value objects
// ============================================================================

pub mod buffer;
pub mod config;
pub mod operator;
pub mod state;

pub use buffer::{InputBuffer, InputToken, PendingLiteral};
pub use config::DisplayConfig;
pub use operator::{ActiveOperator, BinaryOp, UnaryOp};
pub use state::{CalculatorSnapshot, CalculatorState, EntryPhase};
