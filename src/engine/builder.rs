// ============================================================================
// Calculator Builder
// Creates calculator engines with validated configuration
// ============================================================================

use crate::domain::config::DisplayConfig;
use crate::engine::Calculator;
use crate::interfaces::DisplaySink;
use std::sync::Arc;

/// Builder for creating calculator engines with a fluent API.
///
/// # Example
/// ```
/// use calculator_engine::prelude::*;
/// use std::sync::Arc;
///
/// let calc = CalculatorBuilder::new()
///     .digit_limit(12)
///     .build(Arc::new(NoOpDisplaySink))
///     .unwrap();
/// assert_eq!(calc.config().digit_limit, 12);
/// ```
pub struct CalculatorBuilder {
    config: DisplayConfig,
}

impl CalculatorBuilder {
    /// Start from the default 10-digit display policy.
    pub fn new() -> Self {
        Self {
            config: DisplayConfig::default(),
        }
    }

    /// Set the significant-digit cap for entry (and with it the rounding
    /// precision and scientific threshold).
    pub fn digit_limit(mut self, digit_limit: u32) -> Self {
        self.config.digit_limit = digit_limit;
        self
    }

    /// Validate the configuration and build the engine.
    pub fn build(self, sink: Arc<dyn DisplaySink>) -> Result<Calculator, String> {
        self.config.validate()?;
        Ok(Calculator::with_config(self.config, sink))
    }
}

impl Default for CalculatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
