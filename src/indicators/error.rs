use thiserror::Error;

/// Contract violations in indicator parameters. Data-quality gaps
/// (empty or short series) are never reported through this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("{indicator}: window must be at least 1, got {window}")]
    InvalidWindow {
        indicator: &'static str,
        window: usize,
    },
}

impl IndicatorError {
    pub(crate) fn check_window(indicator: &'static str, window: usize) -> Result<(), Self> {
        if window == 0 {
            return Err(IndicatorError::InvalidWindow { indicator, window });
        }
        Ok(())
    }
}
