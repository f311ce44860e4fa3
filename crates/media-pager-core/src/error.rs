/// Errors surfaced by configuration and programmatic navigation.
///
/// Runtime anomalies (an empty collection, a stale content delivery, a drag
/// sample outside a drag) are not errors: they are logged and degrade to no
/// visible change.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PagerError {
    #[error("gap between items must be finite and non-negative, got {0}")]
    InvalidGap(f32),
    #[error("minimum fling velocity must be finite and non-negative, got {0}")]
    InvalidVelocityThreshold(f32),
    #[error("minimum settle translation must be finite and non-negative, got {0}")]
    InvalidTranslationThreshold(f32),
    #[error("operation not allowed while a drag is in progress")]
    GestureInProgress,
}
