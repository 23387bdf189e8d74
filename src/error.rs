use strum_macros::Display;

/// Errors surfaced by the engine's public operations.
///
/// Failures raised inside a memoized computation are returned unchanged by the
/// cache layer and are never stored, so the next call recomputes.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum EngineError {
    /// The orbital elements cannot be propagated; fatal to that single computation.
    InvalidElements(InvalidElementsReason),
    /// A position-bearing record lacks a usable coordinate.
    MalformedRecord(MalformedField),
    /// The query parameters themselves are unusable.
    InvalidQuery(QueryError),
    /// The caller's cancellation token fired between two chunks.
    Cancelled,
}

impl std::error::Error for EngineError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InvalidElementsReason {
    MissingNoradId,
    NonFiniteValue,
    EccentricityOutOfRange,
    NonPositiveMeanMotion,
    /// Mean motion above [`MAX_MEAN_MOTION`](crate::orbit::constants::MAX_MEAN_MOTION).
    MeanMotionOutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MalformedField {
    Latitude,
    Longitude,
    Altitude,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum QueryError {
    NonPositiveThreshold,
    NegativeTimeSpan,
}

impl From<InvalidElementsReason> for EngineError {
    fn from(value: InvalidElementsReason) -> Self { EngineError::InvalidElements(value) }
}

impl From<MalformedField> for EngineError {
    fn from(value: MalformedField) -> Self { EngineError::MalformedRecord(value) }
}

impl From<QueryError> for EngineError {
    fn from(value: QueryError) -> Self { EngineError::InvalidQuery(value) }
}
