use thiserror::Error;

/// Input that cannot be turned into a [`LocationQuery`](crate::LocationQuery).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("Invalid latitude or longitude entered. Please enter valid numeric values.")]
    InvalidCoordinates,
    #[error("Please enter a valid city name or coordinates.")]
    NoInputProvided,
    #[error("Location not found. Try using coordinates instead.")]
    LocationNotFound,
}

/// Terminal failure of a forecast request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PresentationError {
    #[error("Location not found. Try using coordinates instead.")]
    LocationNotFound,
    #[error("City not found or API limit reached. Please try again or check your API key.")]
    ProviderUnavailable,
}

/// Transport-level failure talking to an upstream HTTP service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}
