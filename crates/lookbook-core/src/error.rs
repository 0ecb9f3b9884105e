use std::fmt;

use crate::catalog::{CatalogError, FetchError};
use crate::compatibility::StoreError;
use crate::config::ConfigError;
use crate::looks::GenerationError;
use crate::service::OutfitScoreError;
use crate::telemetry::TelemetryError;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Catalog(CatalogError),
    Fetch(FetchError),
    Store(StoreError),
    Generation(GenerationError),
    Outfit(OutfitScoreError),
    Output(serde_json::Error),
    Task(tokio::task::JoinError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Catalog(err) => write!(f, "catalog error: {}", err),
            AppError::Fetch(err) => write!(f, "item fetch error: {}", err),
            AppError::Store(err) => write!(f, "index error: {}", err),
            AppError::Generation(err) => write!(f, "look generation error: {}", err),
            AppError::Outfit(err) => write!(f, "outfit scoring error: {}", err),
            AppError::Output(err) => write!(f, "failed to render output: {}", err),
            AppError::Task(err) => write!(f, "background task failed: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Fetch(err) => Some(err),
            AppError::Store(err) => Some(err),
            AppError::Generation(err) => Some(err),
            AppError::Outfit(err) => Some(err),
            AppError::Output(err) => Some(err),
            AppError::Task(err) => Some(err),
        }
    }
}

impl AppError {
    /// True when the failure is an unknown sku rather than a broken system.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::Generation(GenerationError::NotFound(_))
                | AppError::Outfit(OutfitScoreError::UnknownItems(_))
        )
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<FetchError> for AppError {
    fn from(value: FetchError) -> Self {
        Self::Fetch(value)
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<GenerationError> for AppError {
    fn from(value: GenerationError) -> Self {
        Self::Generation(value)
    }
}

impl From<OutfitScoreError> for AppError {
    fn from(value: OutfitScoreError) -> Self {
        Self::Outfit(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Task(value)
    }
}
