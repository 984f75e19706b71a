//! # Farmscape
//!
//! A viewport-driven spatial layer engine for livestock-farm maps.
//!
//! The crate fetches and derives geospatial entities (farm buildings, farm
//! companies, synthetic animal positions and a survey-progress grid) on
//! demand as the visible region and zoom level change, and maintains the
//! render objects for each entity class on an abstract render surface.

pub mod controller;
pub mod core;
pub mod data;
pub mod entities;
pub mod geometry;
pub mod layers;
pub mod prelude;
pub mod render;
pub mod spatial;

// Re-export public API
pub use crate::core::{
    config::MapConfig,
    geo::{BBox, Coordinate, Point},
    projection::TangentPlane,
    viewport::ViewState,
};

pub use crate::controller::{ClickTarget, MapController};

pub use crate::entities::{
    animal::AnimalType,
    building::Building,
    company::{Company, CompanyStats},
    survey::SurveyCell,
};

pub use crate::geometry::placement::{PlacementCache, PlacementEngine, PlacementOptions};

pub use crate::render::surface::{MemorySurface, RenderSurface};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error type alias for convenience
pub type Error = MapError;
