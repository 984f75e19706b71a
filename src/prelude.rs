//! Prelude module for common farmscape types and traits
//!
//! Re-exports the most commonly used types for easy importing with
//! `use farmscape::prelude::*;`

pub use crate::core::{
    config::MapConfig,
    geo::{BBox, Coordinate, Point},
    projection::{haversine, TangentPlane},
    viewport::ViewState,
};

pub use crate::entities::{
    address::Address,
    animal::AnimalType,
    building::Building,
    company::{Company, CompanyStats},
    survey::SurveyCell,
};

pub use crate::geometry::{
    placement::{PlacementCache, PlacementEngine, PlacementOptions},
    polygon,
};

pub use crate::data::source::{DataSource, HttpDataSource};

pub use crate::render::{
    icon::{MarkerIcon, SpeciesIcon},
    object::{EntityRef, LayerGroup, PathStyle, RenderGeometry, RenderObject},
    surface::{ClickEvent, MemorySurface, RenderSurface},
};

pub use crate::spatial::{
    cluster::{ClusterAggregator, ClusterConfig, CompanyCluster},
    index::{SpatialIndex, SpatialItem},
};

pub use crate::layers::{
    animal::AnimalLayer, building::BuildingLayer, company::CompanyLayer, survey::SurveyGridLayer,
};

pub use crate::controller::{ClickTarget, MapController};

pub use crate::{Error as MapError, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
