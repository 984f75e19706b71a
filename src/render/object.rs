//! The render-object model shared by all entity layers.
//!
//! Layers build groups of render objects and hand them to a
//! [`RenderSurface`](crate::render::surface::RenderSurface). Each object
//! carries a back-reference to its domain entity for click handling and
//! viewport-membership queries.

use crate::core::geo::Coordinate;
use crate::entities::building::Building;
use crate::entities::company::Company;
use crate::entities::survey::SurveyCell;
use crate::render::icon::MarkerIcon;
use std::sync::Arc;

/// Stroke/fill styling for polygon outlines.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStyle {
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
}

impl PathStyle {
    pub fn new(color: impl Into<String>, weight: f64, opacity: f64) -> Self {
        Self {
            color: color.into(),
            weight,
            opacity,
        }
    }
}

/// Styling for small circle markers (animal points).
#[derive(Debug, Clone, PartialEq)]
pub struct CircleStyle {
    pub radius: f64,
    pub stroke: bool,
    pub fill_color: String,
    pub fill_opacity: f64,
}

/// Geometry plus styling of a single render object.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderGeometry {
    Marker {
        position: Coordinate,
        icon: MarkerIcon,
    },
    CircleMarker {
        center: Coordinate,
        style: CircleStyle,
    },
    Polygon {
        ring: Vec<Coordinate>,
        style: PathStyle,
    },
}

/// Back-reference from a render object to the entity it visualizes.
#[derive(Debug, Clone)]
pub enum EntityRef {
    Building(Arc<Building>),
    Company(Arc<Company>),
    Survey(Arc<SurveyCell>),
}

#[derive(Debug, Clone)]
pub struct RenderObject {
    /// Stable within its group for the lifetime of one populate cycle.
    pub id: String,
    pub geometry: RenderGeometry,
    pub entity: Option<EntityRef>,
}

impl RenderObject {
    pub fn new(id: impl Into<String>, geometry: RenderGeometry) -> Self {
        Self {
            id: id.into(),
            geometry,
            entity: None,
        }
    }

    pub fn with_entity(mut self, entity: EntityRef) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn building(&self) -> Option<&Arc<Building>> {
        match &self.entity {
            Some(EntityRef::Building(building)) => Some(building),
            _ => None,
        }
    }

    pub fn company(&self) -> Option<&Arc<Company>> {
        match &self.entity {
            Some(EntityRef::Company(company)) => Some(company),
            _ => None,
        }
    }
}

/// A named group of render objects, attached and detached as a unit.
#[derive(Debug, Clone, Default)]
pub struct LayerGroup {
    pub id: String,
    pub objects: Vec<RenderObject>,
}

impl LayerGroup {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            objects: Vec::new(),
        }
    }

    pub fn with_objects(id: impl Into<String>, objects: Vec<RenderObject>) -> Self {
        Self {
            id: id.into(),
            objects,
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
