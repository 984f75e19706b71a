//! Animal point layer: scattered circle markers inside building footprints.

use crate::entities::building::Building;
use crate::geometry::placement::{PlacementCache, PlacementEngine};
use crate::render::object::{CircleStyle, LayerGroup, RenderGeometry, RenderObject};
use crate::render::surface::RenderSurface;
use std::sync::Arc;

pub const GROUP_ID: &str = "animals";

/// Renders one circle marker per scattered animal position. Positions come
/// from the placement cache, so re-rendering a building after a pan or
/// zoom reuses its previously scattered points.
pub struct AnimalLayer {
    group: Option<LayerGroup>,
}

impl AnimalLayer {
    pub fn new() -> Self {
        Self { group: None }
    }

    /// Builds the point objects for the given buildings at the given zoom.
    /// `zoom` only affects marker radius; positions are zoom-independent.
    pub fn create(
        &mut self,
        buildings: &[Arc<Building>],
        engine: &PlacementEngine,
        cache: &mut PlacementCache,
        zoom: f64,
    ) {
        let style = CircleStyle {
            radius: if zoom >= 20.0 { 2.0 } else { 1.0 },
            stroke: false,
            fill_color: "blue".to_string(),
            fill_opacity: 1.0,
        };
        let mut objects = Vec::new();
        for building in buildings {
            let points = cache.points_for(engine, building);
            for (i, point) in points.iter().enumerate() {
                objects.push(RenderObject::new(
                    format!("animal-{}-{}", building.way_id, i),
                    RenderGeometry::CircleMarker {
                        center: point.clone(),
                        style: style.clone(),
                    },
                ));
            }
        }
        log::debug!("animal layer: {} points", objects.len());
        self.group = Some(LayerGroup::with_objects(GROUP_ID, objects));
    }

    pub fn add(&mut self, surface: &mut dyn RenderSurface) {
        if let Some(group) = &self.group {
            surface.add_layer(group.clone());
        }
    }

    pub fn remove(&mut self, surface: &mut dyn RenderSurface) {
        surface.remove_layer(GROUP_ID);
        self.group = None;
    }

    pub fn point_count(&self) -> usize {
        self.group.as_ref().map(LayerGroup::len).unwrap_or(0)
    }
}

impl Default for AnimalLayer {
    fn default() -> Self {
        Self::new()
    }
}
