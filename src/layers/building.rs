//! Building footprint layer: zoom-gated polygons with single selection.

use crate::core::geo::BBox;
use crate::entities::building::Building;
use crate::geometry::polygon;
use crate::render::object::{EntityRef, LayerGroup, PathStyle, RenderGeometry, RenderObject};
use crate::render::surface::RenderSurface;
use std::sync::Arc;

pub const GROUP_ID: &str = "buildings";

fn object_id(building: &Building) -> String {
    format!("building-{}", building.way_id)
}

/// Renders fetched building footprints and tracks the selected one.
pub struct BuildingLayer {
    buildings: Vec<Arc<Building>>,
    selected: Option<Arc<Building>>,
    default_style: PathStyle,
    highlight_style: PathStyle,
}

impl BuildingLayer {
    pub fn new() -> Self {
        Self {
            buildings: Vec::new(),
            selected: None,
            default_style: PathStyle::new("#3388FF", 3.0, 1.0),
            highlight_style: PathStyle::new("#FF3388", 2.0, 1.0),
        }
    }

    /// Replaces the layer's entity set. Render objects on the surface are
    /// only refreshed by a following `remove` + `add`.
    pub fn create(&mut self, buildings: Vec<Building>) {
        self.buildings = buildings.into_iter().map(Arc::new).collect();
    }

    pub fn add(&mut self, surface: &mut dyn RenderSurface) {
        let objects = self
            .buildings
            .iter()
            .map(|building| {
                let style = if self.is_selected(building) {
                    self.highlight_style.clone()
                } else {
                    self.default_style.clone()
                };
                RenderObject::new(
                    object_id(building),
                    RenderGeometry::Polygon {
                        ring: building.footprint.clone(),
                        style,
                    },
                )
                .with_entity(EntityRef::Building(Arc::clone(building)))
            })
            .collect();
        surface.add_layer(LayerGroup::with_objects(GROUP_ID, objects));
    }

    pub fn remove(&mut self, surface: &mut dyn RenderSurface) {
        if surface.has_layer(GROUP_ID) {
            surface.remove_layer(GROUP_ID);
        }
    }

    pub fn buildings(&self) -> &[Arc<Building>] {
        &self.buildings
    }

    fn is_selected(&self, building: &Arc<Building>) -> bool {
        self.selected
            .as_ref()
            .map(|selected| selected.way_id == building.way_id)
            .unwrap_or(false)
    }

    /// Selects the building behind `clicked_object_id`: restores the
    /// previous selection's default style, highlights the new one and
    /// records it. Returns the selected building, if the id resolved.
    pub fn select(
        &mut self,
        surface: &mut dyn RenderSurface,
        clicked_object_id: &str,
    ) -> Option<Arc<Building>> {
        let previous_id = self.selected.as_ref().map(|b| object_id(b));
        let mut selected = None;
        surface.each_object_mut(&mut |group_id, object| {
            if group_id != GROUP_ID {
                return;
            }
            let RenderGeometry::Polygon { style, .. } = &mut object.geometry else {
                return;
            };
            if Some(&object.id) == previous_id.as_ref() {
                *style = self.default_style.clone();
            }
            if object.id == clicked_object_id {
                *style = self.highlight_style.clone();
                selected = object.building().cloned();
            }
        });
        if let Some(building) = &selected {
            self.selected = Some(Arc::clone(building));
        }
        selected
    }

    pub fn selected(&self) -> Option<&Arc<Building>> {
        self.selected.as_ref()
    }

    /// Buildings whose footprint intersects the current visible bounds.
    /// Uses true polygon/rectangle intersection, so footprints straddling
    /// the viewport without a vertex inside it still count.
    pub fn buildings_in_view(&self, surface: &dyn RenderSurface) -> Vec<Arc<Building>> {
        let bounds: BBox = surface.bounds();
        let mut in_view = Vec::new();
        surface.each_object(&mut |group_id, object| {
            if group_id != GROUP_ID {
                return;
            }
            let RenderGeometry::Polygon { ring, .. } = &object.geometry else {
                return;
            };
            if polygon::ring_intersects_bbox(ring, &bounds) {
                if let Some(building) = object.building() {
                    in_view.push(Arc::clone(building));
                }
            }
        });
        in_view
    }
}

impl Default for BuildingLayer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::BBox;
    use crate::entities::animal::AnimalType;
    use crate::entities::building::tests::rectangular_building;
    use crate::render::surface::MemorySurface;

    fn populated_surface(layer: &mut BuildingLayer) -> MemorySurface {
        let mut surface = MemorySurface::new(BBox::new(5.0, 52.0, 5.01, 52.01), 16.0);
        layer.create(vec![
            rectangular_building(80.0, 52.001, 52.002, 5.001, 5.002, AnimalType::Pig),
            {
                let mut b =
                    rectangular_building(80.0, 52.003, 52.004, 5.003, 5.004, AnimalType::Pig);
                b.way_id = 43;
                b
            },
        ]);
        layer.add(&mut surface);
        surface
    }

    #[test]
    fn add_and_remove_are_idempotent() {
        let mut layer = BuildingLayer::new();
        let mut surface = populated_surface(&mut layer);
        assert!(surface.has_layer(GROUP_ID));
        assert_eq!(surface.object_count(), 2);
        layer.remove(&mut surface);
        layer.remove(&mut surface);
        assert!(!surface.has_layer(GROUP_ID));
    }

    #[test]
    fn selection_is_exclusive_and_restores_style() {
        let mut layer = BuildingLayer::new();
        let mut surface = populated_surface(&mut layer);

        let first = layer.select(&mut surface, "building-42").unwrap();
        assert_eq!(first.way_id, 42);
        let second = layer.select(&mut surface, "building-43").unwrap();
        assert_eq!(second.way_id, 43);

        let mut styles = Vec::new();
        surface.each_object(&mut |_, object| {
            if let RenderGeometry::Polygon { style, .. } = &object.geometry {
                styles.push((object.id.clone(), style.color.clone()));
            }
        });
        styles.sort();
        assert_eq!(styles[0], ("building-42".to_string(), "#3388FF".to_string()));
        assert_eq!(styles[1], ("building-43".to_string(), "#FF3388".to_string()));
        assert_eq!(layer.selected().unwrap().way_id, 43);
    }

    #[test]
    fn in_view_filters_by_bounds() {
        let mut layer = BuildingLayer::new();
        let mut surface = populated_surface(&mut layer);
        // Narrow the viewport to just the first building.
        surface.set_view(BBox::new(5.0005, 52.0005, 5.0025, 52.0025), 16.0);
        let in_view = layer.buildings_in_view(&surface);
        assert_eq!(in_view.len(), 1);
        assert_eq!(in_view[0].way_id, 42);
    }
}
