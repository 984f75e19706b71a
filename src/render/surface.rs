//! The render surface consumed by the layer engine.
//!
//! Mirrors the contract of an interactive slippy map: attach/detach layer
//! groups, report visible bounds and zoom, and let callers visit attached
//! render objects. [`MemorySurface`] is the in-crate implementation used by
//! tests and headless hosts.

use crate::core::geo::BBox;
use crate::render::object::{LayerGroup, RenderObject};
use crate::prelude::HashMap;

/// A pointer event on the surface, forwarded to click callbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    pub lat: f64,
    pub lon: f64,
}

pub trait RenderSurface {
    /// Attaches a group, replacing any group with the same id.
    fn add_layer(&mut self, group: LayerGroup);

    /// Detaches a group; idempotent. Returns whether it was attached.
    fn remove_layer(&mut self, group_id: &str) -> bool;

    fn has_layer(&self, group_id: &str) -> bool;

    /// Current visible bounds.
    fn bounds(&self) -> BBox;

    /// Current zoom level.
    fn zoom(&self) -> f64;

    /// Visits every attached render object with its group id.
    fn each_object(&self, visit: &mut dyn FnMut(&str, &RenderObject));

    /// Mutable visitation, used for selection restyling.
    fn each_object_mut(&mut self, visit: &mut dyn FnMut(&str, &mut RenderObject));
}

/// In-memory render surface.
pub struct MemorySurface {
    groups: HashMap<String, LayerGroup>,
    bounds: BBox,
    zoom: f64,
}

impl MemorySurface {
    pub fn new(bounds: BBox, zoom: f64) -> Self {
        Self {
            groups: HashMap::default(),
            bounds,
            zoom,
        }
    }

    /// Moves/zooms the view; the host then feeds the change back into the
    /// controller as a move or zoom event.
    pub fn set_view(&mut self, bounds: BBox, zoom: f64) {
        self.bounds = bounds;
        self.zoom = zoom;
    }

    pub fn group(&self, group_id: &str) -> Option<&LayerGroup> {
        self.groups.get(group_id)
    }

    /// Total number of attached render objects, over all groups.
    pub fn object_count(&self) -> usize {
        self.groups.values().map(|group| group.len()).sum()
    }

    pub fn find_object(&self, object_id: &str) -> Option<&RenderObject> {
        self.groups
            .values()
            .flat_map(|group| group.objects.iter())
            .find(|object| object.id == object_id)
    }
}

impl RenderSurface for MemorySurface {
    fn add_layer(&mut self, group: LayerGroup) {
        self.groups.insert(group.id.clone(), group);
    }

    fn remove_layer(&mut self, group_id: &str) -> bool {
        self.groups.remove(group_id).is_some()
    }

    fn has_layer(&self, group_id: &str) -> bool {
        self.groups.contains_key(group_id)
    }

    fn bounds(&self) -> BBox {
        self.bounds
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn each_object(&self, visit: &mut dyn FnMut(&str, &RenderObject)) {
        for (group_id, group) in &self.groups {
            for object in &group.objects {
                visit(group_id, object);
            }
        }
    }

    fn each_object_mut(&mut self, visit: &mut dyn FnMut(&str, &mut RenderObject)) {
        for (group_id, group) in &mut self.groups {
            for object in &mut group.objects {
                visit(group_id, object);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Coordinate;
    use crate::render::icon::MarkerIcon;
    use crate::render::object::RenderGeometry;

    fn marker(id: &str, lat: f64, lon: f64) -> RenderObject {
        RenderObject::new(
            id,
            RenderGeometry::Marker {
                position: Coordinate::new(lat, lon),
                icon: MarkerIcon::placeholder(),
            },
        )
    }

    #[test]
    fn add_replace_remove() {
        let mut surface = MemorySurface::new(BBox::new(5.0, 52.0, 6.0, 53.0), 8.0);
        surface.add_layer(LayerGroup::with_objects(
            "g",
            vec![marker("a", 52.1, 5.1)],
        ));
        assert!(surface.has_layer("g"));
        assert_eq!(surface.object_count(), 1);

        // Same id replaces, not accumulates.
        surface.add_layer(LayerGroup::with_objects(
            "g",
            vec![marker("b", 52.2, 5.2), marker("c", 52.3, 5.3)],
        ));
        assert_eq!(surface.object_count(), 2);

        assert!(surface.remove_layer("g"));
        assert!(!surface.remove_layer("g"));
        assert!(!surface.has_layer("g"));
    }

    #[test]
    fn visitation_covers_all_groups() {
        let mut surface = MemorySurface::new(BBox::new(5.0, 52.0, 6.0, 53.0), 8.0);
        surface.add_layer(LayerGroup::with_objects("g1", vec![marker("a", 52.1, 5.1)]));
        surface.add_layer(LayerGroup::with_objects("g2", vec![marker("b", 52.2, 5.2)]));
        let mut seen = Vec::new();
        surface.each_object(&mut |group_id, object| {
            seen.push((group_id.to_string(), object.id.clone()));
        });
        seen.sort();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, "g1");
    }
}
