//! Survey grid overlay: one colored rectangle per survey cell.

use crate::entities::survey::SurveyCell;
use crate::render::object::{EntityRef, LayerGroup, PathStyle, RenderGeometry, RenderObject};
use crate::render::surface::RenderSurface;
use std::sync::Arc;

pub const GROUP_ID: &str = "survey-grid";

/// Renders the ground-survey grid, colored by per-cell status.
pub struct SurveyGridLayer {
    group: Option<LayerGroup>,
}

impl SurveyGridLayer {
    pub fn new() -> Self {
        Self { group: None }
    }

    pub fn create(&mut self, cells: Vec<SurveyCell>) {
        let objects = cells
            .into_iter()
            .map(|cell| {
                let cell = Arc::new(cell);
                let style = PathStyle::new(cell.status().color(), 1.0, 1.0);
                RenderObject::new(
                    format!("survey-{}", cell.id),
                    RenderGeometry::Polygon {
                        ring: cell.corners(),
                        style,
                    },
                )
                .with_entity(EntityRef::Survey(cell))
            })
            .collect();
        self.group = Some(LayerGroup::with_objects(GROUP_ID, objects));
    }

    pub fn add(&mut self, surface: &mut dyn RenderSurface) {
        if let Some(group) = &self.group {
            surface.add_layer(group.clone());
        }
    }

    pub fn remove(&mut self, surface: &mut dyn RenderSurface) {
        surface.remove_layer(GROUP_ID);
    }

    /// Full refresh: detach, rebuild from `cells`, reattach.
    pub fn update(&mut self, cells: Vec<SurveyCell>, surface: &mut dyn RenderSurface) {
        self.remove(surface);
        self.create(cells);
        self.add(surface);
    }

    pub fn cell_count(&self) -> usize {
        self.group.as_ref().map(LayerGroup::len).unwrap_or(0)
    }
}

impl Default for SurveyGridLayer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::BBox;
    use crate::entities::survey::tests::cell;
    use crate::render::surface::MemorySurface;

    #[test]
    fn cells_render_status_colors() {
        let mut layer = SurveyGridLayer::new();
        let mut surface = MemorySurface::new(BBox::new(5.0, 52.0, 6.0, 53.0), 10.0);
        layer.update(
            vec![
                cell(1, false, false), // pending
                cell(2, true, false),  // complete
                cell(3, false, true),  // failed
            ],
            &mut surface,
        );
        assert_eq!(layer.cell_count(), 3);

        let color = |id: &str| match &surface.find_object(id).unwrap().geometry {
            RenderGeometry::Polygon { style, .. } => style.color.clone(),
            _ => panic!("expected polygon"),
        };
        assert_eq!(color("survey-1"), "lightblue");
        assert_eq!(color("survey-2"), "lightgreen");
        assert_eq!(color("survey-3"), "red");
    }

    #[test]
    fn update_replaces_previous_cells() {
        let mut layer = SurveyGridLayer::new();
        let mut surface = MemorySurface::new(BBox::new(5.0, 52.0, 6.0, 53.0), 10.0);
        layer.update(vec![cell(1, false, false), cell(2, false, false)], &mut surface);
        assert_eq!(surface.object_count(), 2);
        layer.update(vec![cell(3, true, false)], &mut surface);
        assert_eq!(surface.object_count(), 1);
        assert!(surface.find_object("survey-3").is_some());
    }
}
