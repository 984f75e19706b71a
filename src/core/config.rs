//! Configuration for the layer engine.
//!
//! All tuning knobs are collected here and injected into the
//! [`MapController`](crate::controller) at construction, so a host can
//! override any of them per instance.

use crate::core::projection::TangentPlane;
use crate::entities::animal::AnimalType;
use crate::geometry::placement::PlacementOptions;

#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    /// Initial view center when no persisted state is present.
    pub default_center: (f64, f64),
    pub default_zoom: f64,
    /// Zoom at and above which company markers stop clustering.
    pub cluster_at_zoom: f64,
    /// Maximum marker spread absorbed by a single cluster, in screen pixels.
    pub max_cluster_radius_px: f64,
    /// Zoom at and above which building footprints are fetched and shown.
    pub buildings_at_zoom: f64,
    /// Zoom at and above which animal points are shown. Stricter than the
    /// building threshold.
    pub animals_at_zoom: f64,
    /// Span multiplier applied to the viewport bbox before building fetches.
    pub building_fetch_margin: f64,
    /// Projection anchor for the whole dataset.
    pub projection: TangentPlane,
    pub placement: PlacementOptions,
    /// Species sub-layers visible at startup.
    pub visible_layers: Vec<AnimalType>,
    /// Whether the survey-progress grid is rendered.
    pub show_survey_grid: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center: (52.1, 5.58),
            default_zoom: 8.0,
            cluster_at_zoom: 12.0,
            max_cluster_radius_px: 30.0,
            buildings_at_zoom: 15.0,
            animals_at_zoom: 18.0,
            building_fetch_margin: 2.0,
            projection: TangentPlane::default(),
            placement: PlacementOptions::default(),
            visible_layers: vec![AnimalType::Pig, AnimalType::CowBeef, AnimalType::Chicken],
            show_survey_grid: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_layer_gates() {
        let config = MapConfig::default();
        assert!(config.animals_at_zoom > config.buildings_at_zoom);
        assert!(config.cluster_at_zoom < config.buildings_at_zoom);
        assert_eq!(config.visible_layers.len(), 3);
    }
}
