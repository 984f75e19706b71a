//! Viewport bbox derivation and persisted view state.

use crate::core::geo::BBox;
use crate::entities::animal::AnimalType;
use crate::render::surface::RenderSurface;
use serde::{Deserialize, Serialize};

/// The query region for the current viewport, straight from the surface's
/// reported visible bounds.
pub fn current_bbox(surface: &dyn RenderSurface) -> BBox {
    surface.bounds()
}

/// The enlarged region used for building fetches, so small pans do not
/// immediately fall outside the last fetched area.
pub fn fetch_bbox(surface: &dyn RenderSurface, margin: f64) -> BBox {
    current_bbox(surface).enlarged(margin)
}

/// View state persisted by an external URL/location collaborator.
///
/// Read once at startup, rewritten on every move, zoom and layer toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub lat: f64,
    pub lon: f64,
    pub zoom: f64,
    pub visible_layers: Vec<AnimalType>,
    pub show_survey_grid: bool,
}

impl ViewState {
    /// Encodes to the key/value pairs of the persistence contract. The
    /// species list is comma-joined wire codes.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let layers: Vec<&str> = self.visible_layers.iter().map(|t| t.code()).collect();
        vec![
            ("lat".to_string(), format!("{:.6}", self.lat)),
            ("lon".to_string(), format!("{:.6}", self.lon)),
            ("zoom".to_string(), format!("{}", self.zoom)),
            ("visibleLayers".to_string(), layers.join(",")),
            (
                "showSurveyGrid".to_string(),
                self.show_survey_grid.to_string(),
            ),
        ]
    }

    /// Decodes from persisted pairs; unknown keys and malformed values fall
    /// back to `defaults`.
    pub fn from_query_pairs(pairs: &[(String, String)], defaults: &ViewState) -> ViewState {
        let mut state = defaults.clone();
        for (key, value) in pairs {
            match key.as_str() {
                "lat" => {
                    if let Ok(lat) = value.parse() {
                        state.lat = lat;
                    }
                }
                "lon" => {
                    if let Ok(lon) = value.parse() {
                        state.lon = lon;
                    }
                }
                "zoom" => {
                    if let Ok(zoom) = value.parse() {
                        state.zoom = zoom;
                    }
                }
                "visibleLayers" => {
                    state.visible_layers = value
                        .split(',')
                        .filter_map(AnimalType::from_code)
                        .collect();
                }
                "showSurveyGrid" => {
                    state.show_survey_grid = value == "true";
                }
                _ => {}
            }
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> ViewState {
        ViewState {
            lat: 52.1,
            lon: 5.58,
            zoom: 8.0,
            visible_layers: vec![AnimalType::Pig],
            show_survey_grid: false,
        }
    }

    #[test]
    fn query_pairs_round_trip() {
        let state = ViewState {
            lat: 52.123456,
            lon: 5.654321,
            zoom: 15.0,
            visible_layers: vec![AnimalType::Chicken, AnimalType::CowBeef],
            show_survey_grid: true,
        };
        let pairs = state.to_query_pairs();
        let decoded = ViewState::from_query_pairs(&pairs, &defaults());
        assert_eq!(decoded, state);
    }

    #[test]
    fn unknown_codes_are_dropped() {
        let pairs = vec![("visibleLayers".to_string(), "PIG,XXX,CHI".to_string())];
        let decoded = ViewState::from_query_pairs(&pairs, &defaults());
        assert_eq!(
            decoded.visible_layers,
            vec![AnimalType::Pig, AnimalType::Chicken]
        );
    }

    #[test]
    fn malformed_values_keep_defaults() {
        let pairs = vec![
            ("lat".to_string(), "not-a-number".to_string()),
            ("zoom".to_string(), "12".to_string()),
        ];
        let decoded = ViewState::from_query_pairs(&pairs, &defaults());
        assert_eq!(decoded.lat, 52.1);
        assert_eq!(decoded.zoom, 12.0);
    }
}
