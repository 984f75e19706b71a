use crate::core::geo::{BBox, Coordinate};
use serde::{Deserialize, Serialize};

/// Wire form of a survey cell, as produced by the external crawler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyCellResource {
    pub id: i64,
    pub level: u8,
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
    pub complete: bool,
    pub failed: bool,
}

/// Crawl-progress status of a survey cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyStatus {
    Pending,
    Complete,
    Failed,
}

impl SurveyStatus {
    /// Outline color used when rendering the cell.
    pub fn color(&self) -> &'static str {
        match self {
            SurveyStatus::Pending => "lightblue",
            SurveyStatus::Complete => "lightgreen",
            SurveyStatus::Failed => "red",
        }
    }
}

/// A spatial unit of crawl/survey progress, consumed read-only and rendered
/// as a colored outline.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyCell {
    pub id: i64,
    pub level: u8,
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
    pub complete: bool,
    pub failed: bool,
}

impl SurveyCell {
    pub fn from_resource(resource: SurveyCellResource) -> Self {
        Self {
            id: resource.id,
            level: resource.level,
            lon_min: resource.lon_min,
            lon_max: resource.lon_max,
            lat_min: resource.lat_min,
            lat_max: resource.lat_max,
            complete: resource.complete,
            failed: resource.failed,
        }
    }

    pub fn from_resources(resources: Vec<SurveyCellResource>) -> Vec<SurveyCell> {
        resources
            .into_iter()
            .map(SurveyCell::from_resource)
            .collect()
    }

    /// `complete` wins over `failed` when both flags are set.
    pub fn status(&self) -> SurveyStatus {
        if self.complete {
            SurveyStatus::Complete
        } else if self.failed {
            SurveyStatus::Failed
        } else {
            SurveyStatus::Pending
        }
    }

    pub fn bbox(&self) -> BBox {
        BBox::new(self.lon_min, self.lat_min, self.lon_max, self.lat_max)
    }

    /// Corner ring for outline rendering.
    pub fn corners(&self) -> Vec<Coordinate> {
        vec![
            Coordinate::new(self.lat_min, self.lon_min),
            Coordinate::new(self.lat_min, self.lon_max),
            Coordinate::new(self.lat_max, self.lon_max),
            Coordinate::new(self.lat_max, self.lon_min),
        ]
    }

    pub fn center(&self) -> Coordinate {
        self.bbox().center()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn cell(id: i64, complete: bool, failed: bool) -> SurveyCell {
        SurveyCell {
            id,
            level: 3,
            lon_min: 5.0,
            lon_max: 5.1,
            lat_min: 52.0,
            lat_max: 52.1,
            complete,
            failed,
        }
    }

    #[test]
    fn status_colors() {
        assert_eq!(cell(1, false, false).status().color(), "lightblue");
        assert_eq!(cell(1, true, false).status().color(), "lightgreen");
        assert_eq!(cell(1, false, true).status().color(), "red");
        assert_eq!(cell(1, true, true).status(), SurveyStatus::Complete);
    }

    #[test]
    fn corners_trace_the_bbox() {
        let corners = cell(1, false, false).corners();
        assert_eq!(corners.len(), 4);
        assert_eq!(corners[0], Coordinate::new(52.0, 5.0));
        assert_eq!(corners[2], Coordinate::new(52.1, 5.1));
    }
}
