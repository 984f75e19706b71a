//! Entity fetch contract and its HTTP implementation.

use crate::core::geo::BBox;
use crate::entities::building::{Building, BuildingResource};
use crate::entities::company::{Company, CompanyResource};
use crate::entities::survey::{SurveyCell, SurveyCellResource};
use crate::{MapError, Result};
use async_trait::async_trait;

/// Asynchronous single-shot entity fetches, keyed by an externally-owned
/// transport. No retries or cancellation; callers guard against stale
/// responses with generation counters.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// All companies, optionally restricted to a region. The default
    /// deployment fetches the full set once per refresh.
    async fn fetch_companies(&self, bbox: Option<&BBox>) -> Result<Vec<Company>>;

    /// Buildings intersecting `bbox` (callers pass an enlarged viewport).
    async fn fetch_buildings(&self, bbox: &BBox) -> Result<Vec<Building>>;

    /// The full survey-progress grid.
    async fn fetch_survey_grid(&self) -> Result<Vec<SurveyCell>>;
}

/// `DataSource` over the backend's REST endpoints.
pub struct HttpDataSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDataSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch_companies(&self, bbox: Option<&BBox>) -> Result<Vec<Company>> {
        let mut request = self.client.get(self.url("companies/"));
        if let Some(bbox) = bbox {
            request = request.query(&[("bbox", bbox.to_query())]);
        }
        let body = request
            .send()
            .await
            .map_err(MapError::Network)?
            .text()
            .await
            .map_err(MapError::Network)?;
        let resources: Vec<CompanyResource> =
            serde_json::from_str(&body).map_err(MapError::Serialization)?;
        log::debug!("fetched {} companies", resources.len());
        Ok(Company::from_resources(resources))
    }

    async fn fetch_buildings(&self, bbox: &BBox) -> Result<Vec<Building>> {
        let body = self
            .client
            .get(self.url("buildings/"))
            .query(&[("bbox", bbox.to_query())])
            .send()
            .await
            .map_err(MapError::Network)?
            .text()
            .await
            .map_err(MapError::Network)?;
        let resources: Vec<BuildingResource> =
            serde_json::from_str(&body).map_err(MapError::Serialization)?;
        log::debug!("fetched {} buildings for bbox {}", resources.len(), bbox);
        Ok(Building::from_resources(resources))
    }

    async fn fetch_survey_grid(&self) -> Result<Vec<SurveyCell>> {
        let body = self
            .client
            .get(self.url("tiles/"))
            .send()
            .await
            .map_err(MapError::Network)?
            .text()
            .await
            .map_err(MapError::Network)?;
        let resources: Vec<SurveyCellResource> =
            serde_json::from_str(&body).map_err(MapError::Serialization)?;
        log::debug!("fetched {} survey cells", resources.len());
        Ok(SurveyCell::from_resources(resources))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let source = HttpDataSource::new("https://api.example.org/v1/");
        assert_eq!(source.url("companies/"), "https://api.example.org/v1/companies/");
    }

    #[test]
    fn malformed_body_maps_to_serialization_error() {
        let err = serde_json::from_str::<Vec<CompanyResource>>("{ not json")
            .map_err(MapError::Serialization)
            .unwrap_err();
        assert!(matches!(err, MapError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error"));
    }
}
