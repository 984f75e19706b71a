//! The orchestrator tying data source, layers and render surface together.
//!
//! Hosts drive the controller with view events (initialize, move, zoom,
//! toggles, clicks); the controller decides which layers to fetch, rebuild
//! and attach for the current viewport. Fetches are guarded by per-kind
//! generation counters so a slow response that arrives after a newer view
//! event is discarded instead of clobbering fresher content.

use crate::core::config::MapConfig;
use crate::core::geo::BBox;
use crate::core::viewport::{current_bbox, fetch_bbox, ViewState};
use crate::data::source::DataSource;
use crate::entities::animal::AnimalType;
use crate::entities::building::Building;
use crate::entities::company::{Company, CompanyStats};
use crate::entities::survey::SurveyCell;
use crate::geometry::placement::{PlacementCache, PlacementEngine};
use crate::geometry::polygon;
use crate::layers::animal::AnimalLayer;
use crate::layers::building::{self, BuildingLayer};
use crate::layers::company::{self, CompanyLayer};
use crate::layers::survey::SurveyGridLayer;
use crate::render::object::RenderGeometry;
use crate::render::surface::{ClickEvent, RenderSurface};
use crate::spatial::cluster::{meters_per_pixel, ClusterConfig};
use crate::Result;
use std::sync::Arc;

/// Click tolerance around point markers, in screen pixels.
const MARKER_HIT_RADIUS_PX: f64 = 20.0;

/// What a click resolved to.
#[derive(Debug, Clone)]
pub enum ClickTarget {
    Building(Arc<Building>),
    Company(Arc<Company>),
    /// A multi-member cluster marker. Hosts typically respond by zooming in.
    Cluster(Vec<Arc<Company>>),
    None,
}

pub struct MapController {
    config: MapConfig,
    source: Arc<dyn DataSource>,
    engine: PlacementEngine,
    placement_cache: PlacementCache,
    building_layer: BuildingLayer,
    company_layer: CompanyLayer,
    animal_layer: AnimalLayer,
    survey_layer: SurveyGridLayer,
    show_survey_grid: bool,
    building_generation: u64,
    company_generation: u64,
    survey_generation: u64,
}

impl MapController {
    pub fn new(config: MapConfig, source: Arc<dyn DataSource>) -> Self {
        let engine = PlacementEngine::new(config.projection, config.placement);
        let company_layer = CompanyLayer::new(
            ClusterConfig {
                cluster_at_zoom: config.cluster_at_zoom,
                max_cluster_radius_px: config.max_cluster_radius_px,
            },
            config.projection,
            config.visible_layers.clone(),
        );
        let show_survey_grid = config.show_survey_grid;
        Self {
            config,
            source,
            engine,
            placement_cache: PlacementCache::new(),
            building_layer: BuildingLayer::new(),
            company_layer,
            animal_layer: AnimalLayer::new(),
            survey_layer: SurveyGridLayer::new(),
            show_survey_grid,
            building_generation: 0,
            company_generation: 0,
            survey_generation: 0,
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// View state to persist for the current view, for URL-style hosts.
    pub fn view_state(&self, surface: &dyn RenderSurface) -> ViewState {
        let center = surface.bounds().center();
        ViewState {
            lat: center.lat(),
            lon: center.lon(),
            zoom: surface.zoom(),
            visible_layers: self.company_layer.visible_layers().to_vec(),
            show_survey_grid: self.show_survey_grid,
        }
    }

    /// The view to restore when no state was persisted.
    pub fn default_view_state(&self) -> ViewState {
        ViewState {
            lat: self.config.default_center.0,
            lon: self.config.default_center.1,
            zoom: self.config.default_zoom,
            visible_layers: self.config.visible_layers.clone(),
            show_survey_grid: self.config.show_survey_grid,
        }
    }

    /// Initial population: companies everywhere, then the zoom-gated layers
    /// for the starting viewport.
    pub async fn initialize(&mut self, surface: &mut dyn RenderSurface) -> Result<()> {
        self.refresh_companies(surface).await?;
        if self.show_survey_grid {
            self.refresh_survey_grid(surface).await?;
        }
        self.update_buildings(surface).await
    }

    /// A pan finished. Companies are refetched and reclustered for the new
    /// bounds, then the zoom-gated layers refresh.
    pub async fn handle_move(&mut self, surface: &mut dyn RenderSurface) -> Result<()> {
        self.refresh_companies(surface).await?;
        self.update_buildings(surface).await
    }

    /// A zoom finished. Same refresh as a move; the gates read the new zoom.
    pub async fn handle_zoom(&mut self, surface: &mut dyn RenderSurface) -> Result<()> {
        self.refresh_companies(surface).await?;
        self.update_buildings(surface).await
    }

    /// Toggles species sub-layers and re-attaches the company groups.
    pub fn set_visible_layers(
        &mut self,
        surface: &mut dyn RenderSurface,
        visible: Vec<AnimalType>,
    ) {
        self.company_layer.set_visible_layers(visible);
        self.company_layer.add(surface);
    }

    /// Shows or hides the survey grid, refetching on each show so crawl
    /// progress stays current.
    pub async fn set_show_survey_grid(
        &mut self,
        surface: &mut dyn RenderSurface,
        show: bool,
    ) -> Result<()> {
        self.show_survey_grid = show;
        if show {
            self.refresh_survey_grid(surface).await
        } else {
            self.survey_layer.remove(surface);
            Ok(())
        }
    }

    pub fn show_survey_grid(&self) -> bool {
        self.show_survey_grid
    }

    /// Aggregate livestock numbers for the companies currently in view.
    pub fn stats(&self, surface: &dyn RenderSurface) -> CompanyStats {
        CompanyStats::from_companies(&self.company_layer.companies_in_view(surface))
    }

    pub fn companies_in_view(&self, surface: &dyn RenderSurface) -> Vec<Arc<Company>> {
        self.company_layer.companies_in_view(surface)
    }

    pub fn buildings_in_view(&self, surface: &dyn RenderSurface) -> Vec<Arc<Building>> {
        self.building_layer.buildings_in_view(surface)
    }

    pub fn selected_building(&self) -> Option<&Arc<Building>> {
        self.building_layer.selected()
    }

    pub fn selected_company(&self) -> Option<&Arc<Company>> {
        self.company_layer.selected()
    }

    /// Resolves a pointer event to the clicked render object, if any.
    /// Company markers win over building footprints; animal points and
    /// survey cells are not click targets.
    pub fn hit_test(
        &self,
        surface: &dyn RenderSurface,
        event: ClickEvent,
    ) -> Option<String> {
        let tolerance =
            MARKER_HIT_RADIUS_PX * meters_per_pixel(surface.zoom(), event.lat);
        let projection = &self.config.projection;
        let click = projection.to_planar(event.lat, event.lon);

        let mut marker_hit: Option<(String, f64)> = None;
        let mut polygon_hit: Option<String> = None;
        surface.each_object(&mut |group_id, object| {
            match &object.geometry {
                RenderGeometry::Marker { position, .. }
                    if group_id.starts_with(company::GROUP_PREFIX) =>
                {
                    let distance = position.planar(projection).distance_to(&click);
                    if distance <= tolerance
                        && marker_hit
                            .as_ref()
                            .map(|(_, best)| distance < *best)
                            .unwrap_or(true)
                    {
                        marker_hit = Some((object.id.clone(), distance));
                    }
                }
                RenderGeometry::Polygon { ring, .. }
                    if group_id == building::GROUP_ID =>
                {
                    if polygon::point_in_ring(event.lat, event.lon, ring) {
                        polygon_hit = Some(object.id.clone());
                    }
                }
                _ => {}
            }
        });
        marker_hit.map(|(id, _)| id).or(polygon_hit)
    }

    /// Resolves and applies a click: selects the building or company under
    /// the pointer, or reports the cluster membership for a cluster marker.
    pub fn handle_click(
        &mut self,
        surface: &mut dyn RenderSurface,
        event: ClickEvent,
    ) -> ClickTarget {
        let Some(object_id) = self.hit_test(surface, event) else {
            return ClickTarget::None;
        };
        self.select_object(surface, &object_id)
    }

    /// Selection dispatch by render-object id.
    pub fn select_object(
        &mut self,
        surface: &mut dyn RenderSurface,
        object_id: &str,
    ) -> ClickTarget {
        if object_id.starts_with("building-") {
            return match self.building_layer.select(surface, object_id) {
                Some(building) => ClickTarget::Building(building),
                None => ClickTarget::None,
            };
        }
        if object_id.starts_with("company-") {
            if let Some([company]) = self.company_layer.companies_for(object_id) {
                let company = Arc::clone(company);
                self.company_layer.select(Arc::clone(&company));
                return ClickTarget::Company(company);
            }
            return ClickTarget::None;
        }
        if object_id.starts_with("cluster-") {
            if let Some(members) = self.company_layer.companies_for(object_id) {
                return ClickTarget::Cluster(members.to_vec());
            }
        }
        ClickTarget::None
    }

    /// Drops cached animal positions, forcing a re-scatter on next render.
    pub fn invalidate_placements(&mut self) {
        self.placement_cache.clear();
    }

    async fn refresh_companies(&mut self, surface: &mut dyn RenderSurface) -> Result<()> {
        let generation = self.next_company_generation();
        let companies = self.source.fetch_companies(None).await?;
        self.apply_companies(surface, generation, companies);
        Ok(())
    }

    fn next_company_generation(&mut self) -> u64 {
        self.company_generation += 1;
        self.company_generation
    }

    /// Applies a company fetch completion, unless a newer fetch for the
    /// same kind has been issued since `generation` was.
    fn apply_companies(
        &mut self,
        surface: &mut dyn RenderSurface,
        generation: u64,
        companies: Vec<Company>,
    ) {
        if generation != self.company_generation {
            log::debug!("discarding stale company response");
            return;
        }
        self.company_layer.create(companies);
        self.company_layer.add(surface);
    }

    async fn refresh_survey_grid(&mut self, surface: &mut dyn RenderSurface) -> Result<()> {
        let generation = self.next_survey_generation();
        let cells = self.source.fetch_survey_grid().await?;
        self.apply_survey_grid(surface, generation, cells);
        Ok(())
    }

    fn next_survey_generation(&mut self) -> u64 {
        self.survey_generation += 1;
        self.survey_generation
    }

    fn apply_survey_grid(
        &mut self,
        surface: &mut dyn RenderSurface,
        generation: u64,
        cells: Vec<SurveyCell>,
    ) {
        if generation != self.survey_generation || !self.show_survey_grid {
            log::debug!("discarding stale survey response");
            return;
        }
        self.survey_layer.update(cells, surface);
    }

    /// Fetches and renders buildings for the enlarged viewport, then the
    /// animal points derived from them. Below the building zoom gate both
    /// layers are detached without fetching.
    async fn update_buildings(&mut self, surface: &mut dyn RenderSurface) -> Result<()> {
        if surface.zoom() < self.config.buildings_at_zoom {
            self.building_layer.remove(surface);
            self.animal_layer.remove(surface);
            return Ok(());
        }

        let generation = self.next_building_generation();
        let bbox: BBox = fetch_bbox(surface, self.config.building_fetch_margin);
        let buildings = self.source.fetch_buildings(&bbox).await?;
        self.apply_buildings(surface, generation, buildings);
        Ok(())
    }

    fn next_building_generation(&mut self) -> u64 {
        self.building_generation += 1;
        self.building_generation
    }

    fn apply_buildings(
        &mut self,
        surface: &mut dyn RenderSurface,
        generation: u64,
        buildings: Vec<Building>,
    ) {
        if generation != self.building_generation {
            log::debug!("discarding stale building response");
            return;
        }
        self.building_layer.remove(surface);
        self.building_layer.create(buildings);
        self.building_layer.add(surface);
        self.update_animals(surface);
    }

    /// Rebuilds animal points from the buildings in the current (not
    /// enlarged) viewport. Placement reuses the cache, so only buildings
    /// never seen this session are scattered.
    fn update_animals(&mut self, surface: &mut dyn RenderSurface) {
        self.animal_layer.remove(surface);
        if surface.zoom() < self.config.animals_at_zoom {
            return;
        }
        let in_view = self.building_layer.buildings_in_view(surface);
        log::debug!(
            "scattering animals for {} buildings in {}",
            in_view.len(),
            current_bbox(surface)
        );
        self.animal_layer
            .create(&in_view, &self.engine, &mut self.placement_cache, surface.zoom());
        self.animal_layer.add(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::BBox;
    use crate::entities::building::tests::rectangular_building;
    use crate::render::surface::MemorySurface;
    use async_trait::async_trait;

    struct FixedSource {
        buildings: Vec<Building>,
    }

    #[async_trait]
    impl crate::data::source::DataSource for FixedSource {
        async fn fetch_companies(&self, _bbox: Option<&BBox>) -> Result<Vec<Company>> {
            Ok(Vec::new())
        }

        async fn fetch_buildings(&self, _bbox: &BBox) -> Result<Vec<Building>> {
            Ok(self.buildings.clone())
        }

        async fn fetch_survey_grid(&self) -> Result<Vec<SurveyCell>> {
            Ok(Vec::new())
        }
    }

    fn shed() -> Building {
        rectangular_building(80.0, 52.001, 52.002, 5.001, 5.002, AnimalType::Pig)
    }

    fn controller_with(buildings: Vec<Building>) -> MapController {
        MapController::new(
            MapConfig::default(),
            Arc::new(FixedSource { buildings }),
        )
    }

    #[tokio::test]
    async fn stale_building_completion_is_discarded() {
        let mut controller = controller_with(vec![shed()]);
        let mut surface = MemorySurface::new(BBox::new(5.0, 52.0, 5.01, 52.01), 16.0);

        // A fetch issued before a newer one completes must not clobber it.
        let stale = controller.next_building_generation();
        controller.update_buildings(&mut surface).await.unwrap();
        assert!(surface.find_object("building-42").is_some());

        controller.apply_buildings(&mut surface, stale, Vec::new());
        assert!(surface.find_object("building-42").is_some());

        // The latest issued generation does apply.
        let current = controller.next_building_generation();
        controller.apply_buildings(&mut surface, current, Vec::new());
        assert!(surface.find_object("building-42").is_none());
    }

    #[tokio::test]
    async fn stale_company_completion_is_discarded() {
        let mut controller = controller_with(Vec::new());
        let mut surface = MemorySurface::new(BBox::new(5.0, 52.0, 5.01, 52.01), 10.0);

        let stale = controller.next_company_generation();
        controller.refresh_companies(&mut surface).await.unwrap();
        assert_eq!(surface.group("companies-PIG").map(|g| g.len()), Some(0));

        let late_arrival = vec![shed().company];
        controller.apply_companies(&mut surface, stale, late_arrival);
        assert_eq!(surface.group("companies-PIG").map(|g| g.len()), Some(0));
    }
}
