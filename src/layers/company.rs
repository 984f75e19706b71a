//! Company marker layer: one cluster-aggregated group per species.

use crate::core::projection::TangentPlane;
use crate::entities::animal::AnimalType;
use crate::entities::company::Company;
use crate::prelude::{HashMap, HashSet};
use crate::render::object::{EntityRef, LayerGroup, RenderGeometry, RenderObject};
use crate::render::surface::RenderSurface;
use crate::spatial::cluster::{ClusterAggregator, ClusterConfig};
use std::sync::Arc;

pub const GROUP_PREFIX: &str = "companies-";

fn group_id(animal_type: AnimalType) -> String {
    format!("{}{}", GROUP_PREFIX, animal_type.code())
}

/// Renders company markers, clustered per species, for the species the
/// host has toggled visible.
pub struct CompanyLayer {
    aggregators: HashMap<AnimalType, ClusterAggregator>,
    /// Render-object id to the companies that marker stands for. Singles
    /// map to one company, cluster markers to all their members.
    memberships: HashMap<String, Vec<Arc<Company>>>,
    visible_layers: Vec<AnimalType>,
    selected: Option<Arc<Company>>,
}

impl CompanyLayer {
    pub fn new(
        config: ClusterConfig,
        projection: TangentPlane,
        visible_layers: Vec<AnimalType>,
    ) -> Self {
        let aggregators = AnimalType::ALL
            .iter()
            .map(|&animal_type| (animal_type, ClusterAggregator::new(config, projection)))
            .collect();
        Self {
            aggregators,
            memberships: HashMap::default(),
            visible_layers,
            selected: None,
        }
    }

    /// Distributes companies over the per-species aggregators by their
    /// main animal type.
    pub fn create(&mut self, companies: Vec<Company>) {
        let mut by_type: HashMap<AnimalType, Vec<Arc<Company>>> = HashMap::default();
        for company in companies {
            by_type
                .entry(company.animal_type_main)
                .or_default()
                .push(Arc::new(company));
        }
        for (&animal_type, aggregator) in self.aggregators.iter_mut() {
            match by_type.get(&animal_type) {
                Some(companies) => aggregator.set_companies(companies),
                None => aggregator.set_companies(&[]),
            }
        }
    }

    /// Builds cluster markers for the current viewport and attaches one
    /// group per visible species. Hidden species have their groups
    /// detached instead.
    pub fn add(&mut self, surface: &mut dyn RenderSurface) {
        let bounds = surface.bounds();
        let zoom = surface.zoom();
        self.memberships.clear();

        for &animal_type in AnimalType::ALL.iter() {
            let id = group_id(animal_type);
            if !self.visible_layers.contains(&animal_type) {
                surface.remove_layer(&id);
                continue;
            }
            let Some(aggregator) = self.aggregators.get(&animal_type) else {
                continue;
            };
            let clusters = aggregator.clusters(&bounds, zoom);
            let mut objects = Vec::with_capacity(clusters.len());
            for (n, cluster) in clusters.into_iter().enumerate() {
                let object = if cluster.is_single() {
                    let company = Arc::clone(&cluster.members[0]);
                    RenderObject::new(
                        format!("company-{}", company.id),
                        RenderGeometry::Marker {
                            position: cluster.center.clone(),
                            icon: cluster.icon(),
                        },
                    )
                    .with_entity(EntityRef::Company(company))
                } else {
                    RenderObject::new(
                        format!("cluster-{}-{}", animal_type.code(), n),
                        RenderGeometry::Marker {
                            position: cluster.center.clone(),
                            icon: cluster.icon(),
                        },
                    )
                };
                self.memberships.insert(object.id.clone(), cluster.members);
                objects.push(object);
            }
            log::debug!("{}: {} markers", id, objects.len());
            surface.add_layer(LayerGroup::with_objects(id, objects));
        }
    }

    pub fn remove(&mut self, surface: &mut dyn RenderSurface) {
        for &animal_type in AnimalType::ALL.iter() {
            surface.remove_layer(&group_id(animal_type));
        }
        self.memberships.clear();
    }

    pub fn set_visible_layers(&mut self, visible_layers: Vec<AnimalType>) {
        self.visible_layers = visible_layers;
    }

    pub fn visible_layers(&self) -> &[AnimalType] {
        &self.visible_layers
    }

    pub fn select(&mut self, company: Arc<Company>) {
        self.selected = Some(company);
    }

    pub fn selected(&self) -> Option<&Arc<Company>> {
        self.selected.as_ref()
    }

    /// Companies the marker behind `object_id` stands for.
    pub fn companies_for(&self, object_id: &str) -> Option<&[Arc<Company>]> {
        self.memberships.get(object_id).map(Vec::as_slice)
    }

    /// Every company represented by a marker inside the visible bounds,
    /// cluster members included, without duplicates.
    pub fn companies_in_view(&self, surface: &dyn RenderSurface) -> Vec<Arc<Company>> {
        let bounds = surface.bounds();
        let mut seen: HashSet<i64> = HashSet::default();
        let mut in_view = Vec::new();
        surface.each_object(&mut |group_id, object| {
            if !group_id.starts_with(GROUP_PREFIX) {
                return;
            }
            let RenderGeometry::Marker { position, .. } = &object.geometry else {
                return;
            };
            if !bounds.contains_point(position.lat(), position.lon()) {
                return;
            }
            if let Some(members) = self.memberships.get(&object.id) {
                for company in members {
                    if seen.insert(company.id) {
                        in_view.push(Arc::clone(company));
                    }
                }
            }
        });
        in_view
    }
}
