use crate::core::geo::Coordinate;
use crate::entities::address::{Address, AddressResource};
use crate::entities::animal::AnimalType;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Wire form of a company, as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyResource {
    pub id: i64,
    pub description: String,
    pub active: bool,
    pub address: AddressResource,
    pub animal_type_main: AnimalType,
    pub animal_count: i64,
    pub chicken: bool,
    pub pig: bool,
    pub cattle: bool,
    pub sheep: bool,
    pub goat: bool,
}

/// A farm company. One company maps onto one or more buildings, but company
/// and building lists are consumed independently and joined by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub id: i64,
    pub description: String,
    pub active: bool,
    pub address: Address,
    pub animal_type_main: AnimalType,
    pub animal_count: i64,
    pub chicken: bool,
    pub pig: bool,
    pub cattle: bool,
    pub sheep: bool,
    pub goat: bool,
}

impl Company {
    pub fn from_resource(resource: CompanyResource) -> Self {
        Self {
            id: resource.id,
            description: resource.description,
            active: resource.active,
            address: Address::from_resource(resource.address),
            animal_type_main: resource.animal_type_main,
            animal_count: resource.animal_count,
            chicken: resource.chicken,
            pig: resource.pig,
            cattle: resource.cattle,
            sheep: resource.sheep,
            goat: resource.goat,
        }
    }

    pub fn from_resources(resources: Vec<CompanyResource>) -> Vec<Company> {
        resources.into_iter().map(Company::from_resource).collect()
    }

    pub fn coordinate(&self) -> Coordinate {
        self.address.coordinate()
    }

    /// The species whose floor-space minimum sizes animal placement for this
    /// company's buildings. Pig wins over cattle, then chicken, sheep, goat.
    pub fn placement_animal_type(&self) -> AnimalType {
        if self.pig {
            AnimalType::Pig
        } else if self.cattle {
            AnimalType::CowBeef
        } else if self.chicken {
            AnimalType::Chicken
        } else if self.sheep {
            AnimalType::Sheep
        } else if self.goat {
            AnimalType::Goat
        } else {
            AnimalType::Combined
        }
    }
}

/// Aggregate statistics over the companies currently in view.
#[derive(Debug, Clone, Default)]
pub struct CompanyStats {
    pub cattle_companies: Vec<Arc<Company>>,
    pub chicken_companies: Vec<Arc<Company>>,
    pub pig_companies: Vec<Arc<Company>>,
    pub cow_count: i64,
    pub chicken_count: i64,
    pub pig_count: i64,
}

impl CompanyStats {
    pub fn from_companies(companies: &[Arc<Company>]) -> Self {
        let mut stats = CompanyStats::default();
        for company in companies {
            match company.animal_type_main {
                AnimalType::CowDairy | AnimalType::CowBeef => {
                    stats.cattle_companies.push(Arc::clone(company));
                    stats.cow_count += company.animal_count;
                }
                AnimalType::Chicken => {
                    stats.chicken_companies.push(Arc::clone(company));
                    stats.chicken_count += company.animal_count;
                }
                AnimalType::Pig => {
                    stats.pig_companies.push(Arc::clone(company));
                    stats.pig_count += company.animal_count;
                }
                _ => {}
            }
        }
        stats
    }
}
