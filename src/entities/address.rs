use crate::core::geo::Coordinate;
use serde::{Deserialize, Serialize};

/// Wire form of an address, as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressResource {
    pub node_id: i64,
    pub street: String,
    pub housenumber: String,
    pub postcode: String,
    pub city: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub node_id: i64,
    pub street: String,
    pub housenumber: String,
    pub postcode: String,
    pub city: String,
    pub lat: f64,
    pub lon: f64,
}

impl Address {
    pub fn from_resource(resource: AddressResource) -> Self {
        Self {
            node_id: resource.node_id,
            street: resource.street,
            housenumber: resource.housenumber,
            postcode: resource.postcode,
            city: resource.city,
            lat: resource.lat,
            lon: resource.lon,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.street, self.housenumber, self.city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_form() {
        let address = Address {
            node_id: 1,
            street: "Dorpsstraat".to_string(),
            housenumber: "12a".to_string(),
            postcode: "1234AB".to_string(),
            city: "Lunteren".to_string(),
            lat: 52.08,
            lon: 5.62,
        };
        assert_eq!(address.to_string(), "Dorpsstraat 12a Lunteren");
    }
}
