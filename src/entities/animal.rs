use serde::{Deserialize, Serialize};

/// Main animal type of a company. Wire codes match those returned by the
/// backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalType {
    #[serde(rename = "COD")]
    CowDairy,
    #[serde(rename = "COB")]
    CowBeef,
    #[serde(rename = "PIG")]
    Pig,
    #[serde(rename = "CHI")]
    Chicken,
    #[serde(rename = "SHE")]
    Sheep,
    #[serde(rename = "GOA")]
    Goat,
    #[serde(rename = "COM")]
    Combined,
}

impl AnimalType {
    pub const ALL: [AnimalType; 7] = [
        AnimalType::CowDairy,
        AnimalType::CowBeef,
        AnimalType::Pig,
        AnimalType::Chicken,
        AnimalType::Sheep,
        AnimalType::Goat,
        AnimalType::Combined,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            AnimalType::CowDairy => "COD",
            AnimalType::CowBeef => "COB",
            AnimalType::Pig => "PIG",
            AnimalType::Chicken => "CHI",
            AnimalType::Sheep => "SHE",
            AnimalType::Goat => "GOA",
            AnimalType::Combined => "COM",
        }
    }

    pub fn from_code(code: &str) -> Option<AnimalType> {
        AnimalType::ALL.iter().copied().find(|t| t.code() == code)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AnimalType::CowDairy => "Dairy cows",
            AnimalType::CowBeef => "Beef calves",
            AnimalType::Pig => "Pigs",
            AnimalType::Chicken => "Chickens",
            AnimalType::Sheep => "Sheep",
            AnimalType::Goat => "Goats",
            AnimalType::Combined => "Mixed",
        }
    }

    /// Statutory floor-space minimum used to size synthetic point counts:
    /// `points = building area / minimal m² per animal`.
    pub fn minimal_square_meters_per_animal(&self) -> f64 {
        match self {
            AnimalType::CowDairy | AnimalType::CowBeef => 1.7,
            AnimalType::Pig => 0.8,
            AnimalType::Chicken => 0.04,
            AnimalType::Sheep => 0.6,
            AnimalType::Goat => 0.5,
            AnimalType::Combined => 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_code_round_trip() {
        for animal_type in AnimalType::ALL {
            assert_eq!(AnimalType::from_code(animal_type.code()), Some(animal_type));
        }
        assert_eq!(AnimalType::from_code("XXX"), None);
    }

    #[test]
    fn serde_uses_wire_codes() {
        let json = serde_json::to_string(&AnimalType::CowDairy).unwrap();
        assert_eq!(json, "\"COD\"");
        let back: AnimalType = serde_json::from_str("\"PIG\"").unwrap();
        assert_eq!(back, AnimalType::Pig);
    }

    #[test]
    fn density_table_is_positive() {
        for animal_type in AnimalType::ALL {
            assert!(animal_type.minimal_square_meters_per_animal() > 0.0);
        }
    }
}
