//! Species icon metrics and composite cluster icon sizing.

use crate::entities::animal::AnimalType;
use crate::prelude::HashMap;
use once_cell::sync::Lazy;

/// Icons are authored at full size and displayed scaled down.
pub const ICON_DISPLAY_SCALE: f64 = 0.45;

/// Source metrics of one species' marker icon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesIcon {
    pub asset: &'static str,
    /// Authored pixel size.
    pub width: f64,
    pub height: f64,
    pub anchor: (f64, f64),
}

impl SpeciesIcon {
    pub fn display_width(&self) -> f64 {
        self.width * ICON_DISPLAY_SCALE
    }

    pub fn display_height(&self) -> f64 {
        self.height * ICON_DISPLAY_SCALE
    }

    /// Icon instance for a single marker.
    pub fn marker(&self) -> MarkerIcon {
        MarkerIcon {
            asset: self.asset,
            width: self.display_width(),
            height: self.display_height(),
            anchor: (
                self.anchor.0 * ICON_DISPLAY_SCALE,
                self.anchor.1 * ICON_DISPLAY_SCALE,
            ),
        }
    }

    /// Icon instance for a cluster of `member_count` markers: the display
    /// size grows with `sqrt(count / 100) + 1`, clamped to the authored
    /// size so large clusters never exceed the source asset.
    pub fn composite(&self, member_count: usize) -> MarkerIcon {
        let size_factor = (member_count as f64 / 100.0).sqrt() + 1.0;
        MarkerIcon {
            asset: self.asset,
            width: self.width.min(self.display_width() * size_factor),
            height: self.height.min(self.display_height() * size_factor),
            anchor: (15.0, 15.0),
        }
    }
}

/// A concrete, sized icon attached to a marker render object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerIcon {
    pub asset: &'static str,
    pub width: f64,
    pub height: f64,
    pub anchor: (f64, f64),
}

impl MarkerIcon {
    /// Zero-size stand-in for clusters that end up with no members.
    pub fn placeholder() -> MarkerIcon {
        MarkerIcon {
            asset: "",
            width: 0.0,
            height: 0.0,
            anchor: (0.0, 0.0),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// Species icon table, mirroring the shipped marker assets.
pub static SPECIES_ICONS: Lazy<HashMap<AnimalType, SpeciesIcon>> = Lazy::new(|| {
    let mut icons = HashMap::default();
    icons.insert(
        AnimalType::Chicken,
        SpeciesIcon {
            asset: "assets/chicken60x60.png",
            width: 60.0,
            height: 60.0,
            anchor: (0.0, 0.0),
        },
    );
    icons.insert(
        AnimalType::Pig,
        SpeciesIcon {
            asset: "assets/pig60x40.png",
            width: 60.0,
            height: 40.0,
            anchor: (0.0, 0.0),
        },
    );
    icons.insert(
        AnimalType::CowBeef,
        SpeciesIcon {
            asset: "assets/cow60x38.png",
            width: 60.0,
            height: 38.0,
            anchor: (0.0, 40.0),
        },
    );
    icons.insert(
        AnimalType::CowDairy,
        SpeciesIcon {
            asset: "assets/cow_dairy60x38.png",
            width: 60.0,
            height: 38.0,
            anchor: (0.0, 0.0),
        },
    );
    icons.insert(
        AnimalType::Goat,
        SpeciesIcon {
            asset: "assets/goat60x60.png",
            width: 60.0,
            height: 60.0,
            anchor: (0.0, 0.0),
        },
    );
    icons.insert(
        AnimalType::Sheep,
        SpeciesIcon {
            asset: "assets/sheep60x46.png",
            width: 60.0,
            height: 46.0,
            anchor: (0.0, 0.0),
        },
    );
    icons.insert(
        AnimalType::Combined,
        SpeciesIcon {
            asset: "assets/cow_grey60x38.png",
            width: 60.0,
            height: 38.0,
            anchor: (0.0, 0.0),
        },
    );
    icons
});

/// The icon for a species. Every [`AnimalType`] has an entry.
pub fn species_icon(animal_type: AnimalType) -> &'static SpeciesIcon {
    &SPECIES_ICONS[&animal_type]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_species_has_an_icon() {
        for animal_type in AnimalType::ALL {
            let icon = species_icon(animal_type);
            assert!(!icon.asset.is_empty());
        }
    }

    #[test]
    fn composite_grows_with_membership_but_clamps() {
        let icon = species_icon(AnimalType::Pig);
        let single = icon.composite(1);
        let medium = icon.composite(100);
        let huge = icon.composite(100_000);
        assert!(medium.width > single.width);
        assert!(huge.width <= icon.width);
        assert_eq!(huge.width, icon.width);
    }

    #[test]
    fn placeholder_is_zero_size() {
        let placeholder = MarkerIcon::placeholder();
        assert!(placeholder.is_placeholder());
        assert_eq!(placeholder.width, 0.0);
    }
}
