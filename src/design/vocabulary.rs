//! Fixed vocabularies: the four structural layers, the three furnishing
//! rooms, and the tokens each of them accepts.

use std::fmt;

/// One structural slot of the house. Each holds exactly one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Base,
    Flooring,
    InteriorWalls,
    ExteriorWalls,
}

impl Layer {
    pub const ALL: [Layer; 4] = [
        Layer::Base,
        Layer::Flooring,
        Layer::InteriorWalls,
        Layer::ExteriorWalls,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Base => "base",
            Layer::Flooring => "flooring",
            Layer::InteriorWalls => "interior-walls",
            Layer::ExteriorWalls => "exterior-walls",
        }
    }

    /// Parse a layer name. Unknown names yield `None` rather than an error.
    pub fn parse(name: &str) -> Option<Layer> {
        Layer::ALL.into_iter().find(|l| l.as_str() == name)
    }

    /// Allowed material tokens for this layer.
    pub fn materials(self) -> &'static [&'static str] {
        match self {
            Layer::Base => &["grass", "dirt", "sand", "stone"],
            Layer::Flooring => &["wood", "bamboo", "paper", "fleece"],
            Layer::InteriorWalls => &["natural-wood", "painted-white", "painted-blue", "cardboard"],
            Layer::ExteriorWalls => &["log-cabin", "brick", "siding"],
        }
    }

    pub fn default_material(self) -> &'static str {
        match self {
            Layer::Base => "grass",
            Layer::Flooring => "wood",
            Layer::InteriorWalls => "natural-wood",
            Layer::ExteriorWalls => "log-cabin",
        }
    }

    pub fn allows(self, material: &str) -> bool {
        self.materials().contains(&material)
    }

    /// Wall layers fan out to four side elements.
    pub fn is_wall(self) -> bool {
        matches!(self, Layer::InteriorWalls | Layer::ExteriorWalls)
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sides of a wall layer, in the order the scaffold creates them.
pub const WALL_PARTS: [&str; 4] = ["front", "left", "right", "back"];

/// Room a furnishing belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Bedroom,
    Eating,
    Outside,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Bedroom, Category::Eating, Category::Outside];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Bedroom => "bedroom",
            Category::Eating => "eating",
            Category::Outside => "outside",
        }
    }

    pub fn parse(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.as_str() == name)
    }

    pub fn furnishings(self) -> &'static [&'static str] {
        match self {
            Category::Bedroom => &["hideout", "soft-bed", "tunnel", "hammock"],
            Category::Eating => &["food-bowl", "water-bottle", "treat-dispenser", "hay-rack"],
            Category::Outside => &[
                "litter-box",
                "exercise-wheel",
                "climbing-structure",
                "digging-pit",
            ],
        }
    }

    pub fn allows(self, furnishing: &str) -> bool {
        self.furnishings().contains(&furnishing)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_names_round_trip() {
        for layer in Layer::ALL {
            assert_eq!(Layer::parse(layer.as_str()), Some(layer));
        }
        assert_eq!(Layer::parse("roof"), None);
    }

    #[test]
    fn defaults_are_allowed_materials() {
        for layer in Layer::ALL {
            assert!(layer.allows(layer.default_material()), "{layer}");
        }
    }

    #[test]
    fn furnishing_types_are_unique_across_rooms() {
        let mut seen = std::collections::HashSet::new();
        for category in Category::ALL {
            for item in category.furnishings() {
                assert!(seen.insert(*item), "duplicate furnishing {item}");
            }
        }
        assert_eq!(seen.len(), 12);
    }

    #[test]
    fn only_wall_layers_fan_out() {
        assert!(Layer::InteriorWalls.is_wall());
        assert!(Layer::ExteriorWalls.is_wall());
        assert!(!Layer::Base.is_wall());
        assert!(!Layer::Flooring.is_wall());
    }
}
