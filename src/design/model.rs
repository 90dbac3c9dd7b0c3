//! Live design state and the immutable [`Design`] snapshot built from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::vocabulary::{Category, Layer};
use crate::errors::UnknownKey;

/// A point in house layout units (origin at the top-left of the house container).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// Older saved designs stored coordinates as CSS lengths ("120px").
#[derive(Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn value(self) -> Option<f64> {
        match self {
            Coordinate::Number(n) => Some(n),
            Coordinate::Text(s) => s.trim().trim_end_matches("px").trim().parse().ok(),
        }
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            x: Coordinate,
            y: Coordinate,
        }
        let raw = Raw::deserialize(deserializer)?;
        match (raw.x.value(), raw.y.value()) {
            (Some(x), Some(y)) => Ok(Position { x, y }),
            _ => Err(serde::de::Error::custom("coordinate is not a number")),
        }
    }
}

/// Snapshot of a house configuration.
///
/// `layers` and `furnishings` are required, so JSON that is not a design
/// fails to deserialize. Keys are kept as plain strings so a decoded design can carry tokens outside
/// the fixed vocabulary; they are filtered when the design is applied.
/// `BTreeMap`/`BTreeSet` keep serialisation order stable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    pub layers: BTreeMap<String, String>,
    pub furnishings: BTreeMap<String, BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub furnishing_positions: Option<BTreeMap<String, Position>>,
}

impl Design {
    /// Attach save-time data: placed furnishing positions and the creation instant.
    pub fn stamped(self, positions: BTreeMap<String, Position>, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: Some(at),
            furnishing_positions: Some(positions),
            ..self
        }
    }

    /// The sharing form: layers and furnishings only.
    pub fn for_sharing(&self) -> Self {
        Self {
            timestamp: None,
            layers: self.layers.clone(),
            furnishings: self.furnishings.clone(),
            furnishing_positions: None,
        }
    }

    pub fn furnishing_count(&self) -> usize {
        self.furnishings.values().map(BTreeSet::len).sum()
    }
}

/// The authoritative working state of the session.
///
/// Every layer always holds exactly one allowed material; unknown names and
/// materials are ignored instead of rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignModel {
    layers: BTreeMap<Layer, &'static str>,
    furnishings: BTreeMap<Category, BTreeSet<&'static str>>,
}

impl Default for DesignModel {
    fn default() -> Self {
        Self {
            layers: Layer::ALL
                .into_iter()
                .map(|l| (l, l.default_material()))
                .collect(),
            furnishings: Category::ALL
                .into_iter()
                .map(|c| (c, BTreeSet::new()))
                .collect(),
        }
    }
}

impl DesignModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer(&self, layer: Layer) -> &'static str {
        self.layers
            .get(&layer)
            .copied()
            .unwrap_or_else(|| layer.default_material())
    }

    pub fn furnishings(&self, category: Category) -> impl Iterator<Item = &'static str> + '_ {
        self.furnishings
            .get(&category)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn contains(&self, category: Category, furnishing: &str) -> bool {
        self.furnishings
            .get(&category)
            .is_some_and(|set| set.contains(furnishing))
    }

    /// Overwrite a layer's material. Returns the recognised layer, or `None`
    /// when either the layer name or the material is outside the vocabulary.
    pub fn set_layer(&mut self, layer: &str, material: &str) -> Option<Layer> {
        let parsed = Layer::parse(layer)?;
        let token = parsed.materials().iter().find(|m| **m == material)?;
        self.layers.insert(parsed, *token);
        Some(parsed)
    }

    /// Insert a furnishing. `true` only when an insertion actually happened.
    pub fn add_furnishing(&mut self, category: &str, furnishing: &str) -> bool {
        let Some(parsed) = Category::parse(category) else {
            return false;
        };
        let Some(token) = parsed.furnishings().iter().find(|f| **f == furnishing) else {
            return false;
        };
        self.furnishings.entry(parsed).or_default().insert(*token)
    }

    /// Remove a furnishing. `true` only when it was present.
    pub fn remove_furnishing(&mut self, category: &str, furnishing: &str) -> bool {
        Category::parse(category)
            .and_then(|c| self.furnishings.get_mut(&c))
            .is_some_and(|set| set.remove(furnishing))
    }

    /// Deep copy of the current state; later mutation never reaches it.
    pub fn snapshot(&self) -> Design {
        Design {
            timestamp: None,
            layers: self
                .layers
                .iter()
                .map(|(l, m)| (l.as_str().to_string(), m.to_string()))
                .collect(),
            furnishings: self
                .furnishings
                .iter()
                .map(|(c, set)| {
                    (
                        c.as_str().to_string(),
                        set.iter().map(|f| f.to_string()).collect(),
                    )
                })
                .collect(),
            furnishing_positions: None,
        }
    }

    /// Overlay a decoded design onto this state, skipping anything outside the
    /// vocabulary. Furnishings already present stay; the skipped keys are returned.
    pub fn merge(&mut self, design: &Design) -> Vec<UnknownKey> {
        let mut skipped = Vec::new();
        for (layer, material) in &design.layers {
            if self.set_layer(layer, material).is_none() {
                skipped.push(UnknownKey::Layer {
                    layer: layer.clone(),
                    material: material.clone(),
                });
            }
        }
        for (category, items) in &design.furnishings {
            let Some(parsed) = Category::parse(category) else {
                skipped.push(UnknownKey::Category(category.clone()));
                continue;
            };
            for item in items {
                if !parsed.allows(item) {
                    skipped.push(UnknownKey::Furnishing {
                        category: category.clone(),
                        furnishing: item.clone(),
                    });
                    continue;
                }
                self.add_furnishing(category, item);
            }
        }
        skipped
    }
}
