//! Blockstate definition parsing.
//!
//! Blockstates map block properties to model variants, either as a table of
//! `variants` keyed by property strings or as conditional `multipart` cases.

use serde::{Deserialize, Deserializer};
use std::collections::{BTreeSet, HashMap};

/// A blockstate definition from blockstates/*.json.
#[derive(Debug, Clone)]
pub enum BlockstateDefinition {
    /// Property combinations map to models.
    Variants(HashMap<String, Vec<ModelVariant>>),
    /// Conditional model application.
    Multipart(Vec<MultipartCase>),
}

impl<'de> Deserialize<'de> for BlockstateDefinition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawBlockstate {
            variants: Option<HashMap<String, OneOrMany>>,
            multipart: Option<Vec<MultipartCase>>,
        }

        let raw = RawBlockstate::deserialize(deserializer)?;

        if let Some(variants) = raw.variants {
            Ok(BlockstateDefinition::Variants(
                variants.into_iter().map(|(k, v)| (k, v.into_vec())).collect(),
            ))
        } else if let Some(multipart) = raw.multipart {
            Ok(BlockstateDefinition::Multipart(multipart))
        } else {
            Ok(BlockstateDefinition::Variants(HashMap::new()))
        }
    }
}

impl BlockstateDefinition {
    /// Names of the properties this definition distinguishes between.
    ///
    /// Properties outside this set never change which model is chosen.
    pub fn property_keys(&self) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        match self {
            BlockstateDefinition::Variants(variants) => {
                for key in variants.keys() {
                    for pair in key.split(',') {
                        if let Some((prop, _)) = pair.split_once('=') {
                            keys.insert(prop.to_string());
                        }
                    }
                }
            }
            BlockstateDefinition::Multipart(cases) => {
                for case in cases {
                    if let Some(when) = &case.when {
                        keys.extend(when.property_keys());
                    }
                }
            }
        }
        keys
    }
}

/// A single model or an array of weighted models.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(ModelVariant),
    Many(Vec<ModelVariant>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<ModelVariant> {
        match self {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(v) => v,
        }
    }

    /// The first listed variant (weights are ignored, picks are deterministic).
    pub fn first(&self) -> Option<&ModelVariant> {
        match self {
            OneOrMany::One(v) => Some(v),
            OneOrMany::Many(v) => v.first(),
        }
    }
}

/// A model variant reference with optional rotation.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelVariant {
    /// Model resource location (e.g., "block/stone" or "minecraft:block/stone").
    pub model: String,
    /// X rotation in degrees (0, 90, 180, 270).
    #[serde(default)]
    pub x: i32,
    /// Y rotation in degrees (0, 90, 180, 270).
    #[serde(default)]
    pub y: i32,
}

/// A multipart case with optional condition.
#[derive(Debug, Clone, Deserialize)]
pub struct MultipartCase {
    #[serde(default)]
    pub when: Option<MultipartCondition>,
    pub apply: OneOrMany,
}

/// Multipart condition for when a case applies.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MultipartCondition {
    /// Any of the sub-conditions must match.
    #[allow(non_snake_case)]
    Or { OR: Vec<HashMap<String, String>> },
    /// All of the sub-conditions must match.
    #[allow(non_snake_case)]
    And { AND: Vec<HashMap<String, String>> },
    /// All listed properties must match.
    Simple(HashMap<String, String>),
}

impl MultipartCondition {
    /// Check if the condition matches the given block properties.
    pub fn matches(&self, properties: &HashMap<String, String>) -> bool {
        match self {
            MultipartCondition::Or { OR } => OR.iter().any(|cond| Self::matches_simple(cond, properties)),
            MultipartCondition::And { AND } => AND.iter().all(|cond| Self::matches_simple(cond, properties)),
            MultipartCondition::Simple(cond) => Self::matches_simple(cond, properties),
        }
    }

    fn property_keys(&self) -> Vec<String> {
        let maps: Vec<&HashMap<String, String>> = match self {
            MultipartCondition::Or { OR } => OR.iter().collect(),
            MultipartCondition::And { AND } => AND.iter().collect(),
            MultipartCondition::Simple(cond) => vec![cond],
        };
        maps.into_iter().flat_map(|m| m.keys().cloned()).collect()
    }

    /// Values may list alternatives separated by `|`. A missing property only
    /// matches values that are common defaults.
    fn matches_simple(condition: &HashMap<String, String>, properties: &HashMap<String, String>) -> bool {
        condition.iter().all(|(key, expected)| {
            let mut allowed = expected.split('|');
            match properties.get(key) {
                Some(actual) => allowed.any(|v| v == actual),
                None => allowed.any(is_default_value),
            }
        })
    }
}

/// Check if a value is a common default for missing properties.
fn is_default_value(value: &str) -> bool {
    matches!(value, "false" | "none" | "0" | "normal" | "bottom" | "floor")
}

/// Build a property string from a properties map for variant lookup.
/// e.g., {"facing": "north", "half": "bottom"} -> "facing=north,half=bottom"
pub fn build_property_string(properties: &HashMap<String, String>) -> String {
    let mut pairs: Vec<_> = properties.iter().collect();
    pairs.sort_by_key(|(k, _)| *k);

    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(",")
}
