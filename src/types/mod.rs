//! Shared types used throughout the library.

mod direction;
mod view;

pub use direction::Direction;
pub use view::{Orientation, ViewAngle};

use std::collections::HashMap;

/// A palette entry: a qualified block name plus its state properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockType {
    /// Block name, e.g., "minecraft:stone"
    pub name: String,
    /// Block properties, e.g., {"facing": "north"}
    pub properties: HashMap<String, String>,
}

impl BlockType {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = if name.contains(':') {
            name
        } else {
            format!("minecraft:{}", name)
        };
        Self {
            name,
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Get the namespace (e.g., "minecraft").
    pub fn namespace(&self) -> &str {
        self.name.split(':').next().unwrap_or("minecraft")
    }

    /// Get the block ID without namespace (e.g., "stone").
    pub fn block_id(&self) -> &str {
        self.name.split(':').nth(1).unwrap_or(&self.name)
    }

    /// Check if this is an air block.
    pub fn is_air(&self) -> bool {
        matches!(
            self.name.as_str(),
            "minecraft:air" | "minecraft:cave_air" | "minecraft:void_air"
        )
    }

    /// Cache identifier built from the name and the given subset of properties.
    ///
    /// Properties are sorted by key, so the identifier does not depend on map order:
    /// `minecraft:oak_stairs[facing=east,half=bottom]`.
    pub fn identifier<'a>(&self, relevant: impl IntoIterator<Item = &'a str>) -> String {
        let mut pairs: Vec<(&str, &str)> = relevant
            .into_iter()
            .filter_map(|key| {
                self.properties
                    .get_key_value(key)
                    .map(|(k, v)| (k.as_str(), v.as_str()))
            })
            .collect();
        pairs.sort_unstable();
        pairs.dedup();

        if pairs.is_empty() {
            return self.name.clone();
        }

        let props: Vec<String> = pairs.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        format!("{}[{}]", self.name, props.join(","))
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<&str> = self.properties.keys().map(|k| k.as_str()).collect();
        write!(f, "{}", self.identifier(keys))
    }
}
