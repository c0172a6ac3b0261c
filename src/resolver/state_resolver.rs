//! Block state to model variant resolution.

use crate::error::{MapError, Result};
use crate::resource_pack::{
    blockstate::build_property_string, BlockstateDefinition, ModelVariant, MultipartCase, ResourcePack,
};
use crate::types::BlockType;
use std::collections::HashMap;

/// Picks the model variant a block state renders with.
pub struct StateResolver<'a> {
    pack: &'a ResourcePack,
}

impl<'a> StateResolver<'a> {
    pub fn new(pack: &'a ResourcePack) -> Self {
        Self { pack }
    }

    /// Resolve a block to a single model variant.
    ///
    /// Blocks without a blockstate definition use `block/<id>` in their own
    /// namespace.
    pub fn resolve(&self, block: &BlockType) -> Result<ModelVariant> {
        match self.pack.get_blockstate(&block.name) {
            Some(BlockstateDefinition::Variants(variants)) if !variants.is_empty() => {
                Ok(self.resolve_variants(variants, block))
            }
            Some(BlockstateDefinition::Multipart(cases)) => self.resolve_multipart(cases, block),
            _ => Ok(ModelVariant {
                model: format!("{}:block/{}", block.namespace(), block.block_id()),
                x: 0,
                y: 0,
            }),
        }
    }

    /// Exact key, then the `""` key, then the best variant consistent with
    /// the block's properties. Never called with an empty table.
    fn resolve_variants(&self, variants: &HashMap<String, Vec<ModelVariant>>, block: &BlockType) -> ModelVariant {
        let candidates = [build_property_string(&block.properties), String::new()];
        if let Some(list) = candidates.iter().find_map(|key| variants.get(key)) {
            if let Some(first) = list.first() {
                return first.clone();
            }
        }

        let consistent = variants
            .iter()
            .filter(|(key, list)| !list.is_empty() && consistent_with(key, &block.properties));
        let best = consistent
            .max_by(|(a, _), (b, _)| {
                default_score(a, &block.properties)
                    .cmp(&default_score(b, &block.properties))
                    .then_with(|| b.cmp(a))
            })
            .or_else(|| {
                variants
                    .iter()
                    .filter(|(_, list)| !list.is_empty())
                    .max_by(|(a, _), (b, _)| {
                        default_score(a, &HashMap::new())
                            .cmp(&default_score(b, &HashMap::new()))
                            .then_with(|| b.cmp(a))
                    })
            });

        match best.and_then(|(_, list)| list.first()) {
            Some(variant) => variant.clone(),
            None => ModelVariant {
                model: format!("{}:block/{}", block.namespace(), block.block_id()),
                x: 0,
                y: 0,
            },
        }
    }

    /// The first case whose condition holds supplies the model.
    fn resolve_multipart(&self, cases: &[MultipartCase], block: &BlockType) -> Result<ModelVariant> {
        cases
            .iter()
            .filter(|case| case.when.as_ref().map_or(true, |c| c.matches(&block.properties)))
            .find_map(|case| case.apply.first())
            .cloned()
            .ok_or_else(|| MapError::ModelResolution(format!("no multipart case applies to {}", block)))
    }
}

/// Every property named in `key` either matches the block or is unset on it.
fn consistent_with(key: &str, properties: &HashMap<String, String>) -> bool {
    key.split(',')
        .filter_map(|pair| pair.split_once('='))
        .all(|(prop, value)| properties.get(prop).map_or(true, |actual| actual == value))
}

/// How default-like the values are for the properties the block leaves unset.
fn default_score(key: &str, properties: &HashMap<String, String>) -> i32 {
    if key.is_empty() {
        return i32::MAX;
    }
    key.split(',')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(prop, _)| !properties.contains_key(*prop))
        .map(|(prop, value)| value_default_score(prop, value))
        .sum()
}

fn value_default_score(property: &str, value: &str) -> i32 {
    if let Ok(num) = value.parse::<i32>() {
        return -num * 10;
    }

    match (property, value) {
        ("axis", "y") => 50,
        ("half", "bottom" | "lower") | ("type", "single" | "normal" | "bottom") => 50,
        ("half", "top" | "upper") | ("type", "double" | "top") => -50,
        ("facing", "north") => 50,
        ("facing", "south") => 40,
        ("facing", "east") => 30,
        ("facing", "west") => 20,
        ("facing", "up") => 10,
        ("axis" | "facing", _) => 0,
        ("shape", "straight") => 50,
        ("shape", v) if v.starts_with("ascending_") => 0,
        ("shape", _) => -20,
        ("north" | "south" | "east" | "west", "none" | "false") => 50,
        ("north" | "south" | "east" | "west", "low" | "side") => 0,
        ("north" | "south" | "east" | "west", "tall" | "up") => -20,
        ("north" | "south" | "east" | "west", "true") => -50,
        (_, "false" | "off" | "none") => 100,
        (_, "true" | "on") => -100,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack_with(blockstates: &[(&str, &str)]) -> ResourcePack {
        let mut pack = ResourcePack::new();
        for (id, json) in blockstates {
            let def: BlockstateDefinition = serde_json::from_str(json).unwrap();
            pack.add_blockstate("minecraft", id, def);
        }
        pack
    }

    const FURNACE: &str = r#"{
        "variants": {
            "facing=north,lit=false": { "model": "block/furnace" },
            "facing=east,lit=false": { "model": "block/furnace", "y": 90 },
            "facing=south,lit=false": { "model": "block/furnace", "y": 180 },
            "facing=west,lit=false": { "model": "block/furnace", "y": 270 },
            "facing=north,lit=true": { "model": "block/furnace_on" }
        }
    }"#;

    #[test]
    fn test_default_variant() {
        let pack = pack_with(&[("stone", r#"{"variants": {"": {"model": "block/stone"}}}"#)]);
        let variant = StateResolver::new(&pack).resolve(&BlockType::new("stone")).unwrap();
        assert_eq!(variant.model, "block/stone");
    }

    #[test]
    fn test_exact_match_with_rotation() {
        let pack = pack_with(&[("furnace", FURNACE)]);
        let block = BlockType::new("furnace")
            .with_property("facing", "east")
            .with_property("lit", "false");
        let variant = StateResolver::new(&pack).resolve(&block).unwrap();
        assert_eq!(variant.model, "block/furnace");
        assert_eq!(variant.y, 90);
    }

    #[test]
    fn test_extra_properties_use_subset_match() {
        let pack = pack_with(&[(
            "stone_slab",
            r#"{"variants": {
                "type=bottom": { "model": "block/stone_slab" },
                "type=top": { "model": "block/stone_slab_top" },
                "type=double": { "model": "block/stone" }
            }}"#,
        )]);
        let resolver = StateResolver::new(&pack);
        let block = BlockType::new("stone_slab")
            .with_property("type", "top")
            .with_property("waterlogged", "false");
        assert_eq!(resolver.resolve(&block).unwrap().model, "block/stone_slab_top");
    }

    #[test]
    fn test_missing_properties_prefer_defaults() {
        let pack = pack_with(&[("furnace", FURNACE)]);
        let resolver = StateResolver::new(&pack);

        let variant = resolver.resolve(&BlockType::new("furnace")).unwrap();
        assert_eq!((variant.model.as_str(), variant.y), ("block/furnace", 0));

        let lit = BlockType::new("furnace").with_property("lit", "true");
        assert_eq!(resolver.resolve(&lit).unwrap().model, "block/furnace_on");
    }

    #[test]
    fn test_no_blockstate_falls_back_to_block_model() {
        let pack = ResourcePack::new();
        let variant = StateResolver::new(&pack)
            .resolve(&BlockType::new("mymod:ore"))
            .unwrap();
        assert_eq!(variant.model, "mymod:block/ore");
    }

    #[test]
    fn test_multipart_first_applying_case() {
        let pack = pack_with(&[(
            "oak_fence",
            r#"{"multipart": [
                { "when": { "north": "true" }, "apply": { "model": "block/oak_fence_side" } },
                { "apply": { "model": "block/oak_fence_post" } }
            ]}"#,
        )]);
        let resolver = StateResolver::new(&pack);

        let post = BlockType::new("oak_fence").with_property("north", "false");
        assert_eq!(resolver.resolve(&post).unwrap().model, "block/oak_fence_post");

        let side = BlockType::new("oak_fence").with_property("north", "true");
        assert_eq!(resolver.resolve(&side).unwrap().model, "block/oak_fence_side");
    }

    #[test]
    fn test_multipart_without_match_is_an_error() {
        let pack = pack_with(&[(
            "wire",
            r#"{"multipart": [{ "when": { "north": "side" }, "apply": { "model": "block/wire" } }]}"#,
        )]);
        let block = BlockType::new("wire").with_property("north", "up");
        let err = StateResolver::new(&pack).resolve(&block).unwrap_err();
        assert!(matches!(err, MapError::ModelResolution(_)));
    }
}
