//! Block state and model resolution.
//!
//! Turns a palette entry into the geometry the tile renderer draws: the
//! variant its blockstate selects, the flattened model behind that variant,
//! and the top and side textures the model's faces use.

pub mod model_resolver;
pub mod state_resolver;

pub use model_resolver::ModelResolver;
pub use state_resolver::StateResolver;

use crate::render::tile::Tile;
use crate::resource_pack::{BlockModel, ModelElement, ResourcePack, TextureData};
use crate::types::{BlockType, Direction, Orientation};
use std::cell::Cell;

/// Resolved geometry for one block state.
#[derive(Debug, Clone)]
pub struct ModelGeometry {
    /// Cuboid elements in model space.
    pub elements: Vec<ModelElement>,
    /// Texture for upward faces.
    pub top: Tile,
    /// Texture for side faces.
    pub side: Tile,
    pub top_tint: i32,
    pub side_tint: i32,
    /// Quarter-turn rotation about the vertical axis from the blockstate variant.
    pub rotation: Orientation,
}

impl ModelGeometry {
    /// Geometry that renders as a blank tile.
    pub fn empty() -> Self {
        Self {
            elements: Vec::new(),
            top: Tile::blank(),
            side: Tile::blank(),
            top_tint: -1,
            side_tint: -1,
            rotation: Orientation::R0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Resolves block states to [`ModelGeometry`] against one resource pack.
///
/// Missing or broken assets never fail resolution: they are logged and
/// replaced by empty geometry or the placeholder texture.
pub struct GeometryResolver<'a> {
    pack: &'a ResourcePack,
    states: StateResolver<'a>,
    models: ModelResolver<'a>,
    resolutions: Cell<usize>,
}

impl<'a> GeometryResolver<'a> {
    pub fn new(pack: &'a ResourcePack) -> Self {
        Self {
            pack,
            states: StateResolver::new(pack),
            models: ModelResolver::new(pack),
            resolutions: Cell::new(0),
        }
    }

    /// Cache identifier for a block: its name plus the properties its
    /// blockstate definition keys on.
    pub fn identifier(&self, block: &BlockType) -> String {
        match self.pack.get_blockstate(&block.name) {
            Some(definition) => {
                let keys = definition.property_keys();
                block.identifier(keys.iter().map(String::as_str))
            }
            None => block.identifier([]),
        }
    }

    /// Number of geometry resolutions performed so far.
    pub fn resolution_count(&self) -> usize {
        self.resolutions.get()
    }

    pub fn resolve(&self, block: &BlockType) -> ModelGeometry {
        self.resolutions.set(self.resolutions.get() + 1);

        let variant = match self.states.resolve(block) {
            Ok(variant) => variant,
            Err(e) => {
                log::warn!("{}: {}", block, e);
                return ModelGeometry::empty();
            }
        };
        if variant.x != 0 {
            log::debug!("{}: ignoring x rotation {} of {}", block, variant.x, variant.model);
        }

        let model = match self.models.resolve(&variant.model) {
            Ok(model) => model,
            Err(e) => {
                log::warn!("{}: {}", block, e);
                return ModelGeometry::empty();
            }
        };
        if !model.has_elements() {
            log::warn!("{}: model {} has no elements", block, variant.model);
            return ModelGeometry::empty();
        }

        let (top_ref, side_ref) = texture_slots(&model);
        let (top_tint, side_tint) = face_tints(&model.elements);

        ModelGeometry {
            top: self.load_tile(block, &model, top_ref.as_deref()),
            side: self.load_tile(block, &model, side_ref.as_deref()),
            top_tint,
            side_tint,
            rotation: Orientation::from_degrees(variant.y),
            elements: model.elements,
        }
    }

    fn load_tile(&self, block: &BlockType, model: &BlockModel, reference: Option<&str>) -> Tile {
        let Some(location) = reference.and_then(|r| model.resolve_texture(r)) else {
            log::warn!("{}: unresolved texture {:?}", block, reference);
            return placeholder();
        };
        let Some(texture) = self.pack.get_texture(&location) else {
            log::warn!("{}: texture {} not found", block, location);
            return placeholder();
        };
        texture.to_tile(&location).unwrap_or_else(|e| {
            log::warn!("{}: {}", block, e);
            placeholder()
        })
    }
}

fn placeholder() -> Tile {
    let texture = TextureData::placeholder();
    Tile::from_rgba(texture.pixels).unwrap_or_default()
}

/// Texture references for the top and side of a model.
///
/// Named slots are tried first (`all`, `wall`, then `top` with `side`);
/// otherwise the first upward face and the first horizontal face decide.
fn texture_slots(model: &BlockModel) -> (Option<String>, Option<String>) {
    let slot = |name: &str| model.textures.get(name).map(|_| format!("#{}", name));

    if let Some(all) = slot("all") {
        return (Some(all.clone()), Some(all));
    }
    if let Some(wall) = slot("wall") {
        return (Some(wall.clone()), Some(wall));
    }
    if let (Some(top), Some(side)) = (slot("top"), slot("side")) {
        return (Some(top), Some(side));
    }

    let top = first_face(&model.elements, |d| d == Direction::Up).map(|f| f.texture.clone());
    let side = first_face(&model.elements, Direction::is_horizontal).map(|f| f.texture.clone());
    (top.or_else(|| side.clone()), side)
}

fn face_tints(elements: &[ModelElement]) -> (i32, i32) {
    let top = first_face(elements, |d| d == Direction::Up).map_or(-1, |f| f.tintindex);
    let side = first_face(elements, Direction::is_horizontal).map_or(-1, |f| f.tintindex);
    (top, side)
}

fn first_face(
    elements: &[ModelElement],
    wanted: impl Fn(Direction) -> bool,
) -> Option<&crate::resource_pack::ModelFace> {
    elements.iter().find_map(|element| {
        Direction::HORIZONTAL
            .iter()
            .chain([Direction::Up].iter())
            .filter(|d| wanted(**d))
            .find_map(|d| element.faces.get(d))
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::resource_pack::{BlockstateDefinition, ModelFace};

    pub(crate) fn solid_texture(rgba: [u8; 4]) -> TextureData {
        TextureData::new(16, 16, rgba.repeat(256))
    }

    fn face(texture: &str, tintindex: i32) -> ModelFace {
        ModelFace {
            texture: texture.to_string(),
            tintindex,
        }
    }

    /// A pack with a full cube `stone`, a grass block with tinted top, a
    /// rotated furnace, a slab and a block whose texture is missing.
    pub(crate) fn test_pack() -> ResourcePack {
        let mut pack = ResourcePack::new();

        let mut cube = ModelElement::new([0.0; 3], [16.0; 3]);
        for d in Direction::ALL {
            cube.faces.insert(d, face(&format!("#{}", d), -1));
        }
        pack.add_model(
            "minecraft",
            "block/cube",
            BlockModel {
                elements: vec![cube],
                ..Default::default()
            },
        );
        let child = |parent: &str, textures: &[(&str, &str)]| BlockModel {
            parent: Some(parent.to_string()),
            textures: textures
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            elements: Vec::new(),
        };
        pack.add_model(
            "minecraft",
            "block/cube_all",
            child(
                "block/cube",
                &[
                    ("up", "#all"),
                    ("north", "#all"),
                    ("south", "#all"),
                    ("east", "#all"),
                    ("west", "#all"),
                ],
            ),
        );
        pack.add_model("minecraft", "block/stone", child("block/cube_all", &[("all", "block/stone")]));
        pack.add_model("minecraft", "block/lost", child("block/cube_all", &[("all", "block/nothing")]));

        let mut grass = ModelElement::new([0.0; 3], [16.0; 3]);
        grass.faces.insert(Direction::Up, face("#top", 0));
        for d in Direction::HORIZONTAL {
            grass.faces.insert(d, face("#side", -1));
        }
        pack.add_model(
            "minecraft",
            "block/grass_block",
            BlockModel {
                textures: [("top", "block/grass_block_top"), ("side", "block/dirt")]
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                elements: vec![grass],
                ..Default::default()
            },
        );

        let mut slab = ModelElement::new([0.0; 3], [16.0, 8.0, 16.0]);
        slab.faces.insert(Direction::Up, face("#top", -1));
        slab.faces.insert(Direction::South, face("#side", -1));
        pack.add_model(
            "minecraft",
            "block/stone_slab",
            BlockModel {
                textures: [("top", "block/stone"), ("side", "block/stone")]
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                elements: vec![slab],
                ..Default::default()
            },
        );

        pack.add_blockstate(
            "minecraft",
            "furnace",
            serde_json::from_str::<BlockstateDefinition>(
                r#"{"variants": {
                    "facing=north": { "model": "block/stone" },
                    "facing=east": { "model": "block/stone", "y": 90 }
                }}"#,
            )
            .unwrap(),
        );

        pack.add_texture("minecraft", "block/stone", solid_texture([128, 128, 128, 255]));
        pack.add_texture("minecraft", "block/grass_block_top", solid_texture([200, 200, 200, 255]));
        pack.add_texture("minecraft", "block/dirt", solid_texture([120, 80, 40, 255]));
        pack
    }

    #[test]
    fn test_resolve_cube_all() {
        let pack = test_pack();
        let resolver = GeometryResolver::new(&pack);
        let geometry = resolver.resolve(&BlockType::new("stone"));

        assert_eq!(geometry.elements.len(), 1);
        assert_eq!(geometry.top.get(0, 0), [128, 128, 128, 255]);
        assert_eq!(geometry.side.get(15, 15), [128, 128, 128, 255]);
        assert_eq!(geometry.rotation, Orientation::R0);
        assert_eq!(resolver.resolution_count(), 1);
    }

    #[test]
    fn test_top_and_side_slots_with_tint() {
        let pack = test_pack();
        let geometry = GeometryResolver::new(&pack).resolve(&BlockType::new("grass_block"));

        assert_eq!(geometry.top.get(3, 3), [200, 200, 200, 255]);
        assert_eq!(geometry.side.get(3, 3), [120, 80, 40, 255]);
        assert_eq!((geometry.top_tint, geometry.side_tint), (0, -1));
    }

    #[test]
    fn test_variant_rotation() {
        let pack = test_pack();
        let block = BlockType::new("furnace").with_property("facing", "east");
        let geometry = GeometryResolver::new(&pack).resolve(&block);
        assert_eq!(geometry.rotation, Orientation::R1);
    }

    #[test]
    fn test_missing_model_is_empty() {
        let pack = test_pack();
        let geometry = GeometryResolver::new(&pack).resolve(&BlockType::new("unknown_block"));
        assert!(geometry.is_empty());
        assert!(geometry.top.is_blank());
    }

    #[test]
    fn test_own_elements_survive_missing_ancestor() {
        let mut pack = test_pack();
        let mut cube = ModelElement::new([0.0; 3], [16.0; 3]);
        cube.faces.insert(Direction::Up, face("#all", -1));
        pack.add_model(
            "minecraft",
            "block/polished_rock",
            BlockModel {
                parent: Some("block/not_in_pack".to_string()),
                textures: [("all".to_string(), "block/stone".to_string())].into_iter().collect(),
                elements: vec![cube],
            },
        );

        let geometry = GeometryResolver::new(&pack).resolve(&BlockType::new("polished_rock"));
        assert_eq!(geometry.elements.len(), 1);
        assert_eq!(geometry.top.get(5, 5), [128, 128, 128, 255]);
    }

    #[test]
    fn test_missing_texture_uses_placeholder() {
        let pack = test_pack();
        let geometry = GeometryResolver::new(&pack).resolve(&BlockType::new("lost"));
        assert_eq!(geometry.top.get(0, 0), [255, 0, 255, 255]);
        assert_eq!(geometry.top.get(2, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn test_identifier_uses_blockstate_keys() {
        let pack = test_pack();
        let resolver = GeometryResolver::new(&pack);

        let furnace = BlockType::new("furnace")
            .with_property("facing", "east")
            .with_property("lit", "true");
        assert_eq!(resolver.identifier(&furnace), "minecraft:furnace[facing=east]");

        let stone = BlockType::new("stone").with_property("snowy", "false");
        assert_eq!(resolver.identifier(&stone), "minecraft:stone");
    }
}
