//! Resource pack loading from ZIP files and directories.

use super::{BlockModel, BlockstateDefinition, ResourcePack};
use crate::error::{MapError, Result};
use crate::resource_pack::texture::load_texture_from_bytes;
use std::io::Read;
use std::path::Path;

/// Load a resource pack from a file path.
///
/// Supports both ZIP files (including game jars) and directories.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<ResourcePack> {
    let path = path.as_ref();

    if path.is_dir() {
        load_from_directory(path)
    } else {
        let data = std::fs::read(path)?;
        load_from_bytes(&data)
    }
}

/// Load a resource pack from bytes (ZIP data).
pub fn load_from_bytes(data: &[u8]) -> Result<ResourcePack> {
    let cursor = std::io::Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)?;

    let mut pack = ResourcePack::new();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }
        let file_path = file.name().to_string();

        let Some((namespace, asset_type, asset_path)) = parse_asset_path(&file_path) else {
            continue;
        };

        match asset_type {
            "blockstates" | "models" if asset_path.ends_with(".json") => {
                let mut contents = String::new();
                file.read_to_string(&mut contents)?;
                add_json_asset(&mut pack, namespace, asset_type, asset_path, &contents);
            }
            "textures" if asset_path.ends_with(".png") => {
                let mut bytes = Vec::new();
                file.read_to_end(&mut bytes)?;
                add_texture_asset(&mut pack, namespace, asset_path, &bytes);
            }
            _ => {}
        }
    }

    log::debug!(
        "loaded archive pack: {} blockstates, {} models, {} textures",
        pack.blockstate_count(),
        pack.model_count(),
        pack.texture_count()
    );
    Ok(pack)
}

/// Load a resource pack from a directory containing `assets/`.
fn load_from_directory(path: &Path) -> Result<ResourcePack> {
    let assets_path = path.join("assets");
    if !assets_path.is_dir() {
        return Err(MapError::InvalidResourcePack(format!(
            "no assets directory in {}",
            path.display()
        )));
    }

    let mut pack = ResourcePack::new();

    for namespace_entry in std::fs::read_dir(&assets_path)? {
        let namespace_entry = namespace_entry?;
        if !namespace_entry.file_type()?.is_dir() {
            continue;
        }
        let namespace = namespace_entry.file_name().to_string_lossy().to_string();

        for asset_type in ["blockstates", "models", "textures"] {
            let base = namespace_entry.path().join(asset_type);
            if !base.is_dir() {
                continue;
            }
            visit_files(&base, &base, &mut |relative, full_path| {
                if asset_type == "textures" {
                    if relative.ends_with(".png") {
                        let bytes = std::fs::read(full_path)?;
                        add_texture_asset(&mut pack, &namespace, relative, &bytes);
                    }
                } else if relative.ends_with(".json") {
                    let contents = std::fs::read_to_string(full_path)?;
                    add_json_asset(&mut pack, &namespace, asset_type, relative, &contents);
                }
                Ok(())
            })?;
        }
    }

    log::debug!(
        "loaded directory pack: {} blockstates, {} models, {} textures",
        pack.blockstate_count(),
        pack.model_count(),
        pack.texture_count()
    );
    Ok(pack)
}

/// Parse a blockstate or model document and add it. Parse failures are
/// logged and skipped.
fn add_json_asset(pack: &mut ResourcePack, namespace: &str, asset_type: &str, asset_path: &str, contents: &str) {
    let id = asset_path.trim_end_matches(".json");
    let parsed = match asset_type {
        "blockstates" => serde_json::from_str::<BlockstateDefinition>(contents)
            .map(|def| pack.add_blockstate(namespace, id, def)),
        _ => serde_json::from_str::<BlockModel>(contents).map(|model| pack.add_model(namespace, id, model)),
    };
    if let Err(e) = parsed {
        log::warn!("failed to parse {} {}:{}: {}", asset_type, namespace, id, e);
    }
}

fn add_texture_asset(pack: &mut ResourcePack, namespace: &str, asset_path: &str, bytes: &[u8]) {
    let texture_path = asset_path.trim_end_matches(".png");
    match load_texture_from_bytes(bytes) {
        Ok(texture) => pack.add_texture(namespace, texture_path, texture),
        Err(e) => log::warn!("failed to load texture {}:{}: {}", namespace, texture_path, e),
    }
}

/// Parse an asset path from a ZIP file.
/// Returns (namespace, asset_type, asset_path) if valid.
pub(crate) fn parse_asset_path(file_path: &str) -> Option<(&str, &str, &str)> {
    // Expected format: assets/{namespace}/{type}/{path}
    let parts: Vec<&str> = file_path.splitn(4, '/').collect();

    if parts.len() == 4 && parts[0] == "assets" && !parts[3].is_empty() {
        Some((parts[1], parts[2], parts[3]))
    } else {
        None
    }
}

/// Walk a directory tree, passing each file's `/`-separated path relative to `base`.
fn visit_files<F>(base: &Path, dir: &Path, handler: &mut F) -> Result<()>
where
    F: FnMut(&str, &Path) -> Result<()>,
{
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            visit_files(base, &path, handler)?;
        } else if let Ok(relative) = path.strip_prefix(base) {
            let relative = relative.to_string_lossy().replace('\\', "/");
            handler(&relative, &path)?;
        }
    }
    Ok(())
}
