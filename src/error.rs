//! Error types for the isometric map renderer.

use thiserror::Error;

/// Result type alias using MapError.
pub type Result<T> = std::result::Result<T, MapError>;

/// Main error type for world decoding and tile rendering.
#[derive(Error, Debug)]
pub enum MapError {
    /// Failed to read or parse a ZIP archive.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Failed to parse JSON data.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read or process an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Failed to decode chunk NBT.
    #[error("NBT error: {0}")]
    Nbt(#[from] fastnbt::error::Error),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unreadable configuration. Always fatal.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unrecognized viewing angle label.
    #[error("Unknown view angle '{0}' (expected one of NE, NW, SE, SW)")]
    UnknownViewAngle(String),

    /// Resource not found in the resource pack.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// Invalid resource pack structure.
    #[error("Invalid resource pack: {0}")]
    InvalidResourcePack(String),

    /// Failed to resolve a block model.
    #[error("Model resolution error: {0}")]
    ModelResolution(String),

    /// A model's parent chain refers back to itself.
    #[error("Circular model parent chain: {0}")]
    CircularModel(String),

    /// Texture has a size other than 16x16.
    #[error("Invalid texture {name}: expected 16x16, got {width}x{height}")]
    InvalidTexture {
        name: String,
        width: u32,
        height: u32,
    },

    /// Region file is truncated or uses an unsupported encoding.
    #[error("Malformed region file: {0}")]
    MalformedRegion(String),

    /// Failed to export a tile.
    #[error("Export error: {0}")]
    Export(String),
}

impl MapError {
    /// Whether this error must abort the run before rendering starts.
    pub fn is_fatal(&self) -> bool {
        matches!(self, MapError::Config(_) | MapError::UnknownViewAngle(_))
    }
}
