//! Output writers: PNG tiles and text dumps of decoded sections and chunk NBT.

pub mod dump;
pub mod png;

pub use dump::{dump_chunk, dump_nbt, format_nbt, format_section};
pub use png::{encode_png, sanitize_identifier, tile_path, write_block};
