//! voxel-isomap CLI
//!
//! Render isometric block tiles from a world save and a resource pack.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use voxel_isomap::export::{dump_chunk, dump_nbt, write_block};
use voxel_isomap::pipeline::{read_single_chunk, read_single_chunk_nbt, scheduled_regions};
use voxel_isomap::resource_pack::extract::{extract_assets, DEFAULT_FILTER};
use voxel_isomap::{load_resource_pack, BlockType, MapConfig, SectionPacking, SpriteRenderer, ViewAngle};

#[derive(Parser)]
#[command(name = "voxel-isomap")]
#[command(author, version, about = "Render isometric block tiles from world saves", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every block state found in a world
    Render {
        /// Path to resource pack (ZIP, client jar or directory)
        #[arg(short, long)]
        resource_pack: PathBuf,

        /// World save directory (containing region/) or a region directory
        #[arg(short, long)]
        world: PathBuf,

        /// Output directory for tiles
        #[arg(short, long)]
        output: PathBuf,

        /// Viewing corner: sw, se, ne or nw
        #[arg(long, default_value = "sw")]
        view: ViewAngle,

        /// Biome for tinting (e.g., "plains", "swamp", "jungle")
        #[arg(long, default_value = "plains")]
        biome: String,

        /// Section data layout: compact or padded
        #[arg(long, default_value = "compact")]
        packing: SectionPacking,
    },

    /// Render a single block state (useful for testing)
    Block {
        /// Path to resource pack (ZIP, client jar or directory)
        #[arg(short, long)]
        resource_pack: PathBuf,

        /// Block name (e.g., "minecraft:stone" or "stone")
        #[arg(short, long)]
        block: String,

        /// Block properties as key=value pairs (e.g., "facing=north")
        #[arg(short, long, value_parser = parse_property)]
        property: Vec<(String, String)>,

        /// Output directory for tiles
        #[arg(short, long)]
        output: PathBuf,

        /// Biome for tinting
        #[arg(long, default_value = "plains")]
        biome: String,
    },

    /// Print the order in which regions are rendered
    Order {
        /// World save directory or region directory
        #[arg(short, long)]
        world: PathBuf,

        /// Viewing corner: sw, se, ne or nw
        #[arg(long, default_value = "sw")]
        view: ViewAngle,
    },

    /// Dump the decoded sections or the raw NBT of one chunk as text
    Dump {
        /// Region file (r.<x>.<z>.mca)
        #[arg(long)]
        region: PathBuf,

        /// Chunk x within the region (0-31)
        #[arg(long)]
        chunk_x: i32,

        /// Chunk z within the region (0-31)
        #[arg(long)]
        chunk_z: i32,

        /// Output directory for dump files
        #[arg(short, long)]
        output: PathBuf,

        /// Section data layout: compact or padded
        #[arg(long, default_value = "compact")]
        packing: SectionPacking,

        /// Write the chunk's raw NBT tree instead of section printouts
        #[arg(long)]
        nbt: bool,
    },

    /// Extract block assets from a client jar
    Extract {
        /// Path to the client jar or asset ZIP
        #[arg(short, long)]
        jar: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Only entries under this prefix are extracted
        #[arg(long, default_value = DEFAULT_FILTER)]
        filter: String,
    },

    /// Show information about a resource pack
    Info {
        /// Path to resource pack (ZIP or directory)
        #[arg(short, long)]
        resource_pack: PathBuf,
    },
}

fn parse_property(s: &str) -> Result<(String, String), String> {
    let parts: Vec<&str> = s.splitn(2, '=').collect();
    if parts.len() != 2 {
        return Err(format!("Invalid property format: '{}'. Use key=value", s));
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = execute(cli.command) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn execute(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Render {
            resource_pack,
            world,
            output,
            view,
            biome,
            packing,
        } => {
            let config = MapConfig::new(resource_pack, world, output)
                .with_view_angle(view)
                .with_biome(biome)
                .with_packing(packing);
            let summary = voxel_isomap::run(&config)?;
            println!(
                "Rendered {} block states ({} tiles) from {} chunks in {} regions",
                summary.blocks, summary.tiles_written, summary.chunks, summary.regions
            );
            if summary.skipped > 0 {
                println!("  Skipped {} unreadable regions or chunks", summary.skipped);
            }
        }
        Commands::Block {
            resource_pack,
            block,
            property,
            output,
            biome,
        } => {
            render_single_block(&resource_pack, &block, property, &output, &biome)?;
        }
        Commands::Order { world, view } => {
            for (coord, path) in scheduled_regions(&world, view)? {
                println!("{}\t{}", coord, path.display());
            }
        }
        Commands::Dump {
            region,
            chunk_x,
            chunk_z,
            output,
            packing,
            nbt,
        } => {
            if nbt {
                let Some((coord, root)) = read_single_chunk_nbt(&region, chunk_x, chunk_z)? else {
                    println!("Chunk ({}, {}) is not present in {:?}", chunk_x, chunk_z, region);
                    return Ok(());
                };
                println!("Wrote {:?}", dump_nbt(coord, &root, &output)?);
                return Ok(());
            }
            let Some(chunk) = read_single_chunk(&region, chunk_x, chunk_z)? else {
                println!("Chunk ({}, {}) is not present in {:?}", chunk_x, chunk_z, region);
                return Ok(());
            };
            let written = dump_chunk(&chunk, packing, &output)?;
            println!("Wrote {} section dumps for chunk {} to {:?}", written.len(), chunk.coord, output);
        }
        Commands::Extract { jar, output, filter } => {
            let summary = extract_assets(&jar, &output, &filter)?;
            println!(
                "Extracted {} files to {:?} ({} entries skipped)",
                summary.extracted, output, summary.skipped
            );
        }
        Commands::Info { resource_pack } => {
            let pack = load_resource_pack(&resource_pack)?;
            println!("Resource Pack Info:");
            println!("  Blockstates: {}", pack.blockstate_count());
            println!("  Models: {}", pack.model_count());
            println!("  Textures: {}", pack.texture_count());
            println!("  Namespaces: {}", pack.namespaces().join(", "));
        }
    }

    Ok(())
}

fn render_single_block(
    resource_pack: &PathBuf,
    block_name: &str,
    properties: Vec<(String, String)>,
    output: &PathBuf,
    biome: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let pack = load_resource_pack(resource_pack)?;
    log::info!("loaded {} blockstates from {:?}", pack.blockstate_count(), resource_pack);

    let mut block = BlockType::new(block_name);
    for (key, value) in properties {
        block.properties.insert(key, value);
    }

    let mut renderer = SpriteRenderer::new(&pack, biome);
    let rendered = renderer.render(&block);
    if rendered.is_blank() {
        log::warn!("{} rendered as a blank tile", rendered.identifier);
    }

    for path in write_block(output, &rendered)? {
        println!("Wrote {:?}", path);
    }
    Ok(())
}
