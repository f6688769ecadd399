//! Meshport CLI
//!
//! Command-line interface for exporting rigid model manifests to OBJ/MTL
//! with derived texture maps.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use meshport_assets::{manifest, FileTextureDecoder, Model};
use meshport_export::{ExportOptions, ModelExporter};

/// Meshport - rigid model to OBJ/MTL export tool
#[derive(Parser)]
#[command(name = "meshport")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format for structured data
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a model manifest to OBJ/MTL with derived textures
    Export(ExportArgs),

    /// Show information about a model manifest
    Info(InfoArgs),
}

#[derive(Args)]
struct ExportArgs {
    /// Path to the model manifest
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,

    /// Base name for the output files (defaults to the model name)
    #[arg(long)]
    name: Option<String>,

    /// Directory texture references resolve against (defaults to the
    /// manifest's directory)
    #[arg(long)]
    textures_root: Option<PathBuf>,

    /// Weight of the normal map luminance in the derived height
    #[arg(long, default_value_t = 0.5)]
    height_strength: f32,

    /// Contrast reshaping applied to derived heights
    #[arg(long, default_value_t = 0.0)]
    height_contrast: f32,

    /// Box blur radius for the displacement map
    #[arg(long, default_value_t = 0)]
    blur_radius: u32,
}

#[derive(Args)]
struct InfoArgs {
    /// Path to the model manifest
    #[arg(short, long)]
    input: PathBuf,

    /// Show per-submesh texture references
    #[arg(short, long)]
    detailed: bool,
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_thread_ids(verbosity >= 3)
        .with_file(verbosity >= 3)
        .with_line_number(verbosity >= 3)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Export(args) => cmd_export(args, cli.format),
        Commands::Info(args) => cmd_info(args, cli.format),
    }
}

fn cmd_export(args: ExportArgs, format: OutputFormat) -> Result<()> {
    info!("Loading model manifest: {:?}", args.input);

    let model = manifest::load_model(&args.input)
        .with_context(|| format!("Failed to load model manifest {:?}", args.input))?;

    let textures_root = args
        .textures_root
        .or_else(|| args.input.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));
    let base_name = args.name.unwrap_or_else(|| model.name.clone());

    let options = ExportOptions {
        height_strength: args.height_strength,
        height_contrast: args.height_contrast,
        blur_radius: args.blur_radius,
    };

    let exporter = ModelExporter::with_options(FileTextureDecoder::new(textures_root), options);
    let summary = exporter
        .export(&model, &args.output, &base_name)
        .with_context(|| format!("Failed to export model '{}'", model.name))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => {
            println!("Export complete: {0}.obj + {0}.mtl", base_name);
            println!("  Submeshes:  {}", summary.submeshes);
            println!("  Vertices:   {}", summary.vertices);
            println!("  Triangles:  {}", summary.triangles);
            println!("  Materials:  {}", summary.materials);
            println!("  Textures:   {}", summary.textures_written);

            if !summary.texture_failures.is_empty() {
                println!("\nSkipped textures:");
                for failure in &summary.texture_failures {
                    println!(
                        "  {} {}: {}",
                        failure.material,
                        failure.role.name(),
                        failure.message
                    );
                }
            }
        }
    }

    Ok(())
}

fn cmd_info(args: InfoArgs, format: OutputFormat) -> Result<()> {
    if !args.input.exists() {
        bail!("File not found: {:?}", args.input);
    }

    let model = manifest::load_model(&args.input)
        .with_context(|| format!("Failed to load model manifest {:?}", args.input))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&info_json(&model))?);
        }
        OutputFormat::Text => {
            println!("Model: {}", model.name);
            println!("  LODs:       {}", model.lods.len());
            println!("  Vertices:   {}", model.vertex_count());
            println!("  Triangles:  {}", model.triangle_count());

            for (i, lod) in model.lods.iter().enumerate() {
                println!("\nLOD {} ({} submeshes):", i, lod.submeshes.len());
                for submesh in &lod.submeshes {
                    println!(
                        "  {} ({} triangles, material {})",
                        submesh.name,
                        submesh.triangle_count(),
                        submesh.material.name
                    );

                    if args.detailed {
                        let mut textures: Vec<_> = submesh.material.textures.iter().collect();
                        textures.sort_by_key(|(role, _)| **role);
                        for (role, reference) in textures {
                            println!("      {}: {}", role.name(), reference.as_str());
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

/// The `info` report as a JSON value
///
/// Carries the full per-submesh breakdown with material names and texture
/// roles regardless of `--detailed`; the flag only gates the text rendering.
fn info_json(model: &Model) -> serde_json::Value {
    let lods: Vec<_> = model
        .lods
        .iter()
        .map(|lod| {
            let submeshes: Vec<_> = lod
                .submeshes
                .iter()
                .map(|submesh| {
                    serde_json::json!({
                        "name": submesh.name,
                        "triangles": submesh.triangle_count(),
                        "material": submesh.material.name,
                        "textures": submesh.material.textures,
                    })
                })
                .collect();
            serde_json::json!({ "submeshes": submeshes })
        })
        .collect();

    serde_json::json!({
        "name": model.name,
        "lod_count": model.lods.len(),
        "vertices": model.vertex_count(),
        "triangles": model.triangle_count(),
        "lods": lods,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use meshport_assets::{Lod, MaterialRef, Submesh, TextureRef, TextureRole, Vertex};

    fn make_submesh(name: &str, material: MaterialRef) -> Submesh {
        let mut submesh = Submesh::new(name, material);
        submesh.vertices = vec![
            Vertex::new([0.0, 0.0, 0.0]),
            Vertex::new([1.0, 0.0, 0.0]),
            Vertex::new([0.0, 1.0, 0.0]),
        ];
        submesh.indices = vec![0, 1, 2];
        submesh
    }

    #[test]
    fn test_info_json_carries_submesh_breakdown() {
        let hull = MaterialRef::new("hull")
            .with_texture(TextureRole::Diffuse, TextureRef::new("hull_d.png"))
            .with_texture(TextureRole::Normal, TextureRef::new("hull_n.png"));
        let mut model = Model::new("wreck");
        model.lods.push(Lod {
            submeshes: vec![
                make_submesh("hull_0", hull),
                make_submesh("glass_0", MaterialRef::new("glass")),
            ],
        });

        let json = info_json(&model);

        assert_eq!(json["name"], "wreck");
        assert_eq!(json["lod_count"], 1);
        assert_eq!(json["vertices"], 6);
        assert_eq!(json["triangles"], 2);

        let submeshes = json["lods"][0]["submeshes"].as_array().unwrap();
        assert_eq!(submeshes.len(), 2);
        assert_eq!(submeshes[0]["name"], "hull_0");
        assert_eq!(submeshes[0]["triangles"], 1);
        assert_eq!(submeshes[0]["material"], "hull");
        assert_eq!(submeshes[0]["textures"]["diffuse"], "hull_d.png");
        assert_eq!(submeshes[0]["textures"]["normal"], "hull_n.png");

        assert_eq!(submeshes[1]["material"], "glass");
        assert!(submeshes[1]["textures"].as_object().unwrap().is_empty());
    }
}
