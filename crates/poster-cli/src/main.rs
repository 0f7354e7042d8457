mod batch;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use poster_core::{EngineConfig, LayoutPlan, PosterService, SolverMode, StyleKind};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "posterize", about = "Compose photo posters", version)]
struct Cli {
    /// Log layout decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Shrink tiles until the estimated stack fits the canvas height
    #[arg(long, global = true)]
    strict_fit: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose one poster from 5 or more images
    Generate {
        /// Input images, in poster order
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Compose several posters from the images in a folder
    Batch {
        /// Folder containing the images
        #[arg(short, long)]
        dir: PathBuf,

        /// Number of images per poster, e.g. `--counts 5 5 6`
        #[arg(short, long, required = true, num_args = 1..)]
        counts: Vec<usize>,

        /// Where to write posters (default: <dir>/output)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Show the layout for a set of images without drawing it
    Plan {
        /// Input images, in poster order
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn print_plan(kind: StyleKind, plan: &LayoutPlan) {
    println!("Layout Plan:");
    println!("  Images: {}", plan.placements.len());
    println!(
        "  Style: {} (margin {}px, ratio {})",
        kind.name(),
        plan.style.margin,
        plan.style.vertical_ratio
    );
    println!("  Archetype: {}", plan.archetype.name());
    println!("  Tile width: {}px", plan.tile_width);
    if let Some(hero_width) = plan.hero_width {
        println!("  Hero width: {}px", hero_width);
    }
    println!("  Rows: {}", plan.row_count());
    println!("  Stack: {}px from y={}", plan.stack_height, plan.start_y);
    for placement in &plan.placements {
        println!(
            "    #{:<3} {:<5} x={:<5} y={:<5} {}x{}",
            placement.source_index,
            format!("{:?}", placement.role).to_lowercase(),
            placement.x,
            placement.y,
            placement.width,
            placement.height
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = EngineConfig {
        solver: if cli.strict_fit {
            SolverMode::Strict
        } else {
            SolverMode::Linear
        },
        ..Default::default()
    };
    let service = PosterService::new(config)?;

    match cli.command {
        Commands::Generate { input, output } => {
            let report = poster_core::generate_async(service, input, output).await?;
            println!(
                "Generated {} poster from {} images → {}",
                report.style.name(),
                report.image_count,
                report.output.display()
            );
        }

        Commands::Batch {
            dir,
            counts,
            output_dir,
        } => {
            let images = batch::collect_images(&dir)?;
            let batches = batch::split_batches(&images, &counts)?;

            let output_dir = output_dir.unwrap_or_else(|| dir.join("output"));
            std::fs::create_dir_all(&output_dir)
                .with_context(|| format!("Failed to create {}", output_dir.display()))?;

            let date = chrono::Local::now().format("%Y%m%d").to_string();
            let total = batches.len();

            for batch in batches {
                let output = output_dir.join(batch.file_name(&date));
                log::info!(
                    "Generating poster {}/{} ({} images)",
                    batch.index,
                    total,
                    batch.count()
                );
                let index = batch.index;
                poster_core::generate_async(service, batch.inputs, output)
                    .await
                    .with_context(|| format!("Failed to generate poster {index}"))?;
            }

            println!("Generated {} posters → {}", total, output_dir.display());
        }

        Commands::Plan { input, json } => {
            let (kind, plan) = service.plan_paths(&input)?;
            if json {
                let document = serde_json::json!({ "style": kind, "plan": plan });
                println!("{}", serde_json::to_string_pretty(&document)?);
            } else {
                print_plan(kind, &plan);
            }
        }
    }

    Ok(())
}
