//! # Fabrica CLI
//!
//! Runs fabrication calculations from JSON requests and prints the metrics
//! and shop steps, or the full result as JSON for other tools.
//!
//! ```text
//! fab_cli calc request.json
//! echo '{"shape":"cylinder","diameter_mm":1000,"height_mm":2000,"thickness_mm":5}' | fab_cli calc --json
//! fab_cli materials
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `warn`).

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fab_core::calculations::{CalculatedValue, CalculationRequest, CalculationResult, ShapeKind};
use fab_core::materials::{bolt_class, fastener_size, BOLT_CLASS_DESIGNATIONS, FASTENER_SIZE_DESIGNATIONS};
use fab_core::Material;
use tracing_subscriber::EnvFilter;

mod config;

#[derive(Parser)]
#[command(name = "fab_cli")]
#[command(about = "Flat-pattern and fabrication calculators", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one calculation request
    Calc {
        /// JSON request file (reads stdin when omitted)
        file: Option<PathBuf>,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
        /// TOML settings file
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },
    /// List materials and densities
    Materials,
    /// List fastener sizes and property classes
    Fasteners,
    /// List shape families and what they are for
    Shapes,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Calc { file, json, settings } => run_calc(file, json, settings)?,
        Commands::Materials => list_materials(),
        Commands::Fasteners => list_fasteners()?,
        Commands::Shapes => list_shapes(),
    }

    Ok(())
}

fn read_request(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("cannot read request {}", path.display()))
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("cannot read request from stdin")?;
            Ok(text)
        }
    }
}

fn run_calc(file: Option<PathBuf>, json: bool, settings: Option<PathBuf>) -> Result<()> {
    let settings = config::load_settings(settings.as_deref())?;
    let text = read_request(file.as_ref())?;
    let request = CalculationRequest::from_json(&text).context("invalid calculation request")?;

    let outcome = request.calculate(&settings);
    let result = match &outcome {
        Ok(result) => result.clone(),
        Err(err) => CalculationResult::failure(err),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let material = request.material_or_default(&settings);
        print_result(request.shape.kind(), material, &result);
    }

    outcome
        .map(|_| ())
        .with_context(|| format!("{} calculation failed", request.shape.kind()))
}

fn print_result(kind: ShapeKind, material: Material, result: &CalculationResult) {
    let info = kind.info();
    println!("═══════════════════════════════════════");
    if kind.uses_material() {
        println!("  {} ({})", info.title.to_uppercase(), material.display_name());
    } else {
        println!("  {}", info.title.to_uppercase());
    }
    println!("═══════════════════════════════════════");

    if result.is_empty() {
        println!();
        println!("Not enough dimensions to calculate. Key parameters: {}.", info.key_params.join(", "));
        return;
    }

    println!();
    let width = result.metrics.iter().map(|m| m.label.chars().count()).max().unwrap_or(0);
    for metric in &result.metrics {
        println!("  {:<width$}  {}", metric.label, metric.value, width = width);
    }

    for (key, value) in &result.calculated {
        if let CalculatedValue::Curve(points) = value {
            println!();
            println!("Ordinates ({}):", key);
            for p in points {
                println!("  {:>6.1}°  {:>8.1} mm", p.angle_deg, p.height_mm);
            }
        }
    }

    if !result.steps.is_empty() {
        println!();
        println!("Steps:");
        for step in &result.steps {
            println!("{}", step);
        }
    }

    if let Some(theory) = &result.theory {
        println!();
        for note in theory {
            println!("{}: {}", note.title, note.content);
        }
    }
}

fn list_materials() {
    for material in Material::ALL {
        println!(
            "{:<12} {:<18} {:>5.2} kg/dm³",
            material.id(),
            material.display_name(),
            material.density_kg_dm3()
        );
    }
}

fn list_fasteners() -> Result<()> {
    println!("Size  Pitch   Stress area");
    for size in FASTENER_SIZE_DESIGNATIONS {
        let data = fastener_size(size)?;
        println!("{:<5} {:>4} mm  {:>6} mm²", size, data.pitch_mm, data.stress_area_mm2);
    }
    println!();
    println!("Class  Yield     Tensile");
    for class in BOLT_CLASS_DESIGNATIONS {
        let data = bolt_class(class)?;
        println!("{:<6} {:>4} MPa  {:>4} MPa", class, data.yield_mpa, data.tensile_mpa);
    }
    Ok(())
}

fn list_shapes() {
    for kind in ShapeKind::ALL {
        let info = kind.info();
        println!("{:<16} {}", kind.id(), info.title);
        println!("{:<16} {}", "", info.description);
        println!("{:<16} Use: {}", "", info.application);
        println!("{:<16} Needs: {}", "", info.key_params.join(", "));
        println!();
    }
}
