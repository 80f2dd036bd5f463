// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: Convert a room-polygon floor plan (JSON) into a 3D structure (OBJ output)
//!
//! Usage:
//!   plan-to-obj <plan.json> [options]
//!   plan-to-obj --sample [options]

use plan_lite_structure::{
    build_structure, sample_plan, write_structure_obj, BuilderConfig, Plan, StructureError,
};
use std::env;
use std::fs;
use std::io::BufWriter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let mut plan_path: Option<String> = None;
    let mut config_path: Option<String> = None;
    let mut output_path = String::from("structure.obj");
    let mut use_sample = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                config_path = args.get(i).cloned();
            }
            "--output" | "-o" => {
                i += 1;
                match args.get(i) {
                    Some(path) => output_path = path.clone(),
                    None => fail("--output needs a path"),
                }
            }
            "--sample" => use_sample = true,
            other if other.starts_with('-') => fail(&format!("Unknown option: {}", other)),
            other => plan_path = Some(other.to_string()),
        }
        i += 1;
    }

    if let Err(e) = run(plan_path.as_deref(), config_path.as_deref(), &output_path, use_sample) {
        fail(&e.to_string());
    }
}

fn run(
    plan_path: Option<&str>,
    config_path: Option<&str>,
    output_path: &str,
    use_sample: bool,
) -> Result<(), StructureError> {
    println!("[1/3] Loading plan");
    let plan = match (plan_path, use_sample) {
        (_, true) => sample_plan(),
        (Some(path), false) => Plan::from_json(&fs::read_to_string(path)?)?,
        (None, false) => {
            return Err(StructureError::InvalidPlan(
                "no plan file given (use --sample for the built-in plan)".into(),
            ))
        }
    };

    let config = match config_path {
        Some(path) => BuilderConfig::from_json(&fs::read_to_string(path)?)?,
        None => BuilderConfig::default(),
    };

    println!("[2/3] Building structure ({} rooms)", plan.rooms.len());
    let structure = build_structure(&plan, &config)?;

    println!("[3/3] Writing OBJ file: {}", output_path);
    let file = fs::File::create(output_path)?;
    write_structure_obj(BufWriter::new(file), &structure)?;

    println!();
    println!("=== Structure Summary ===");
    println!("  Footprint: {:.1}m x {:.1}m", structure.extent.0, structure.extent.1);
    println!("  Ceiling: {:.1}m", structure.ceiling_height);
    println!("  Floors: {}", structure.floors.len());
    println!("  Wall segments: {}", structure.segments.len());
    println!("  Openings: {}", structure.opening_count());
    println!("  Collision bounds: {}", structure.collision_bounds.len());
    println!();
    println!("Done! Open {} in a 3D viewer.", output_path);
    Ok(())
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn print_usage() {
    println!(
        r#"Floor Plan to 3D Structure Generator
====================================

Builds floors, walls and door/window openings from a room-polygon plan.

USAGE:
  plan-to-obj <plan.json> [OPTIONS]
  plan-to-obj --sample [OPTIONS]

OPTIONS:
  --config <path>       Builder config JSON (missing keys keep defaults)
  --output, -o <path>   Output OBJ file path (default: structure.obj)
  --sample              Use the built-in two-room sample plan
  -h, --help            Show this help message

ENVIRONMENT:
  RUST_LOG              Log filter (default: info)
"#
    );
}
