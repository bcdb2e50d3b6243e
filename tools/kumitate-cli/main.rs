use clap::Parser;
use kumitate::prelude::*;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Compiles an app description into a platform manifest
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the app description JSON file
    app_path: String,

    /// Write the manifest to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Pretty-print the manifest JSON
    #[arg(short, long)]
    pretty: bool,

    /// List the template paths exposed by each workflow's inputs and steps
    #[arg(long)]
    paths: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let start = Instant::now();

    // --- 1. Loading and Conversion ---
    let app_json = fs::read_to_string(&cli.app_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read app file '{}': {}", cli.app_path, e))
    });
    let manifest = RawApp::from_json(&app_json)
        .and_then(|raw| raw.into_manifest())
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load app description: {}", e)));

    if cli.paths {
        print_template_paths(&manifest);
    }

    // --- 2. Export ---
    let document = manifest
        .export()
        .unwrap_or_else(|e| exit_with_error(&format!("Manifest export failed: {}", e)));
    let rendered = document
        .to_json(cli.pretty)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    match &cli.output {
        Some(path) => {
            fs::write(path, &rendered).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write manifest to '{}': {}", path, e))
            });
            eprintln!(
                "Wrote manifest for '{}' to '{}' ({} functions, {} types, {} workflows) in {:?}",
                manifest.name(),
                path,
                document.sections.functions.len(),
                document.sections.types.len(),
                document.sections.workflows.len(),
                start.elapsed()
            );
        }
        None => println!("{}", rendered),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints each workflow's input placeholders and each step's output root.
fn print_template_paths(manifest: &Manifest) {
    for workflow in manifest.workflows() {
        eprintln!("Workflow '{}':", workflow.id());
        for name in workflow.inputs().declared_names() {
            eprintln!("  input  {:<20} {}", name, workflow.inputs().get(name));
        }
        for step in workflow.steps() {
            eprintln!(
                "  step {} -> {} outputs {}",
                step.step_id(),
                step.function_reference(),
                step.outputs()
            );
            for name in step.outputs().declared_names() {
                eprintln!("    output {:<18} {}", name, step.outputs().get(name));
            }
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
