use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::time::Instant;
use tsunagi::prelude::*;

/// Compile an integration-flow blueprint into a deployable package
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the blueprint JSON file
    blueprint_path: PathBuf,

    /// Directory the package archive is written to
    #[arg(short, long, default_value = "out")]
    output_dir: PathBuf,

    /// Archive name (without extension); defaults to the blueprint id
    #[arg(short, long)]
    artifact_name: Option<String>,

    /// Accept nodes without full incoming/outgoing wiring
    #[arg(long)]
    allow_disconnected: bool,

    /// Print the assembled XML instead of writing a package
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let total_start = Instant::now();

    let raw = std::fs::read_to_string(&cli.blueprint_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read blueprint file '{}': {}",
            cli.blueprint_path.display(),
            e
        ))
    });

    let blueprint = parse_blueprint(&raw)
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid blueprint: {}", e)));

    let artifact_name = cli
        .artifact_name
        .clone()
        .unwrap_or_else(|| blueprint.id.clone());
    let meta = PackageMeta::from(&blueprint);

    println!(
        "Compiling blueprint '{}' ({} endpoint(s))...",
        blueprint.name,
        blueprint.endpoints.len()
    );
    let artifact = Compiler::builder(blueprint)
        .allow_disconnected(cli.allow_disconnected)
        .build()
        .compile()
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));

    if cli.dry_run {
        println!("{}", artifact.xml);
        return;
    }

    let package_path = tsunagi::package::build(&artifact, &meta, &cli.output_dir, &artifact_name)
        .unwrap_or_else(|e| exit_with_error(&format!("Packaging failed: {}", e)));

    println!(
        "Package written to {} in {:.2?}",
        package_path.display(),
        total_start.elapsed()
    );
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}
