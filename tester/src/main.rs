use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use gait::{
    FilePart, PageController, Phase, Slot, UploadBundle, controller::DEFAULT_ENDPOINT,
    render::Table,
};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    pre_report: PathBuf,

    post_report: PathBuf,

    pre_csv: PathBuf,

    post_csv: PathBuf,

    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    url: String,

    #[arg(long, default_value_t = Phase::Pre)]
    phase: Phase,

    #[arg(long)]
    html: bool,
}

fn read_part(path: &Path) -> Result<FilePart> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(FilePart::guess(file_name, bytes))
}

fn print_table(title: &str, table: &Table, html: bool) {
    println!("\n{title}");

    if html {
        println!("{}", table.to_html());
    } else {
        println!("{}", table.to_text());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();

    let mut bundle = UploadBundle::new();
    for (slot, path) in Slot::ALL.into_iter().zip([
        &args.pre_report,
        &args.post_report,
        &args.pre_csv,
        &args.post_csv,
    ]) {
        bundle.set(slot, read_part(path)?);
    }

    let mut controller = PageController::new(args.url);
    println!("Uploading to {}", controller.endpoint());

    let view = controller.upload(&bundle).await?;

    let patient = match args.phase {
        Phase::Pre => view.patient,
        phase => controller
            .show_patient(phase)
            .context("No analysis kept after upload")?,
    };

    println!("\nPatient Details ({})", args.phase);
    if args.html {
        println!("{}", patient.to_html());
    } else {
        for line in patient.lines() {
            println!("{line}");
        }
    }

    print_table("Temporal & Spatial", &view.temporal, args.html);
    print_table("Kinematic", &view.kinematic, args.html);

    Ok(())
}
