use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use lyraview_core::{
    HistoryAssembler, TranscriptBuffer, render_transcript_markdown, transcript_to_raw_json,
};
use tracing_subscriber::EnvFilter;

mod fs_source;

use fs_source::{FileHistorySource, FsAssetSource};

#[derive(Debug, Parser)]
#[command(
    name = "lyraview",
    version,
    about = "Reconstruct a Lyra/Aurora conversation transcript from a raw log"
)]
struct Cli {
    /// Path to the conversation log file, one entry per line
    log_file: PathBuf,

    /// Output raw JSON instead of markdown
    #[arg(long)]
    raw: bool,

    /// Directory that relative image paths are resolved against
    /// (defaults to the log file's directory)
    #[arg(long, value_name = "DIR")]
    assets_root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> lyraview_core::Result<()> {
    let assets_root = cli
        .assets_root
        .clone()
        .or_else(|| cli.log_file.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let history = FileHistorySource::new(cli.log_file);
    let surface = Arc::new(TranscriptBuffer::new());
    let mut assembler = HistoryAssembler::new(
        Arc::new(FsAssetSource::new(assets_root)),
        Arc::clone(&surface) as Arc<dyn lyraview_core::RenderSurface>,
    );

    assembler.reconstruct(&history)?;
    assembler.settle().await;

    let slots = surface.snapshot();
    if cli.raw {
        print!("{}", transcript_to_raw_json(&slots)?);
    } else {
        print!("{}", render_transcript_markdown(&slots));
    }

    Ok(())
}
