use clap::{Parser, Subcommand};
use deckpress::{PipelineBuilder, PipelineError, RunTarget};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "Compile card images into texture atlases and double-sided print sheets")]
struct Cli {
    /// JSON run configuration
    config: PathBuf,

    /// Directory the image paths in the configuration are relative to
    #[arg(short, long, default_value = ".")]
    assets: PathBuf,

    /// Directory that receives `atlases/` and `print/`
    #[arg(short, long, default_value = "outputs")]
    output: PathBuf,

    /// Pages composited at the same time (defaults to the number of CPUs)
    #[arg(long)]
    jobs: Option<usize>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Pack atlas pages only
    Atlases,
    /// Lay out print sheets and the PDF only
    Sheets,
    /// Atlases, then print sheets
    All,
}

impl From<Command> for RunTarget {
    fn from(command: Command) -> Self {
        match command {
            Command::Atlases => RunTarget::Atlases,
            Command::Sheets => RunTarget::Sheets,
            Command::All => RunTarget::All,
        }
    }
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    let mut builder = PipelineBuilder::new()
        .with_config_file(&cli.config)?
        .with_asset_root(&cli.assets)
        .with_output_dir(&cli.output);
    if let Some(jobs) = cli.jobs {
        builder = builder.with_max_in_flight(jobs);
    }
    let pipeline = builder.build()?;

    let target = cli.command.map(RunTarget::from).unwrap_or_default();
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    let summary = runtime.block_on(pipeline.run(target))?;

    if let Some(atlases) = &summary.atlases {
        log::info!("Wrote {} atlas page(s).", atlases.page_count());
    }
    Ok(())
}

fn failure_message(error: &PipelineError) -> String {
    format!("Error: {}", error)
}

fn main() -> ExitCode {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "deckpress=info");
        }
    }
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", failure_message(&e));
            ExitCode::FAILURE
        }
    }
}
