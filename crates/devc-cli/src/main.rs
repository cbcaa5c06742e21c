mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use devc_core::{DEFAULT_ENGINE, FoldOptions};

#[derive(Parser)]
#[command(
    name = "devc_to_docker",
    about = "Capture a running dev container, including its bind-mounted workspace, into a reusable image"
)]
#[command(version)]
struct Cli {
    /// ID or name of the running container
    container_id: String,

    /// Target image tag for the final snapshot (default: devc_to_docker/<container>:<timestamp>)
    #[arg(short = 'o', long)]
    output_image: Option<String>,

    /// Tag for the intermediate commit (default: <output>-stage)
    #[arg(long)]
    intermediate_image: Option<String>,

    /// Directory under which the temporary snapshot is created (default: system temp dir)
    #[arg(long)]
    temp_root: Option<PathBuf>,

    /// Retain the temporary snapshot directory for inspection
    #[arg(long)]
    keep_temp: bool,

    /// Keep the intermediate image instead of deleting it
    #[arg(long)]
    keep_intermediate: bool,

    /// Docker-compatible engine CLI to drive
    #[arg(long, env = "DEVC_TO_DOCKER_ENGINE", default_value = DEFAULT_ENGINE)]
    engine: String,
}

impl Cli {
    fn into_parts(self) -> (String, FoldOptions) {
        let options = FoldOptions {
            output_image: self.output_image,
            intermediate_image: self.intermediate_image,
            temp_root: self.temp_root,
            keep_temp: self.keep_temp,
            keep_intermediate: self.keep_intermediate,
            engine: self.engine,
        };
        (self.container_id, options)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let (container_id, options) = Cli::parse().into_parts();

    match commands::fold(&container_id, &options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
