use massmap_program::{cli, init_tracing, Pipeline};
use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = cli::command().get_matches();
    if let Err(e) = init_tracing(cli::log_level(&matches)) {
        eprintln!("Error: failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &clap::ArgMatches) -> anyhow::Result<()> {
    tracing::info!("Entering massmap {}", env!("CARGO_PKG_VERSION"));

    let config = cli::run_config(matches);
    let summary = Pipeline::new(config).run()?;

    tracing::info!(
        "Done: {} -> {}",
        summary.artifact.display(),
        summary.descriptor_path.display()
    );
    Ok(())
}
