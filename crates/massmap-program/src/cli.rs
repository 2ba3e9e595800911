//! Command-line interface

use crate::config::RunConfig;
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

/// Build the command definition
pub fn command() -> Command {
    Command::new("massmap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convergence-patch map-making front end")
        .arg(
            Arg::new("workdir")
                .long("workdir")
                .default_value(".")
                .value_parser(clap::value_parser!(PathBuf))
                .help("The root working directory where the data is located"),
        )
        .arg(
            Arg::new("input_xml_file")
                .long("input_xml_file")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("The input product, relative to the working directory"),
        )
        .arg(
            Arg::new("parameter_file")
                .long("parameter_file")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("The input parameter file, relative to the working directory"),
        )
        .arg(
            Arg::new("output_xml_file")
                .long("output_xml_file")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("The output product, relative to the working directory"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Log filter directive, overrides RUST_LOG"),
        )
}

/// Run configuration from parsed arguments
pub fn run_config(matches: &ArgMatches) -> RunConfig {
    let path = |id: &str| matches.get_one::<PathBuf>(id).cloned().unwrap_or_default();

    RunConfig::new(path("workdir"))
        .with_input_product(path("input_xml_file"))
        .with_parameter_file(path("parameter_file"))
        .with_output_descriptor(path("output_xml_file"))
}

/// Log level given on the command line, if any
pub fn log_level(matches: &ArgMatches) -> Option<&str> {
    matches.get_one::<String>("log-level").map(String::as_str)
}
