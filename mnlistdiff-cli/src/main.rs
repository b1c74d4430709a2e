//! Command-line interface computing simplified masternode list diffs.

use anyhow::Context;
use clap::{Arg, ArgAction, Command};

use dash_mnlistdiff::{BlockHash, Network};
use mnlistdiff_cli::{Config, OutputFormat, logging};

fn main() -> anyhow::Result<()> {
    let matches = Command::new("mnlistdiff")
        .version(mnlistdiff_cli::VERSION)
        .about("Computes the mnlistdiff reply between two blocks of a chain fixture")
        .arg(
            Arg::new("fixture")
                .short('f')
                .long("fixture")
                .value_name("FILE")
                .help("JSON file describing the chain")
                .required(true),
        )
        .arg(
            Arg::new("base")
                .short('b')
                .long("base")
                .value_name("HASH")
                .help("Base block hash (omit for the full list)"),
        )
        .arg(
            Arg::new("block")
                .long("block")
                .value_name("HASH")
                .help("Target block hash (defaults to the chain tip)"),
        )
        .arg(
            Arg::new("extended")
                .short('e')
                .long("extended")
                .help("Include payout changes and payout addresses")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("network")
                .short('n')
                .long("network")
                .value_name("NETWORK")
                .help("Network to render addresses for (defaults to the fixture's)")
                .value_parser(["mainnet", "testnet", "devnet", "regtest"]),
        )
        .arg(
            Arg::new("v20-height")
                .long("v20-height")
                .value_name("HEIGHT")
                .help("Override the core v20 activation height")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FORMAT")
                .help("Output format")
                .value_parser(["json", "hex"])
                .default_value("json"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (defaults to RUST_LOG, then warn)")
                .value_parser(["error", "warn", "info", "debug", "trace"]),
        )
        .get_matches();

    let config = build_config(&matches).context("invalid arguments")?;
    config.validate().context("invalid configuration")?;
    logging::init_console_logging(config.log_level)?;

    let output = mnlistdiff_cli::run(&config)?;
    println!("{}", output);
    Ok(())
}

fn build_config(matches: &clap::ArgMatches) -> mnlistdiff_cli::CliResult<Config> {
    let fixture = matches.get_one::<String>("fixture").cloned().unwrap_or_default();
    let mut config = Config::new(fixture).with_extended(matches.get_flag("extended"));

    if let Some(network) = matches.get_one::<String>("network") {
        let network = network.parse::<Network>().map_err(mnlistdiff_cli::CliError::Config)?;
        config = config.with_network(network);
    }
    if let Some(base) = matches.get_one::<String>("base") {
        config = config.with_base_block_hash(parse_hash("base", base)?);
    }
    if let Some(block) = matches.get_one::<String>("block") {
        config = config.with_block_hash(parse_hash("block", block)?);
    }
    if let Some(height) = matches.get_one::<u32>("v20-height") {
        config = config.with_v20_activation_height(*height);
    }
    if let Some(output) = matches.get_one::<String>("output") {
        let output = output.parse::<OutputFormat>().map_err(mnlistdiff_cli::CliError::Config)?;
        config = config.with_output(output);
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        config = config.with_log_level(level)?;
    }
    Ok(config)
}

fn parse_hash(name: &str, value: &str) -> mnlistdiff_cli::CliResult<BlockHash> {
    value.parse().map_err(|e| {
        mnlistdiff_cli::CliError::Config(format!("invalid {} block hash '{}': {}", name, value, e))
    })
}
