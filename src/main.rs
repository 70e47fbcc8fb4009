use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use watercrawl::cli::{parse_args, run_cli_command, CliCommand, USAGE, VERSION};
use watercrawl::WatercrawlClient;

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("watercrawl=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("watercrawl=info,warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args(std::env::args());

    match &args.command {
        CliCommand::Version => {
            println!("watercrawl {}", VERSION);
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliCommand::Invalid(reason) => return Err(eyre!("{}\n\n{}", reason, USAGE)),
        _ => {}
    }

    color_eyre::install()?;
    setup_logging(args.verbose);

    let client = WatercrawlClient::from_env()?;
    run_cli_command(&client, args.command).await
}
