//! Command-line argument parsing for the watercrawl binary.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Scrape one page and print it
    Scrape { url: String },
    /// Crawl a site, printing events as they arrive
    Crawl {
        url: String,
        depth: Option<u32>,
        limit: Option<u32>,
    },
    /// Run a search and print the hits
    Search { query: String, limit: Option<u32> },
    /// Generate a sitemap, printing events as they arrive
    Sitemap { url: String },
    /// Unusable arguments, with the reason
    Invalid(String),
}

/// Command plus global flags.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub command: CliCommand,
    /// `-v` / `--verbose`: debug logging
    pub verbose: bool,
}

/// Parse command-line arguments.
///
/// # Examples
///
/// ```
/// use watercrawl::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["watercrawl".to_string(), "scrape".to_string(), "https://watercrawl.dev".to_string()];
/// assert_eq!(
///     parse_args(args.into_iter()).command,
///     CliCommand::Scrape { url: "https://watercrawl.dev".to_string() }
/// );
/// ```
pub fn parse_args<I>(args: I) -> CliArgs
where
    I: Iterator<Item = String>,
{
    let mut verbose = false;
    let mut positional = Vec::new();
    let mut flags: Vec<(String, Option<String>)> = Vec::new();

    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => {
                return CliArgs {
                    command: CliCommand::Version,
                    verbose,
                }
            }
            "--help" | "-h" => {
                return CliArgs {
                    command: CliCommand::Help,
                    verbose,
                }
            }
            "-v" | "--verbose" => verbose = true,
            "--depth" | "--limit" => flags.push((arg.clone(), args.next())),
            _ => positional.push(arg),
        }
    }

    CliArgs {
        command: build_command(positional, flags),
        verbose,
    }
}

fn build_command(positional: Vec<String>, flags: Vec<(String, Option<String>)>) -> CliCommand {
    let mut depth = None;
    let mut limit = None;
    for (flag, value) in flags {
        let parsed = match value.as_deref().map(str::parse::<u32>) {
            Some(Ok(n)) => n,
            _ => return CliCommand::Invalid(format!("{} expects a number", flag)),
        };
        if flag == "--depth" {
            depth = Some(parsed);
        } else {
            limit = Some(parsed);
        }
    }

    let mut words = positional.into_iter();
    let Some(name) = words.next() else {
        return CliCommand::Help;
    };
    let rest: Vec<String> = words.collect();

    let single = |what: &str| -> Result<String, CliCommand> {
        match rest.as_slice() {
            [one] => Ok(one.clone()),
            [] => Err(CliCommand::Invalid(format!("{} requires a {}", name, what))),
            _ => Err(CliCommand::Invalid(format!("{} takes a single {}", name, what))),
        }
    };

    match name.as_str() {
        "scrape" => match single("URL") {
            Ok(url) => CliCommand::Scrape { url },
            Err(invalid) => invalid,
        },
        "crawl" => match single("URL") {
            Ok(url) => CliCommand::Crawl { url, depth, limit },
            Err(invalid) => invalid,
        },
        "sitemap" => match single("URL") {
            Ok(url) => CliCommand::Sitemap { url },
            Err(invalid) => invalid,
        },
        "search" if rest.is_empty() => CliCommand::Invalid("search requires a query".to_string()),
        "search" => CliCommand::Search {
            query: rest.join(" "),
            limit,
        },
        other => CliCommand::Invalid(format!("unknown command '{}'", other)),
    }
}
