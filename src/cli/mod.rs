//! CLI module for the watercrawl binary.
//!
//! - Argument parsing
//! - Command dispatch against a [`WatercrawlClient`]
//!
//! # Usage
//!
//! ```ignore
//! use watercrawl::cli::{parse_args, run_cli_command};
//!
//! let args = parse_args(std::env::args());
//! let client = WatercrawlClient::from_env()?;
//! run_cli_command(&client, args.command).await?;
//! ```

pub mod args;

pub use args::{parse_args, CliArgs, CliCommand};

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::client::{ScrapeOutcome, WatercrawlClient};
use crate::models::{
    JobResource, MonitorEvent, PageOptions, PluginOptions, SearchOptions, SitemapOptions,
    SitemapOutputFormat, SpiderOptions,
};
use crate::monitor::Monitor;
use crate::traits::HttpClient;

/// Current version of the binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const USAGE: &str = "\
Usage: watercrawl [-v] <command>

Commands:
  scrape <url>                          Scrape one page and print it
  crawl <url> [--depth N] [--limit N]   Crawl a site and print its events
  search <query> [--limit N]            Search the web and print the hits
  sitemap <url>                         Generate a sitemap and print it

Options:
  -v, --verbose   Debug logging
  -V, --version   Print version
  -h, --help      Print this help

The API key is read from WATERCRAWL_API_KEY.";

/// Run a parsed command. `Version` and `Help` are handled by the caller.
pub async fn run_cli_command<C: HttpClient>(
    client: &WatercrawlClient<C>,
    command: CliCommand,
) -> Result<()> {
    match command {
        CliCommand::Scrape { url } => scrape(client, &url).await,
        CliCommand::Crawl { url, depth, limit } => crawl(client, &url, depth, limit).await,
        CliCommand::Search { query, limit } => search(client, &query, limit).await,
        CliCommand::Sitemap { url } => sitemap(client, &url).await,
        CliCommand::Version | CliCommand::Help => Ok(()),
        CliCommand::Invalid(reason) => Err(eyre!("{}\n\n{}", reason, USAGE)),
    }
}

async fn scrape<C: HttpClient>(client: &WatercrawlClient<C>, url: &str) -> Result<()> {
    let outcome = client
        .scrape_url(url, PageOptions::default(), PluginOptions::new(), true, true)
        .await?;
    match outcome {
        ScrapeOutcome::Result(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        ScrapeOutcome::Finished(request) => Err(eyre!(
            "Crawl {} ended as {} without a page",
            request.uuid,
            request.status
        )),
        ScrapeOutcome::Pending(request) => {
            println!("Created crawl {}", request.uuid);
            Ok(())
        }
    }
}

async fn crawl<C: HttpClient>(
    client: &WatercrawlClient<C>,
    url: &str,
    depth: Option<u32>,
    limit: Option<u32>,
) -> Result<()> {
    let spider_options = SpiderOptions {
        max_depth: depth,
        page_limit: limit,
        ..Default::default()
    };
    let request = client
        .create_crawl_request(url, spider_options, PageOptions::default(), PluginOptions::new())
        .await?;
    println!("Created crawl {}", request.uuid);

    let monitor = client.monitor_crawl_request(&request.uuid, false).await?;
    print_events(monitor, |result| result.url.clone()).await
}

async fn search<C: HttpClient>(
    client: &WatercrawlClient<C>,
    query: &str,
    limit: Option<u32>,
) -> Result<()> {
    let request = client
        .search(query, &SearchOptions::default(), limit, true)
        .await?;

    match request.results() {
        Some(results) => {
            for (i, hit) in results.iter().enumerate() {
                println!("{}. {}\n   {}\n   {}", i + 1, hit.title, hit.url, hit.description);
            }
        }
        None => println!("Search {} ended as {}", request.uuid, request.status),
    }
    Ok(())
}

async fn sitemap<C: HttpClient>(client: &WatercrawlClient<C>, url: &str) -> Result<()> {
    let request = client
        .create_sitemap_request(url, &SitemapOptions::default())
        .await?;
    println!("Created sitemap {}", request.uuid);

    let monitor = client.monitor_sitemap_request(&request.uuid, false).await?;
    print_events(monitor, |value| value.to_string()).await?;

    let urls = client
        .get_sitemap_results(&request.uuid, SitemapOutputFormat::Json)
        .await?;
    println!("{}", serde_json::to_string_pretty(&urls)?);
    Ok(())
}

/// Print each event until the job reaches a terminal state or the stream
/// ends.
async fn print_events<S, R>(mut monitor: Monitor<S, R>, describe: impl Fn(&R) -> String) -> Result<()>
where
    S: serde::de::DeserializeOwned + JobResource,
    R: serde::de::DeserializeOwned,
{
    while let Some(event) = monitor.next_event().await {
        match event? {
            MonitorEvent::State(state) => {
                println!("[state] {}", state.status());
                if state.status().is_terminal() {
                    monitor.close();
                    break;
                }
            }
            MonitorEvent::Result(result) => println!("[result] {}", describe(&result)),
            MonitorEvent::Feed(feed) => println!("[feed] {}", feed.message),
            MonitorEvent::Other { kind, .. } => tracing::debug!("Ignoring {} event", kind),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::config::ClientConfig;
    use serde_json::json;

    #[tokio::test]
    async fn test_invalid_command_reports_usage() {
        let client = WatercrawlClient::with_http_client(ClientConfig::new("k"), MockHttpClient::new())
            .unwrap();
        let err = run_cli_command(&client, CliCommand::Invalid("bad".to_string()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Usage: watercrawl"));
    }

    #[tokio::test]
    async fn test_crawl_command_streams_to_end() {
        let mock = MockHttpClient::new();
        let base = "https://app.watercrawl.dev/api/v1/core/crawl-requests/";
        mock.set_response(
            base,
            MockResponse::json(201, &json!({"uuid": "c1", "url": "https://a", "status": "new"})),
        );
        mock.set_response(
            &format!("{}c1/status/", base),
            MockResponse::event_stream(&format!(
                "data: {}\n",
                json!({"type": "state", "data": {"uuid": "c1", "url": "https://a", "status": "finished"}})
            )),
        );
        let client = WatercrawlClient::with_http_client(ClientConfig::new("k"), mock.clone()).unwrap();

        run_cli_command(
            &client,
            CliCommand::Crawl {
                url: "https://a".to_string(),
                depth: Some(1),
                limit: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(
            mock.get_requests()[0].json_body().unwrap()["options"]["spider_options"],
            json!({"max_depth": 1})
        );
    }

    #[tokio::test]
    async fn test_crawl_command_stops_on_terminal_state() {
        let mock = MockHttpClient::new();
        let base = "https://app.watercrawl.dev/api/v1/core/crawl-requests/";
        mock.set_response(
            base,
            MockResponse::json(201, &json!({"uuid": "c2", "url": "https://a", "status": "new"})),
        );
        // Server keeps the connection open after the final snapshot
        let body = format!(
            "data: {}\ndata: {}\n",
            json!({"type": "state", "data": {"uuid": "c2", "url": "https://a", "status": "running"}}),
            json!({"type": "state", "data": {"uuid": "c2", "url": "https://a", "status": "finished"}})
        );
        mock.set_response(
            &format!("{}c2/status/", base),
            MockResponse::OpenStream(vec![bytes::Bytes::from(body)]),
        );
        let client = WatercrawlClient::with_http_client(ClientConfig::new("k"), mock.clone()).unwrap();

        let command = CliCommand::Crawl {
            url: "https://a".to_string(),
            depth: None,
            limit: None,
        };
        tokio::time::timeout(
            std::time::Duration::from_secs(5),
            run_cli_command(&client, command),
        )
        .await
        .expect("crawl command returned after the terminal state")
        .unwrap();

        assert_eq!(mock.stream_stats().closed, 1);
    }
}
