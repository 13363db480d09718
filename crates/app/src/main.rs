use anyhow::bail;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use web_extract_core::{
    clean_body, extract_body, ExtractionOptions, ExtractionPipeline, FetchOptions, OllamaModel,
    PageFetcher, DEFAULT_MAX_CHUNK_CHARS, DEFAULT_MODEL, DEFAULT_OLLAMA_ENDPOINT,
    DEFAULT_TEMPERATURE,
};

#[derive(Parser)]
#[command(name = "web-extract", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Basic (unauthenticated) HTTP proxy, e.g. http://1.2.3.4:8080
    #[arg(long)]
    proxy: Option<String>,

    /// Ollama model to use for extraction
    #[arg(long, env = "OLLAMA_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Ollama base URL
    #[arg(long, env = "OLLAMA_URL", default_value = DEFAULT_OLLAMA_ENDPOINT)]
    ollama_url: String,

    /// Maximum characters per chunk sent to the model
    #[arg(long, default_value_t = DEFAULT_MAX_CHUNK_CHARS)]
    max_chunk_chars: usize,

    /// Decoding temperature; keep low for factual extraction
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f32,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a page and print its cleaned, readable text.
    Scrape {
        /// Website URL to scrape
        #[arg(long)]
        url: String,
        /// Write the cleaned text to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Scrape (or read) page text and extract the described information.
    Extract {
        /// What to extract, e.g. "all product names and their prices"
        #[arg(long)]
        describe: String,
        /// Website URL to scrape before extracting
        #[arg(long)]
        url: Option<String>,
        /// Previously saved cleaned-text file to extract from
        #[arg(long)]
        input: Option<PathBuf>,
        /// Also print the cleaned page text before the result
        #[arg(long, default_value_t = false)]
        show_cleaned: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "web-extract boot"
    );

    let fetch_options = FetchOptions {
        proxy: cli.proxy.clone(),
        ..FetchOptions::default()
    };

    match cli.command {
        Command::Scrape { url, output } => {
            let cleaned = scrape_cleaned_text(&url, fetch_options).await?;

            if cleaned.is_empty() {
                warn!(url = %url, "scraping produced no readable content");
            }

            match output {
                Some(path) => {
                    tokio::fs::write(&path, &cleaned).await?;
                    println!("cleaned text written to {}", path.display());
                }
                None => println!("{cleaned}"),
            }
        }
        Command::Extract {
            describe,
            url,
            input,
            show_cleaned,
        } => {
            let cleaned = match (url, input) {
                (Some(url), None) => scrape_cleaned_text(&url, fetch_options).await?,
                (None, Some(path)) => tokio::fs::read_to_string(&path).await?,
                _ => bail!("pass exactly one of --url or --input"),
            };

            if cleaned.is_empty() {
                warn!("no content to extract from; re-scrape with a valid URL");
            }

            if show_cleaned {
                println!("cleaned_text:\n{cleaned}\n");
            }

            let options = ExtractionOptions {
                model: cli.model,
                endpoint: cli.ollama_url,
                temperature: cli.temperature,
                max_chunk_chars: cli.max_chunk_chars,
            };

            let model = OllamaModel::new(&options);
            let pipeline = ExtractionPipeline::new(model, options);

            let result = pipeline.extract_from_text(&cleaned, &describe).await;

            if result.trim().is_empty() {
                println!(
                    "The model did not return any specific information based on your description. \
                     Try refining your description."
                );
            } else {
                println!("{result}");
            }
        }
    }

    Ok(())
}

async fn scrape_cleaned_text(url: &str, options: FetchOptions) -> anyhow::Result<String> {
    let fetcher = PageFetcher::new(options)?;
    let capture = fetcher.fetch(url).await?;

    info!(url = %capture.url, fetched_at = %capture.fetched_at.to_rfc3339(), "page fetched");

    let body = extract_body(&capture.html);
    Ok(clean_body(&body))
}
