use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use whichimg::io::load_color_image;
use whichimg::{ColorImage, ImageTeller, TellConfig, NOT_FOUND};

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Tell which of a set of known images each query image is"
)]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Known image files; when given, the config file is not read.
    #[arg(short, long, value_name = "FILE", num_args = 1..)]
    known: Vec<String>,
    /// Query image files (used together with --known).
    #[arg(short, long, value_name = "FILE", num_args = 1..)]
    query: Vec<String>,
    /// Trust the pixel tests without a final full comparison.
    #[arg(long)]
    no_surprises: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct TellConfigJson {
    surprises: bool,
    parallel: bool,
}

impl Default for TellConfigJson {
    fn default() -> Self {
        let cfg = TellConfig::default();
        Self {
            surprises: cfg.surprises,
            parallel: cfg.parallel,
        }
    }
}

impl From<TellConfigJson> for TellConfig {
    fn from(value: TellConfigJson) -> Self {
        Self {
            surprises: value.surprises,
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    known: Vec<String>,
    queries: Vec<String>,
    output_path: Option<String>,
    teller: TellConfigJson,
}

#[derive(Debug, Serialize)]
struct TellRecord {
    query: String,
    index: isize,
    known: Option<String>,
}

#[derive(Debug, Serialize)]
struct Output {
    results: Vec<TellRecord>,
}

fn load_all(paths: &[String]) -> Result<Vec<ColorImage>, Box<dyn std::error::Error>> {
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        images.push(load_color_image(path).map_err(|err| format!("{path}: {err}"))?);
    }
    Ok(images)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("whichimg=debug".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let mut config = if cli.known.is_empty() {
        let config_text = fs::read_to_string(&cli.config)?;
        serde_json::from_str::<Config>(&config_text)?
    } else {
        Config {
            known: cli.known,
            queries: cli.query,
            ..Config::default()
        }
    };
    if cli.no_surprises {
        config.teller.surprises = false;
    }
    if config.known.len() < 2 {
        return Err("at least two known images are required".into());
    }

    let known = load_all(&config.known)?;
    tracing::info!(known = known.len(), queries = config.queries.len(), "images loaded");
    let teller = ImageTeller::build(known, config.teller.into())?;

    let mut results = Vec::with_capacity(config.queries.len());
    for path in &config.queries {
        let query = load_color_image(path).map_err(|err| format!("{path}: {err}"))?;
        let found = teller.tell(query.view());
        results.push(TellRecord {
            query: path.clone(),
            index: found
                .and_then(|idx| isize::try_from(idx).ok())
                .unwrap_or(NOT_FOUND),
            known: found.map(|idx| config.known[idx].clone()),
        });
    }

    let json = serde_json::to_string_pretty(&Output { results })?;
    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
