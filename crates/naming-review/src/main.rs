use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use naming_dict::{CUSTOM_DICTIONARY_FILE, Dictionary, DictionarySources, LoadMode};
use naming_morphy::Pluralizer;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use naming_review::{AppState, Grammar, check_file, router};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_DICT_DIR: &str = "dict";
const DEFAULT_MAX_BATCH: usize = 1000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config();
    info!(
        "using dictionaries in {} (mode: {:?})",
        config.dict_dir.display(),
        config.dict_mode
    );
    info!("custom dictionary: {}", config.custom_dict.display());

    let grammar = Arc::new(build_grammar(&config)?);

    if let Some(path) = &config.check {
        let report = check_file(&grammar, path)?;
        for line in report.lines() {
            println!("{line}");
        }
        if report.exit_code() != 0 {
            std::process::exit(report.exit_code());
        }
        return Ok(());
    }

    info!("binding to {}:{}", config.host, config.port);
    info!("max batch: {} identifiers", config.max_batch);
    let state = AppState {
        grammar,
        max_batch: config.max_batch,
    };

    let app = router(state).layer(TraceLayer::new_for_http());
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;
    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, Clone)]
struct Config {
    host: String,
    port: u16,
    dict_dir: PathBuf,
    custom_dict: PathBuf,
    dict_mode: LoadMode,
    irregulars: Option<PathBuf>,
    max_batch: usize,
    check: Option<PathBuf>,
}

fn load_config() -> Config {
    let mut cli_dict_dir: Option<PathBuf> = None;
    let mut cli_custom_dict: Option<PathBuf> = None;
    let mut cli_dict_mode: Option<LoadMode> = None;
    let mut cli_irregulars: Option<PathBuf> = None;
    let mut check: Option<PathBuf> = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--dict-dir" => {
                if let Some(path) = args.next() {
                    cli_dict_dir = Some(PathBuf::from(path));
                }
            }
            "--check" => {
                if let Some(path) = args.next() {
                    check = Some(PathBuf::from(path));
                }
            }
            _ => {
                if let Some(path) = arg.strip_prefix("--dict-dir=") {
                    cli_dict_dir = Some(PathBuf::from(path));
                } else if let Some(path) = arg.strip_prefix("--custom-dict=") {
                    cli_custom_dict = Some(PathBuf::from(path));
                } else if let Some(mode) = arg.strip_prefix("--dict-mode=") {
                    cli_dict_mode = parse_load_mode(mode);
                } else if let Some(path) = arg.strip_prefix("--irregulars=") {
                    cli_irregulars = Some(PathBuf::from(path));
                } else if let Some(path) = arg.strip_prefix("--check=") {
                    check = Some(PathBuf::from(path));
                }
            }
        }
    }

    let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let dict_dir = cli_dict_dir
        .or_else(|| env::var("NAMING_DICT_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DICT_DIR));
    let custom_dict = cli_custom_dict
        .or_else(|| env::var("NAMING_CUSTOM_DICT").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(CUSTOM_DICTIONARY_FILE));
    let dict_mode = cli_dict_mode
        .or_else(|| {
            env::var("NAMING_DICT_MODE")
                .ok()
                .as_deref()
                .and_then(parse_load_mode)
        })
        .unwrap_or(LoadMode::Mmap);
    let irregulars =
        cli_irregulars.or_else(|| env::var("NAMING_IRREGULARS").ok().map(PathBuf::from));
    let max_batch = env::var("MAX_BATCH")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_MAX_BATCH);

    Config {
        host,
        port,
        dict_dir,
        custom_dict,
        dict_mode,
        irregulars,
        max_batch,
        check,
    }
}

fn parse_load_mode(raw: &str) -> Option<LoadMode> {
    match raw.to_ascii_lowercase().as_str() {
        "mmap" => Some(LoadMode::Mmap),
        "owned" => Some(LoadMode::Owned),
        _ => None,
    }
}

fn build_grammar(config: &Config) -> anyhow::Result<Grammar> {
    let start = Instant::now();
    let sources = DictionarySources::in_dir(&config.dict_dir).with_custom(&config.custom_dict);
    let dict = Dictionary::load(&sources, config.dict_mode);
    let pluralizer = match &config.irregulars {
        Some(path) => Pluralizer::load(path)?,
        None => Pluralizer::new(),
    };
    info!(
        "grammar ready in {} ms ({} words, {} irregular plurals)",
        start.elapsed().as_millis(),
        dict.len(),
        pluralizer.irregular_count()
    );
    Ok(Grammar::new(dict, pluralizer))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .init();
}
