use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use daycard::{
    ByteFetcher as _, CalendarInfo, CardAssembler, CardConfig, HttpFetcher, fetch, mime,
    quote_or_fallback,
};

#[derive(Parser, Debug)]
#[command(name = "daycard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a day-card JPEG.
    Generate(GenerateArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Calendar info as a local JSON file
    /// ({"day":3,"month":9,"year":2026,"sexagenary":"...","quote":"..."}).
    #[arg(long = "info")]
    info_path: Option<PathBuf>,

    /// Calendar-info endpoint returning the same JSON shape.
    #[arg(long)]
    info_url: Option<String>,

    /// Quote endpoint returning a plain-text line; on failure the
    /// configured fallback sentence is used instead of aborting.
    #[arg(long)]
    quote_url: Option<String>,

    /// Pipeline config JSON; omitted fields keep their defaults.
    #[arg(long = "config")]
    config_path: Option<PathBuf>,

    /// Seed for the background pick, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .try_init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => generate(args).await,
    }
}

async fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = match &args.config_path {
        Some(path) => read_json::<CardConfig>(path)?,
        None => CardConfig::default(),
    };

    let fetcher = HttpFetcher::default();
    let mut info = load_info(&args, &fetcher).await?;

    if let Some(quote_url) = &args.quote_url {
        let fetched = fetch::fetch_text(&fetcher, quote_url).await;
        info.quote = quote_or_fallback(fetched, &config.quote_fallback);
    } else if info.quote.trim().is_empty() {
        info.quote = config.quote_fallback.clone();
    }

    let assembler = CardAssembler::new(fetcher, config);
    let card = match args.seed {
        Some(seed) => assembler.generate_seeded(&info, seed).await?,
        None => assembler.generate(&info).await?,
    };

    std::fs::write(&args.out, &card.bytes)
        .with_context(|| format!("write card to {}", args.out.display()))?;
    tracing::info!(
        out = %args.out.display(),
        mime = mime::mime_for_extension(&args.out.to_string_lossy()),
        len = card.bytes.len(),
        "card written"
    );
    Ok(())
}

async fn load_info(args: &GenerateArgs, fetcher: &HttpFetcher) -> anyhow::Result<CalendarInfo> {
    if let Some(path) = &args.info_path {
        return read_json(path);
    }
    if let Some(url) = &args.info_url {
        let bytes = fetcher
            .fetch(url)
            .await
            .with_context(|| format!("fetch calendar info from {url}"))?;
        return serde_json::from_slice(&bytes)
            .with_context(|| format!("parse calendar info from {url}"));
    }
    anyhow::bail!("either --info or --info-url is required");
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> anyhow::Result<T> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parse json from {}", path.display()))
}
