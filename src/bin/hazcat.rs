// hazcat - CLI for asking a vision model whether an image has a cat in it

use anyhow::{Context, Result, anyhow};
use base64::Engine;
use clap::Parser;
use hazcat::{HazCat, HazCatConfig, ImageDetail, MediaType, Verdict, config};
use std::path::PathBuf;
use std::time::Duration;
use termimad::{MadSkin, crossterm::style::Color};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Check whether an image contains a cat", long_about = None)]
struct Args {
    /// Image file (jpeg, png, gif or webp)
    image: PathBuf,

    /// MIME type of the image (inferred from the extension when omitted)
    #[arg(short = 't', long = "type")]
    media_type: Option<String>,

    /// API key for the model endpoint [env: HAZCAT_API_KEY]
    #[arg(long)]
    api_key: Option<String>,

    /// Model identifier [env: HAZCAT_MODEL]
    #[arg(short, long)]
    model: Option<String>,

    /// Endpoint root, defaults to the public OpenAI API [env: HAZCAT_BASE_URL]
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Image detail hint
    #[arg(long, value_enum, default_value = "auto")]
    detail: DetailArg,

    /// Print the raw verdict JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum DetailArg {
    Auto,
    Low,
    High,
}

impl From<DetailArg> for ImageDetail {
    fn from(arg: DetailArg) -> Self {
        match arg {
            DetailArg::Auto => ImageDetail::Auto,
            DetailArg::Low => ImageDetail::Low,
            DetailArg::High => ImageDetail::High,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; values may come from the environment or flags
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("hazcat={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let media_type = match args.media_type.as_deref() {
        Some(mime) => mime.parse::<MediaType>()?,
        None => args
            .image
            .extension()
            .and_then(|e| e.to_str())
            .and_then(MediaType::from_extension)
            .ok_or_else(|| {
                anyhow!(
                    "cannot infer image type of {}; pass --type",
                    args.image.display()
                )
            })?,
    };

    let bytes = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("failed to read {}", args.image.display()))?;
    let image = base64::engine::general_purpose::STANDARD.encode(&bytes);

    // Flags win over the environment
    let mut config = HazCatConfig::from_lookup(|name| {
        let flag = match name {
            config::API_KEY_ENV => args.api_key.clone(),
            config::MODEL_ENV => args.model.clone(),
            config::BASE_URL_ENV => args.base_url.clone(),
            _ => None,
        };
        flag.or_else(|| std::env::var(name).ok())
    })?
    .with_detail(args.detail.into());
    if let Some(secs) = args.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let client = HazCat::new(config)?;
    tracing::info!(
        image = %args.image.display(),
        model = client.model(),
        %media_type,
        "checking image"
    );

    let verdict = client
        .check(image, media_type)
        .await
        .map_err(|e| anyhow!("{} failed: {}", e.stage().as_str(), e))?;

    if args.json {
        println!("{}", serde_json::to_string(&verdict)?);
    } else {
        render(&verdict);
    }

    Ok(())
}

fn render(verdict: &Verdict) {
    let skin = create_skin();
    let headline = if verdict.contains_cat {
        "# Haz cat!"
    } else {
        "# No cat"
    };
    skin.print_text(headline);
    println!("{}", message_line(&skin, &verdict.message));
}

fn create_skin() -> MadSkin {
    let mut skin = MadSkin::default();
    skin.headers[0].set_fg(Color::Cyan);
    skin.italic.set_fg(Color::Magenta);
    skin
}

/// The model's message is free text, so it is styled directly rather than
/// parsed as markdown.
fn message_line(skin: &MadSkin, message: &str) -> String {
    skin.italic.apply_to(message).to_string()
}
