use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde::Deserialize;

use shotmark::background::{CropRegion, LoadRequest};
use shotmark::delivery::{DeliveryOutcome, PageContext, file_sink, perform_delivery};
use shotmark::{Config, Editor, EditorSettings, InputEvent};

#[derive(Parser, Debug)]
#[command(name = "shotmark")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SHOTMARK_GIT_HASH"), ")"),
    about = "Annotate a screenshot with boxes, arrows, and labels"
)]
struct Cli {
    /// PNG screenshot to annotate
    #[arg(long, short = 'i', value_name = "PNG")]
    image: PathBuf,

    /// Crop before editing: x,y,width,height[,device_pixel_ratio]
    #[arg(long, value_name = "REGION")]
    crop: Option<CropRegion>,

    /// TOML file with an `events` list to replay against the editor
    #[arg(long, short = 'e', value_name = "FILE")]
    events: Option<PathBuf>,

    /// Notes attached to the delivered screenshot
    #[arg(long, short = 'n', default_value = "")]
    notes: String,

    /// Output directory (overrides the configured one)
    #[arg(long, short = 'o', value_name = "DIR")]
    out: Option<PathBuf>,

    /// Title of the captured page, recorded in the report
    #[arg(long)]
    title: Option<String>,

    /// URL of the captured page, recorded in the report
    #[arg(long)]
    url: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct EventScript {
    #[serde(default)]
    events: Vec<InputEvent>,
}

fn load_script(path: &PathBuf) -> Result<EventScript> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read events from {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Failed to parse events in {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let settings = EditorSettings::from_config(&config).map_err(|e| anyhow!(e))?;

    let script = match &cli.events {
        Some(path) => load_script(path)?,
        None => EventScript::default(),
    };

    let bytes = fs::read(&cli.image)
        .with_context(|| format!("Failed to read image {}", cli.image.display()))?;

    let mut editor = Editor::new(settings);
    editor
        .load(LoadRequest::new(bytes, cli.crop))
        .await
        .with_context(|| format!("Could not open {}", cli.image.display()))?;

    let total = script.events.len();
    let applied = script
        .events
        .into_iter()
        .filter(|event| editor.handle_event(event.clone()))
        .count();
    log::info!("Replayed {}/{} events", applied, total);

    let delivery = editor.finalize(&cli.notes)?.with_context(PageContext {
        title: cli.title,
        url: cli.url,
    });

    let mut save_config = config.file_save_config();
    if let Some(out) = cli.out {
        save_config.save_directory = out;
    }

    match perform_delivery(delivery, file_sink(save_config)).await {
        DeliveryOutcome::Delivered(receipt) => {
            if let Some(path) = receipt.image_path {
                println!("{}", path.display());
            }
            if let Some(path) = receipt.notes_path {
                println!("{}", path.display());
            }
            Ok(())
        }
        DeliveryOutcome::Failed(reason) => Err(anyhow!("Delivery failed: {}", reason)),
    }
}
