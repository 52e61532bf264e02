//! The `palm-relay analyze` command: one image, one report, no server.

use anyhow::Context;
use clap::Args;
use palm_relay_core::{Config, ImageInput, Relay};
use std::path::{Path, PathBuf};

/// Arguments for the `analyze` command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Palm photo to analyze
    #[arg(required = true)]
    pub image: PathBuf,

    /// Print `{"text": ...}` instead of the bare report
    #[arg(long)]
    pub json: bool,
}

/// Execute the analyze command.
pub async fn execute(args: AnalyzeArgs, config: Config) -> anyhow::Result<()> {
    let data_url = image_data_url(&args.image)?;
    let relay = Relay::from_config(&config)?;

    tracing::info!(
        provider = relay.provider_name(),
        "Analyzing {}",
        args.image.display()
    );
    let text = relay.analyze(&data_url).await?;

    if args.json {
        println!("{}", serde_json::json!({ "text": text }));
    } else {
        println!("{text}");
    }
    Ok(())
}

/// Read an image file and encode it as a data URL, typed by its extension.
fn image_data_url(path: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("jpeg");
    Ok(ImageInput::from_bytes(&bytes, format).data_url())
}
