//! The `fetch` command.

use anyhow::{Context as _, Result, anyhow};
use colored::Colorize;
use rand::Rng;
use random_image::{Config, ProviderKeys, ProviderKind, RandomImage};

use crate::args::{FetchArgs, ProviderChoice};
use crate::env::{all_key_vars, key_var};
use crate::output;

/// Pick the backend to use and return it with its key.
pub fn select_provider<R: Rng + ?Sized>(
    choice: ProviderChoice,
    keys: &ProviderKeys,
    rng: &mut R,
) -> Result<(ProviderKind, String)> {
    let kind = match choice.kind() {
        Some(kind) => kind,
        None => keys.choose_random(rng).ok_or_else(|| {
            anyhow!("No API keys found. Set at least one of: {}", all_key_vars())
        })?,
    };

    let key = keys.get(kind).ok_or_else(|| {
        anyhow!(
            "API key for {kind} not found. Set the {} environment variable",
            key_var(kind)
        )
    })?;

    Ok((kind, key.to_string()))
}

pub async fn execute(args: FetchArgs, keys: ProviderKeys) -> Result<()> {
    let (kind, key) = select_provider(args.provider, &keys, &mut rand::rng())?;
    if args.provider == ProviderChoice::Random {
        output::info(&format!("Using random provider: {}", kind.to_string().bold()));
    }

    let config = Config::default();
    let fetcher = RandomImage::from_arc(kind.build(key, &config));

    let spinner = output::spinner("Searching for an image...");
    let result = fetcher.get_random(&args.image_options()).await;
    spinner.finish_and_clear();
    let image = result.with_context(|| format!("Failed to fetch an image from {kind}"))?;

    output::image_details(&image, fetcher.provider_name());

    let Some(dir) = &args.download else {
        return Ok(());
    };

    output::info(&format!("Downloading to {}", dir.display()));
    let spinner = output::spinner("Downloading image...");
    let result = fetcher.download(&image, dir, &args.download_options()).await;
    spinner.finish_and_clear();

    let path = result.context("Download failed")?;
    output::saved(&path);
    Ok(())
}
