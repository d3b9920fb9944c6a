//! API keys from the environment and `.env` files.

use random_image::{ProviderKeys, ProviderKind};
use std::path::PathBuf;

/// Environment variable holding the key for `kind`.
pub fn key_var(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::Unsplash => "UNSPLASH_KEY",
        ProviderKind::Pexels => "PEXELS_KEY",
        ProviderKind::Pixabay => "PIXABAY_KEY",
    }
}

/// Every key variable, comma separated.
pub fn all_key_vars() -> String {
    [
        ProviderKind::Unsplash,
        ProviderKind::Pexels,
        ProviderKind::Pixabay,
    ]
    .map(key_var)
    .join(", ")
}

/// Load the first `.env` found: working directory, then next to the
/// executable, then the executable's parent directory.
///
/// Runs before logging is set up so `.env` can carry `RANDOM_IMAGE_LOG`.
pub fn load_dotenv() -> Option<PathBuf> {
    let found = candidates().into_iter().find(|path| path.is_file())?;
    dotenvy::from_path(&found).ok()?;
    Some(found)
}

fn candidates() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".env"));
    }
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
    {
        paths.push(exe_dir.join(".env"));
        if let Some(parent) = exe_dir.parent() {
            paths.push(parent.join(".env"));
        }
    }
    paths
}

pub fn keys_from_env() -> ProviderKeys {
    keys_from(|name| std::env::var(name).ok())
}

fn keys_from(lookup: impl Fn(&str) -> Option<String>) -> ProviderKeys {
    ProviderKeys {
        unsplash: lookup(key_var(ProviderKind::Unsplash)),
        pexels: lookup(key_var(ProviderKind::Pexels)),
        pixabay: lookup(key_var(ProviderKind::Pixabay)),
    }
}
