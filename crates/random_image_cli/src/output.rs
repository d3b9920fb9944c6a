//! Terminal output for the fetch command.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use random_image::ImageResult;
use std::path::Path;
use std::time::Duration;

/// A ticking spinner on stderr. Hidden automatically when stderr is not a terminal.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn image_details(image: &ImageResult, provider: &str) {
    println!();
    println!("{}", "Image Details".bold().green());
    println!("  {:<12} {}", "Provider".dimmed(), provider.cyan());
    println!(
        "  {:<12} {}",
        "Size".dimmed(),
        format!("{}x{}", image.width, image.height).yellow()
    );
    println!("  {:<12} {}", "Author".dimmed(), image.author.magenta());
    if let Some(author_url) = &image.author_url {
        println!("  {:<12} {}", "Author URL".dimmed(), author_url);
    }
    println!("  {:<12} {}", "Original".dimmed(), image.original_url);
    println!("  {:<12} {}", "Image URL".dimmed(), image.url);
    println!();
}

pub fn saved(path: &Path) {
    println!("{} {}", "Saved to:".green().bold(), path.display().to_string().cyan());
}
