use clap::{Args, Parser, Subcommand};
use social_card::config::{CardConfig, CardOverrides};
use social_card::{config, generate, output};
use std::path::PathBuf;

/// Style override flags shared by card-producing commands.
///
/// Every flag maps onto one [`CardOverrides`] field; unset flags fall back
/// to the config file (or stock) defaults.
#[derive(Args, Clone)]
struct StyleArgs {
    /// Title text color
    #[arg(long)]
    title_color: Option<String>,

    /// Solid background color (replaces the gradient)
    #[arg(long)]
    bg_color: Option<String>,

    /// Background gradient stops, comma-separated
    #[arg(long, value_delimiter = ',')]
    bg_gradient: Option<Vec<String>>,

    /// Hide the terminal-window chrome
    #[arg(long)]
    hide_chrome: bool,

    /// Fill color of the terminal-window chrome
    #[arg(long)]
    chrome_color: Option<String>,

    /// Raw SVG fragment injected into the card (trusted, not escaped)
    #[arg(long)]
    custom_svg: Option<String>,

    /// Font file (TTF/OTF) for the text layer
    #[arg(long)]
    custom_font: Option<PathBuf>,

    /// Title wrap width, in characters per row
    #[arg(long)]
    line_break_at: Option<usize>,
}

impl StyleArgs {
    fn into_overrides(self) -> CardOverrides {
        CardOverrides {
            title_color: self.title_color,
            bg_color: self.bg_color,
            bg_gradient: self.bg_gradient,
            hide_chrome: self.hide_chrome.then_some(true),
            chrome_color: self.chrome_color,
            custom_svg: self.custom_svg,
            custom_font: self.custom_font,
            line_break_at: self.line_break_at,
        }
    }
}

#[derive(Args)]
struct GenerateArgs {
    /// Page title
    #[arg(long)]
    title: String,

    /// Site name rendered in the footer label
    #[arg(long, default_value = "")]
    site_name: String,

    /// Avatar image file (JPEG/PNG/WebP)
    #[arg(long)]
    avatar: PathBuf,

    /// Directory the PNG is written into (created on demand)
    #[arg(long, default_value = "_site/img/preview")]
    output_dir: PathBuf,

    /// Public URL prefix for the returned image URL
    #[arg(long, default_value = "/img/preview")]
    url_path: String,

    #[command(flatten)]
    style: StyleArgs,
}

#[derive(Parser)]
#[command(name = "social-card")]
#[command(about = "Generate social preview images for static sites")]
#[command(long_about = "\
Generate social preview images for static sites

Each card is a 1200x628 PNG composed from the page title (wrapped onto up
to four rows), the site name, an avatar image, and styling options: a
solid or gradient background, an optional terminal-window decoration, an
optional raw SVG overlay, and an optional custom font.

Cards land at {output-dir}/{slug}.png and the matching public URL
{url-path}/{slug}.png is printed for the page's og:image tag.

A failed card (unreadable avatar, broken option) is reported on stderr
and skipped; in batch mode the remaining pages still build.

Run 'social-card gen-config' for a documented config.toml with every
styling option.")]
#[command(version)]
struct Cli {
    /// Style defaults file (TOML, see gen-config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a single preview card
    Generate(GenerateArgs),
    /// Generate cards for every page in a JSON manifest
    Batch {
        /// Page manifest (see `generate::BatchManifest` for the shape)
        manifest: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let defaults = match &cli.config {
        Some(path) => CardConfig::load(path)?,
        None => CardConfig::default(),
    };

    match cli.command {
        Command::Generate(args) => {
            let merged = defaults.merge(&args.style.clone().into_overrides());
            let request = generate::CardRequest {
                title: args.title,
                site_name: args.site_name,
                avatar: args.avatar,
                output_dir: args.output_dir,
                url_path: args.url_path,
            };
            match generate::generate(&request, &merged) {
                Some(url) => println!("{}", output::format_generated(&request.title, &url)),
                None => std::process::exit(1),
            }
        }
        Command::Batch { manifest } => {
            let manifest = generate::BatchManifest::load(&manifest)?;
            let results = generate::generate_batch(&manifest, &defaults);
            output::print_batch_report(&results);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
