//! Command-line host: draw a region file to PNG or look up the city at a pixel.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use citymap::{JsonRegionSource, MapRenderer, RenderOptions, ScreenPoint, Viewport};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::info;

/// Render city polygons to a map image and query it.
#[derive(Parser)]
#[command(name = "citymap")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render city polygons to a raster map and hit-test clicks", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw the map to a PNG file
    Draw(DrawArgs),
    /// Print the city under a pixel of the drawn map
    Info(InfoArgs),
}

/// Inputs shared by both commands.
#[derive(Args)]
struct MapArgs {
    /// JSON file with region records
    regions: PathBuf,

    /// JSON style file (viewport, colors, legend)
    #[arg(short, long)]
    style: Option<PathBuf>,

    /// Override the image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Override the image height in pixels
    #[arg(long)]
    height: Option<u32>,
}

impl MapArgs {
    fn options(&self) -> Result<RenderOptions> {
        let mut options = match &self.style {
            Some(path) => RenderOptions::from_json_file(path)
                .with_context(|| format!("loading style {}", path.display()))?,
            None => RenderOptions::default(),
        };
        let viewport = options.viewport;
        options.viewport = Viewport {
            width: self.width.unwrap_or(viewport.width),
            height: self.height.unwrap_or(viewport.height),
            ..viewport
        };
        Ok(options)
    }

    fn renderer(&self) -> MapRenderer<JsonRegionSource> {
        MapRenderer::new(JsonRegionSource::new(&self.regions))
    }
}

#[derive(Args)]
struct DrawArgs {
    #[command(flatten)]
    map: MapArgs,

    /// Output PNG path
    #[arg(short, long, default_value = "map.png")]
    output: PathBuf,
}

#[derive(Args)]
struct InfoArgs {
    #[command(flatten)]
    map: MapArgs,

    /// Pixel column
    #[arg(short)]
    x: u32,

    /// Pixel row
    #[arg(short)]
    y: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level.as_str())).init();

    match cli.command {
        Commands::Draw(args) => draw(&args),
        Commands::Info(args) => show_info(&args),
    }
}

fn draw(args: &DrawArgs) -> Result<()> {
    let options = args.map.options()?;
    let image = args
        .map
        .renderer()
        .draw_map(&options)
        .with_context(|| format!("drawing {}", args.map.regions.display()))?;
    save(&image, &args.output)?;
    info!(
        "wrote {}x{} map to {}",
        image.width(),
        image.height(),
        args.output.display()
    );
    Ok(())
}

fn save(image: &image::RgbImage, path: &Path) -> Result<()> {
    image
        .save(path)
        .with_context(|| format!("writing {}", path.display()))
}

fn show_info(args: &InfoArgs) -> Result<()> {
    let options = args.map.options()?;
    let pixel = ScreenPoint::pixel_center(args.x, args.y);
    let Some(city) = args
        .map
        .renderer()
        .region_at_point(&options.viewport, pixel)
        .with_context(|| format!("querying {}", args.map.regions.display()))?
    else {
        bail!("no city at ({}, {})", args.x, args.y);
    };
    println!("City Name: {}", city.name);
    match options.legend.label_for(city.color) {
        Some(label) => println!("Value: {label}"),
        None => println!("Value: {}", city.color),
    }
    Ok(())
}
