use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use roicrop::{Corner, OutputFormat, ResizeFilter};

#[derive(Parser)]
#[command(name = "roicrop", version, about = "roicrop CLI")]
pub struct CliArgs {
    /// Enable logging
    #[arg(long, global = true, default_value_t = false)]
    pub log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Center-crop images to a fixed size
    Crop(CropArgs),
    /// Outline a region of interest and paste a magnified inset
    Annotate(AnnotateArgs),
}

#[derive(Args)]
pub struct CropArgs {
    /// Input image (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Input directory containing images (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output filename (single file mode)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output directory (batch mode)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// JSON file with crop parameters; command line flags are ignored when given
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Crop size. Options:
    /// - Square: a positive integer (e.g., 512)
    /// - Rectangle: HEIGHTxWIDTH (e.g., 400x200)
    #[arg(short, long, default_value = "256")]
    pub size: String,

    /// Crop without scaling first; fails if the image is smaller than the size
    #[arg(long, default_value_t = false)]
    pub no_resize: bool,

    /// Resampling filter used when scaling
    #[arg(long, value_enum, default_value_t = ResizeFilter::Lanczos3)]
    pub filter: ResizeFilter,

    /// Output format (png, jpeg or tiff); inferred from the output extension if omitted
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// JPEG quality (1-100)
    #[arg(long, default_value_t = 95)]
    pub quality: u8,

    /// Write a JSON sidecar with the crop geometry next to each output
    #[arg(long, default_value_t = false)]
    pub sidecar: bool,

    /// Batch mode: continue processing other files when one fails
    #[arg(long, default_value_t = false)]
    pub batch: bool,
}

#[derive(Args)]
pub struct AnnotateArgs {
    /// Input image
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output filename
    #[arg(short, long)]
    pub output: PathBuf,

    /// First ROI corner as ROW,COL
    #[arg(long)]
    pub from: String,

    /// Second ROI corner as ROW,COL
    #[arg(long)]
    pub to: String,

    /// Force a square ROI (side is the larger extent)
    #[arg(long, default_value_t = false)]
    pub square: bool,

    /// Coordinates are relative to a display of HEIGHTxWIDTH instead of the image
    #[arg(long)]
    pub display_size: Option<String>,

    /// Outline color as RRGGBB
    #[arg(long, default_value = "ff0000")]
    pub color: String,

    /// Outline thickness in pixels (1-20)
    #[arg(long, default_value_t = 5)]
    pub thickness: usize,

    /// Inset magnification (1.0-5.0)
    #[arg(long, default_value_t = 1.0)]
    pub scale: f32,

    /// Corner for the magnified inset (lu, ru, ld, rd)
    #[arg(long, value_enum, default_value_t = Corner::LD)]
    pub corner: Corner,

    /// Output format (png, jpeg or tiff); inferred from the output extension if omitted
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,
}
