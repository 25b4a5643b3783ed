use tracing::info;
use tracing_subscriber::EnvFilter;

use roicrop::{
    AnnotationStyle, CropParams, Point, RoiSelector, RoiShape, TargetSize,
    annotate_file_to_path, crop_directory_to_path, crop_file_to_path, parse_hex_color,
};

use super::args::{AnnotateArgs, CliArgs, Command, CropArgs};
use super::errors::AppError;

fn parse_size(size: &str) -> Result<TargetSize, AppError> {
    let target = size.parse::<TargetSize>().map_err(|_| AppError::InvalidSize {
        size: size.to_string(),
    })?;
    target.validated()?;
    Ok(target)
}

fn parse_point(point: &str) -> Result<Point, AppError> {
    point.parse::<Point>().map_err(|_| AppError::InvalidPoint {
        point: point.to_string(),
    })
}

fn crop_params(args: &CropArgs) -> Result<CropParams, AppError> {
    if let Some(config) = &args.config {
        info!("Loading crop parameters from {:?}", config);
        return Ok(CropParams::from_json_file(config)?);
    }
    let params = CropParams {
        size: parse_size(&args.size)?,
        resize: !args.no_resize,
        filter: args.filter,
        format: args.format,
        jpeg_quality: args.quality,
        sidecar: args.sidecar,
    };
    params.validate()?;
    Ok(params)
}

fn run_crop(args: CropArgs) -> Result<(), Box<dyn std::error::Error>> {
    let params = crop_params(&args)?;
    let batch_mode = args.batch || args.input_dir.is_some();

    if batch_mode {
        let input_dir = args.input_dir.ok_or(AppError::MissingArgument {
            arg: "--input-dir".to_string(),
        })?;
        let output_dir = args.output_dir.ok_or(AppError::MissingArgument {
            arg: "--output-dir".to_string(),
        })?;

        let report = crop_directory_to_path(&input_dir, &output_dir, &params, args.batch)?;
        println!(
            "processed={} skipped={} errors={}",
            report.processed, report.skipped, report.errors
        );
    } else {
        let input = args.input.ok_or(AppError::MissingArgument {
            arg: "--input".to_string(),
        })?;
        let output = args.output.ok_or(AppError::MissingArgument {
            arg: "--output".to_string(),
        })?;

        let plan = crop_file_to_path(&input, &output, &params)?;
        info!(
            "Successfully cropped: {:?} -> {:?} (offset {:?})",
            input, output, plan.offset
        );
    }
    Ok(())
}

fn run_annotate(args: AnnotateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let shape = if args.square {
        RoiShape::Square
    } else {
        RoiShape::Rectangle
    };

    // Replay the two corner clicks through the same selector a GUI would drive
    let mut selector = RoiSelector::new();
    selector.open_image();
    selector.arm(shape)?;
    selector.click(parse_point(&args.from)?);
    let rect = selector
        .click(parse_point(&args.to)?)
        .ok_or_else(|| roicrop::Error::Selection("second corner did not place an ROI".to_string()))?;

    let display_size = match &args.display_size {
        Some(s) => Some(parse_size(s)?.dims()),
        None => None,
    };

    let style = AnnotationStyle {
        color: parse_hex_color(&args.color)?,
        thickness: args.thickness,
        scale: args.scale,
        corner: args.corner,
        ..AnnotationStyle::default()
    };
    style.validate()?;

    let placed = annotate_file_to_path(
        &args.input,
        &args.output,
        rect,
        display_size,
        &style,
        args.format,
    )?;
    info!(
        "Successfully annotated: {:?} -> {:?} (roi {:?})",
        args.input, args.output, placed
    );
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        init_logging();
    }

    match args.command {
        Command::Crop(crop) => run_crop(crop),
        Command::Annotate(annotate) => run_annotate(annotate),
    }
}
