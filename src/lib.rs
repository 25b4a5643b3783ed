#![doc = r#"
roicrop: center-crop, resize and region-of-interest annotation for image-labeling workflows.

This crate turns photographs into fixed-size training crops and annotated figures.
The core is a pure center-crop operation on `ndarray` buffers that can first scale
the image, preserving aspect ratio, so it covers the requested size. Around it
sit image file I/O, an ROI outline/inset renderer and an ROI selection state
machine. It powers the `roicrop` CLI and can be embedded in your own Rust
applications.

Add dependency
--------------
```toml
[dependencies]
roicrop = "0.1"
```

Center crop an in-memory buffer
-------------------------------
```rust
use ndarray::{ArrayD, IxDyn};
use roicrop::crop_center;

fn main() -> roicrop::Result<()> {
    // (H, W) grayscale or (H, W, C) multi-channel; u8, u16 and f32 samples
    let img = ArrayD::<u8>::zeros(IxDyn(&[800, 712]));

    // Scale so both sides cover 512, then crop the middle 512x512
    let square = crop_center(&img, 512, true)?;
    assert_eq!(square.shape(), &[512, 512]);

    // Rectangular target (height, width), no resizing
    let rect = crop_center(&img, (400, 200), false)?;
    assert_eq!(rect.shape(), &[400, 200]);
    Ok(())
}
```

Process files
-------------
```rust,no_run
use std::path::Path;
use roicrop::{crop_directory_to_path, crop_file_to_path, CropParams, TargetSize};

fn main() -> roicrop::Result<()> {
    let params = CropParams {
        size: TargetSize::Rect(256, 192),
        sidecar: true,
        ..CropParams::default()
    };

    crop_file_to_path(Path::new("/data/photo.jpg"), Path::new("/out/photo.png"), &params)?;

    let report = crop_directory_to_path(
        Path::new("/data/highway"),
        Path::new("/out/highway"),
        &params,
        true, // continue_on_error
    )?;
    println!("processed={} skipped={} errors={}", report.processed, report.skipped, report.errors);
    Ok(())
}
```

Annotate a region of interest
-----------------------------
```rust,no_run
use std::path::Path;
use roicrop::{annotate_file_to_path, AnnotationStyle, Corner, Point, RoiSelector, RoiShape};

fn main() -> roicrop::Result<()> {
    let mut selector = RoiSelector::new();
    selector.open_image();
    selector.arm(RoiShape::Square)?;
    selector.click(Point::new(120, 80));
    let rect = selector.click(Point::new(180, 150)).expect("second click places the ROI");

    let style = AnnotationStyle { scale: 2.0, corner: Corner::RD, ..AnnotationStyle::default() };
    annotate_file_to_path(
        Path::new("/data/road.jpg"),
        Path::new("/out/road_roi.png"),
        rect,
        None,
        &style,
        None,
    )?;
    Ok(())
}
```

Error handling
--------------
All public functions return `roicrop::Result<T>`; match on `roicrop::Error` to handle
specific cases.

```rust
use ndarray::{ArrayD, IxDyn};
use roicrop::{crop_center, Error};

let img = ArrayD::<u8>::zeros(IxDyn(&[100, 100]));
match crop_center(&img, 200, false) {
    Err(Error::TargetTooLarge { height, target_height, .. }) => {
        assert_eq!((height, target_height), (100, 200));
    }
    other => panic!("unexpected: {:?}", other.map(|a| a.shape().to_vec())),
}
```

Useful modules
--------------
- [`api`]: high-level, file-level entry points.
- [`core`]: crop, resize, annotation and selection primitives.
- [`types`]: enums and core types (e.g. `TargetSize`, `ResizeFilter`, `Corner`).
- [`io`]: image loading and PNG/JPEG/TIFF writers.
- [`error`]: crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use core::params::{AnnotationStyle, CropParams, parse_hex_color};
pub use error::{Error, Result};
pub use types::{Corner, OutputFormat, Point, ResizeFilter, RoiRect, RoiShape, Sample, TargetSize};

// Processing primitives
pub use core::processing::annotate::{render_annotation, scale_rect_to_image, to_color};
pub use core::processing::crop::{
    CropOptions, CropPlan, crop_center, crop_center_batch, crop_center_planned, crop_center_stack,
    crop_center_with, plan_center_crop,
};
pub use core::processing::save::{save_image, save_image_as};
pub use core::selection::{RoiSelector, SelectionState};

// I/O
pub use io::{load_image, write_crop_sidecar};

// High-level API re-exports
pub use api::{
    BatchReport, annotate_file_to_path, batch_output_path, crop_directory_to_path,
    crop_file_to_path, is_image_path,
};
