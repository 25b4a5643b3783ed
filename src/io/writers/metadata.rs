use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::info;

use crate::core::processing::crop::CropPlan;
use crate::error::Result;

/// Build the JSON document describing one crop.
pub fn crop_metadata(plan: &CropPlan, source: Option<&Path>) -> serde_json::Value {
    json!({
        "source": source.map(|p| p.display().to_string()),
        "source_size": [plan.source.0, plan.source.1],
        "ratio": plan.ratio,
        "resized_size": [plan.resized.0, plan.resized.1],
        "offset": [plan.offset.0, plan.offset.1],
        "size": [plan.target.0, plan.target.1],
        "conversion_tool": env!("CARGO_PKG_NAME"),
        "conversion_version": env!("CARGO_PKG_VERSION"),
    })
}

/// Write the crop geometry next to `output_path` as `<stem>.json`.
pub fn write_crop_sidecar(
    output_path: &Path,
    plan: &CropPlan,
    source: Option<&Path>,
) -> Result<PathBuf> {
    let sidecar_path = output_path.with_extension("json");
    let json_string = serde_json::to_string_pretty(&crop_metadata(plan, source))?;
    std::fs::write(&sidecar_path, json_string)?;

    info!("Created crop metadata sidecar: {:?}", sidecar_path);
    Ok(sidecar_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_fields() {
        let plan = CropPlan {
            source: (800, 712),
            ratio: Some(0.5),
            resized: (400, 356),
            offset: (72, 50),
            target: (256, 256),
        };
        let value = crop_metadata(&plan, Some(Path::new("a/b.jpg")));
        assert_eq!(value["source"], "a/b.jpg");
        assert_eq!(value["source_size"][1], 712);
        assert_eq!(value["ratio"], 0.5);
        assert_eq!(value["offset"][0], 72);
        assert_eq!(value["conversion_tool"], "roicrop");

        let no_resize = CropPlan { ratio: None, ..plan };
        assert!(crop_metadata(&no_resize, None)["ratio"].is_null());
    }
}
