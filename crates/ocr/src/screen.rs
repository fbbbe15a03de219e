use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// Kind of in-game screen a screenshot shows. Detection is a stub, so item
/// details is the only kind reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenType {
    ItemDetails,
}

/// Only item detail screens are assessed, so every image is reported as one.
pub fn detect_screen_type(_image: &DynamicImage) -> ScreenType {
    ScreenType::ItemDetails
}
