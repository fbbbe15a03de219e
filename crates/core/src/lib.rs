pub mod assessment;
pub mod classification;
pub mod config;
pub mod stat;
pub mod text;

pub use assessment::Assessment;
pub use classification::{BossScaling, Classification, ItemType, Rarity, Recommendation};
pub use config::{AssessConfig, ConfigError, OcrConfig, OutputConfig, OutputFormat};
pub use stat::{StatKey, StatMap};
pub use text::{FoldedText, RecognizedText};
