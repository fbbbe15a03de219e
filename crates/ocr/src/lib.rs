pub mod classify;
pub mod compose;
pub mod extract;
pub mod pipeline;
pub mod preprocess;
pub mod recognizer;
pub mod screen;

pub use classify::classify;
pub use compose::{compose, render_report};
pub use extract::Extractor;
pub use pipeline::{assess_recognized, assess_text, AssessmentPipeline, PipelineError};
pub use preprocess::{normalize, prepare_for_ocr, prepare_for_ocr_from_bytes, NormalizedImage, PreprocessError};
pub use recognizer::{
    Accuracy, MockRecognizer, OcrAdapter, OcrBackend, OcrError, RecognitionSettings,
    UnavailableRecognizer,
};
pub use screen::{detect_screen_type, ScreenType};
