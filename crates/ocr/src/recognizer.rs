use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use orna_core::RecognizedText;
use thiserror::Error;

use crate::preprocess::NormalizedImage;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OcrError {
    #[error("OCR engine unavailable: {0}")]
    Unavailable(String),
    #[error("OCR engine error: {0}")]
    Failed(String),
    #[error("No text recognized in image")]
    NoTextRecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accuracy {
    Fast,
    Accurate,
}

/// Engine knobs the pipeline hands to every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecognitionSettings {
    pub accuracy: Accuracy,
    /// Dictionary correction rewrites digit runs into words, so stat screens
    /// keep it off.
    pub language_correction: bool,
}

impl RecognitionSettings {
    pub const STAT_SCREEN: RecognitionSettings =
        RecognitionSettings { accuracy: Accuracy::Accurate, language_correction: false };
}

/// Abstraction over an OCR engine.
/// Implementations are synchronous and may block; [`OcrAdapter`] moves them
/// off the async runtime.
pub trait OcrBackend: Send + Sync {
    fn recognize(
        &self,
        image: &NormalizedImage,
        settings: &RecognitionSettings,
    ) -> Result<RecognizedText, OcrError>;
}

/// Reject engine output that carries no text.
pub fn accept_output(text: RecognizedText) -> Result<RecognizedText, OcrError> {
    if text.is_empty() {
        Err(OcrError::NoTextRecognized)
    } else {
        Ok(text)
    }
}

// ── Async boundary ────────────────────────────────────────────────────────────

/// Single-shot, cancellable recognition. Dropping the returned future before
/// it resolves abandons the result.
pub struct OcrAdapter<B> {
    backend: Arc<B>,
    timeout: Option<Duration>,
}

impl<B: OcrBackend + 'static> OcrAdapter<B> {
    pub fn new(backend: B) -> Self {
        Self { backend: Arc::new(backend), timeout: None }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn settings(&self) -> RecognitionSettings {
        RecognitionSettings::STAT_SCREEN
    }

    pub async fn recognize(&self, image: NormalizedImage) -> Result<RecognizedText, OcrError> {
        if image.is_empty() {
            return Err(OcrError::Unavailable("no input image".to_string()));
        }

        let backend = Arc::clone(&self.backend);
        let settings = self.settings();
        let task = tokio::task::spawn_blocking(move || backend.recognize(&image, &settings));

        let joined = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, task).await.map_err(|_| {
                tracing::warn!(?limit, "OCR timed out");
                OcrError::Failed(format!("recognition timed out after {limit:?}"))
            })?,
            None => task.await,
        };
        let text = joined.map_err(|e| OcrError::Failed(format!("recognition task failed: {e}")))??;
        accept_output(text)
    }
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a pre-set block of text (or a pre-set error). Useful for testing
/// the pipeline without an engine installed.
pub struct MockRecognizer {
    pub text: String,
    failure: Option<OcrError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), failure: None, delay: None, calls: AtomicUsize::new(0) }
    }

    pub fn failing(error: OcrError) -> Self {
        Self { failure: Some(error), ..Self::new("") }
    }

    /// Block for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(
        &self,
        _image: &NormalizedImage,
        _settings: &RecognitionSettings,
    ) -> Result<RecognizedText, OcrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(RecognizedText::from_block(&self.text)),
        }
    }
}

/// Stands in when no engine was compiled in.
pub struct UnavailableRecognizer {
    reason: String,
}

impl UnavailableRecognizer {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl OcrBackend for UnavailableRecognizer {
    fn recognize(
        &self,
        _image: &NormalizedImage,
        _settings: &RecognitionSettings,
    ) -> Result<RecognizedText, OcrError> {
        Err(OcrError::Unavailable(self.reason.clone()))
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, OcrError, RecognitionSettings};
    use crate::preprocess::NormalizedImage;
    use leptess::{LepTess, Variable};
    use orna_core::RecognizedText;

    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>, lang: &str) -> Self {
            Self { data_path, lang: lang.to_string() }
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(
            &self,
            image: &NormalizedImage,
            settings: &RecognitionSettings,
        ) -> Result<RecognizedText, OcrError> {
            let png = image.to_png().map_err(|e| OcrError::Unavailable(e.to_string()))?;
            let mut lt = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| OcrError::Unavailable(e.to_string()))?;
            if !settings.language_correction {
                lt.set_variable(Variable::TesseditEnableDictCorrection, "0")
                    .map_err(|e| OcrError::Unavailable(e.to_string()))?;
            }
            tracing::debug!(accuracy = ?settings.accuracy, lang = %self.lang, "running tesseract");
            lt.set_image_from_mem(&png)
                .map_err(|e| OcrError::Unavailable(e.to_string()))?;
            let text = lt.get_utf8_text().map_err(|e| OcrError::Failed(e.to_string()))?;
            Ok(RecognizedText::from_block(&text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::normalize;
    use image::DynamicImage;

    fn card() -> NormalizedImage {
        normalize(&DynamicImage::new_luma8(4, 4))
    }

    #[test]
    fn mock_returns_preset_lines() {
        let r = MockRecognizer::new("Ornate Sword\nAttack: 85");
        let text = r.recognize(&card(), &RecognitionSettings::STAT_SCREEN).unwrap();
        assert_eq!(text.lines().len(), 2);
        assert_eq!(r.calls(), 1);
    }

    #[test]
    fn accept_output_rejects_blank_text() {
        assert_eq!(
            accept_output(RecognizedText::from_block("\n  \n")),
            Err(OcrError::NoTextRecognized)
        );
        assert!(accept_output(RecognizedText::from_block("HP: 3")).is_ok());
    }

    #[test]
    fn stat_screen_settings_are_accurate_without_correction() {
        let adapter = OcrAdapter::new(MockRecognizer::new("x"));
        assert_eq!(adapter.settings().accuracy, Accuracy::Accurate);
        assert!(!adapter.settings().language_correction);
    }

    #[tokio::test]
    async fn adapter_returns_text() {
        let adapter = OcrAdapter::new(MockRecognizer::new("Famed Ring\nWard: 4"));
        let text = adapter.recognize(card()).await.unwrap();
        assert_eq!(text.joined(), "Famed Ring\nWard: 4");
    }

    #[tokio::test]
    async fn adapter_maps_empty_output_to_no_text() {
        let adapter = OcrAdapter::new(MockRecognizer::new(""));
        assert_eq!(adapter.recognize(card()).await, Err(OcrError::NoTextRecognized));
    }

    #[tokio::test]
    async fn adapter_passes_engine_errors_through() {
        let adapter = OcrAdapter::new(MockRecognizer::failing(OcrError::Failed("boom".into())));
        assert_eq!(adapter.recognize(card()).await, Err(OcrError::Failed("boom".into())));
        assert_eq!(adapter.backend().calls(), 1);
    }

    #[tokio::test]
    async fn adapter_rejects_empty_image() {
        let adapter = OcrAdapter::new(MockRecognizer::new("HP: 1"));
        let err = adapter.recognize(normalize(&DynamicImage::new_luma8(0, 0))).await.unwrap_err();
        assert!(matches!(err, OcrError::Unavailable(_)));
        assert_eq!(adapter.backend().calls(), 0);
    }

    #[tokio::test]
    async fn adapter_times_out_slow_engine() {
        let adapter = OcrAdapter::new(
            MockRecognizer::new("HP: 1").with_delay(Duration::from_millis(500)),
        )
        .with_timeout(Some(Duration::from_millis(20)));
        let err = adapter.recognize(card()).await.unwrap_err();
        assert!(matches!(err, OcrError::Failed(ref m) if m.contains("timed out")));
    }

    #[tokio::test]
    async fn unavailable_backend_reports_reason() {
        let adapter = OcrAdapter::new(UnavailableRecognizer::new("built without tesseract"));
        assert_eq!(
            adapter.recognize(card()).await,
            Err(OcrError::Unavailable("built without tesseract".into()))
        );
    }
}
