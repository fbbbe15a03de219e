use std::future::Future;
use std::path::Path;
use std::time::Duration;

use image::DynamicImage;
use orna_core::{Assessment, RecognizedText};
use thiserror::Error;

use crate::classify::classify;
use crate::compose::compose;
use crate::extract::Extractor;
use crate::preprocess::{self, PreprocessError};
use crate::recognizer::{accept_output, OcrAdapter, OcrBackend, OcrError};
use crate::screen;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image preprocessing failed: {0}")]
    Preprocess(#[from] PreprocessError),
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
    #[error("Assessment cancelled before recognition finished")]
    Cancelled,
    #[error("Assessment task aborted: {0}")]
    Aborted(String),
}

/// Orchestrates: normalize → OCR → extract stats → classify → compose.
///
/// Holds no per-run state, so one pipeline can serve any number of
/// concurrent runs.
pub struct AssessmentPipeline<R> {
    ocr: OcrAdapter<R>,
}

impl<R: OcrBackend + 'static> AssessmentPipeline<R> {
    pub fn new(recognizer: R) -> Self {
        Self { ocr: OcrAdapter::new(recognizer) }
    }

    pub fn with_timeout(self, timeout: Option<Duration>) -> Self {
        Self { ocr: self.ocr.with_timeout(timeout) }
    }

    pub fn recognizer(&self) -> &R {
        self.ocr.backend()
    }

    /// Assess a screenshot on disk.
    pub async fn assess_file(&self, path: &Path) -> Result<Assessment, PipelineError> {
        let bytes = tokio::fs::read(path).await?;
        self.assess_bytes(&bytes).await
    }

    /// Assess an encoded screenshot (PNG / JPEG / …).
    pub async fn assess_bytes(&self, data: &[u8]) -> Result<Assessment, PipelineError> {
        let image = image::load_from_memory(data).map_err(PreprocessError::from)?;
        self.assess_image(&image).await
    }

    pub async fn assess_image(&self, image: &DynamicImage) -> Result<Assessment, PipelineError> {
        self.assess_image_until(image, std::future::pending()).await
    }

    /// Like [`AssessmentPipeline::assess_image`], but gives up as soon as
    /// `cancel` resolves. A cancelled run never reaches extraction.
    pub async fn assess_image_until<C>(
        &self,
        image: &DynamicImage,
        cancel: C,
    ) -> Result<Assessment, PipelineError>
    where
        C: Future<Output = ()>,
    {
        let screen = screen::detect_screen_type(image);
        tracing::debug!(?screen, width = image.width(), height = image.height(), "assessing screenshot");

        let normalized = preprocess::normalize(image);

        let recognized = tokio::select! {
            biased;
            _ = cancel => {
                tracing::info!("assessment cancelled during OCR");
                return Err(PipelineError::Cancelled);
            }
            result = self.ocr.recognize(normalized) => result,
        };

        let text = match recognized {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("OCR failed: {e}");
                return Err(e.into());
            }
        };
        tracing::debug!(lines = text.lines().len(), "text recognized");

        Ok(assess_recognized(&text))
    }
}

/// Run the post-OCR stages on text that is already known to be non-empty.
pub fn assess_recognized(text: &RecognizedText) -> Assessment {
    let stats = Extractor::extract_stats(text);
    let classification = classify(text, &stats);
    compose(stats, classification)
}

/// Assess text recognized elsewhere. Blank text is rejected the same way
/// the OCR boundary rejects it.
pub fn assess_text(text: RecognizedText) -> Result<Assessment, OcrError> {
    let text = accept_output(text)?;
    Ok(assess_recognized(&text))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
