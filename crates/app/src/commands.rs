use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use orna_core::{AssessConfig, Assessment, OcrConfig, OutputFormat, RecognizedText};
use orna_ocr::{assess_text, AssessmentPipeline, OcrBackend, OcrError, PipelineError};

#[cfg(feature = "tesseract")]
type Engine = orna_ocr::recognizer::tesseract_backend::TesseractRecognizer;
#[cfg(not(feature = "tesseract"))]
type Engine = orna_ocr::UnavailableRecognizer;

#[cfg(feature = "tesseract")]
fn engine(config: &OcrConfig) -> Engine {
    Engine::new(config.tessdata.clone(), &config.language)
}

#[cfg(not(feature = "tesseract"))]
fn engine(_config: &OcrConfig) -> Engine {
    Engine::new("built without the `tesseract` feature")
}

/// Assess every screenshot concurrently and print the results in input order.
pub async fn assess_images(paths: Vec<PathBuf>, config: &AssessConfig) -> anyhow::Result<bool> {
    let pipeline =
        Arc::new(AssessmentPipeline::new(engine(&config.ocr)).with_timeout(config.ocr.timeout()));

    let mut all_ok = true;
    for (path, result) in run_batch(pipeline, paths).await {
        all_ok &= result.is_ok();
        println!("{}", render_outcome(&path, result, config.output.format)?);
    }
    Ok(all_ok)
}

/// Assess a text file holding OCR output, one recognized line per line.
pub async fn assess_text_file(path: &Path, format: OutputFormat) -> anyhow::Result<bool> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let result = assess_text(RecognizedText::from_block(&content)).map_err(PipelineError::from);
    let ok = result.is_ok();
    println!("{}", render_outcome(path, result, format)?);
    Ok(ok)
}

/// One independent pipeline run per path. Results come back in input order.
pub async fn run_batch<R: OcrBackend + 'static>(
    pipeline: Arc<AssessmentPipeline<R>>,
    paths: Vec<PathBuf>,
) -> Vec<(PathBuf, Result<Assessment, PipelineError>)> {
    fan_out(paths, move |path| {
        let pipeline = Arc::clone(&pipeline);
        async move {
            tracing::info!("Assessing screenshot: {}", path.display());
            pipeline.assess_file(&path).await
        }
    })
    .await
}

/// Spawn `job` once per path. A task that panics or is aborted still yields
/// an outcome for its path.
async fn fan_out<F, Fut>(
    paths: Vec<PathBuf>,
    job: F,
) -> Vec<(PathBuf, Result<Assessment, PipelineError>)>
where
    F: Fn(PathBuf) -> Fut,
    Fut: Future<Output = Result<Assessment, PipelineError>> + Send + 'static,
{
    let tasks: Vec<_> = paths
        .into_iter()
        .map(|path| {
            let task = tokio::spawn(job(path.clone()));
            (path, task)
        })
        .collect();

    let mut outcomes = Vec::with_capacity(tasks.len());
    for (path, task) in tasks {
        let result = match task.await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Assessment task for {} failed: {e}", path.display());
                Err(PipelineError::Aborted(e.to_string()))
            }
        };
        outcomes.push((path, result));
    }
    outcomes
}

pub fn render_outcome(
    path: &Path,
    result: Result<Assessment, PipelineError>,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match (result, format) {
        (Ok(assessment), OutputFormat::Text) => {
            Ok(format!("== {}\n{}\n", path.display(), assessment.report()))
        }
        (Ok(assessment), OutputFormat::Json) => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "file": path.display().to_string(),
            "assessment": assessment,
        }))?),
        (Err(e), OutputFormat::Text) => {
            let mut out = format!("== {}\nError: {e}\n", path.display());
            if let Some(tips) = guidance(&e) {
                out.push('\n');
                out.push_str(tips);
                out.push('\n');
            }
            Ok(out)
        }
        (Err(e), OutputFormat::Json) => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "file": path.display().to_string(),
            "error": e.to_string(),
            "guidance": guidance(&e),
        }))?),
    }
}

/// What the user can do about a failed run.
pub fn guidance(error: &PipelineError) -> Option<&'static str> {
    match error {
        PipelineError::Ocr(OcrError::NoTextRecognized) => Some(
            "Could not recognize text in the image. Some tips:\n\
             - Ensure good lighting\n\
             - Hold the device steady\n\
             - Make sure text is clearly visible\n\
             - Try cropping the image to focus on the item stats",
        ),
        PipelineError::Ocr(OcrError::Failed(_)) => {
            Some("The OCR engine failed on this image. Try again with a clearer screenshot.")
        }
        PipelineError::Ocr(OcrError::Unavailable(_)) => Some(
            "No OCR engine is available. Install Tesseract and build with `--features tesseract`.",
        ),
        PipelineError::Preprocess(_) => Some("The file could not be decoded. Use a PNG or JPEG screenshot."),
        PipelineError::Io(_) | PipelineError::Cancelled | PipelineError::Aborted(_) => None,
    }
}
