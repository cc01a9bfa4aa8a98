//! Summarization gateway — the bridge to the remote generative-AI service.
//!
//! Provides the narrow [`GenerativeModel`] trait (text in, text out; bytes +
//! MIME in, text out), the [`GeminiModel`] implementation, and the
//! [`Gateway`] wrapper that owns the never-throws contract: every operation
//! resolves to a display-ready string, degrading to a fixed fallback message
//! on any failure. The gateway never corrupts store state and never raises
//! to its caller.

pub mod gemini;

use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

/// Returned by [`Gateway::summarize`] for empty or whitespace-only input,
/// without calling the remote service.
pub const NOTHING_TO_SUMMARIZE: &str = "There is no text to summarize.";

/// Fallback when a text summarization call fails for any reason.
pub const SUMMARY_FAILED: &str =
    "Something went wrong while generating the AI summary. Please try again in a moment.";

/// Fallback when text extraction from an image attachment fails.
pub const IMAGE_EXTRACTION_FAILED: &str =
    "Something went wrong while extracting text from the image.";

/// Fallback when summarizing a document attachment fails.
pub const DOCUMENT_SUMMARY_FAILED: &str =
    "Something went wrong while summarizing the document.";

const EXTRACT_TEXT_PROMPT: &str =
    "Extract all text from this image. Respond with the extracted text only, \
     without any additional commentary.";

const DOCUMENT_SUMMARY_PROMPT: &str = "Summarize the key points of this document.";

fn summarize_prompt(text: &str) -> String {
    format!(
        "Summarize the following text in 3 to 5 sentences, keeping only the \
         essential points. The summary must retain the key terms of the \
         original and be written in a formal register.\n\n\
         [Text to summarize]:\n\"{text}\""
    )
}

/// The remote text-generation service, reduced to the two calls the archive
/// needs. Implementations may fail; [`Gateway`] absorbs those failures.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Complete a plain-text instruction and return the generated text.
    async fn generate_text(&self, prompt: &str) -> Result<String>;

    /// Complete an instruction over inline file bytes with the given MIME
    /// type and return the generated text.
    async fn generate_from_file(&self, prompt: &str, data: &[u8], mime_type: &str)
        -> Result<String>;
}

/// Thin adapter in front of a [`GenerativeModel`] enforcing the
/// always-resolves-to-a-string contract.
pub struct Gateway {
    model: Box<dyn GenerativeModel>,
}

impl Gateway {
    pub fn new(model: Box<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Summarize free text into 3–5 formal sentences retaining key terms.
    ///
    /// Empty input short-circuits to [`NOTHING_TO_SUMMARIZE`] without a
    /// remote call; a failed call resolves to [`SUMMARY_FAILED`].
    pub async fn summarize(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return NOTHING_TO_SUMMARIZE.to_string();
        }
        match self.model.generate_text(&summarize_prompt(text)).await {
            Ok(summary) => summary,
            Err(err) => {
                warn!(error = %err, "summarization call failed");
                SUMMARY_FAILED.to_string()
            }
        }
    }

    /// Extract text from an image, or summarize any other document type.
    ///
    /// A failed call resolves to the type-specific fallback string.
    pub async fn process_file(&self, data: &[u8], mime_type: &str) -> String {
        let is_image = mime_type.starts_with("image/");
        let prompt = if is_image {
            EXTRACT_TEXT_PROMPT
        } else {
            DOCUMENT_SUMMARY_PROMPT
        };

        match self.model.generate_from_file(prompt, data, mime_type).await {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, mime_type, "file processing call failed");
                if is_image {
                    IMAGE_EXTRACTION_FAILED.to_string()
                } else {
                    DOCUMENT_SUMMARY_FAILED.to_string()
                }
            }
        }
    }
}

/// Create the configured model implementation.
///
/// Currently only `"gemini"` is supported. The API key is read from the
/// environment variable named in config (default `GEMINI_API_KEY`).
pub fn create_model(
    config: &crate::config::GatewayConfig,
) -> Result<Box<dyn GenerativeModel>> {
    match config.provider.as_str() {
        "gemini" => {
            let model = gemini::GeminiModel::from_config(config)?;
            Ok(Box::new(model))
        }
        other => anyhow::bail!("unknown gateway provider: {other}. Supported: gemini"),
    }
}
