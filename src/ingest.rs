//! Attachment ingest — per-file gating, data-URI encoding, and the
//! sequential pipeline that feeds attachments through the gateway into an
//! in-progress article body.

use std::path::Path;

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::warn;

use crate::archive::types::Attachment;
use crate::archive::ArchiveError;
use crate::gateway::{Gateway, DOCUMENT_SUMMARY_FAILED, IMAGE_EXTRACTION_FAILED};

/// Per-file attachment size cap: 5 MB.
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

const MAX_ATTACHMENT_MB: u64 = 5;

/// Marker inserted above an AI summary appended to a body.
pub const BODY_SUMMARY_MARKER: &str = "-- AI summary --";

/// Infer the MIME type from a file extension. Only the types the form
/// accepts are recognized; anything else is an unsupported attachment.
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}

/// Gate and read one file into an inline [`Attachment`].
///
/// Rejects unsupported types and files over [`MAX_ATTACHMENT_BYTES`] before
/// reading the content, so no oversized payload ever reaches the store.
pub fn load_attachment(path: &Path) -> Result<Attachment> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("attachment")
        .to_string();

    let mime_type = mime_type_for(path)
        .ok_or_else(|| ArchiveError::UnsupportedAttachment { name: name.clone() })?;

    let metadata = std::fs::metadata(path)
        .with_context(|| format!("failed to stat {}", path.display()))?;
    if metadata.len() > MAX_ATTACHMENT_BYTES {
        return Err(ArchiveError::AttachmentTooLarge {
            name,
            limit_mb: MAX_ATTACHMENT_MB,
        }
        .into());
    }

    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    Ok(Attachment {
        name,
        mime_type: mime_type.to_string(),
        content: format!("data:{mime_type};base64,{}", STANDARD.encode(&bytes)),
    })
}

/// Run each attachment through the gateway and append the result to `body`.
///
/// Files are processed one at a time in submission order, each fully
/// resolved (including the remote round-trip) before the next begins, so
/// body appends land in a deterministic order. Images get text extraction,
/// documents get a summary; a payload that fails to decode degrades to the
/// same type-specific fallback string as a remote failure. Empty results are
/// skipped.
pub async fn process_attachments(gateway: &Gateway, attachments: &[Attachment], body: &mut String) {
    for attachment in attachments {
        let text = match attachment.decoded_content() {
            Ok(bytes) => gateway.process_file(&bytes, &attachment.mime_type).await,
            Err(err) => {
                warn!(
                    name = %attachment.name,
                    error = %err,
                    "attachment payload did not decode"
                );
                if attachment.is_image() {
                    IMAGE_EXTRACTION_FAILED.to_string()
                } else {
                    DOCUMENT_SUMMARY_FAILED.to_string()
                }
            }
        };

        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        if !body.is_empty() {
            body.push_str("\n\n");
        }
        body.push_str(text);
    }
}

/// Append an AI-generated summary of the body under a marker line, the way
/// the create form's summarize action does.
pub fn append_summary_to_body(body: &mut String, summary: &str) {
    body.push_str(&format!("\n\n{BODY_SUMMARY_MARKER}\n{summary}"));
}

/// Split comma-separated keyword entry into clean keywords: trimmed, empties
/// dropped, order and duplicates preserved.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn keywords_split_trim_and_drop_empties() {
        assert_eq!(
            parse_keywords(" Rust,  CLI ,, async ,"),
            vec!["Rust", "CLI", "async"]
        );
        assert!(parse_keywords("").is_empty());
        assert!(parse_keywords(" , ,").is_empty());
        // duplicates survive — the model does not deduplicate
        assert_eq!(parse_keywords("a, a"), vec!["a", "a"]);
    }

    #[test]
    fn mime_detection_covers_the_allowed_set_only() {
        assert_eq!(mime_type_for(Path::new("x.png")), Some("image/png"));
        assert_eq!(mime_type_for(Path::new("x.JPG")), Some("image/jpeg"));
        assert_eq!(mime_type_for(Path::new("x.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_type_for(Path::new("x.pdf")), Some("application/pdf"));
        assert_eq!(mime_type_for(Path::new("x.gif")), None);
        assert_eq!(mime_type_for(Path::new("noext")), None);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.txt");
        std::fs::write(&path, b"plain text").unwrap();

        let err = load_attachment(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ArchiveError>(),
            Some(ArchiveError::UnsupportedAttachment { .. })
        ));
    }

    #[test]
    fn oversized_file_is_rejected_by_the_size_gate() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("big.pdf");
        std::fs::write(&path, vec![0u8; (MAX_ATTACHMENT_BYTES + 1) as usize]).unwrap();

        let err = load_attachment(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ArchiveError>(),
            Some(ArchiveError::AttachmentTooLarge { limit_mb: 5, .. })
        ));
    }

    #[test]
    fn accepted_file_round_trips_through_the_data_uri() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("shot.png");
        std::fs::write(&path, b"fake png bytes").unwrap();

        let attachment = load_attachment(&path).unwrap();
        assert_eq!(attachment.name, "shot.png");
        assert_eq!(attachment.mime_type, "image/png");
        assert!(attachment.content.starts_with("data:image/png;base64,"));
        assert_eq!(attachment.decoded_content().unwrap(), b"fake png bytes");
    }

    #[test]
    fn body_summary_lands_under_the_marker() {
        let mut body = "original notes".to_string();
        append_summary_to_body(&mut body, "the gist");
        assert_eq!(body, "original notes\n\n-- AI summary --\nthe gist");
    }
}
