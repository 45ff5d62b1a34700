//! Signature phrase scanning

use serde::Serialize;

use super::phrases::PhraseSet;
use crate::pdf::{PageText, PdfTextSource};

/// Result of scanning one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ScanOutcome {
    /// A phrase was found; scanning stopped at this page
    Found { phrase: String, page: u32 },
    /// Every page was scanned without a match
    #[serde(rename_all = "camelCase")]
    NotFound { pages_scanned: u32 },
    /// The document could not be decoded or a page could not be read
    Unreadable { reason: String },
}

impl ScanOutcome {
    /// Whether the document counts as signed.
    ///
    /// An unreadable document is indistinguishable from one without a phrase.
    pub fn is_match(&self) -> bool {
        matches!(self, ScanOutcome::Found { .. })
    }
}

/// Scans documents for the first page containing a signature phrase
#[derive(Debug, Clone, Default)]
pub struct SignatureScanner {
    phrases: PhraseSet,
}

impl SignatureScanner {
    pub fn new(phrases: PhraseSet) -> Self {
        Self { phrases }
    }

    pub fn phrases(&self) -> &PhraseSet {
        &self.phrases
    }

    /// Decode a PDF and scan it. Never fails: decode errors become
    /// [`ScanOutcome::Unreadable`].
    pub fn scan(&self, bytes: &[u8]) -> ScanOutcome {
        match PdfTextSource::load(bytes) {
            Ok(source) => self.scan_pages(&source),
            Err(e) => {
                tracing::error!(error = %e, size = bytes.len(), "PDF decode failed");
                ScanOutcome::Unreadable {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// `true` iff some page contains some phrase
    pub fn has_signature(&self, bytes: &[u8]) -> bool {
        self.scan(bytes).is_match()
    }

    /// Scan pages in order, stopping at the first phrase found.
    pub fn scan_pages<S: PageText>(&self, source: &S) -> ScanOutcome {
        let page_count = source.page_count();
        tracing::info!(page_count, "Scanning document for signature phrases");

        for page in 1..=page_count {
            let text = match source.page_text(page) {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!(page, error = %e, "Text extraction failed");
                    return ScanOutcome::Unreadable {
                        reason: e.to_string(),
                    };
                }
            };

            if let Some(phrase) = self.phrases.first_match(&text) {
                tracing::info!(page, phrase, "Found signature phrase");
                return ScanOutcome::Found {
                    phrase: phrase.to_string(),
                    page,
                };
            }
        }

        tracing::info!(page_count, "No signature phrase found");
        ScanOutcome::NotFound {
            pages_scanned: page_count,
        }
    }
}
