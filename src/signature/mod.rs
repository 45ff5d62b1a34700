//! Signature detection
//!
//! A document counts as signed when the text of any of its pages contains
//! one of a fixed set of signature block labels.

mod phrases;
mod scanner;

pub use phrases::{PhraseSet, SIGNATURE_PHRASES};
pub use scanner::{ScanOutcome, SignatureScanner};
