//! PDF text extraction
//!
//! Page-addressable text access backed by lopdf. Text is collected per page
//! as a sequence of text runs (one per text-showing operator) and decoded
//! through the active font's ToUnicode CMap where one exists.

mod cmap;
mod text;

#[cfg(test)]
pub(crate) mod fixtures;

pub use cmap::ToUnicodeCMap;
pub use text::{PageText, PdfTextError, PdfTextSource, RUN_SEPARATOR};
