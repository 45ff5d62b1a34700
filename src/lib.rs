//! PDF Signature Validator
//!
//! A small upload service that accepts a PDF and reports whether any of its
//! pages carries one of the required signature phrases.
//!
//! # Modules
//!
//! - `pdf`: Page text extraction built on lopdf
//! - `signature`: Phrase set and the page-by-page scanner
//! - `validation`: Ordered checks run on each submission
//! - `form`: Form states and the HTML page
//! - `routes`: HTTP endpoints

pub mod config;
pub mod error;
pub mod form;
pub mod pdf;
pub mod routes;
pub mod signature;
pub mod state;
pub mod validation;
