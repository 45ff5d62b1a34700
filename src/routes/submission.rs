//! Reading the uploaded file out of a multipart request

use axum::extract::Multipart;

use crate::error::{AppError, Result};
use crate::validation::UploadedFile;

/// Name of the file input in the form
pub const FILE_FIELD: &str = "file";

/// Extract the `file` part, if the user selected one.
///
/// Browsers send an empty part with an empty file name when nothing was
/// selected; that counts as no file. Other fields are ignored.
pub async fn read_submission(mut multipart: Multipart) -> Result<Option<UploadedFile>> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            tracing::debug!(field = field.name().unwrap_or(""), "Ignoring form field");
            continue;
        }
        if file.is_some() {
            return Err(AppError::BadRequest(
                "Only one file may be submitted".to_string(),
            ));
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        file = Some(UploadedFile::new(file_name, content_type, bytes));
    }

    Ok(file.filter(|file| !is_empty_selection(file)))
}

fn is_empty_selection(file: &UploadedFile) -> bool {
    file.bytes.is_empty() && file.file_name.as_deref().map_or(true, str::is_empty)
}

#[cfg(test)]
mod tests {
    use axum::body::Bytes;

    use super::*;

    #[test]
    fn test_empty_selection() {
        let empty = UploadedFile::new(
            Some(String::new()),
            Some("application/octet-stream".to_string()),
            Bytes::new(),
        );
        assert!(is_empty_selection(&empty));

        let empty_file = UploadedFile::new(
            Some("empty.pdf".to_string()),
            Some("application/pdf".to_string()),
            Bytes::new(),
        );
        assert!(!is_empty_selection(&empty_file));
    }
}
