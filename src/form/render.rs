//! Server-side HTML for the upload form

use super::FormState;
use crate::validation::PDF_MIME_TYPE;

const SUBMIT_LABEL: &str = "Validate PDF";
const SUBMITTING_LABEL: &str = "Validating...";

const SUCCESS_PANEL: &str = r#"<div class="result">
      <h3 class="success">Valid PDF</h3>
      <p>The document contains at least one required signature string.</p>
    </div>"#;

/// Full page for the given form state
pub fn render_page(state: &FormState) -> String {
    let error = state
        .error_message()
        .map(|message| {
            format!(
                r#"<p class="error" role="alert">{}</p>"#,
                html_escape::encode_text(message)
            )
        })
        .unwrap_or_default();
    let result = match state {
        FormState::Succeeded => SUCCESS_PANEL,
        _ => "",
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>PDF Signature Validator</title>
  <style>
    body {{ font-family: sans-serif; max-width: 40rem; margin: 3rem auto; }}
    .error {{ color: #b00020; }}
    .success {{ color: #1b7a1b; }}
  </style>
</head>
<body>
  <div class="container">
    <h1>PDF Signature Validator</h1>
    <p>Upload a PDF to check for required signature strings.</p>

    <form id="upload-form" method="post" action="/" enctype="multipart/form-data">
      <div class="form-group">
        <input type="file" name="file" accept="{accept}">
        {error}
      </div>

      {button}
    </form>

    {result}
  </div>
  <template id="submitting-button">{submitting}</template>
  <script>
    document.getElementById("upload-form").addEventListener("submit", function () {{
      var pending = document.getElementById("submitting-button").content.cloneNode(true);
      document.getElementById("submit").replaceWith(pending);
    }});
  </script>
</body>
</html>
"#,
        accept = PDF_MIME_TYPE,
        error = error,
        button = submit_button(state),
        result = result,
        submitting = submit_button(&FormState::Submitting),
    )
}

fn submit_button(state: &FormState) -> String {
    if state.is_submitting() {
        format!(r#"<button id="submit" type="submit" disabled>{SUBMITTING_LABEL}</button>"#)
    } else {
        format!(r#"<button id="submit" type="submit">{SUBMIT_LABEL}</button>"#)
    }
}
