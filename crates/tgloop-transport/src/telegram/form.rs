//! Multipart body for calls that upload files.

use reqwest::multipart::{Form, Part};
use tgloop_core::{error::TgError, request::Params, request::ParamValue};

pub(super) fn multipart(params: Params) -> Result<Form, TgError> {
    let mut form = Form::new();
    for (name, value) in params {
        form = match value {
            ParamValue::File(file) => {
                let mut part = Part::bytes(file.data).file_name(file.file_name);
                if let Some(mime) = file.mime_type {
                    part = part.mime_str(&mime).map_err(|e| {
                        TgError::InvalidRequest(format!("bad mime type '{mime}': {e}"))
                    })?;
                }
                form.part(name, part)
            }
            scalar => form.text(name, scalar.to_form_value().unwrap_or_default()),
        };
    }
    Ok(form)
}
