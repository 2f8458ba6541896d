//! Local attachment checks, run before any upload request is issued.

use nexus_types::{
    ChatError, Result,
    upload::{FileUpload, UploadLimits},
};

const MIB: f64 = 1024.0 * 1024.0;

pub fn validate_upload(file: &FileUpload, limits: &UploadLimits) -> Result<()> {
    if file.filename.trim().is_empty() {
        return Err(ChatError::Validation("No file selected".to_string()));
    }

    if !limits.allows_mime(&file.mime_type) {
        return Err(ChatError::Validation(format!(
            "File type \"{}\" not supported! Please upload PDF, Word, Excel, PowerPoint, text or image files.",
            file.mime_type
        )));
    }

    if file.size() > limits.max_bytes {
        return Err(ChatError::Validation(format!(
            "File size {:.2}MB is too large! Please upload files smaller than {:.0}MB.",
            file.size() as f64 / MIB,
            limits.max_bytes as f64 / MIB
        )));
    }

    Ok(())
}
