use base64::{Engine as _, engine::general_purpose};
use image::ImageFormat;

use super::ValidationError;

/// Largest accepted avatar payload, in bytes.
pub const MAX_AVATAR_BYTES: usize = 1024 * 1024;

/// Image formats accepted for avatars.
const SUPPORTED_FORMATS: [ImageFormat; 2] = [ImageFormat::Jpeg, ImageFormat::Png];

/// Validate uploaded avatar bytes and return the detected format.
///
/// The size cap is enforced before format detection: an oversized file
/// reports the size failure even if its bytes are not an image at all.
pub fn validate_avatar(bytes: &[u8]) -> Result<ImageFormat, ValidationError> {
    if bytes.len() > MAX_AVATAR_BYTES {
        return Err(ValidationError::Size("Image size exceeds 1 MB".to_string()));
    }

    let format = image::guess_format(bytes)
        .map_err(|_| ValidationError::Format("Invalid image format".to_string()))?;

    if !SUPPORTED_FORMATS.contains(&format) {
        return Err(ValidationError::Format(format!(
            "Unsupported image format: {format:?}. Use one of: JPEG, PNG"
        )));
    }

    Ok(format)
}

/// Decode a `data:image/...;base64,` URI into raw image bytes.
pub fn decode_avatar_data_uri(uri: &str) -> Result<Vec<u8>, ValidationError> {
    let rest = uri.strip_prefix("data:image/").ok_or_else(|| {
        ValidationError::Format("Avatar must be an image data URI".to_string())
    })?;

    let payload = rest
        .split_once(";base64,")
        .map(|(_, payload)| payload)
        .ok_or_else(|| {
            ValidationError::Format("Avatar data URI must be base64-encoded".to_string())
        })?;

    general_purpose::STANDARD.decode(payload).map_err(|_| {
        ValidationError::Format("Avatar data URI payload is not valid base64".to_string())
    })
}
