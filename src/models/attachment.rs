//! Chart screenshots stored inline on a trade as `data:` URLs.

use std::path::Path;

use base64::Engine;

use crate::error::Result;

/// Mime type guessed from the file extension.
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Reads the file and encodes it as `data:<mime>;base64,<payload>`, the
/// form `Trade::image_url` carries.
pub fn image_data_url(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{};base64,{}", mime_for(path), payload))
}

/// Size in bytes of the payload behind a base64 `data:` URL. `None` for
/// anything else, e.g. a plain http link.
pub fn data_url_size(url: &str) -> Option<usize> {
    let (_, payload) = url.strip_prefix("data:")?.split_once(";base64,")?;
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .ok()
        .map(|b| b.len())
}
