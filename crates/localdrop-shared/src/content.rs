//! Conversion between raw file bytes and the inline `content` string.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::DownloadError;
use crate::types::is_image_mime;

/// Turn raw bytes into the stored representation.
///
/// Images become `data:<mime>;base64,<payload>`. Everything else is decoded
/// as UTF-8, with invalid sequences replaced by U+FFFD.
pub fn encode_content(bytes: &[u8], mime_type: &str) -> String {
    if is_image_mime(mime_type) {
        to_data_uri(bytes, mime_type)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

pub fn to_data_uri(bytes: &[u8], mime_type: &str) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Extract the payload of a base64 `data:` URI.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, DownloadError> {
    let rest = uri.strip_prefix("data:").ok_or(DownloadError::NotDataUri)?;
    let (meta, payload) = rest.split_once(',').ok_or(DownloadError::NotDataUri)?;
    if !meta.ends_with(";base64") {
        return Err(DownloadError::NotDataUri);
    }
    STANDARD
        .decode(payload.trim())
        .map_err(|_| DownloadError::Base64Decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_kept_verbatim() {
        assert_eq!(encode_content(b"fn main() {}\n", "text/x-rust"), "fn main() {}\n");
        assert_eq!(encode_content(b"plain", ""), "plain");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        assert_eq!(encode_content(&[b'a', 0xff, b'b'], "text/plain"), "a\u{fffd}b");
    }

    #[test]
    fn images_become_data_uris() {
        let uri = encode_content(&[0x89, b'P', b'N', b'G'], "image/png");
        assert_eq!(uri, "data:image/png;base64,iVBORw==");
        assert_eq!(decode_data_uri(&uri).unwrap(), vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn non_data_uri_is_rejected() {
        assert!(matches!(
            decode_data_uri("hello"),
            Err(DownloadError::NotDataUri)
        ));
        assert!(matches!(
            decode_data_uri("data:text/plain,hello"),
            Err(DownloadError::NotDataUri)
        ));
        assert!(matches!(
            decode_data_uri("data:image/png;base64,@@@"),
            Err(DownloadError::Base64Decode)
        ));
    }
}
