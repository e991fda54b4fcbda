use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode body as {encoding}")]
    Malformed { encoding: String },
}

/// Decodes a response body to UTF-8: BOM, then Content-Type charset, then detection.
///
/// Bodies that are already valid UTF-8 skip detection.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> Result<String, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(encoding) = content_type
        .and_then(charset_label)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return decode_with(bytes, encoding);
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_string());
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn charset_label(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (name, value) = part.trim().split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim_matches([' ', '"', '\'']).to_string())
    })
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<String, DecodeError> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::Malformed {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_charset_header() {
        let bytes = b"[\"caf\xe9\"]";
        let text = decode_body(bytes, Some("application/json; charset=ISO-8859-1")).unwrap();
        assert_eq!(text, "[\"café\"]");
    }

    #[test]
    fn strips_utf8_bom() {
        let text = decode_body(b"\xEF\xBB\xBF[]", Some("application/json")).unwrap();
        assert_eq!(text, "[]");
    }

    #[test]
    fn plain_utf8_passes_through() {
        let text = decode_body("[\"naïve\"]".as_bytes(), None).unwrap();
        assert_eq!(text, "[\"naïve\"]");
    }

    #[test]
    fn malformed_utf8_with_declared_charset_fails() {
        let err = decode_body(b"[\"\xff\xfe\xfd\"", Some("application/json; charset=utf-8"));
        assert!(err.is_err());
    }
}
