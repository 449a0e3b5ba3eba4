use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use thiserror::Error;

/// Standard alphabet, forgiving about padding and trailing bits, the way a
/// browser's `atob` treats attachment bodies.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Failure to recover text from a transported payload
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("decoded payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Decode a base64 payload back into the UTF-8 text it carries.
///
/// Works in two stages: the base64 layer is reversed into raw bytes, then the
/// bytes are reinterpreted as UTF-8 so multi-byte characters survive.
/// ASCII whitespace anywhere in the payload is ignored.
pub fn decode(raw: &str) -> Result<String, DecodeError> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = PAYLOAD_ENGINE.decode(compact.as_bytes())?;
    let text = String::from_utf8(bytes)?;
    Ok(text)
}

/// Encode text the way producers ship it. Used by tests and fixtures.
pub fn encode(text: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_ascii_payload() {
        assert_eq!(decode("aGVsbG8gd29ybGQ=").unwrap(), "hello world");
    }

    #[test]
    fn decodes_multibyte_text() {
        let text = "Überprüfung — 流程 ✓";
        assert_eq!(decode(&encode(text)).unwrap(), text);
    }

    #[test]
    fn padding_is_optional() {
        assert_eq!(decode("aGVsbG8").unwrap(), "hello");
        assert_eq!(decode("aGVsbG8=").unwrap(), "hello");
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(decode("aGVs\nbG8g\r\nd29y bGQ=").unwrap(), "hello world");
    }

    #[test]
    fn rejects_non_alphabet_characters() {
        assert!(matches!(decode("not*base64!"), Err(DecodeError::Base64(_))));
    }

    #[test]
    fn rejects_invalid_utf8() {
        // 0xFF 0xFE is never valid UTF-8
        assert!(matches!(decode("//4="), Err(DecodeError::Utf8(_))));
    }

    #[test]
    fn empty_payload_is_empty_text() {
        assert_eq!(decode("").unwrap(), "");
    }
}
