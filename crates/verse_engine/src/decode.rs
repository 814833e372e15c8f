use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use verse_core::RawResponse;
use verse_logging::verse_warn;

use crate::FetchOutput;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBody {
    pub text: String,
    pub encoding_label: String,
    /// True when malformed sequences were replaced.
    pub had_errors: bool,
}

/// Decode raw bytes into UTF-8 using: BOM -> Content-Type charset -> valid UTF-8 -> chardetng fallback.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> DecodedBody {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(label) = content_type.and_then(extract_charset) {
        if let Some(enc) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, enc);
        }
    }

    // JSON is UTF-8 on the wire; only guess when the bytes say otherwise.
    if std::str::from_utf8(bytes).is_ok() {
        return decode_with(bytes, UTF_8);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc)
}

/// Turns a fetched body into a `RawResponse`. Bodies that are not JSON are
/// kept as text; this never fails.
pub fn decode_response(output: &FetchOutput) -> RawResponse {
    let decoded = decode_body(&output.bytes, output.metadata.content_type.as_deref());
    if decoded.had_errors {
        verse_warn!(
            "Body from {} had malformed {} sequences; replacement characters kept",
            output.metadata.final_url,
            decoded.encoding_label
        );
    }
    RawResponse::from_body(&decoded.text)
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let (key, value) = part.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim_matches([' ', '"', '\''].as_ref()))
        })
        .next()
        .map(|s| s.to_string())
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> DecodedBody {
    let (text, used, had_errors) = enc.decode(bytes);
    DecodedBody {
        text: text.into_owned(),
        encoding_label: used.name().to_string(),
        had_errors,
    }
}
