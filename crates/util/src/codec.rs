//! Input literal and proof payload encoding.
//!
//! Users pass circuit inputs as `value:type` literals, where `type` is one of `i64`, `bytes`
//! or `bytes-packed` and `value` is a decimal or `0x`-prefixed hex numeral. They are decoded
//! into big-number chunks of 16 hex characters, while binary proof payloads are decoded into
//! 32-byte little-endian chunks. The two rules feed different arguments of the verifier call
//! and are not interchangeable.

use num_bigint::BigUint;
use thiserror::Error;
use tracing::warn;

/// Hex characters per chunk when decoding a `bytes` literal.
pub const HEX_CHUNK_LEN: usize = 16;

/// Bytes per chunk when decoding a binary payload.
pub const BYTES_CHUNK_LEN: usize = 32;

/// Reason a single literal was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseArgError {
    /// The value is neither a decimal nor a hex numeral.
    #[error("input value is not an integer number")]
    NotInteger,
    /// A `bytes` literal without `0x` prefix.
    #[error("bytes input need start with 0x")]
    MissingHexPrefix,
    /// The type tag is not `i64`, `bytes` or `bytes-packed`.
    #[error("unsupported input data type: {0}")]
    UnsupportedType(String),
}

/// Errors of the batch decoding functions.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A literal of the batch was rejected.
    #[error("invalid args in {input}")]
    InvalidArgs {
        /// The offending literal, trimmed.
        input: String,
        /// Why it was rejected.
        #[source]
        source: ParseArgError,
    },
    /// The string contains a non-hex character.
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// A value does not fit in a `uint256` argument.
    #[error("value does not fit in 256 bits: {0}")]
    Overflow(String),
}

/// Decodes one `value:type` literal.
///
/// The numeral check looks at `value[2..]` for the hex form whether or not the value carries
/// a `0x` prefix, so `"12ab:bytes"` gets past it and is rejected for its missing prefix
/// instead.
pub fn parse_arg(input: &str) -> Result<Vec<BigUint>, ParseArgError> {
    let mut fields = input.split(':');
    let value = fields.next().unwrap_or_default();
    let ty = fields.next().unwrap_or_default();

    let is_hex = is_hex(value.get(2..).unwrap_or_default());
    if !(is_hex || is_decimal(value)) {
        warn!(%input, "input value is not an integer number");
        return Err(ParseArgError::NotInteger);
    }

    match ty {
        "i64" => {
            let parsed = match value.strip_prefix("0x") {
                Some(hex) => BigUint::parse_bytes(hex.as_bytes(), 16),
                None => BigUint::parse_bytes(value.as_bytes(), 10),
            };
            parsed.map(|v| vec![v]).ok_or_else(|| {
                warn!(%input, "input value is not an integer number");
                ParseArgError::NotInteger
            })
        }
        "bytes" | "bytes-packed" => {
            let Some(hex) = value.strip_prefix("0x") else {
                warn!(%input, "bytes input need start with 0x");
                return Err(ParseArgError::MissingHexPrefix);
            };
            // `hex` is `value[2..]`, already accepted by the numeral check.
            hex_to_bns(hex).map_err(|_| ParseArgError::NotInteger)
        }
        _ => {
            warn!(%input, "unsupported input data type: {ty}");
            Err(ParseArgError::UnsupportedType(ty.to_string()))
        }
    }
}

/// Decodes a list of literals into one flat chunk sequence.
///
/// Blank entries are skipped. The first rejected literal fails the whole batch.
pub fn parse_args<S: AsRef<str>>(raw: &[S]) -> Result<Vec<BigUint>, CodecError> {
    let mut parsed = Vec::new();
    for input in raw {
        let input = input.as_ref().trim();
        if input.is_empty() {
            continue;
        }
        let args = parse_arg(input).map_err(|source| CodecError::InvalidArgs {
            input: input.to_string(),
            source,
        })?;
        parsed.extend(args);
    }
    Ok(parsed)
}

/// Splits a hex string (without `0x`) into chunks of at most [`HEX_CHUNK_LEN`] characters,
/// each parsed in base 16. The last chunk may be shorter.
pub fn hex_to_bns(hex: &str) -> Result<Vec<BigUint>, CodecError> {
    hex.as_bytes()
        .chunks(HEX_CHUNK_LEN)
        .map(|chunk| {
            BigUint::parse_bytes(chunk, 16)
                .filter(|_| chunk.iter().all(u8::is_ascii_hexdigit))
                .ok_or_else(|| CodecError::InvalidHex(hex.to_string()))
        })
        .collect()
}

/// Splits a byte buffer into chunks of at most [`BYTES_CHUNK_LEN`] bytes, each read as a
/// little-endian unsigned integer. The last chunk may be shorter.
pub fn bytes_to_bn(data: &[u8]) -> Vec<BigUint> {
    data.chunks(BYTES_CHUNK_LEN)
        .map(BigUint::from_bytes_le)
        .collect()
}

fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
