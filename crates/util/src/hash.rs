//! Image identity.

use md5::{Digest, Md5};

/// Lowercase hex MD5 digest of `data`, the identity the service gives an uploaded image.
pub fn convert_to_md5(data: &[u8]) -> String {
    format!("{:x}", Md5::digest(data))
}
