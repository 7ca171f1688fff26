//! Local helpers of the zkWasm service SDK.
//!
//! - [`codec`] - Converts `value:type` input literals and raw proof bytes into big-number
//!   chunks in the layout the verifier contract expects
//! - [`hash`] - MD5 identity of WASM images
//! - [`message`] - Payloads users sign before calling the service
//! - [`verify`] - On-chain proof verification through the aggregator verifier contract
//!
//! ## Example
//!
//! ```
//! use zkwasm_util::codec::parse_args;
//!
//! let args = parse_args(&["5:i64", "0x0102:bytes"]).unwrap();
//! assert_eq!(args.len(), 2);
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod codec;
pub mod hash;
pub mod message;
pub mod verify;

pub use codec::{CodecError, ParseArgError};
