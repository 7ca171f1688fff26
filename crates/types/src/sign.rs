//! Parameter records whose serialization users sign before calling the service.
//!
//! Field order is part of the signed payload and must not be changed.

use serde::{Deserialize, Serialize};

/// Metadata of a new image upload. Signed as the plain concatenation of its fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddImageParams {
    /// Display name of the image.
    pub name: String,
    /// MD5 of the WASM image.
    pub image_md5: String,
    /// Uploading user.
    pub user_address: String,
    /// Link to a description of the image.
    pub description_url: String,
    /// Link to an avatar for the image.
    pub avator_url: String,
    /// Circuit size parameter (k).
    pub circuit_size: u32,
}

/// Query for task logs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsParams {
    /// Requesting user.
    pub user_address: String,
    /// Task identifier.
    pub id: String,
}

/// Signed form of a proving request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvingParams {
    /// Submitting user.
    pub user_address: String,
    /// Image MD5.
    pub md5: String,
    /// Public input literals.
    pub public_inputs: Vec<String>,
    /// Private input literals.
    pub private_inputs: Vec<String>,
}

/// Signed form of a deployment request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployParams {
    /// Submitting user.
    pub user_address: String,
    /// Image MD5.
    pub md5: String,
    /// Target chain.
    pub chain_id: u64,
}

/// Request to reset an image with a new circuit size.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetImageParams {
    /// Image MD5.
    pub md5: String,
    /// New circuit size.
    pub circuit_size: u32,
    /// Owner of the image.
    pub user_address: String,
}

/// Request to change the metadata of an image.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyImageParams {
    /// Image MD5.
    pub md5: String,
    /// Owner of the image.
    pub user_address: String,
    /// New description link.
    pub description_url: String,
    /// New avatar link.
    pub avator_url: String,
}
