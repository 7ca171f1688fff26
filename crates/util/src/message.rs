//! Payloads users sign before calling the service.
//!
//! Apart from image uploads, a payload is the compact JSON of its parameter record with keys
//! in declared field order. Any change here breaks signatures produced by other clients.

use serde::Serialize;
use zkwasm_types::{
    AddImageParams, DeployParams, LogsParams, ModifyImageParams, ProvingParams, ResetImageParams,
};

/// Signing payload of an image upload: every field except the image and signature,
/// concatenated without delimiter.
pub fn create_add_image_sign_message(params: &AddImageParams) -> String {
    let mut message = String::new();
    message.push_str(&params.name);
    message.push_str(&params.image_md5);
    message.push_str(&params.user_address);
    message.push_str(&params.description_url);
    message.push_str(&params.avator_url);
    message.push_str(&params.circuit_size.to_string());
    message
}

/// Signing payload of a task log query.
pub fn create_logs_message(params: &LogsParams) -> serde_json::Result<String> {
    to_message(params)
}

/// Signing payload of a proving request.
pub fn create_proving_sign_message(params: &ProvingParams) -> serde_json::Result<String> {
    to_message(params)
}

/// Signing payload of a deployment request.
pub fn create_deploy_sign_message(params: &DeployParams) -> serde_json::Result<String> {
    to_message(params)
}

/// Signing payload of an image reset.
pub fn create_reset_image_message(params: &ResetImageParams) -> serde_json::Result<String> {
    to_message(params)
}

/// Signing payload of an image metadata change.
pub fn create_modify_image_message(params: &ModifyImageParams) -> serde_json::Result<String> {
    to_message(params)
}

fn to_message<T: Serialize>(params: &T) -> serde_json::Result<String> {
    serde_json::to_string(params)
}
