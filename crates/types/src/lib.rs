//! Shared type definitions for the zkWasm service SDK.
//!
//! This crate provides the records exchanged with the zkWasm proving service: tasks, images,
//! statistics, the response envelope every endpoint wraps its result in, and the parameter
//! records whose serialization forms the payloads users sign.
//!
//! ## Overview
//!
//! - [`Task`] - A submitted proving or deployment job, as reported by the service
//! - [`ProvingTask`] / [`DeployTask`] - Bodies for `POST /prove` and `POST /deploy`
//! - [`Image`] - An uploaded WASM circuit and its on-chain deployments
//! - [`Statistics`] - Service-wide counters from `GET /statistics`
//! - [`QueryParams`] - Filters for `GET /tasks`
//! - [`Envelope`] - The `{success, result, error}` wrapper of every response
//!
//! Field names follow the service's snake_case wire format and fields serialize in declared
//! order, which the signing messages rely on.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use crate::sign::{
    AddImageParams, DeployParams, LogsParams, ModifyImageParams, ProvingParams, ResetImageParams,
};

mod sign;

/// A proving or deployment job known to the service.
///
/// Created by the service on submission; the client only reads it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Address of the user that submitted the task.
    pub user_address: String,
    /// MD5 of the image the task runs against.
    pub md5: String,
    /// Kind of task (e.g. "Prove", "Deploy").
    pub task_type: String,
    /// Processing status reported by the service.
    pub status: String,
    /// Aggregate proof bytes, empty until the task is done.
    #[serde(default)]
    pub proof: Vec<u8>,
    /// Auxiliary verification data.
    #[serde(default)]
    pub aux: Vec<u8>,
    /// Batch instances of the aggregate proof.
    #[serde(default)]
    pub instances: Vec<u8>,
    /// Public input literals, see `zkwasm_util::codec`.
    #[serde(default)]
    pub public_inputs: Vec<String>,
    /// Private input literals.
    #[serde(default)]
    pub private_inputs: Vec<String>,
    /// Opaque identifier assigned by the service.
    #[serde(rename = "_id")]
    pub id: Value,
    /// Submission timestamp.
    pub submit_time: String,
    /// Time the service started processing the task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_started: Option<String>,
    /// Time the service finished processing the task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_finished: Option<String>,
}

/// Body of `POST /prove`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvingTask {
    /// Address of the submitting user.
    pub user_address: String,
    /// MD5 of the image to prove against.
    pub md5: String,
    /// Public input literals.
    pub public_inputs: Vec<String>,
    /// Private input literals.
    pub private_inputs: Vec<String>,
}

/// Body of `POST /deploy`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployTask {
    /// Address of the submitting user.
    pub user_address: String,
    /// MD5 of the image to deploy.
    pub md5: String,
    /// Target chain.
    pub chain_id: u64,
}

/// Proof material decoded into big-number chunks, ready for a verifier contract.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VerifyData {
    /// Aggregate proof chunks.
    pub proof: Vec<BigUint>,
    /// Target circuit instances, decoded from the public inputs.
    pub target_instances: Vec<BigUint>,
    /// Aggregator (batch) instances.
    pub aggregator_instances: Vec<BigUint>,
    /// Auxiliary data chunks.
    pub aux_instances: Vec<BigUint>,
}

/// Raw inputs of an on-chain proof verification.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VerifyProofParams {
    /// Aggregate proof bytes.
    pub aggregate_proof: Vec<u8>,
    /// Batch instance bytes.
    pub batch_instances: Vec<u8>,
    /// Auxiliary data bytes.
    pub aux: Vec<u8>,
    /// Public input literals.
    pub public_inputs: Vec<String>,
}

impl From<&Task> for VerifyProofParams {
    fn from(task: &Task) -> Self {
        Self {
            aggregate_proof: task.proof.clone(),
            batch_instances: task.instances.clone(),
            aux: task.aux.clone(),
            public_inputs: task.public_inputs.clone(),
        }
    }
}

/// Service-wide counters as returned on the wire by `GET /statistics`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsResponse {
    /// Number of uploaded images.
    pub total_images: u64,
    /// Number of generated proofs.
    pub total_proofs: u64,
    /// Number of submitted tasks.
    pub total_tasks: u64,
    /// Number of on-chain deployments.
    pub total_deployed: u64,
}

/// Service-wide counters in client naming.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Number of uploaded images.
    pub total_images: u64,
    /// Number of generated proofs.
    pub total_proofs: u64,
    /// Number of submitted tasks.
    pub total_tasks: u64,
    /// Number of on-chain deployments.
    pub total_deployed: u64,
}

impl From<StatisticsResponse> for Statistics {
    fn from(st: StatisticsResponse) -> Self {
        Self {
            total_images: st.total_images,
            total_proofs: st.total_proofs,
            total_tasks: st.total_tasks,
            total_deployed: st.total_deployed,
        }
    }
}

/// Snapshot of a task board, as kept by a UI consuming the SDK.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusState {
    /// Loaded tasks.
    pub tasks: Vec<Task>,
    /// Loaded statistics.
    pub statistics: Statistics,
    /// Whether the board finished loading.
    pub loaded: bool,
}

/// Filters for `GET /tasks`. Empty fields are left out of the query string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    /// Submitting user.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_address: String,
    /// Image MD5.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub md5: String,
    /// Task identifier.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Task kind.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tasktype: String,
    /// Task status.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub taskstatus: String,
}

/// An on-chain deployment of an image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentInfo {
    /// Chain the verifier was deployed to.
    pub chain_id: u64,
    /// Contract address on that chain.
    pub address: String,
}

/// An uploaded WASM circuit, identified by the MD5 of its content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Owner of the image.
    pub user_address: String,
    /// MD5 of the WASM image.
    pub md5: String,
    /// Deployments completed so far.
    #[serde(default)]
    pub deployment: Vec<DeploymentInfo>,
}

/// Wrapper the service puts around every response.
///
/// `result` is only meaningful when `success` is `true`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    /// Whether the request succeeded.
    #[serde(default)]
    pub success: bool,
    /// Payload of a successful request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    /// Error message of a failed request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Envelope of a successful request.
    pub fn ok(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    /// Envelope of a failed request.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{Envelope, Image, QueryParams, Statistics, StatisticsResponse, Task};

    #[test]
    fn test_query_params_skip_empty() {
        let query = QueryParams {
            md5: "abc".to_string(),
            tasktype: "Prove".to_string(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({ "md5": "abc", "tasktype": "Prove" })
        );
        assert_eq!(
            serde_json::to_value(QueryParams::default()).unwrap(),
            json!({})
        );
    }

    #[test]
    fn test_statistics_renaming() {
        let raw: StatisticsResponse = serde_json::from_value(json!({
            "total_images": 1,
            "total_proofs": 2,
            "total_tasks": 3,
            "total_deployed": 4,
        }))
        .unwrap();
        let st = Statistics::from(raw);
        assert_eq!(
            serde_json::to_value(st).unwrap(),
            json!({ "totalImages": 1, "totalProofs": 2, "totalTasks": 3, "totalDeployed": 4 })
        );
    }

    #[test]
    fn test_task_from_service_json() {
        let task: Task = serde_json::from_value(json!({
            "user_address": "0xabc",
            "md5": "d41d8cd98f00b204e9800998ecf8427e",
            "task_type": "Prove",
            "status": "Done",
            "proof": [1, 2, 3],
            "aux": [],
            "instances": [4],
            "public_inputs": ["1:i64"],
            "private_inputs": [],
            "_id": { "$oid": "64b0c0ffee" },
            "submit_time": "2023-07-14T00:00:00Z",
            "process_finished": "2023-07-14T00:05:00Z",
        }))
        .unwrap();
        assert_eq!(task.proof, vec![1, 2, 3]);
        assert_eq!(task.id, json!({ "$oid": "64b0c0ffee" }));
        assert_eq!(task.process_started, None);
        assert_eq!(task.process_finished.as_deref(), Some("2023-07-14T00:05:00Z"));
    }

    #[test]
    fn test_image_without_deployment() {
        let image: Image =
            serde_json::from_value(json!({ "user_address": "0xabc", "md5": "ff" })).unwrap();
        assert!(image.deployment.is_empty());
    }

    #[test]
    fn test_envelope() {
        let failed: Envelope = serde_json::from_value(json!({ "success": false })).unwrap();
        assert!(!failed.success);
        assert_eq!(failed.error, None);

        assert_eq!(
            serde_json::to_value(Envelope::ok(json!([1]))).unwrap(),
            json!({ "success": true, "result": [1] })
        );
        assert_eq!(
            serde_json::to_value(Envelope::<()>::err("x")).unwrap(),
            json!({ "success": false, "error": "x" })
        );
    }
}
