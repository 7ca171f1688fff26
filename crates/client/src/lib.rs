//! HTTP client for the zkWasm proving service.
//!
//! Provides helpers to upload WASM images, submit proving and deployment tasks, and query
//! task, image and service status. Every response of the service is wrapped in an
//! [`Envelope`](zkwasm_types::Envelope); the helpers unwrap it and map failures to [`Error`].
//!
//! ## Example
//!
//! ```no_run
//! use zkwasm_client::{Error, ImageHelper, TaskHelper};
//! use zkwasm_client::types::{ProvingTask, QueryParams};
//!
//! # async fn example() -> Result<(), Error> {
//! let tasks = TaskHelper::new("http://localhost:8080", "alice", "0xabc")?;
//!
//! // Service-wide counters
//! let statistics = tasks.load_statistics().await?;
//! println!("{} tasks submitted", statistics.total_tasks);
//!
//! // Submit a proving task
//! let task = ProvingTask {
//!     user_address: "0xabc".to_string(),
//!     md5: "d41d8cd98f00b204e9800998ecf8427e".to_string(),
//!     public_inputs: vec!["1:i64".to_string()],
//!     private_inputs: vec![],
//! };
//! tasks.add_proving_task(&task).await?;
//!
//! // Follow up on it
//! let query = QueryParams {
//!     md5: task.md5.clone(),
//!     ..Default::default()
//! };
//! let submitted = tasks.load_tasks(&query).await?;
//!
//! // Look up the image
//! let images = ImageHelper::from_helper(tasks.helper().clone());
//! let image = images.query_image(&task.md5).await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub use config::{ClientConfig, VerifierConfig};
pub use error::{Error, Result};
pub use form::add_image_form;
pub use helper::{ServiceHelper, get_json_response};
pub use image::ImageHelper;
pub use task::TaskHelper;
pub use zkwasm_types as types;
pub use zkwasm_util as util;

mod config;
mod error;
mod form;
mod helper;
mod image;
mod task;
