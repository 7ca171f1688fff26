use reqwest::multipart::Form;
use serde_json::Value;
use tracing::{debug, info, instrument};
use zkwasm_types::{DeployTask, ProvingTask, QueryParams, Statistics, StatisticsResponse, Task};

use crate::{ClientConfig, Result, ServiceHelper};

/// Client for the task board: statistics, task queries and task submission.
#[derive(Clone, Debug)]
pub struct TaskHelper {
    helper: ServiceHelper,
}

impl TaskHelper {
    /// Creates a task helper for the service at `endpoint`.
    pub fn new(
        endpoint: impl AsRef<str>,
        username: impl Into<String>,
        user_address: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::from_helper(ServiceHelper::new(endpoint, username, user_address)?))
    }

    /// Creates a task helper sharing an existing request executor.
    pub fn from_helper(helper: ServiceHelper) -> Self {
        Self { helper }
    }

    /// Creates a task helper from a loaded [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::from_helper(ServiceHelper::from_config(config)?))
    }

    /// The underlying request executor.
    pub fn helper(&self) -> &ServiceHelper {
        &self.helper
    }

    /// Loads the service-wide counters.
    #[instrument(skip_all)]
    pub async fn load_statistics(&self) -> Result<Statistics> {
        let st: StatisticsResponse = self
            .helper
            .get("/statistics", &serde_json::Map::new())
            .await?;
        info!("loading task board!");
        Ok(st.into())
    }

    /// Loads the tasks matching `query`. Empty filters are not sent.
    #[instrument(skip_all)]
    pub async fn load_tasks(&self, query: &QueryParams) -> Result<Vec<Task>> {
        debug!(?query, "params");
        let tasks: Vec<Task> = self.helper.get("/tasks", query).await?;
        info!(count = tasks.len(), "loading task board!");
        Ok(tasks)
    }

    /// Uploads a new WASM image. See [`crate::add_image_form`] for building `form`.
    #[instrument(skip_all)]
    pub async fn add_new_wasm_image(&self, form: Form) -> Result<Value> {
        debug!("wait response");
        let response: Value = self
            .helper
            .invoke_multipart_request("/setup", form, None)
            .await?;
        info!(%response, "get addNewWasmImage response");
        Ok(response)
    }

    /// Submits a proving task.
    #[instrument(skip_all, fields(md5 = %task.md5))]
    pub async fn add_proving_task(&self, task: &ProvingTask) -> Result<Value> {
        let response: Value = self.helper.post("/prove", task).await?;
        info!(%response, "get addProvingTask response");
        Ok(response)
    }

    /// Submits a deployment task.
    #[instrument(skip_all, fields(md5 = %task.md5, chain_id = task.chain_id))]
    pub async fn add_deploy_task(&self, task: &DeployTask) -> Result<Value> {
        let response: Value = self.helper.post("/deploy", task).await?;
        info!(%response, "get addDeployTask response");
        Ok(response)
    }
}
