use serde::Serialize;
use tracing::{debug, instrument};
use zkwasm_types::Image;

use crate::{ClientConfig, Error, Result, ServiceHelper};

#[derive(Serialize)]
struct ImageQuery<'a> {
    md5: &'a str,
}

/// Client for image lookups.
#[derive(Clone, Debug)]
pub struct ImageHelper {
    helper: ServiceHelper,
}

impl ImageHelper {
    /// Creates an image helper for the service at `endpoint`.
    pub fn new(
        endpoint: impl AsRef<str>,
        username: impl Into<String>,
        user_address: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::from_helper(ServiceHelper::new(endpoint, username, user_address)?))
    }

    /// Creates an image helper sharing an existing request executor.
    pub fn from_helper(helper: ServiceHelper) -> Self {
        Self { helper }
    }

    /// Creates an image helper from a loaded [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::from_helper(ServiceHelper::from_config(config)?))
    }

    /// The underlying request executor.
    pub fn helper(&self) -> &ServiceHelper {
        &self.helper
    }

    /// Loads the image with the given MD5.
    pub async fn query_image(&self, md5: &str) -> Result<Image> {
        self.query_images(md5)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::ImageNotFound(md5.to_string()))
    }

    /// Loads every image record matching the given MD5.
    #[instrument(skip(self))]
    pub async fn query_images(&self, md5: &str) -> Result<Vec<Image>> {
        let images: Vec<Image> = self.helper.get("/image", &ImageQuery { md5 }).await?;
        debug!(count = images.len(), "get queryImage response");
        Ok(images)
    }
}
