//! Upload image tool definition.
//!
//! Images are always compressed locally before being handed to the service:
//! inline base64 is decoded directly, a URL source is downloaded first.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::domains::api::EventLiteClient;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::format::render_upload;
use crate::domains::tools::handlers::ToolHandler;
use crate::domains::tools::image::{compress_to_base64, decode_base64};
use crate::domains::tools::validation::{
    Validate, ValidationErrors, validate_required, validate_url,
};

/// Parameters for the upload image tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct UploadImageParams {
    #[schemars(description = "URL of the image to upload (will be fetched and compressed)")]
    pub url: Option<String>,

    #[schemars(
        description = "Base64-encoded image data, optionally as a data URL (data:image/png;base64,...). Takes precedence over url."
    )]
    pub base64: Option<String>,
}

impl Validate for UploadImageParams {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(url) = &self.url {
            validate_url(url, "url", &mut errors);
        }
        if let Some(data) = &self.base64 {
            validate_required(data, "base64", &mut errors);
        }
        errors.into_result()
    }
}

/// Upload image tool - stores a cover image and returns its public URL.
pub struct UploadImageTool;

#[async_trait]
impl ToolHandler for UploadImageTool {
    const NAME: &'static str = "upload_image";

    const DESCRIPTION: &'static str = "Upload an image to use as event cover. Provide either a URL to fetch the image from, or base64-encoded image data. Images are automatically compressed to 400x300 max. Returns the uploaded image URL to use in create_event or update_event.";

    type Params = UploadImageParams;

    #[instrument(skip_all)]
    async fn execute(params: UploadImageParams, client: &EventLiteClient) -> Result<String, ToolError> {
        let raw = match (params.base64, params.url) {
            (Some(data), url) => {
                if url.is_some() {
                    info!("Both base64 and url provided, ignoring url");
                }
                decode_base64(&data)?
            }
            (None, Some(url)) => client.fetch_image(&url).await?,
            (None, None) => {
                warn!("Upload requested without an image source");
                return Err(ToolError::usage("Either 'url' or 'base64' must be provided"));
            }
        };

        let encoded = compress_to_base64(raw).await?;
        let result = client.upload_image_from_base64(&encoded).await?;
        info!(url = %result.data.url, "Image uploaded");
        Ok(render_upload(&result.data))
    }
}
