use gloo_net::http::Request;

use crate::application::use_cases::CoordinateSource;
use crate::domain::{
    config::LoaderConfig,
    errors::{DotplotError, DotplotResult},
    logging::{LogComponent, get_logger},
};

/// Fetches `coordonnees.<id>.txt` from the job directory over HTTP
#[derive(Debug, Clone, Default)]
pub struct HttpCoordinateSource {
    config: LoaderConfig,
}

impl HttpCoordinateSource {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }
}

impl CoordinateSource for HttpCoordinateSource {
    async fn fetch(&self, job_id: &str) -> DotplotResult<String> {
        let url = self.config.coordinates_url(job_id);
        get_logger().info(LogComponent::Infrastructure("HTTP"), &format!("GET {}", url));

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| DotplotError::Network(format!("request to {} failed: {}", url, e)))?;

        if !response.ok() {
            let message = format!("{} -> {} {}", url, response.status(), response.status_text());
            get_logger().error(LogComponent::Infrastructure("HTTP"), &message);
            return Err(DotplotError::Network(message));
        }

        let text = response
            .text()
            .await
            .map_err(|e| DotplotError::Network(format!("reading {} failed: {}", url, e)))?;
        get_logger().debug(
            LogComponent::Infrastructure("HTTP"),
            &format!("{} bytes from {}", text.len(), url),
        );
        Ok(text)
    }
}
