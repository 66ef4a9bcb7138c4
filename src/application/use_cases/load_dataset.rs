use crate::domain::{
    dotplot::parse_coordinates,
    errors::DotplotResult,
    logging::{LogComponent, LogLevel, get_logger},
    state::Dataset,
};

/// Supplies the raw coordinate file of a job
#[allow(async_fn_in_trait)]
pub trait CoordinateSource {
    async fn fetch(&self, job_id: &str) -> DotplotResult<String>;
}

/// Fetch, parse and validate one job's coordinates
pub struct LoadDatasetUseCase<S: CoordinateSource> {
    source: S,
}

impl<S: CoordinateSource> LoadDatasetUseCase<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn execute(&self, job_id: &str) -> DotplotResult<Dataset> {
        let text = self.source.fetch(job_id).await?;
        let dataset = dataset_from_text(&text)?;
        get_logger().info(
            LogComponent::Application("LoadDatasetUseCase"),
            &format!("job {}: {} segments loaded", job_id, dataset.len()),
        );
        Ok(dataset)
    }
}

/// Parse an already fetched coordinate file.
pub fn dataset_from_text(text: &str) -> DotplotResult<Dataset> {
    let parsed = parse_coordinates(text);
    if parsed.skipped > 0 {
        get_logger().log_with_metadata(
            LogLevel::Debug,
            LogComponent::Application("LoadDatasetUseCase"),
            "malformed coordinate groups skipped",
            &format!("skipped={} kept={}", parsed.skipped, parsed.segments.len()),
        );
    }
    Dataset::from_parsed(parsed)
}
