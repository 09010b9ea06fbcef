/// Errors from the search pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The pipeline has stopped (shut down, or its results were dropped).
    #[error("Search pipeline is closed")]
    Closed,
}
