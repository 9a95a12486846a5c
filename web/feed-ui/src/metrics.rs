use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    /// Duration of feed loads segmented by outcome (rendered, failed).
    pub static ref FEED_LOAD_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "feed_load_duration_seconds",
        "Feed load duration segmented by outcome",
        &["outcome"]
    )
    .expect("failed to register feed_load_duration_seconds");

    /// Total feed loads segmented by outcome.
    pub static ref FEED_LOAD_TOTAL: IntCounterVec = register_int_counter_vec!(
        "feed_load_total",
        "Total feed loads segmented by outcome",
        &["outcome"]
    )
    .expect("failed to register feed_load_total");

    /// Like mutations segmented by final status (confirmed, failed).
    pub static ref LIKE_MUTATION_TOTAL: IntCounterVec = register_int_counter_vec!(
        "like_mutation_total",
        "Like toggles segmented by final mutation status",
        &["status"]
    )
    .expect("failed to register like_mutation_total");

    /// Comment submissions segmented by result (posted, ignored, failed).
    pub static ref COMMENT_SUBMISSION_TOTAL: IntCounterVec = register_int_counter_vec!(
        "comment_submission_total",
        "Comment submissions segmented by result",
        &["result"]
    )
    .expect("failed to register comment_submission_total");
}

/// Render the default registry in the Prometheus text format
pub fn gather_text() -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&prometheus::gather(), &mut buffer) {
        tracing::warn!("metrics encoding failed: {}", err);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_show_up_in_text_output() {
        COMMENT_SUBMISSION_TOTAL
            .with_label_values(&["ignored"])
            .inc();

        let text = gather_text();
        assert!(text.contains("comment_submission_total"));
    }
}
