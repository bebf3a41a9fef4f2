use std::sync::Once;

use metrics::{Unit, describe_counter};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            "vetrina_cache_listing_hit_total",
            Unit::Count,
            "Total number of block-listing cache hits."
        );
        describe_counter!(
            "vetrina_cache_listing_miss_total",
            Unit::Count,
            "Total number of block-listing cache misses."
        );
        describe_counter!(
            "vetrina_cache_events_applied_total",
            Unit::Count,
            "Total number of cache invalidation events applied."
        );
        describe_counter!(
            "vetrina_blocks_skipped_total",
            Unit::Count,
            "Total number of stored blocks skipped because their kind or payload could not be decoded."
        );
        describe_counter!(
            "vetrina_blocks_render_failed_total",
            Unit::Count,
            "Total number of blocks whose template failed to render."
        );
        describe_counter!(
            "vetrina_script_channel_emitted_total",
            Unit::Count,
            "Total number of custom-page script elements emitted through the trust gate."
        );
    });
}
