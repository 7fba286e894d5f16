use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

use crate::models::{Mode, Tab};

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder backing `/metrics`.
pub fn init_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {}", e))?;

    METRICS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("failed to set metrics handle: already initialized"))?;

    Ok(())
}

pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Count a finished search by tab, mode and outcome (`success` or an error kind).
pub fn record_search(tab: Tab, mode: Mode, outcome: &'static str) {
    ::metrics::counter!(
        "lookup_searches_total",
        "tab" => tab.slug(),
        "mode" => mode.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_token_exchange(outcome: &'static str) {
    ::metrics::counter!("lookup_token_exchanges_total", "outcome" => outcome).increment(1);
}
