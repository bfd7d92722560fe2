use {
    prometheus::{Counter, Encoder, Histogram, HistogramOpts, Opts, TextEncoder},
    tracing::error,
};

const FAST_OPS_BUCKETS: &[f64] = &[
    0.000_001, 0.000_005, 0.000_01, 0.000_05, 0.000_1, 0.000_5, 0.001, 0.005,
];
const SLOW_OPS_BUCKETS: &[f64] = &[0.000_01, 0.000_1, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0];

pub fn counter(name: &str, help: &str) -> Counter {
    let counter = Counter::with_opts(Opts::new(name, help)).expect("valid counter options");
    prometheus::register(Box::new(counter.clone())).expect("counter registered once");
    counter
}

fn histogram(name: &str, help: &str, buckets: &[f64]) -> Histogram {
    let opts = HistogramOpts::new(name, help).buckets(buckets.to_vec());
    let histogram = Histogram::with_opts(opts).expect("valid histogram options");
    prometheus::register(Box::new(histogram.clone())).expect("histogram registered once");
    histogram
}

pub fn histogram_fast_ops(name: &str, help: &str) -> Histogram {
    histogram(name, help, FAST_OPS_BUCKETS)
}

pub fn histogram_slow_ops(name: &str, help: &str) -> Histogram {
    histogram(name, help, SLOW_OPS_BUCKETS)
}

/// Renders the default registry in the Prometheus text exposition format.
pub fn render_metrics() -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buffer) {
        error!("Failed to encode metrics: {}", e);
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_default()
}
