//! Request counters and latency histograms in Prometheus text format.
use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

const DURATION_BUCKETS_MS: [u64; 10] = [1, 2, 5, 10, 25, 50, 100, 250, 500, 1000];

/// Failure counters, labelled by endpoint and car id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    BadRequest,
    NotFound,
    UnmarshalFail,
    CreateFail,
    UpdateFail,
}

impl Counter {
    const ALL: [Counter; 5] = [
        Counter::BadRequest,
        Counter::NotFound,
        Counter::UnmarshalFail,
        Counter::CreateFail,
        Counter::UpdateFail,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Counter::BadRequest => "http_bad_request_count",
            Counter::NotFound => "http_not_found_request_count",
            Counter::UnmarshalFail => "http_unmarshal_fail_request_count",
            Counter::CreateFail => "http_create_fail_request_count",
            Counter::UpdateFail => "http_update_fail_request_count",
        }
    }

    fn help(self) -> &'static str {
        match self {
            Counter::BadRequest => "The total number of bad requests.",
            Counter::NotFound => "The total number of requests for missing cars.",
            Counter::UnmarshalFail => "The total number of request bodies that failed to parse.",
            Counter::CreateFail => "The total number of failed car creations.",
            Counter::UpdateFail => "The total number of failed car updates.",
        }
    }
}

type CounterKey = (Counter, String, String);
type HistogramKey = (String, u16, String);

/// Request counters and duration histograms.
///
/// Series are keyed by the client-supplied car id, so the number of series
/// grows with every distinct id requested and is never pruned.
#[derive(Debug, Default)]
pub struct Metrics {
    counters: Mutex<HashMap<CounterKey, u64>>,
    durations: Mutex<HashMap<HistogramKey, Histogram>>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn incr(&self, counter: Counter, endpoint: &str, car: &str) {
        let mut counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        *counters
            .entry((counter, endpoint.to_string(), car.to_string()))
            .or_insert(0) += 1;
    }

    /// Number of distinct counter series currently held.
    pub fn counter_series(&self) -> usize {
        self.counters.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn counter_value(&self, counter: Counter, endpoint: &str, car: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        counters
            .get(&(counter, endpoint.to_string(), car.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Record how long a request to `endpoint` took to produce `status`.
    pub fn observe(&self, endpoint: &str, status: u16, car: &str, elapsed: Duration) {
        let mut durations = self.durations.lock().unwrap_or_else(PoisonError::into_inner);
        let hist = durations
            .entry((endpoint.to_string(), status, car.to_string()))
            .or_insert_with(|| Histogram::new(DURATION_BUCKETS_MS.len()));
        record_histogram(hist, elapsed.as_millis() as u64, &DURATION_BUCKETS_MS);
    }

    /// Number of observations recorded for an endpoint/status pair across all cars.
    pub fn observation_count(&self, endpoint: &str, status: u16) -> u64 {
        let durations = self.durations.lock().unwrap_or_else(PoisonError::into_inner);
        durations
            .iter()
            .filter(|((e, s, _), _)| e == endpoint && *s == status)
            .map(|(_, hist)| hist.count)
            .sum()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        {
            let counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
            for counter in Counter::ALL {
                let _ = writeln!(out, "# HELP {} {}", counter.name(), counter.help());
                let _ = writeln!(out, "# TYPE {} counter", counter.name());

                let mut series: Vec<(&str, &str, u64)> = counters
                    .iter()
                    .filter(|((c, _, _), _)| *c == counter)
                    .map(|((_, endpoint, car), value)| (endpoint.as_str(), car.as_str(), *value))
                    .collect();
                series.sort();
                for (endpoint, car, value) in series {
                    let _ = writeln!(
                        out,
                        "{}{} {}",
                        counter.name(),
                        format_labels(&[("endpoint", endpoint), ("car", car)], None),
                        value
                    );
                }
            }
        }

        let name = "http_request_duration_ms";
        out.push_str("# HELP http_request_duration_ms Request handling time in milliseconds.\n");
        out.push_str("# TYPE http_request_duration_ms histogram\n");
        let durations = self.durations.lock().unwrap_or_else(PoisonError::into_inner);
        let mut series: Vec<(&HistogramKey, &Histogram)> = durations.iter().collect();
        series.sort_by(|a, b| a.0.cmp(b.0));
        for ((endpoint, status, car), hist) in series {
            let status = status.to_string();
            emit_histogram(
                &mut out,
                name,
                &DURATION_BUCKETS_MS,
                hist,
                &[
                    ("endpoint", endpoint.as_str()),
                    ("status", status.as_str()),
                    ("car", car.as_str()),
                ],
            );
        }

        out
    }
}

#[derive(Debug, Clone)]
struct Histogram {
    buckets: Vec<u64>,
    sum: u64,
    count: u64,
}

impl Histogram {
    fn new(bucket_len: usize) -> Self {
        Self {
            buckets: vec![0; bucket_len + 1],
            sum: 0,
            count: 0,
        }
    }
}

fn record_histogram(hist: &mut Histogram, value_ms: u64, buckets: &[u64]) {
    hist.sum += value_ms;
    hist.count += 1;
    let idx = buckets
        .iter()
        .position(|upper| value_ms <= *upper)
        .unwrap_or(buckets.len());
    hist.buckets[idx] += 1;
}

fn emit_histogram(
    out: &mut String,
    name: &str,
    buckets: &[u64],
    hist: &Histogram,
    labels: &[(&str, &str)],
) {
    let mut cumulative = 0u64;
    for (idx, upper) in buckets.iter().enumerate() {
        cumulative += hist.buckets.get(idx).copied().unwrap_or(0);
        let _ = writeln!(
            out,
            "{name}_bucket{} {}",
            format_labels(labels, Some(&upper.to_string())),
            cumulative
        );
    }
    cumulative += hist.buckets.get(buckets.len()).copied().unwrap_or(0);
    let _ = writeln!(
        out,
        "{name}_bucket{} {}",
        format_labels(labels, Some("+Inf")),
        cumulative
    );
    let _ = writeln!(out, "{name}_sum{} {}", format_labels(labels, None), hist.sum);
    let _ = writeln!(out, "{name}_count{} {}", format_labels(labels, None), hist.count);
}

fn format_labels(labels: &[(&str, &str)], le: Option<&str>) -> String {
    let mut parts: Vec<String> = labels
        .iter()
        .map(|(key, value)| format!("{key}=\"{}\"", escape_label(value)))
        .collect();
    if let Some(le) = le {
        parts.push(format!("le=\"{le}\""));
    }
    format!("{{{}}}", parts.join(","))
}

fn escape_label(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
