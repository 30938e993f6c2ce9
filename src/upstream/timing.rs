//! Timed fetch wrapper.

use std::time::{Duration, Instant};

use crate::upstream::{Reply, ResourceGetter};

/// Fetch `getter`, timing the call, and embed the delay and address in the body.
///
/// The inner status code is kept as is.
pub async fn fetch_timed(getter: &dyn ResourceGetter) -> Reply {
    let start = Instant::now();
    let inner = getter.fetch().await;
    let elapsed = start.elapsed();

    Reply::new(inner.status, format_forwarded(elapsed, getter.address(), &inner.body))
}

/// `<- (delay <duration> from <address>) <body>`
pub fn format_forwarded(elapsed: Duration, address: &str, body: &str) -> String {
    format!(
        "<- (delay {} from {}) {}",
        format_duration(round_to_micros(elapsed)),
        address,
        body
    )
}

/// Round half away from zero to the nearest microsecond.
pub fn round_to_micros(d: Duration) -> Duration {
    let micros = (d.as_nanos() + 500) / 1_000;
    Duration::from_micros(u64::try_from(micros).unwrap_or(u64::MAX))
}

/// Render like `1.235ms`, `350µs`, `0s`, `1m2.5s`, `1h0m0.5s`.
///
/// Below one second the largest fitting unit is used with a trimmed
/// fraction; from one second up, hours and minutes are spelled out.
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    match nanos {
        0 => "0s".to_string(),
        n if n < 1_000 => format!("{}ns", n),
        n if n < 1_000_000 => format!("{}µs", fixed_point(n, 3)),
        n if n < 1_000_000_000 => format!("{}ms", fixed_point(n, 6)),
        n => {
            let secs = n / 1_000_000_000;
            let hours = secs / 3600;
            let minutes = (secs / 60) % 60;
            let seconds = format!("{}s", fixed_point(n % 60_000_000_000, 9));
            if hours > 0 {
                format!("{}h{}m{}", hours, minutes, seconds)
            } else if minutes > 0 {
                format!("{}m{}", minutes, seconds)
            } else {
                seconds
            }
        }
    }
}

/// `value / 10^scale` as a decimal without trailing fractional zeros.
fn fixed_point(value: u128, scale: u32) -> String {
    let unit = 10u128.pow(scale);
    let (whole, frac) = (value / unit, value % unit);
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{:0width$}", frac, width = scale as usize);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}
