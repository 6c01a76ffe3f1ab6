// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSONL telemetry for grouping runs, enabled by the `telemetry` feature.
//!
//! One hand-formatted line per event on stdout, timestamped in
//! microseconds since the Unix epoch. Emission is best-effort; I/O errors
//! are ignored.
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

fn ts_micros() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros()
}

/// Emitted once per grouping construction.
pub(crate) fn grouped(paths: usize, groups: usize) {
    let ts = ts_micros();
    let mut out = std::io::stdout().lock();
    let _ = write!(
        out,
        r#"{{"ts_us":{ts},"event":"grouped","paths":{paths},"groups":{groups}}}"#
    );
    let _ = out.write_all(b"\n");
}

/// Emitted once per aggregate call; `target` names the aggregated value
/// source.
pub(crate) fn aggregated(target: &str, groups: usize) {
    let ts = ts_micros();
    let mut out = std::io::stdout().lock();
    let _ = write!(
        out,
        r#"{{"ts_us":{ts},"event":"aggregated","target":"{target}","groups":{groups}}}"#
    );
    let _ = out.write_all(b"\n");
}
