/// Formats seconds as `HH:MM:SS.mmm`.
///
/// The value is rounded to whole milliseconds before it is split, so every
/// field stays in range (`59.9996` becomes `00:01:00.000`, never
/// `00:00:60.000`). Hours grow past two digits when needed. Negative and NaN
/// inputs clamp to zero.
pub fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;

    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;

    format!("{hours:02}:{minutes:02}:{secs:02}.{millis:03}")
}
