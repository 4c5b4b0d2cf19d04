//! Size and duration formatting.

use crate::RawFormat;

/// Best available size for a rendition in bytes, 0 when nothing is known.
///
/// Uses the exact size, then the approximate size, then estimates from
/// bitrate × duration (total bitrate first, then video + audio, then either).
///
/// # Examples
///
/// ```
/// use tubegate_media::{RawFormat, estimate_filesize};
///
/// let format = RawFormat { tbr: Some(128.0), ..Default::default() };
/// assert_eq!(estimate_filesize(&format, 60), 983_040);
/// ```
pub fn estimate_filesize(format: &RawFormat, duration_secs: u64) -> u64 {
    let positive = |v: Option<f64>| v.filter(|x| x.is_finite() && *x > 0.0);

    if let Some(size) = positive(format.filesize).or(positive(format.filesize_approx)) {
        return size as u64;
    }

    let bitrate = match (
        positive(format.tbr),
        positive(format.vbr),
        positive(format.abr),
    ) {
        (Some(tbr), _, _) => tbr,
        (None, Some(vbr), Some(abr)) => vbr + abr,
        (None, Some(vbr), None) => vbr,
        (None, None, Some(abr)) => abr,
        (None, None, None) => return 0,
    };

    if duration_secs == 0 {
        return 0;
    }

    // kbps × s × 1024 / 8
    (bitrate * duration_secs as f64 * 1024.0 / 8.0).floor() as u64
}

/// Human-readable size with two decimals, `"Unknown"` for zero.
///
/// # Examples
///
/// ```
/// use tubegate_media::format_filesize;
///
/// assert_eq!(format_filesize(0), "Unknown");
/// assert_eq!(format_filesize(512), "512.00 B");
/// assert_eq!(format_filesize(1536), "1.50 KB");
/// assert_eq!(format_filesize(5 * 1024 * 1024), "5.00 MB");
/// ```
pub fn format_filesize(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "Unknown".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

/// `m:ss` rendering of a duration.
///
/// # Examples
///
/// ```
/// use tubegate_media::format_duration;
///
/// assert_eq!(format_duration(0), "0:00");
/// assert_eq!(format_duration(75), "1:15");
/// assert_eq!(format_duration(3600), "60:00");
/// ```
pub fn format_duration(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_size_wins() {
        let format = RawFormat {
            filesize: Some(100.0),
            filesize_approx: Some(200.0),
            tbr: Some(1000.0),
            ..Default::default()
        };
        assert_eq!(estimate_filesize(&format, 10), 100);
    }

    #[test]
    fn approximate_size_next() {
        let format = RawFormat {
            filesize_approx: Some(200.0),
            tbr: Some(1000.0),
            ..Default::default()
        };
        assert_eq!(estimate_filesize(&format, 10), 200);
    }

    #[test]
    fn video_plus_audio_bitrate() {
        let format = RawFormat {
            vbr: Some(100.0),
            abr: Some(28.0),
            ..Default::default()
        };
        assert_eq!(estimate_filesize(&format, 8), 128 * 8 * 1024 / 8);
    }

    #[test]
    fn zero_bitrate_is_ignored() {
        let format = RawFormat {
            tbr: Some(0.0),
            abr: Some(64.0),
            ..Default::default()
        };
        assert_eq!(estimate_filesize(&format, 1), 64 * 1024 / 8);
    }

    #[test]
    fn nothing_known_is_zero() {
        assert_eq!(estimate_filesize(&RawFormat::default(), 100), 0);
        let format = RawFormat {
            tbr: Some(100.0),
            ..Default::default()
        };
        assert_eq!(estimate_filesize(&format, 0), 0);
    }

    #[test]
    fn gigabytes_cap_the_unit() {
        assert_eq!(format_filesize(3 * 1024 * 1024 * 1024), "3.00 GB");
        assert_eq!(format_filesize(2048 * 1024 * 1024 * 1024), "2048.00 GB");
    }
}
