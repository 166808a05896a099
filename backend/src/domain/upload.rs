//! Uploaded image summaries.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Payload size in KiB rounded to two decimal places.
///
/// Ties round to the even neighbour, so 128 bytes (0.125 KiB) reports 0.12.
///
/// # Examples
/// ```
/// use roster::domain::upload::size_kb;
///
/// assert_eq!(size_kb(2048), 2.0);
/// assert_eq!(size_kb(1500), 1.46);
/// assert_eq!(size_kb(128), 0.12);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "sizes are reported as fractional KiB; uploads are far below 2^52 bytes"
)]
pub fn size_kb(len: usize) -> f64 {
    let kib = len as f64 / 1024.0;
    (kib * 100.0).round_ties_even() / 100.0
}

/// Metadata describing an uploaded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImageSummary {
    /// File name declared by the client, or empty.
    #[schema(example = "cat.png")]
    pub filename: String,
    /// Content type declared by the client.
    #[schema(example = "image/png")]
    pub format: String,
    /// Payload size from [`size_kb`].
    #[schema(example = 1.46)]
    pub size_kb: f64,
}

impl ImageSummary {
    /// Summarise an upload of `len` bytes.
    #[must_use]
    pub fn new(filename: impl Into<String>, format: impl Into<String>, len: usize) -> Self {
        Self {
            filename: filename.into(),
            format: format.into(),
            size_kb: size_kb(len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0.0)]
    #[case(1, 0.0)]
    #[case(1024, 1.0)]
    #[case(1500, 1.46)]
    #[case(128, 0.12)]
    #[case(640, 0.62)]
    #[case(384, 0.38)]
    #[case(10_240, 10.0)]
    #[case(1_048_576, 1024.0)]
    fn size_is_rounded_to_two_decimals(#[case] len: usize, #[case] expected: f64) {
        assert!((size_kb(len) - expected).abs() < f64::EPSILON);
    }

    #[rstest]
    fn summary_records_declared_metadata() {
        let summary = ImageSummary::new("cat.png", "image/png", 2048);
        assert_eq!(summary.filename, "cat.png");
        assert_eq!(summary.format, "image/png");
        assert!((summary.size_kb - 2.0).abs() < f64::EPSILON);
    }
}
