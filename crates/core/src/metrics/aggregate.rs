//! Aggregation: raw samples to a bucketed series.

use chainboard_domain::{Sample, Series, SeriesPoint, TimeWindow};

/// Bucket raw samples into one ordered point per window bucket.
///
/// Pure and deterministic: the same samples and window always produce the
/// same series, which is what makes the cache sound and the tests exact.
///
/// Per bucket, the count is the latest observation inside the bucket's
/// half-open span (point-sample semantics). The gap-fill policy is fixed:
/// a bucket with no observation carries the previous bucket's count
/// forward; a gap before any observed bucket is omitted outright, so a zero
/// that was never observed is never fabricated.
///
/// Points are labeled with the bucket's start date, so bucket widths must
/// be one day or coarser; the resolver only produces daily widths.
#[must_use]
pub fn aggregate(samples: &[Sample], window: &TimeWindow) -> Series {
    let mut points = Vec::with_capacity(window.bucket_count());
    let mut carried: Option<u64> = None;

    for bucket in window.buckets() {
        let observed = samples
            .iter()
            .filter(|sample| bucket.contains(sample.timestamp))
            .max_by_key(|sample| sample.timestamp)
            .map(|sample| sample.count);

        if let Some(count) = observed.or(carried) {
            points.push(SeriesPoint::new(bucket.start.date_naive(), count));
            carried = Some(count);
        }
    }

    Series::new(points)
}
