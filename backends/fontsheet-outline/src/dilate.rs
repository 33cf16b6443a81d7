/// Grow coverage by `radius` pixels in every direction (square max filter)
///
/// Runs as two 1-D passes, rows then columns. The result has the same size
/// as the input, so callers pad the mask first.
pub(crate) fn dilate(coverage: &[u8], width: usize, height: usize, radius: usize) -> Vec<u8> {
    if radius == 0 || width == 0 || height == 0 {
        return coverage.to_vec();
    }

    let mut rows = vec![0u8; coverage.len()];
    for y in 0..height {
        let row = &coverage[y * width..(y + 1) * width];
        for x in 0..width {
            let lo = x.saturating_sub(radius);
            let hi = (x + radius).min(width - 1);
            rows[y * width + x] = row[lo..=hi].iter().copied().max().unwrap_or(0);
        }
    }

    let mut out = vec![0u8; coverage.len()];
    for x in 0..width {
        for y in 0..height {
            let lo = y.saturating_sub(radius);
            let hi = (y + radius).min(height - 1);
            out[y * width + x] = (lo..=hi).map(|yy| rows[yy * width + x]).max().unwrap_or(0);
        }
    }
    out
}
