//! Text charts for terminal output.

const EIGHTHS: [char; 8] = ['▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];
const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A horizontal bar whose length is `value / max` of `width` cells,
/// drawn at eighth-of-a-cell resolution.
///
/// A non-zero value always gets at least a sliver so it stays visible.
pub fn bar(value: usize, max: usize, width: usize) -> String {
    if max == 0 || width == 0 || value == 0 {
        return String::new();
    }
    let eighths = (value.min(max) as u128 * width as u128 * 8 / max as u128).max(1) as usize;
    let mut out = "█".repeat(eighths / 8);
    if eighths % 8 > 0 {
        out.push(EIGHTHS[eighths % 8 - 1]);
    }
    out
}

/// A one-line chart of `values`, at most `width` cells wide.
///
/// Longer series are split into `width` consecutive buckets whose values are
/// summed before scaling.
pub fn sparkline(values: &[usize], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }
    let bucketed = bucket_sums(values, width);
    let max = bucketed.iter().copied().max().unwrap_or(0);
    bucketed
        .iter()
        .map(|&v| {
            if max == 0 {
                LEVELS[0]
            } else {
                LEVELS[v * (LEVELS.len() - 1) / max]
            }
        })
        .collect()
}

fn bucket_sums(values: &[usize], width: usize) -> Vec<usize> {
    if values.len() <= width {
        return values.to_vec();
    }
    let chunk = values.len().div_ceil(width);
    values.chunks(chunk).map(|c| c.iter().sum()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_scales_to_width() {
        assert_eq!(bar(10, 10, 4), "████");
        assert_eq!(bar(5, 10, 4), "██");
        assert_eq!(bar(8, 16, 2), "█");
        assert_eq!(bar(8, 16, 1), "▌");
    }

    #[test]
    fn test_bar_edge_cases() {
        assert_eq!(bar(0, 10, 4), "");
        assert_eq!(bar(5, 0, 4), "");
        assert_eq!(bar(1, 1_000_000, 10), "▏");
        assert_eq!(bar(20, 10, 3), "███");
    }

    #[test]
    fn test_sparkline_levels() {
        assert_eq!(sparkline(&[0, 7, 14], 10), "▁▄█");
        assert_eq!(sparkline(&[0, 0], 10), "▁▁");
        assert_eq!(sparkline(&[], 10), "");
    }

    #[test]
    fn test_sparkline_buckets_long_series() {
        let values: Vec<usize> = (0..100).collect();
        let line = sparkline(&values, 20);
        assert_eq!(line.chars().count(), 20);
        assert!(line.ends_with('█'));
        assert!(line.starts_with('▁'));
    }
}
