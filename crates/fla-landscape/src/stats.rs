// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Correlation statistics.

All correlations return `None` when undefined: fewer than two paired values,
mismatched lengths, or a series with zero variance.
*/

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Pearson product-moment correlation
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let mean_x = mean(x)?;
    let mean_y = mean(y)?;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&a, &b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

/// 1-based ranks, ties receive the average of the ranks they span
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start;
        while end + 1 < order.len() && values[order[end + 1]] == values[order[start]] {
            end += 1;
        }
        let rank = (start + end) as f64 / 2.0 + 1.0;
        for &i in &order[start..=end] {
            ranks[i] = rank;
        }
        start = end + 1;
    }
    ranks
}

/// Spearman rank correlation (Pearson over average ranks)
pub fn spearman(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() {
        return None;
    }
    pearson(&average_ranks(x), &average_ranks(y))
}

/// Kendall tau-b, corrected for ties in either series.
///
/// O(n²) pair scan, split across rayon workers when `parallel` is enabled.
pub fn kendall_tau_b(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let counts = |i: usize| -> PairCounts {
        let mut counts = PairCounts::default();
        for j in (i + 1)..x.len() {
            let dx = x[i].total_cmp(&x[j]) as i8;
            let dy = y[i].total_cmp(&y[j]) as i8;
            match (dx, dy) {
                (0, 0) => {}
                (0, _) => counts.tied_x += 1,
                (_, 0) => counts.tied_y += 1,
                _ if dx == dy => counts.concordant += 1,
                _ => counts.discordant += 1,
            }
        }
        counts
    };

    #[cfg(feature = "parallel")]
    let totals = {
        use rayon::prelude::*;
        (0..x.len())
            .into_par_iter()
            .map(counts)
            .reduce(PairCounts::default, PairCounts::merge)
    };

    #[cfg(not(feature = "parallel"))]
    let totals = (0..x.len())
        .map(counts)
        .fold(PairCounts::default(), PairCounts::merge);

    let untied = (totals.concordant + totals.discordant) as f64;
    let denominator = ((untied + totals.tied_x as f64) * (untied + totals.tied_y as f64)).sqrt();
    if denominator == 0.0 {
        return None;
    }
    Some((totals.concordant as f64 - totals.discordant as f64) / denominator)
}

#[derive(Debug, Clone, Copy, Default)]
struct PairCounts {
    concordant: u64,
    discordant: u64,
    /// tied in x only
    tied_x: u64,
    /// tied in y only
    tied_y: u64,
}

impl PairCounts {
    fn merge(self, other: PairCounts) -> PairCounts {
        PairCounts {
            concordant: self.concordant + other.concordant,
            discordant: self.discordant + other.discordant,
            tied_x: self.tied_x + other.tied_x,
            tied_y: self.tied_y + other.tied_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_pearson_perfect() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        assert!(approx(pearson(&x, &y).unwrap(), 1.0));
        let z = [8.0, 6.0, 4.0, 2.0];
        assert!(approx(pearson(&x, &z).unwrap(), -1.0));
    }

    #[test]
    fn test_pearson_undefined() {
        assert_eq!(pearson(&[1.0, 2.0], &[3.0, 3.0]), None);
        assert_eq!(pearson(&[1.0], &[1.0]), None);
        assert_eq!(pearson(&[1.0, 2.0], &[1.0]), None);
    }

    #[test]
    fn test_average_ranks_with_ties() {
        assert_eq!(
            average_ranks(&[5.0, 6.0, 7.0, 8.0, 7.0]),
            vec![1.0, 2.0, 3.5, 5.0, 3.5]
        );
    }

    #[test]
    fn test_spearman_with_ties() {
        let rho = spearman(&[1.0, 2.0, 3.0, 4.0, 5.0], &[5.0, 6.0, 7.0, 8.0, 7.0]).unwrap();
        assert!((rho - 0.820_782_681_668_123_3).abs() < 1e-12);
    }

    #[test]
    fn test_kendall_tau_b_with_ties() {
        let tau = kendall_tau_b(&[1.0, 2.0, 3.0, 4.0, 5.0], &[5.0, 6.0, 7.0, 8.0, 7.0]).unwrap();
        assert!((tau - 0.737_864_787_372_621_8).abs() < 1e-12);
    }

    #[test]
    fn test_kendall_monotone() {
        let x = [1.0, 2.0, 3.0];
        assert!(approx(kendall_tau_b(&x, &[10.0, 20.0, 30.0]).unwrap(), 1.0));
        assert!(approx(kendall_tau_b(&x, &[30.0, 20.0, 10.0]).unwrap(), -1.0));
        assert_eq!(kendall_tau_b(&x, &[1.0, 1.0, 1.0]), None);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
    }
}
