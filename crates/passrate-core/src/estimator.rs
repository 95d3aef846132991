//! Unbiased pass@k estimator.
//!
//! pass@k is the probability that at least one of k samples, drawn without
//! replacement from n generated candidates of which c are correct, passes.
//! The closed form `1 - C(n-c, k) / C(n, k)` is evaluated as a product of
//! ratios to stay finite and stable for large n.

use std::collections::BTreeMap;

/// Estimate pass@k for a single problem.
///
/// Requires `c <= n` and `k >= 1`; violating either is a defect in the
/// caller's bookkeeping and panics.
///
/// When `n < k` there are not enough trials to legitimately subsample k,
/// so any observed success counts as a certain pass: the result is 1.0 if
/// `c > 0` and 0.0 otherwise.
pub fn pass_at_k(n: usize, c: usize, k: usize) -> f64 {
    assert!(k >= 1, "k must be a positive integer, got {k}");
    assert!(
        c <= n,
        "correct count {c} exceeds sample count {n} — caller bookkeeping is broken"
    );

    if n < k {
        return if c > 0 { 1.0 } else { 0.0 };
    }

    // 1 - prod_{i = n-c+1}^{n} (1 - k/i)
    //
    // The product is the probability that a k-subset avoids all c correct
    // candidates. For c = 0 the range is empty and the product is 1; for
    // c = n the range contains i = k and the product collapses to 0, so
    // both boundary identities hold exactly.
    let miss_all: f64 = ((n - c + 1)..=n)
        .map(|i| 1.0 - k as f64 / i as f64)
        .product();

    1.0 - miss_all
}

/// Estimate pass@k for every requested k, keyed by k.
///
/// Every requested k is evaluated, including `k > n` (degenerate policy);
/// none are dropped. Duplicate k values collapse into one entry.
pub fn pass_at_k_all(n: usize, c: usize, k_values: &[usize]) -> BTreeMap<usize, f64> {
    k_values.iter().map(|&k| (k, pass_at_k(n, c, k))).collect()
}
