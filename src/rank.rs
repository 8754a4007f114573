//! Ranking: descending stable sort by a metric, optionally cut to the top K.

use std::cmp::Ordering;

/// Sort `items` by `metric`, highest first.
///
/// The sort is stable: entries with equal metrics keep their input order.
/// Incomparable metrics (NaN) are treated as equal.
pub fn rank_by<T, K, F>(mut items: Vec<T>, metric: F) -> Vec<T>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    items.sort_by(|a, b| metric(b).partial_cmp(&metric(a)).unwrap_or(Ordering::Equal));
    items
}

/// [`rank_by`], then keep at most the first `k` entries.
pub fn top_k<T, K, F>(items: Vec<T>, k: usize, metric: F) -> Vec<T>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let mut ranked = rank_by(items, metric);
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sorts_descending() {
        let ranked = rank_by(vec![0.0, 75.3, 4.2, 75.4], |v| *v);
        assert_eq!(ranked, vec![75.4, 75.3, 4.2, 0.0]);
    }

    #[test]
    fn ties_keep_input_order() {
        let items = vec![("a", 1), ("b", 3), ("c", 1), ("d", 3), ("e", 2)];
        let ranked = rank_by(items, |(_, n)| *n);
        assert_eq!(ranked, vec![("b", 3), ("d", 3), ("e", 2), ("a", 1), ("c", 1)]);
    }

    #[test]
    fn ranking_is_idempotent() {
        let once = rank_by(vec![("x", 2), ("y", 9), ("z", 2), ("w", 5)], |(_, n)| *n);
        let twice = rank_by(once.clone(), |(_, n)| *n);
        assert_eq!(once, twice);
    }

    #[test]
    fn top_k_keeps_the_largest() {
        let items: Vec<u64> = vec![5, 1, 9, 3, 7, 7, 2];
        let kept = top_k(items.clone(), 3, |v| *v);
        assert_eq!(kept, vec![9, 7, 7]);

        let min_kept = kept.iter().min().copied().unwrap();
        let mut excluded = items;
        for v in &kept {
            let pos = excluded.iter().position(|x| x == v).unwrap();
            excluded.remove(pos);
        }
        assert!(excluded.iter().all(|v| *v <= min_kept));
    }

    #[test]
    fn top_k_never_exceeds_k() {
        assert_eq!(top_k(vec![1, 2], 20, |v| *v), vec![2, 1]);
        assert!(top_k(vec![1, 2, 3], 0, |v| *v).is_empty());
        assert!(top_k(Vec::<u32>::new(), 5, |v| *v).is_empty());
    }
}
