/// Returns every `k`-element subset of `items`, keeping input order inside each subset
pub fn get_combinations<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
    let mut result = Vec::new();
    if k > items.len() {
        return result;
    }
    let mut current = Vec::with_capacity(k);
    backtrack(items, k, 0, &mut current, &mut result);
    result
}

fn backtrack<T: Clone>(
    items: &[T],
    k: usize,
    start: usize,
    current: &mut Vec<T>,
    result: &mut Vec<Vec<T>>,
) {
    if current.len() == k {
        result.push(current.clone());
        return;
    }

    let still_needed = k - current.len();
    // Stop once too few items remain to finish the subset
    for i in start..=(items.len() - still_needed) {
        current.push(items[i].clone());
        backtrack(items, k, i + 1, current, result);
        current.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Binomial coefficient C(n, k)
    fn count_combinations(n: usize, k: usize) -> usize {
        if k > n {
            return 0;
        }
        let k = k.min(n - k);
        (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
    }

    #[test]
    fn five_choose_four() {
        let combos = get_combinations(&[1, 2, 3, 4, 5], 4);
        assert_eq!(combos.len(), 5);

        let as_sets: HashSet<Vec<i32>> = combos.into_iter().collect();
        let expected: HashSet<Vec<i32>> = [
            vec![1, 2, 3, 4],
            vec![1, 2, 3, 5],
            vec![1, 2, 4, 5],
            vec![1, 3, 4, 5],
            vec![2, 3, 4, 5],
        ]
        .into_iter()
        .collect();
        assert_eq!(as_sets, expected);
    }

    #[test]
    fn k_zero_gives_one_empty_subset() {
        let combos = get_combinations(&["a", "b"], 0);
        assert_eq!(combos, vec![Vec::<&str>::new()]);

        let empty: [u8; 0] = [];
        assert_eq!(get_combinations(&empty, 0).len(), 1);
    }

    #[test]
    fn k_larger_than_n_gives_nothing() {
        assert!(get_combinations(&[1, 2, 3], 4).is_empty());
        assert!(get_combinations(&["only"], 4).is_empty());
    }

    #[test]
    fn counts_match_binomial_and_subsets_are_distinct() {
        for n in 0..=8usize {
            let items: Vec<usize> = (0..n).collect();
            for k in 0..=n + 1 {
                let combos = get_combinations(&items, k);
                assert_eq!(combos.len(), count_combinations(n, k), "n={} k={}", n, k);

                let mut seen = HashSet::new();
                for combo in &combos {
                    let unique: HashSet<&usize> = combo.iter().collect();
                    assert_eq!(unique.len(), combo.len(), "repeated item in {:?}", combo);
                    assert!(combo.windows(2).all(|w| w[0] < w[1]), "order lost in {:?}", combo);

                    let mut key = combo.clone();
                    key.sort();
                    assert!(seen.insert(key), "duplicate subset {:?}", combo);
                }
            }
        }
    }
}
