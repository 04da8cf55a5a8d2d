/// Splits `items` into consecutive groups of at most `size` items.
///
/// Order is preserved both across and within groups; only the last group may
/// be shorter than `size`. `size` must be at least 1, which
/// [`BatchConfig::validate`](super::BatchConfig::validate) guarantees.
pub fn chunk<T>(items: Vec<T>, size: usize) -> Vec<Vec<T>> {
    debug_assert!(size > 0, "chunk size must be at least 1");

    let mut groups = Vec::with_capacity(items.len().div_ceil(size));
    let mut items = items.into_iter().peekable();
    while items.peek().is_some() {
        groups.push(items.by_ref().take(size).collect());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_group_holds_the_remainder() {
        let groups = chunk((0..25).collect(), 10);
        let sizes: Vec<usize> = groups.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![10, 10, 5]);
    }

    #[test]
    fn preserves_order() {
        let groups = chunk(vec!["a", "b", "c", "d", "e"], 2);
        assert_eq!(groups, vec![vec!["a", "b"], vec!["c", "d"], vec!["e"]]);
    }

    #[test]
    fn exact_multiple_has_no_short_group() {
        let groups = chunk((0..20).collect::<Vec<u8>>(), 10);
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.len() == 10));
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(chunk(Vec::<u8>::new(), 10).is_empty());
    }

    #[test]
    fn size_one_isolates_every_item() {
        assert_eq!(chunk(vec![1, 2, 3], 1), vec![vec![1], vec![2], vec![3]]);
    }
}
