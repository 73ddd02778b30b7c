//! Lookup by sorting a scratch copy, then binary searching it.

use crate::domain::Handle;

/// First handle in `handles` whose key equals `target`.
///
/// `handles` is copied, stably sorted by key and searched for the lower bound,
/// so among duplicate keys the one earliest in `handles` wins. `handles`
/// itself is never reordered.
pub(crate) fn find_first_by_key<K: Ord>(
    handles: &[Handle],
    target: &K,
    key_of: impl Fn(Handle) -> K,
) -> Option<Handle> {
    let mut scratch = handles.to_vec();
    scratch.sort_by_key(|&h| key_of(h));

    let at = scratch.partition_point(|&h| key_of(h) < *target);
    scratch.get(at).copied().filter(|&h| key_of(h) == *target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handles(n: usize) -> Vec<Handle> {
        (0..n).map(Handle::from_index).collect()
    }

    #[test]
    fn finds_present_keys() {
        let keys = [40, 10, 30, 20];
        let hs = handles(keys.len());
        for (i, key) in keys.iter().enumerate() {
            let found = find_first_by_key(&hs, key, |h| keys[h.index()]);
            assert_eq!(found, Some(Handle::from_index(i)));
        }
    }

    #[test]
    fn misses_return_none() {
        let keys = [40, 10, 30];
        let hs = handles(keys.len());
        for missing in [0, 15, 50] {
            assert_eq!(find_first_by_key(&hs, &missing, |h| keys[h.index()]), None);
        }
    }

    #[test]
    fn empty_input_finds_nothing() {
        let keys: [i32; 0] = [];
        assert_eq!(find_first_by_key(&[], &1, |h| keys[h.index()]), None);
    }

    #[test]
    fn duplicate_keys_resolve_to_earliest_position() {
        let keys = [7, 3, 7, 7];
        // Handles in a scrambled canonical order: 3, 2, 0, 1.
        let hs = vec![
            Handle::from_index(3),
            Handle::from_index(2),
            Handle::from_index(0),
            Handle::from_index(1),
        ];
        let found = find_first_by_key(&hs, &7, |h| keys[h.index()]);
        assert_eq!(found, Some(Handle::from_index(3)));
    }

    #[test]
    fn input_order_is_untouched() {
        let keys = [3, 1, 2];
        let hs = handles(keys.len());
        let before = hs.clone();
        let _ = find_first_by_key(&hs, &1, |h| keys[h.index()]);
        assert_eq!(hs, before);
    }
}
