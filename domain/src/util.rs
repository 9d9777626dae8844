//! Shared utility functions.

/// Insert `item`, replacing an existing element that compares equal.
///
/// Keeps the position of the replaced element so iteration order stays the
/// order of first insertion. Returns `true` when an element was replaced.
pub fn upsert<T: PartialEq>(items: &mut Vec<T>, item: T) -> bool {
    match items.iter().position(|existing| *existing == item) {
        Some(index) => {
            items[index] = item;
            true
        }
        None => {
            items.push(item);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Keyed(&'static str);

    #[test]
    fn upsert_appends_new_items() {
        let mut items = vec![Keyed("a")];
        assert!(!upsert(&mut items, Keyed("b")));
        assert_eq!(items, vec![Keyed("a"), Keyed("b")]);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut items = vec![Keyed("a"), Keyed("b")];
        assert!(upsert(&mut items, Keyed("a")));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], Keyed("a"));
    }
}
