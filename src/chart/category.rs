//! Category ordering for the storage bar.

use tracing::warn;

use crate::report::{Categories, FREE_CATEGORY};

/// One category segment of the storage bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySlice {
    pub name: String,
    pub size: u64,
}

/// Order categories for display.
///
/// Non-empty categories other than `free` come first, largest first, with
/// ties kept in payload order. `free` is always appended last with its raw
/// size, even when zero. A payload without `free` gets a zero-size one.
pub fn aggregate_categories(categories: &Categories) -> Vec<CategorySlice> {
    let mut slices: Vec<CategorySlice> = categories
        .iter()
        .filter(|(name, size)| *name != FREE_CATEGORY && **size > 0)
        .map(|(name, size)| CategorySlice {
            name: name.to_string(),
            size: *size,
        })
        .collect();

    // stable: equal sizes keep payload order
    slices.sort_by(|a, b| b.size.cmp(&a.size));

    let free = match categories.get(FREE_CATEGORY) {
        Some(size) => *size,
        None => {
            warn!("analysis has no \"{}\" category, using 0", FREE_CATEGORY);
            0
        }
    };
    slices.push(CategorySlice {
        name: FREE_CATEGORY.to_string(),
        size: free,
    });

    slices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(entries: &[(&str, u64)]) -> Categories {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn names(slices: &[CategorySlice]) -> Vec<&str> {
        slices.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_sorted_descending_with_free_last() {
        let slices = aggregate_categories(&categories(&[
            ("free", 400),
            ("media", 200),
            ("docs", 300),
        ]));

        assert_eq!(names(&slices), vec!["docs", "media", "free"]);
        assert_eq!(slices[0].size, 300);
        assert_eq!(slices[2].size, 400);
    }

    #[test]
    fn test_free_last_even_when_largest_or_zero() {
        let slices = aggregate_categories(&categories(&[("free", 10_000), ("apps", 5)]));
        assert_eq!(names(&slices), vec!["apps", "free"]);

        let slices = aggregate_categories(&categories(&[("apps", 5), ("free", 0)]));
        assert_eq!(names(&slices), vec!["apps", "free"]);
        assert_eq!(slices[1].size, 0);
    }

    #[test]
    fn test_zero_size_categories_dropped() {
        let slices = aggregate_categories(&categories(&[
            ("photos", 0),
            ("videos", 7),
            ("audio", 0),
            ("free", 3),
        ]));
        assert_eq!(names(&slices), vec!["videos", "free"]);
    }

    #[test]
    fn test_ties_keep_payload_order() {
        let slices = aggregate_categories(&categories(&[
            ("b", 5),
            ("a", 5),
            ("c", 9),
            ("d", 5),
            ("free", 1),
        ]));
        assert_eq!(names(&slices), vec!["c", "b", "a", "d", "free"]);
    }

    #[test]
    fn test_missing_free_is_appended_as_zero() {
        let slices = aggregate_categories(&categories(&[("docs", 1)]));
        assert_eq!(names(&slices), vec!["docs", "free"]);
        assert_eq!(slices[1].size, 0);

        let slices = aggregate_categories(&Categories::new());
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].name, "free");
    }

    #[test]
    fn test_non_free_strictly_ordered() {
        let slices = aggregate_categories(&categories(&[
            ("archives", 12),
            ("other", 90),
            ("executables", 33),
            ("documents", 1),
            ("free", 50),
        ]));
        let (last, rest) = slices.split_last().unwrap();
        assert_eq!(last.name, "free");
        assert!(rest.windows(2).all(|w| w[0].size > w[1].size));
    }
}
