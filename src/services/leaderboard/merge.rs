//! Registry zero-fill

use std::collections::HashSet;
use tracing::debug;

use crate::core::types::{ComputedEntry, RegistryUser};

/// Append a zero-valued entry for every registry user missing from `entries`.
///
/// Returns the number of entries added. Registry users sharing a `refCode`
/// produce one entry; the first wins.
pub fn zero_fill(entries: &mut Vec<ComputedEntry>, users: &[RegistryUser]) -> usize {
    let mut present: HashSet<String> = entries.iter().map(|e| e.ref_code.clone()).collect();
    let before = entries.len();

    for user in users {
        if user.ref_code.trim().is_empty() || present.contains(&user.ref_code) {
            continue;
        }
        present.insert(user.ref_code.clone());
        entries.push(ComputedEntry::zero(user.ref_code.as_str(), user.display_name()));
    }

    let added = entries.len() - before;
    if added > 0 {
        debug!(added, "Zero-filled registry participants without activity");
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_users_are_appended() {
        let mut entries = vec![ComputedEntry::zero("A", "Alice")];
        let users = vec![
            RegistryUser::new("A"),
            RegistryUser {
                username: Some("bob".to_string()),
                ..RegistryUser::new("B")
            },
            RegistryUser::new("C"),
        ];

        let added = zero_fill(&mut entries, &users);

        assert_eq!(added, 2);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "bob", "C"]);
        assert_eq!(entries[1].id, "B");
        assert_eq!(entries[2].total_points, 0);
    }

    #[test]
    fn test_existing_entries_are_kept() {
        let mut entries = vec![ComputedEntry {
            total_points: 9,
            ..ComputedEntry::zero("A", "A")
        }];
        let added = zero_fill(&mut entries, &[RegistryUser::new("A")]);

        assert_eq!(added, 0);
        assert_eq!(entries[0].total_points, 9);
    }

    #[test]
    fn test_duplicate_and_blank_registry_codes() {
        let mut entries = Vec::new();
        let users = vec![
            RegistryUser::new("X"),
            RegistryUser::new("X"),
            RegistryUser::new(" "),
        ];

        assert_eq!(zero_fill(&mut entries, &users), 1);
    }
}
