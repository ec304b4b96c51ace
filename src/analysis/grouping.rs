use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

/// Keys that share one pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternGroup<K, P> {
    pub pattern: P,
    /// Members in the order they were encountered.
    pub members: Vec<K>,
}

/// Group `keys` by their aligned `patterns` in a single pass.
///
/// Groups come out in order of first appearance of their pattern. Patterns
/// compare structurally, so order and length must both match.
pub fn group_by_pattern<K, P>(
    keys: impl IntoIterator<Item = K>,
    patterns: impl IntoIterator<Item = P>,
) -> Vec<PatternGroup<K, P>>
where
    P: Eq + Hash + Clone,
{
    let mut index: HashMap<P, usize> = HashMap::new();
    let mut groups: Vec<PatternGroup<K, P>> = Vec::new();

    for (key, pattern) in keys.into_iter().zip(patterns) {
        match index.get(&pattern) {
            Some(&slot) => groups[slot].members.push(key),
            None => {
                index.insert(pattern.clone(), groups.len());
                groups.push(PatternGroup {
                    pattern,
                    members: vec![key],
                });
            }
        }
    }
    groups
}

/// Only the groups with two or more members.
pub fn shared_groups<K, P>(groups: Vec<PatternGroup<K, P>>) -> Vec<PatternGroup<K, P>> {
    groups.into_iter().filter(|g| g.members.len() > 1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_in_first_seen_order() {
        let groups = group_by_pattern(
            ["d1", "d2", "d3", "d4", "d5"],
            ["LL", "HL", "LL", "MM", "HL"],
        );
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].pattern, "LL");
        assert_eq!(groups[0].members, vec!["d1", "d3"]);
        assert_eq!(groups[1].members, vec!["d2", "d5"]);
        assert_eq!(groups[2].members, vec!["d4"]);
    }

    #[test]
    fn shared_drops_singletons() {
        let shared = shared_groups(group_by_pattern(
            ["a", "b", "c"],
            [vec![1, 0], vec![0, 1], vec![1, 0]],
        ));
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].pattern, vec![1, 0]);
        assert_eq!(shared[0].members, vec!["a", "c"]);
    }

    #[test]
    fn patterns_must_match_in_length() {
        let groups = group_by_pattern(["a", "b"], [vec![0], vec![0, 0]]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn deterministic() {
        let keys = ["x", "y", "z", "w"];
        let pats = ["p", "q", "p", "q"];
        assert_eq!(
            group_by_pattern(keys, pats),
            group_by_pattern(keys, pats)
        );
    }

    #[test]
    fn empty_input() {
        let groups: Vec<PatternGroup<&str, u8>> = group_by_pattern([], []);
        assert!(groups.is_empty());
    }
}
