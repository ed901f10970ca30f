//! Structural diff computation engine.
//!
//! The core entry point is [`compute_diff`], which walks two configuration
//! trees depth-first and emits one [`DiffEntry`] per difference.

use crate::diff::model::{ArrayItemChange, DiffEntry};
use crate::value::{ConfigValue, Path};
use std::cmp::Ordering;

/// Fields that identify an element of a configuration list, in priority order.
///
/// Elements of the same list that carry the same identity are compared with
/// each other even when the list was reordered around them.
pub const IDENTITY_KEYS: &[&str] = &[
    "name",
    "account-name",
    "filter-name",
    "alarm-name",
    "policy-name",
    "role",
    "zone",
    "target-name",
];

/// Identity of a list element: its first string-valued [`IDENTITY_KEYS`] field.
pub fn element_identity(value: &ConfigValue) -> Option<&str> {
    IDENTITY_KEYS
        .iter()
        .find_map(|key| value.get(key).and_then(ConfigValue::as_str))
}

/// Compute the structural diff between two configuration trees.
///
/// Keyed nodes are compared over the union of their keys: keys of `previous`
/// in order first, then keys only `current` has. Sequences keep unchanged
/// elements aligned, so removing one element from the middle of a list yields
/// a single `ArrayChanged`/`Deleted` entry instead of an edit per shifted
/// element. Identical sub-trees produce no entries.
pub fn compute_diff(previous: &ConfigValue, current: &ConfigValue) -> Vec<DiffEntry> {
    let mut out = Vec::new();
    diff_node(previous, current, &Path::root(), &mut out);
    out
}

fn diff_node(lhs: &ConfigValue, rhs: &ConfigValue, path: &Path, out: &mut Vec<DiffEntry>) {
    if lhs == rhs {
        return;
    }
    if let (Some(l), Some(r)) = (lhs.entries(), rhs.entries()) {
        diff_keyed(l, r, path, out);
        return;
    }
    if let (Some(l), Some(r)) = (lhs.as_sequence(), rhs.as_sequence()) {
        diff_sequence(l, r, path, out);
        return;
    }
    out.push(DiffEntry::Edited {
        path: path.clone(),
        lhs: lhs.clone(),
        rhs: rhs.clone(),
    });
}

fn diff_keyed(
    lhs: &[(String, ConfigValue)],
    rhs: &[(String, ConfigValue)],
    path: &Path,
    out: &mut Vec<DiffEntry>,
) {
    for (key, l) in lhs {
        match rhs.iter().find(|(k, _)| k == key) {
            Some((_, r)) => diff_node(l, r, &path.child(key.as_str()), out),
            None => out.push(DiffEntry::Deleted {
                path: path.child(key.as_str()),
                lhs: l.clone(),
            }),
        }
    }
    for (key, r) in rhs {
        if !lhs.iter().any(|(k, _)| k == key) {
            out.push(DiffEntry::Added {
                path: path.child(key.as_str()),
                rhs: r.clone(),
            });
        }
    }
}

/// Pair the elements of two sequences.
///
/// Elements carrying the same identity are paired first, wherever they sit,
/// and compared at their current index. The rest are aligned on a longest
/// common subsequence of equal elements; between those anchors an element is
/// only paired with the one at the same index. Whatever is left over on either
/// side is an element removal or insertion.
fn diff_sequence(lhs: &[ConfigValue], rhs: &[ConfigValue], path: &Path, out: &mut Vec<DiffEntry>) {
    let mut paired: Vec<Option<usize>> = vec![None; lhs.len()];
    let mut r_taken = vec![false; rhs.len()];

    for (li, l) in lhs.iter().enumerate() {
        let Some(id) = element_identity(l) else {
            continue;
        };
        let found = rhs
            .iter()
            .enumerate()
            .find(|&(rj, r)| !r_taken[rj] && element_identity(r) == Some(id));
        if let Some((rj, _)) = found {
            r_taken[rj] = true;
            paired[li] = Some(rj);
        }
    }

    let l_free: Vec<usize> = (0..lhs.len()).filter(|&li| paired[li].is_none()).collect();
    let r_free: Vec<usize> = (0..rhs.len()).filter(|&rj| !r_taken[rj]).collect();
    let mut anchors = common_subsequence(
        &l_free.iter().map(|&li| &lhs[li]).collect::<Vec<_>>(),
        &r_free.iter().map(|&rj| &rhs[rj]).collect::<Vec<_>>(),
    );
    anchors.push((l_free.len(), r_free.len()));

    let (mut l_start, mut r_start) = (0, 0);
    for (l_end, r_end) in anchors {
        for &li in &l_free[l_start..l_end] {
            if r_free[r_start..r_end].contains(&li) {
                paired[li] = Some(li);
                r_taken[li] = true;
            }
        }
        if let (Some(&li), Some(&rj)) = (l_free.get(l_end), r_free.get(r_end)) {
            paired[li] = Some(rj);
            r_taken[rj] = true;
        }
        l_start = l_end + 1;
        r_start = r_end + 1;
    }

    // an element that changed shape falls through to a plain edit at its index
    for (li, rj) in paired.iter().enumerate() {
        if let Some(rj) = *rj {
            diff_node(&lhs[li], &rhs[rj], &path.child(rj), out);
        }
    }
    for (li, rj) in paired.iter().enumerate() {
        if rj.is_none() {
            out.push(DiffEntry::ArrayChanged {
                path: path.clone(),
                index: li,
                item: ArrayItemChange::Deleted {
                    lhs: lhs[li].clone(),
                },
            });
        }
    }
    for (rj, taken) in r_taken.iter().enumerate() {
        if !taken {
            out.push(DiffEntry::ArrayChanged {
                path: path.clone(),
                index: rj,
                item: ArrayItemChange::Added {
                    rhs: rhs[rj].clone(),
                },
            });
        }
    }
}

/// Index pairs of a longest common subsequence of equal elements.
///
/// Ties skip the element with the lower canonical JSON text, so swapping the
/// operands selects the same anchors.
fn common_subsequence(lhs: &[&ConfigValue], rhs: &[&ConfigValue]) -> Vec<(usize, usize)> {
    let (n, m) = (lhs.len(), rhs.len());
    // lengths[i][j] = LCS length of lhs[i..] and rhs[j..]
    let mut lengths = vec![vec![0u32; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lengths[i][j] = if lhs[i] == rhs[j] {
                lengths[i + 1][j + 1] + 1
            } else {
                lengths[i + 1][j].max(lengths[i][j + 1])
            };
        }
    }

    let l_keys: Vec<String> = lhs.iter().map(|v| v.to_json().to_string()).collect();
    let r_keys: Vec<String> = rhs.iter().map(|v| v.to_json().to_string()).collect();

    let mut pairs = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if lhs[i] == rhs[j] {
            pairs.push((i, j));
            i += 1;
            j += 1;
            continue;
        }
        let skip_lhs = match lengths[i + 1][j].cmp(&lengths[i][j + 1]) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => l_keys[i] < r_keys[j],
        };
        if skip_lhs {
            i += 1;
        } else {
            j += 1;
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;
    use serde_json::json;

    fn cv(value: serde_json::Value) -> ConfigValue {
        ConfigValue::from_json(&value)
    }

    #[test]
    fn test_common_subsequence_aligns_unchanged_elements() {
        let lhs = [cv(json!("a")), cv(json!("b")), cv(json!("c"))];
        let rhs = [cv(json!("a")), cv(json!("c"))];
        assert_eq!(
            common_subsequence(&lhs.iter().collect::<Vec<_>>(), &rhs.iter().collect::<Vec<_>>()),
            vec![(0, 0), (2, 1)]
        );
    }

    #[test]
    fn test_element_identity_priority() {
        assert_eq!(
            element_identity(&cv(json!({"role": "Ops", "name": "Web"}))),
            Some("Web")
        );
        assert_eq!(element_identity(&cv(json!({"zone": "example.com"}))), Some("example.com"));
        assert_eq!(element_identity(&cv(json!("Web"))), None);
    }

    #[test]
    fn test_reordered_named_elements_compare_by_identity() {
        let lhs = cv(json!({"subnets": [
            {"name": "TGW", "az": "a"},
            {"name": "Web", "az": "a"}
        ]}));
        let rhs = cv(json!({"subnets": [
            {"name": "Web", "az": "b"},
            {"name": "TGW", "az": "a"}
        ]}));
        let diff = compute_diff(&lhs, &rhs);
        assert_eq!(
            diff,
            vec![DiffEntry::Edited {
                path: path!["subnets", 0, "az"],
                lhs: cv(json!("a")),
                rhs: cv(json!("b")),
            }]
        );
    }

    #[test]
    fn test_element_changing_shape_is_element_edit() {
        let diff = compute_diff(
            &cv(json!({"cidr-blocks": ["10.0.0.0/8"]})),
            &cv(json!({"cidr-blocks": [{"vpc": "Central", "subnet": ["Web"]}]})),
        );
        assert_eq!(
            diff,
            vec![DiffEntry::Edited {
                path: path!["cidr-blocks", 0],
                lhs: cv(json!("10.0.0.0/8")),
                rhs: cv(json!({"vpc": "Central", "subnet": ["Web"]})),
            }]
        );
    }

    #[test]
    fn test_swapped_scalar_lists_pick_same_anchor() {
        let a = cv(json!(["dev", "prod"]));
        let b = cv(json!(["prod", "dev"]));
        let forward: Vec<DiffEntry> = compute_diff(&a, &b).iter().map(DiffEntry::mirrored).collect();
        let mut backward = compute_diff(&b, &a);
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(
            forward,
            vec![
                DiffEntry::ArrayChanged {
                    path: Path::root(),
                    index: 0,
                    item: ArrayItemChange::Added { rhs: cv(json!("dev")) },
                },
                DiffEntry::ArrayChanged {
                    path: Path::root(),
                    index: 1,
                    item: ArrayItemChange::Deleted { lhs: cv(json!("dev")) },
                },
            ]
        );
    }

    #[test]
    fn test_unequal_elements_at_different_indexes_are_not_paired() {
        let diff = compute_diff(&cv(json!(["a", "b", "c"])), &cv(json!(["b", "x"])));
        assert_eq!(
            diff,
            vec![
                DiffEntry::ArrayChanged {
                    path: Path::root(),
                    index: 0,
                    item: ArrayItemChange::Deleted { lhs: cv(json!("a")) },
                },
                DiffEntry::ArrayChanged {
                    path: Path::root(),
                    index: 2,
                    item: ArrayItemChange::Deleted { lhs: cv(json!("c")) },
                },
                DiffEntry::ArrayChanged {
                    path: Path::root(),
                    index: 1,
                    item: ArrayItemChange::Added { rhs: cv(json!("x")) },
                },
            ]
        );
    }
}
