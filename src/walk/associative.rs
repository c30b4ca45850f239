use std::mem;

use crate::node::{Annotations, MapEntry, Node, NodeKind};

/// Identifying fields tried when inferring an associative list.
pub const DEFAULT_MERGE_KEYS: &[&str] = &["name", "id", "key"];

/// Returns the first candidate field that every element of the sequence
/// carries as a non-empty scalar.
///
/// Sequences that are empty or contain anything other than maps are never
/// associative.
///
/// # Example
///
/// ```
/// use valuedoc::node::parse;
/// use valuedoc::walk::infer_merge_key;
///
/// let root = parse("env:\n  - name: A\n    value: a\n  - name: B\n").unwrap();
/// let items = root.get("env").unwrap().items().unwrap();
/// assert_eq!(infer_merge_key(items, &["name".to_string()]).as_deref(), Some("name"));
/// ```
pub fn infer_merge_key(items: &[Node], candidates: &[String]) -> Option<String> {
    if items.is_empty() {
        return None;
    }

    candidates
        .iter()
        .find(|candidate| items.iter().all(|item| key_value(item, candidate).is_some()))
        .cloned()
}

/// Deep merges two nodes with the overlay taking precedence.
///
/// Maps are merged field by field, keeping the base's field order and
/// appending fields only the overlay has. Anything else is replaced by the
/// overlay. Comments of the overlay win when it has any.
pub fn merge_nodes(base: Node, overlay: Node) -> Node {
    match (base, overlay) {
        (
            Node {
                kind: NodeKind::Map(base_entries),
                annotations: base_annotations,
            },
            Node {
                kind: NodeKind::Map(overlay_entries),
                annotations: overlay_annotations,
            },
        ) => {
            let mut merged = base_entries;

            for overlay_entry in overlay_entries {
                let position = merged
                    .iter()
                    .position(|entry| entry.key.as_scalar() == overlay_entry.key.as_scalar());

                match position {
                    None => merged.push(overlay_entry),
                    Some(index) => {
                        let base_entry = merged.remove(index);
                        let key = if has_comments(&overlay_entry.key) {
                            overlay_entry.key
                        } else {
                            base_entry.key
                        };
                        let value = merge_nodes(base_entry.value, overlay_entry.value);
                        merged.insert(index, MapEntry::new(key, value));
                    }
                }
            }

            let annotations = if has_comments_in(&overlay_annotations) {
                overlay_annotations
            } else {
                base_annotations
            };

            Node {
                kind: NodeKind::Map(merged),
                annotations,
            }
        }
        (_, overlay) => overlay,
    }
}

/// Groups elements by the value of `key`, in order of first appearance,
/// deep merging elements that share a value.
pub(super) fn group_by_key(items: &[Node], key: &str) -> Vec<(String, Node)> {
    let mut groups: Vec<(String, Node)> = Vec::new();

    for item in items {
        let Some(value) = key_value(item, key) else {
            continue;
        };

        match groups.iter().position(|(existing, _)| existing == value) {
            Some(index) => {
                let slot = &mut groups[index].1;
                let base = mem::replace(slot, Node::null());
                *slot = merge_nodes(base, item.clone());
            }
            None => groups.push((value.to_string(), item.clone())),
        }
    }

    groups
}

fn key_value<'a>(item: &'a Node, key: &str) -> Option<&'a str> {
    item.get(key)
        .and_then(Node::as_scalar)
        .filter(|value| !value.is_empty())
}

fn has_comments(node: &Node) -> bool {
    has_comments_in(&node.annotations)
}

fn has_comments_in(annotations: &Annotations) -> bool {
    !annotations.head_comment.is_empty() || !annotations.line_comment.is_empty()
}
