//! Unit tests for the walker
//!
//! Uses small recording visitors over in-memory documents.

#![allow(clippy::panic)]

use crate::node::{Node, parse};
use crate::schema::{ResolvedSchema, TypeRegistry};
use crate::walk::{
    FieldPath, IdentityVisitor, PathSegment, Visitor, WalkError, WalkOptions, Walker,
    infer_merge_key, merge_nodes,
};

#[derive(Default)]
struct Recorder {
    leaves: Vec<(String, String, Option<String>)>,
    maps: usize,
    scalars: Vec<String>,
}

impl Visitor for Recorder {
    fn visit_map(
        &mut self,
        source: &Node,
        _schema: Option<&ResolvedSchema>,
    ) -> Result<Option<Node>, WalkError> {
        self.maps += 1;
        Ok(Some(source.empty_like()))
    }

    fn visit_scalar(
        &mut self,
        source: &Node,
        _schema: Option<&ResolvedSchema>,
    ) -> Result<Option<Node>, WalkError> {
        self.scalars.push(source.render_flow());
        Ok(Some(source.clone()))
    }

    fn visit_leaf(
        &mut self,
        _key: &Node,
        value: &Node,
        path: &FieldPath,
        schema: Option<&ResolvedSchema>,
    ) -> Result<Option<Node>, WalkError> {
        self.leaves.push((
            path.to_string(),
            value.render_flow(),
            schema.and_then(|s| s.description()).map(str::to_string),
        ));
        Ok(Some(value.empty_like()))
    }
}

fn leaf_paths(recorder: &Recorder) -> Vec<&str> {
    recorder
        .leaves
        .iter()
        .map(|(path, _, _)| path.as_str())
        .collect()
}

#[test]
fn identity_walk_rebuilds_the_tree() {
    let source = parse(
        r#"
# Replica count
replicaCount: 1
image:
  repo: nginx # where from
  tag: "1.21"
ports:
  - 80
  - name: http
    port: 8080
empty:
"#,
    )
    .unwrap();

    let mut visitor = IdentityVisitor;
    let rebuilt = Walker::new(&mut visitor)
        .visit_keys_as_scalars(true)
        .walk(&source)
        .unwrap();

    assert_eq!(rebuilt, Some(source));
}

#[test]
fn leaves_are_visited_in_declaration_order_with_paths() {
    let source = parse("b: 1\na:\n  z: x\n  y:\nc: []\n").unwrap();
    let mut recorder = Recorder::default();

    Walker::new(&mut recorder)
        .visit_keys_as_scalars(true)
        .walk(&source)
        .unwrap();

    assert_eq!(leaf_paths(&recorder), vec!["b", "a.z", "a.y", "c"]);
    assert_eq!(recorder.leaves[0].1, "1");
    assert_eq!(recorder.leaves[3].1, "[]");
}

#[test]
fn leaf_visits_require_key_visits() {
    let source = parse("a: 1\n").unwrap();
    let mut recorder = Recorder::default();

    Walker::new(&mut recorder).walk(&source).unwrap();

    assert!(recorder.leaves.is_empty());
    assert_eq!(recorder.scalars, vec!["1"]);
}

#[test]
fn keys_are_visited_as_scalars_before_values() {
    let source = parse("a: 1\n").unwrap();
    let mut recorder = Recorder::default();

    Walker::new(&mut recorder)
        .visit_keys_as_scalars(true)
        .walk(&source)
        .unwrap();

    assert_eq!(recorder.scalars, vec!["a", "1"]);
}

#[test]
fn ignore_directive_drops_the_subtree() {
    let source = parse(
        r#"
# +doc-gen:ignore
secret:
  password: hunter2
token: abc # +doc-gen:ignore
kept: 1
"#,
    )
    .unwrap();
    let mut recorder = Recorder::default();

    let rebuilt = Walker::new(&mut recorder)
        .visit_keys_as_scalars(true)
        .walk(&source)
        .unwrap()
        .unwrap();

    assert_eq!(leaf_paths(&recorder), vec!["kept"]);
    assert_eq!(rebuilt.field_names(), vec!["kept"]);
    assert_eq!(recorder.maps, 1);
}

#[test]
fn ignore_token_inside_longer_head_comment_is_not_a_directive() {
    let source =
        parse("# Service account settings\n# +doc-gen:ignore\nsa:\n  create: true\n").unwrap();
    let mut recorder = Recorder::default();

    let rebuilt = Walker::new(&mut recorder)
        .visit_keys_as_scalars(true)
        .walk(&source)
        .unwrap()
        .unwrap();

    assert_eq!(leaf_paths(&recorder), vec!["sa.create"]);
    assert_eq!(rebuilt.field_names(), vec!["sa"]);
}

#[test]
fn ignore_directive_is_inert_without_key_visits() {
    let source = parse("token: abc # +doc-gen:ignore\n").unwrap();
    let mut visitor = IdentityVisitor;

    let rebuilt = Walker::new(&mut visitor).walk(&source).unwrap().unwrap();

    assert_eq!(rebuilt.field_names(), vec!["token"]);
}

#[test]
fn break_directive_emits_one_leaf_and_stops_descending() {
    let source = parse(
        r#"
resources: # +doc-gen:break
  limits:
    cpu: 100m
name: app
"#,
    )
    .unwrap();
    let mut recorder = Recorder::default();

    let rebuilt = Walker::new(&mut recorder)
        .visit_keys_as_scalars(true)
        .walk(&source)
        .unwrap()
        .unwrap();

    assert_eq!(leaf_paths(&recorder), vec!["resources", "name"]);
    assert_eq!(recorder.leaves[0].1, "{limits: {cpu: 100m}}");
    assert_eq!(recorder.maps, 1);

    let resources = rebuilt.get("resources").unwrap();
    assert_eq!(resources.entries().map(<[_]>::len), Some(0));
}

#[test]
fn break_directive_on_a_sequence_emits_one_leaf() {
    let source = parse("ports: # +doc-gen:break\n  - name: a\n    p: 1\n").unwrap();
    let mut recorder = Recorder::default();

    let rebuilt = Walker::new(&mut recorder)
        .visit_keys_as_scalars(true)
        .walk(&source)
        .unwrap()
        .unwrap();

    assert_eq!(leaf_paths(&recorder), vec!["ports"]);
    assert_eq!(recorder.leaves[0].1, "[{name: a, p: 1}]");
    assert_eq!(recorder.maps, 1);

    let ports = rebuilt.get("ports").unwrap();
    assert_eq!(ports.items().map(<[_]>::len), Some(0));
}

#[test]
fn break_in_head_comment_is_not_honored() {
    let source = parse("# +doc-gen:break\nresources:\n  cpu: 1\n").unwrap();
    let mut recorder = Recorder::default();

    Walker::new(&mut recorder)
        .visit_keys_as_scalars(true)
        .walk(&source)
        .unwrap();

    assert_eq!(leaf_paths(&recorder), vec!["resources.cpu"]);
}

#[test]
fn leaf_receives_resolved_schema() {
    let registry = TypeRegistry::from_document(&serde_json::json!({
        "definitions": {
            "Image": {
                "type": "object",
                "properties": { "tag": { "description": "Image tag" } }
            }
        }
    }));
    let source = parse(
        "image: # {\"$ref\": \"#/definitions/Image\"}\n  tag: v1\nport: 80 # {\"description\": \"Port\"}\n",
    )
    .unwrap();
    let mut recorder = Recorder::default();

    Walker::new(&mut recorder)
        .with_registry(Some(&registry))
        .visit_keys_as_scalars(true)
        .walk(&source)
        .unwrap();

    assert_eq!(recorder.leaves[0].2.as_deref(), Some("Image tag"));
    assert_eq!(recorder.leaves[1].2.as_deref(), Some("Port"));
}

struct DropMaps;

impl Visitor for DropMaps {
    fn visit_map(
        &mut self,
        source: &Node,
        _schema: Option<&ResolvedSchema>,
    ) -> Result<Option<Node>, WalkError> {
        if source.get("drop").is_some() {
            return Ok(None);
        }
        Ok(Some(source.empty_like()))
    }
}

#[test]
fn dropped_subtrees_are_removed_from_the_parent() {
    let source = parse("a:\n  drop: true\nb:\n  keep: true\n").unwrap();
    let mut visitor = DropMaps;

    let rebuilt = Walker::new(&mut visitor).walk(&source).unwrap().unwrap();

    assert_eq!(rebuilt.field_names(), vec!["b"]);
}

struct ScalarForMaps;

impl Visitor for ScalarForMaps {
    fn visit_map(
        &mut self,
        _source: &Node,
        _schema: Option<&ResolvedSchema>,
    ) -> Result<Option<Node>, WalkError> {
        Ok(Some(Node::scalar("oops")))
    }
}

#[test]
fn non_map_destination_is_a_structural_error() {
    let source = parse("a: 1\n").unwrap();
    let mut visitor = ScalarForMaps;

    let error = Walker::new(&mut visitor).walk(&source).unwrap_err();

    match error {
        WalkError::Structural { path, details } => {
            assert_eq!(path, "");
            assert!(details.contains("scalar"), "{details}");
        }
    }
}

#[test]
fn sequence_elements_use_index_segments() {
    let source = parse("ports:\n  - port: 80\n  - port: 443\n").unwrap();
    let mut recorder = Recorder::default();

    Walker::new(&mut recorder)
        .visit_keys_as_scalars(true)
        .walk(&source)
        .unwrap();

    assert_eq!(leaf_paths(&recorder), vec!["ports.0.port", "ports.1.port"]);
}

#[test]
fn associative_lists_merge_elements_by_key() {
    let source = parse(
        r#"
env:
  - name: A
    value: one
  - name: B
    value: two
  - name: A
    value: three
    extra: yes
"#,
    )
    .unwrap();
    let mut recorder = Recorder::default();

    let rebuilt = Walker::new(&mut recorder)
        .with_options(WalkOptions {
            visit_keys_as_scalars: true,
            infer_associative_lists: true,
            ..WalkOptions::default()
        })
        .walk(&source)
        .unwrap()
        .unwrap();

    assert_eq!(
        leaf_paths(&recorder),
        vec![
            "env.name=A.name",
            "env.name=A.value",
            "env.name=A.extra",
            "env.name=B.name",
            "env.name=B.value",
        ]
    );
    assert_eq!(recorder.leaves[1].1, "three");

    let env = rebuilt.get("env").unwrap().items().unwrap();
    assert_eq!(env.len(), 2);
}

#[test]
fn merge_key_inference_requires_every_element() {
    let root = parse("a:\n  - name: x\n  - id: y\nb:\n  - 1\nc: []\n").unwrap();
    let candidates = vec!["name".to_string(), "id".to_string()];

    let items = |field: &str| root.get(field).unwrap().items().unwrap().to_vec();
    assert_eq!(infer_merge_key(&items("a"), &candidates), None);
    assert_eq!(infer_merge_key(&items("b"), &candidates), None);
    assert_eq!(infer_merge_key(&items("c"), &candidates), None);
}

#[test]
fn merge_nodes_prefers_overlay_and_keeps_base_order() {
    let base = parse("a: 1\nb:\n  x: 1\n  y: 2\n").unwrap();
    let overlay = parse("b:\n  y: 3\nc: 4\na: 5\n").unwrap();

    let merged = merge_nodes(base, overlay);

    assert_eq!(merged.render_flow(), "{a: 5, b: {x: 1, y: 3}, c: 4}");
}

#[test]
fn field_path_display() {
    let mut path = FieldPath::from_fields(&["env"]);
    path.push(PathSegment::Keyed {
        key: "name".to_string(),
        value: "A".to_string(),
    });
    path.push(PathSegment::Index(2));

    assert_eq!(path.to_string(), "env.name=A.2");
    assert!(path.starts_with(&FieldPath::from_fields(&["env"])));
    assert!(FieldPath::root().is_root());
}
