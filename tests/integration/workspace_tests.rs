use pathdedup::document::{Document, DocumentError, PageItem, SimpleShape, Workspace};
use pathdedup::duplicates::{dedup, DedupEngine, Scope};
use pathdedup::fingerprint::Precision;
use std::fs;
use tempfile::TempDir;

const POSTER: &str = r#"{
  "active": 1,
  "documents": [
    { "name": "unused", "layers": [] },
    {
      "name": "poster",
      "selection": [11, 12],
      "layers": [
        {
          "type": "layer",
          "name": "Artwork",
          "children": [
            { "type": "path", "id": 11, "name": "tri-a", "closed": true, "points": [
              { "anchor": {"x": 0, "y": 0}, "in_handle": {"x": 0, "y": 0}, "out_handle": {"x": 0, "y": 0} },
              { "anchor": {"x": 4, "y": 0}, "in_handle": {"x": 4, "y": 0}, "out_handle": {"x": 4, "y": 0} },
              { "anchor": {"x": 2, "y": 3}, "in_handle": {"x": 2, "y": 3}, "out_handle": {"x": 2, "y": 3}, "kind": "smooth" }
            ]},
            { "type": "path", "id": 12, "name": "tri-b", "closed": true, "points": [
              { "anchor": {"x": 0.3, "y": 0}, "in_handle": {"x": 0, "y": 0}, "out_handle": {"x": 0, "y": 0} },
              { "anchor": {"x": 4, "y": 0}, "in_handle": {"x": 4, "y": 0}, "out_handle": {"x": 4, "y": 0} },
              { "anchor": {"x": 2, "y": 3}, "in_handle": {"x": 2, "y": 3}, "out_handle": {"x": 2, "y": 3}, "kind": "smooth" }
            ]},
            { "type": "group", "name": "icons", "children": [
              { "type": "compound", "name": "ring-a", "paths": [
                { "type": "path", "closed": true, "points": [
                  { "anchor": {"x": 10, "y": 10}, "in_handle": {"x": 10, "y": 10}, "out_handle": {"x": 10, "y": 10} }
                ]},
                { "type": "path", "closed": false, "points": [
                  { "anchor": {"x": 11, "y": 11}, "in_handle": {"x": 11, "y": 11}, "out_handle": {"x": 11, "y": 11} }
                ]}
              ]},
              { "type": "compound", "name": "ring-b", "paths": [
                { "type": "path", "closed": false, "points": [
                  { "anchor": {"x": 11, "y": 11}, "in_handle": {"x": 11, "y": 11}, "out_handle": {"x": 11, "y": 11} }
                ]},
                { "type": "path", "closed": true, "points": [
                  { "anchor": {"x": 10, "y": 10}, "in_handle": {"x": 10, "y": 10}, "out_handle": {"x": 10, "y": 10} }
                ]}
              ]},
              { "type": "other", "name": "label" }
            ]}
          ]
        },
        {
          "type": "layer",
          "name": "Guides",
          "guide": true,
          "children": [
            { "type": "path", "name": "guide-copy", "closed": true, "points": [
              { "anchor": {"x": 0, "y": 0}, "in_handle": {"x": 0, "y": 0}, "out_handle": {"x": 0, "y": 0} }
            ]}
          ]
        }
      ]
    }
  ]
}"#;

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_dedup_save_reload() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "poster.json", POSTER);

    let mut workspace = Workspace::load(&path).unwrap();
    let doc = workspace.active_document_mut().unwrap();
    assert_eq!(doc.name, "poster");

    let outcome = DedupEngine::default().run(doc).unwrap();
    // The rings match regardless of sub-path order; the triangles differ
    // by 0.3, which survives precision 1.
    assert_eq!(outcome.removed_compound(), 1);
    assert_eq!(outcome.removed_simple(), 0);

    workspace.save(&path).unwrap();
    let reloaded = Workspace::load(&path).unwrap();
    let doc = reloaded.active_document().unwrap();
    assert!(doc.contains_name("ring-a"));
    assert!(!doc.contains_name("ring-b"));
    assert!(doc.contains_name("guide-copy"));
    assert!(doc.contains_name("label"));
    assert_eq!(reloaded.documents.len(), 2);
}

#[test]
fn test_precision_zero_merges_near_duplicates_in_selection() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "poster.json", POSTER);

    let mut workspace = Workspace::load(&path).unwrap();
    let doc = workspace.active_document_mut().unwrap();
    let outcome = dedup(doc, Scope::Selection, Precision::new(0).unwrap()).unwrap();

    assert_eq!(outcome.simple.candidates, 2);
    assert_eq!(outcome.removed_simple(), 1);
    assert!(doc.contains_name("tri-a"));
    assert!(!doc.contains_name("tri-b"));
    assert_eq!(doc.selection.len(), 1);
}

#[test]
fn test_explicit_ids_are_kept() {
    let workspace = Workspace::from_json(POSTER).unwrap();
    let doc = workspace.active_document().unwrap();
    assert_eq!(doc.find_by_name("tri-a").unwrap().id.0, 11);
    assert_eq!(doc.find_by_name("tri-b").unwrap().id.0, 12);
    assert!(doc.find_by_name("ring-a").unwrap().id.0 > 12);
}

#[test]
fn test_top_level_must_be_layer() {
    let json = r#"{ "documents": [ { "name": "bad", "layers": [ { "type": "group" } ] } ] }"#;
    assert!(matches!(
        Workspace::from_json(json),
        Err(DocumentError::NotALayer { index: 0 })
    ));
}

#[test]
fn test_duplicate_ids_rejected() {
    let json = r#"{ "documents": [ { "name": "dup", "layers": [
        { "type": "layer", "children": [
            { "type": "other", "id": 5 },
            { "type": "other", "id": 5 }
        ]}
    ] } ] }"#;
    assert!(matches!(
        Workspace::from_json(json),
        Err(DocumentError::DuplicateId(_))
    ));
}

#[test]
fn test_empty_workspace_has_no_active_document() {
    let workspace = Workspace::from_json(r#"{ "documents": [] }"#).unwrap();
    assert!(workspace.active_document().is_none());
}

#[test]
fn test_builder_documents_serialize_with_ids() {
    let doc = Document::new("built").with_layer(PageItem::layer(vec![PageItem::path(
        SimpleShape::rect(0.0, 0.0, 1.0, 1.0),
    )]));
    let json = Workspace::new(vec![doc]).to_json_pretty().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let layer = &value["documents"][0]["layers"][0];
    assert_eq!(layer["type"], "layer");
    assert_eq!(layer["id"], 1);
    assert_eq!(layer["children"][0]["id"], 2);
}
