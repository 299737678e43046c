use pathdedup::document::{
    Document, DocumentHost, EligibilityFlags, ItemId, PageItem, RemoveError, SimpleShape,
};
use pathdedup::duplicates::{dedup, DedupEngine, DedupError, EngineConfig, Scope};
use pathdedup::fingerprint::Precision;
use pathdedup::output::{format_summary, status_message};

/// Wraps a document and refuses the n-th removal attempt (1-based).
struct FlakyHost {
    doc: Document,
    fail_on: usize,
    attempts: usize,
}

impl FlakyHost {
    fn new(doc: Document, fail_on: usize) -> Self {
        Self {
            doc,
            fail_on,
            attempts: 0,
        }
    }
}

impl DocumentHost for FlakyHost {
    fn document(&self) -> &Document {
        &self.doc
    }

    fn remove(&mut self, id: ItemId) -> Result<(), RemoveError> {
        self.attempts += 1;
        if self.attempts == self.fail_on {
            return Err(RemoveError::Refused {
                id,
                reason: "simulated failure".to_string(),
            });
        }
        self.doc.remove_item(id).map(|_| ())
    }
}

fn circle(name: &str) -> PageItem {
    PageItem::path(SimpleShape::circle(50.0, 50.0, 20.0)).with_name(name)
}

fn square(name: &str) -> PageItem {
    PageItem::path(SimpleShape::rect(100.0, 100.0, 30.0, 30.0)).with_name(name)
}

fn donut(name: &str) -> PageItem {
    PageItem::compound(vec![
        SimpleShape::circle(0.0, 0.0, 10.0),
        SimpleShape::circle(0.0, 0.0, 4.0).reversed(),
    ])
    .with_name(name)
}

#[test]
fn test_selection_mode_scenario() {
    let mut doc = Document::new("selection").with_layer(PageItem::layer(vec![
        circle("circle-1"),
        circle("circle-2"),
        square("square-1"),
        square("square-2"),
        square("square-3"),
    ]));
    doc.select_by_name("circle-1");
    doc.select_by_name("circle-2");

    let result = dedup(&mut doc, Scope::Selection, Precision::default());

    assert_eq!(
        status_message(&result),
        "Removed 1 duplicate path item, 0 duplicate compound paths!"
    );
    assert!(doc.contains_name("circle-1"));
    assert!(!doc.contains_name("circle-2"));
    for name in ["square-1", "square-2", "square-3"] {
        assert!(doc.contains_name(name), "{name} should be untouched");
    }
    assert_eq!(doc.selection.len(), 1);
}

#[test]
fn test_selection_emptied_by_compound_phase_keeps_scope() {
    let mut doc = Document::new("emptied").with_layer(PageItem::layer(vec![
        donut("donut-1"),
        donut("donut-2"),
        square("sq-1"),
        square("sq-2"),
    ]));
    doc.select_by_name("donut-2");

    let outcome = dedup(&mut doc, Scope::Selection, Precision::default()).unwrap();

    assert_eq!(outcome.removed_compound(), 1);
    assert_eq!(outcome.removed_simple(), 0);
    assert_eq!(outcome.simple.candidates, 0);
    assert!(!doc.contains_name("donut-2"));
    assert!(doc.contains_name("sq-1"));
    assert!(doc.contains_name("sq-2"));
    assert!(doc.selection.is_empty());
}

#[test]
fn test_selected_compound_limits_simple_phase() {
    let mut doc = Document::new("selected-compound").with_layer(PageItem::layer(vec![
        donut("donut-1"),
        donut("donut-2"),
        square("sq-1"),
        square("sq-2"),
        circle("circle-1"),
        circle("circle-2"),
    ]));
    doc.select_by_name("donut-1");

    let outcome = dedup(&mut doc, Scope::Selection, Precision::default()).unwrap();

    assert_eq!(outcome.removed_compound(), 1);
    // Only the two distinct sub-paths of the selected compound.
    assert_eq!(outcome.simple.candidates, 2);
    assert_eq!(outcome.removed_simple(), 0);
    assert!(doc.contains_name("donut-1"));
    assert!(!doc.contains_name("donut-2"));
    for name in ["sq-1", "sq-2", "circle-1", "circle-2"] {
        assert!(doc.contains_name(name), "{name} should be untouched");
    }
    assert_eq!(doc.selection.len(), 1);
}

#[test]
fn test_compound_precedence_scenario() {
    let mut doc = Document::new("compound").with_layer(PageItem::layer(vec![
        donut("donut-1"),
        donut("donut-2"),
        square("square-1"),
        square("square-2"),
    ]));

    let outcome = dedup(&mut doc, Scope::WholeDocument, Precision::default()).unwrap();

    assert_eq!(outcome.removed_compound(), 1);
    assert_eq!(outcome.removed_simple(), 1);
    assert_eq!(
        format_summary(outcome.removed_simple(), outcome.removed_compound()),
        "Removed 1 duplicate path item, 1 duplicate compound path!"
    );
    assert!(doc.contains_name("donut-1"));
    assert!(!doc.contains_name("donut-2"));
    // Two squares plus the two sub-paths of the surviving compound.
    assert_eq!(outcome.simple.candidates, 4);
}

#[test]
fn test_no_eligible_content_scenario() {
    let mut doc = Document::new("locked").with_layer(PageItem::layer(vec![
        square("a").with_flags(EligibilityFlags::locked()),
        square("b").with_flags(EligibilityFlags::hidden()),
        donut("c").with_flags(EligibilityFlags::locked()),
    ]));
    let before = doc.clone();

    let result = DedupEngine::default().run(&mut doc);

    assert_eq!(result, Err(DedupError::NothingEligible));
    assert_eq!(
        status_message(&result),
        "No eligible path items or compound paths found."
    );
    assert_eq!(doc, before);
}

#[test]
fn test_failure_tolerance() {
    let doc = Document::new("flaky").with_layer(PageItem::layer(vec![
        square("keep"),
        square("dup-1"),
        square("dup-2"),
        square("dup-3"),
    ]));
    let mut host = FlakyHost::new(doc, 2);

    let outcome = DedupEngine::default().run(&mut host).unwrap();

    assert_eq!(host.attempts, 3);
    assert_eq!(outcome.removed_simple(), 2);
    assert!(outcome.has_failures());
    let failures: Vec<_> = outcome.failures().collect();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].message().contains("simulated failure"));

    assert!(host.doc.contains_name("keep"));
    assert!(!host.doc.contains_name("dup-1"));
    assert!(host.doc.contains_name("dup-2"));
    assert!(!host.doc.contains_name("dup-3"));
}

#[test]
fn test_first_seen_across_layers_and_groups() {
    let mut doc = Document::new("order")
        .with_layer(PageItem::layer(vec![PageItem::group(vec![square("first")])]))
        .with_layer(PageItem::layer(vec![square("second"), square("third")]));

    let outcome = DedupEngine::default().run(&mut doc).unwrap();

    assert_eq!(outcome.removed_simple(), 2);
    assert!(doc.contains_name("first"));
    assert!(!doc.contains_name("second"));
    assert!(!doc.contains_name("third"));
}

#[test]
fn test_reversed_point_order_is_not_a_duplicate() {
    let shape = SimpleShape::polygon(&[(0.0, 0.0), (10.0, 0.0), (10.0, 5.0)]);
    let mut doc = Document::new("winding").with_layer(PageItem::layer(vec![
        PageItem::path(shape.clone()),
        PageItem::path(shape.reversed()),
    ]));

    let outcome = DedupEngine::default().run(&mut doc).unwrap();
    assert_eq!(outcome.removed_simple(), 0);
}

#[test]
fn test_sub_path_order_does_not_matter() {
    let outer = SimpleShape::rect(0.0, 0.0, 10.0, 10.0);
    let inner = SimpleShape::rect(2.0, 2.0, 3.0, 3.0);
    let mut doc = Document::new("subpaths").with_layer(PageItem::layer(vec![
        PageItem::compound(vec![outer.clone(), inner.clone()]).with_name("a"),
        PageItem::compound(vec![inner, outer]).with_name("b"),
    ]));

    let outcome = DedupEngine::default().run(&mut doc).unwrap();
    assert_eq!(outcome.removed_compound(), 1);
    assert!(doc.contains_name("a"));
}

#[test]
fn test_open_and_closed_paths_differ() {
    let closed = SimpleShape::rect(0.0, 0.0, 4.0, 4.0);
    let mut open = closed.clone();
    open.closed = false;
    let mut doc = Document::new("closure").with_layer(PageItem::layer(vec![
        PageItem::path(closed),
        PageItem::path(open),
    ]));

    let outcome = DedupEngine::default().run(&mut doc).unwrap();
    assert_eq!(outcome.removed_simple(), 0);
}

#[test]
fn test_ineligible_layer_contents_are_left_alone() {
    let mut doc = Document::new("layers")
        .with_layer(
            PageItem::layer(vec![square("locked-layer-a"), square("locked-layer-b")])
                .with_flags(EligibilityFlags::locked()),
        )
        .with_layer(PageItem::layer(vec![square("open")]));

    let outcome = DedupEngine::default().run(&mut doc).unwrap();

    assert_eq!(outcome.removed_simple(), 0);
    assert!(doc.contains_name("locked-layer-a"));
    assert!(doc.contains_name("locked-layer-b"));
}

#[test]
fn test_parallel_fingerprinting_gives_same_result() {
    let build = || {
        let items = (0..40)
            .map(|i| {
                PageItem::path(SimpleShape::rect(f64::from(i % 5), 0.0, 1.0, 1.0))
                    .with_name(format!("r{i}"))
            })
            .collect();
        Document::new("many").with_layer(PageItem::layer(items))
    };

    let mut sequential = build();
    let mut parallel = build();
    let seq = DedupEngine::new(EngineConfig::default().with_parallel_threshold(usize::MAX))
        .run(&mut sequential)
        .unwrap();
    let par = DedupEngine::new(EngineConfig::default().with_parallel_threshold(1))
        .run(&mut parallel)
        .unwrap();

    assert_eq!(seq.removed_simple(), 35);
    assert_eq!(seq, par);
    assert_eq!(sequential, parallel);
}

#[test]
fn test_no_document_open() {
    let engine = DedupEngine::default();
    let result = engine.run_on_active::<Document>(None);
    assert_eq!(status_message(&result), "No documents open.");
}
