//! Integration test: load a call-graph dataset, lay it out as an indented
//! tree, and compute the scale inputs the tree-table renderer consumes.

use tracetable_core::parsers::parse_profile_data;
use tracetable_core::views::summarize::{
    Aggregate, aggregate, categorical_domain, numerical_domain, ordinal_mapping,
    top_level_inclusive_metric,
};
use tracetable_core::{GraphLayoutEngine, RowSlot};

#[test]
fn layout_and_scales_from_fixture() {
    let data = include_bytes!("fixtures/calltree-sample.json");
    let mut data = parse_profile_data(data).expect("failed to parse dataset fixture");

    assert_eq!(data.graph.len(), 4, "fixture graph should have 4 nodes");
    assert_eq!(data.records.len(), 8, "fixture should have 8 records");
    assert_eq!(data.profile_ids(), ["baseline", "patched"]);

    // Indented-tree layout: main > parse, render > paint (pre-order).
    let mut engine = GraphLayoutEngine::new(&data.graph).expect("fixture graph should be valid");
    let laid_out = engine
        .compute_indented_layout()
        .expect("fixture graph should be acyclic");

    let slot = |id: &str| laid_out.node(id).and_then(|n| n.layout);
    assert_eq!(slot("main"), Some(RowSlot { order: 0, depth: 0 }));
    assert_eq!(slot("parse"), Some(RowSlot { order: 1, depth: 1 }));
    assert_eq!(slot("render"), Some(RowSlot { order: 2, depth: 1 }));
    assert_eq!(slot("paint"), Some(RowSlot { order: 3, depth: 2 }));
    assert_eq!(engine.max_depth(), 2);

    // The loaded graph is never mutated by the engine.
    assert!(data.graph.node("main").unwrap().layout.is_none());

    // Chart domains.
    assert_eq!(
        categorical_domain(&data.records, "profile"),
        ["baseline", "patched"]
    );
    let [min, max] = numerical_domain(&data.records, "time");
    assert_eq!(min, 28.0);
    assert_eq!(max, 120.0);

    // Per-profile aggregation ("95" coerces numerically).
    let baseline_total = aggregate(
        Aggregate::Sum,
        &data.records,
        "profile",
        "baseline",
        "time",
    );
    assert_eq!(baseline_total, 285.0);
    let patched_mean = aggregate(Aggregate::Mean, &data.records, "profile", "patched", "time");
    assert_eq!(patched_mean, 56.0);

    // Ordinal scale over node ids (lexicographic; reorders records in place).
    let mapping = ordinal_mapping(&mut data.records, "node");
    assert_eq!(mapping.rank("main"), Some(0));
    assert_eq!(mapping.rank("paint"), Some(1));
    assert_eq!(mapping.rank("parse"), Some(2));
    assert_eq!(mapping.rank("render"), Some(3));
    assert_eq!(mapping.domain, [0, 3]);
    assert_eq!(
        data.records[0].node_id().as_deref(),
        Some("main"),
        "records should be sorted by node after ordinal_mapping"
    );

    // Inclusive metric of the whole profile = root node's record.
    assert_eq!(
        top_level_inclusive_metric(&data, "baseline", "time"),
        Some(120.0)
    );
    assert_eq!(
        top_level_inclusive_metric(&data, "patched", "time"),
        Some(95.0)
    );
    assert_eq!(top_level_inclusive_metric(&data, "missing", "time"), None);
}
