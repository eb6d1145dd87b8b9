use opsgrid::hierarchy::{count, find, flatten, flatten_flat, flatten_sorted, visible_ids};
use opsgrid::pagination::paginate;
use opsgrid::state::{ExpandMap, SortConfig, SortDirection};
use opsgrid::{FlatRow, Row};

/// Two roots, two children each.
fn six_node_tree() -> Vec<Row> {
    vec![
        Row::new("root1").field("name", "Root 1").with_children(vec![
            Row::new("root1.child1").field("name", "b"),
            Row::new("root1.child2").field("name", "a"),
        ]),
        Row::new("root2").field("name", "Root 2").with_children(vec![
            Row::new("root2.child1").field("name", "d"),
            Row::new("root2.child2").field("name", "c"),
        ]),
    ]
}

fn deep_tree() -> Vec<Row> {
    vec![
        Row::new("a").with_children(vec![
            Row::new("a1").with_children(vec![
                Row::new("a1x"),
                Row::new("a1y").with_children(vec![Row::new("a1y-leaf")]),
            ]),
            Row::new("a2"),
        ]),
        Row::new("b"),
        Row::new("c").with_children(vec![Row::new("c1"), Row::new("c2")]),
    ]
}

fn ids<'a>(flat: &'a [FlatRow<'a>]) -> Vec<&'a str> {
    visible_ids(flat)
}

/// Reference pre-order walk, pruned at collapsed nodes.
fn reference_preorder<'a>(rows: &'a [Row], expand: &ExpandMap, out: &mut Vec<&'a str>) {
    for row in rows {
        out.push(&row.id);
        if expand.get(&row.id).unwrap_or(true) {
            reference_preorder(row.children(), expand, out);
        }
    }
}

// ============================================================================
// Flattening
// ============================================================================

#[test]
fn test_flatten_all_expanded_is_preorder() {
    let rows = six_node_tree();
    let flat = flatten(&rows, &ExpandMap::new());

    assert_eq!(
        ids(&flat),
        vec![
            "root1",
            "root1.child1",
            "root1.child2",
            "root2",
            "root2.child1",
            "root2.child2"
        ]
    );
}

#[test]
fn test_flatten_levels_and_indices() {
    let rows = six_node_tree();
    let flat = flatten(&rows, &ExpandMap::new());

    let levels: Vec<usize> = flat.iter().map(|r| r.display_level).collect();
    assert_eq!(levels, vec![0, 1, 1, 0, 1, 1]);

    let indices: Vec<usize> = flat.iter().map(|r| r.original_index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);

    assert!(flat[0].has_children && flat[0].is_expanded);
    assert!(!flat[1].has_children && !flat[1].is_expanded);
}

#[test]
fn test_flatten_collapsed_root_skips_subtree() {
    let rows = six_node_tree();
    let expand = ExpandMap::with_entries([("root2", false)]);
    let flat = flatten(&rows, &expand);

    assert_eq!(
        ids(&flat),
        vec!["root1", "root1.child1", "root1.child2", "root2"]
    );
    assert!(flat[3].has_children);
    assert!(!flat[3].is_expanded);
}

#[test]
fn test_flatten_matches_reference_for_many_expand_maps() {
    let rows = deep_tree();
    let parents = ["a", "a1", "a1y", "c"];

    for mask in 0..(1u32 << parents.len()) {
        let expand = ExpandMap::with_entries(
            parents
                .iter()
                .enumerate()
                .map(|(i, id)| (*id, mask & (1 << i) == 0)),
        );

        let mut expected = Vec::new();
        reference_preorder(&rows, &expand, &mut expected);

        let flat = flatten(&rows, &expand);
        assert_eq!(ids(&flat), expected, "mask {mask:#06b}");
    }
}

#[test]
fn test_flatten_is_idempotent() {
    let rows = deep_tree();
    let expand = ExpandMap::with_entries([("a1", false)]);

    let first = flatten(&rows, &expand);
    let second = flatten(&rows, &expand);
    assert_eq!(first, second);
}

#[test]
fn test_flatten_explicit_true_matches_default() {
    let rows = six_node_tree();
    let explicit = ExpandMap::with_entries([("root1", true), ("root2", true)]);

    assert_eq!(
        ids(&flatten(&rows, &explicit)),
        ids(&flatten(&rows, &ExpandMap::new()))
    );
}

#[test]
fn test_flatten_empty_children_is_leaf() {
    let rows = vec![Row::new("x").with_children(Vec::new())];
    let flat = flatten(&rows, &ExpandMap::new());

    assert_eq!(flat.len(), 1);
    assert!(!flat[0].has_children);
    assert!(!flat[0].is_expanded);
}

#[test]
fn test_flatten_deep_chain() {
    let mut row = Row::new("leaf");
    for depth in (0..2_000).rev() {
        row = Row::new(format!("n{depth}")).with_children(vec![row]);
    }
    let rows = vec![row];

    let flat = flatten(&rows, &ExpandMap::new());
    assert_eq!(flat.len(), 2_001);
    assert_eq!(flat.last().map(|r| r.display_level), Some(2_000));
    assert_eq!(flat.last().map(|r| r.id()), Some("leaf"));
}

#[test]
fn test_flatten_flat_does_not_recurse() {
    let rows = six_node_tree();
    let flat = flatten_flat(&rows, None);

    assert_eq!(ids(&flat), vec!["root1", "root2"]);
    assert!(flat.iter().all(|r| r.display_level == 0));
}

// ============================================================================
// Sorted flattening
// ============================================================================

#[test]
fn test_flatten_sorted_keeps_children_under_parent() {
    let rows = six_node_tree();
    let sort = SortConfig::by("name", SortDirection::Asc);
    let flat = flatten_sorted(&rows, &ExpandMap::new(), Some(&sort));

    assert_eq!(
        ids(&flat),
        vec![
            "root1",
            "root1.child2",
            "root1.child1",
            "root2",
            "root2.child2",
            "root2.child1"
        ]
    );
}

#[test]
fn test_flatten_sorted_descending_roots() {
    let rows = six_node_tree();
    let sort = SortConfig::by("name", SortDirection::Desc);
    let flat = flatten_sorted(&rows, &ExpandMap::with_entries([("root1", false)]), Some(&sort));

    assert_eq!(
        ids(&flat),
        vec!["root2", "root2.child1", "root2.child2", "root1"]
    );
}

#[test]
fn test_flatten_flat_sorted_by_number() {
    let rows = vec![
        Row::new("a").field("stake", 30),
        Row::new("b").field("stake", 5),
        Row::new("c"),
        Row::new("d").field("stake", 12.5),
    ];

    let asc = SortConfig::by("stake", SortDirection::Asc);
    assert_eq!(ids(&flatten_flat(&rows, Some(&asc))), vec!["b", "d", "a", "c"]);

    let desc = SortConfig::by("stake", SortDirection::Desc);
    assert_eq!(ids(&flatten_flat(&rows, Some(&desc))), vec!["a", "d", "b", "c"]);
}

// ============================================================================
// Scenarios with pagination
// ============================================================================

#[test]
fn test_scenario_six_nodes_page_size_four() {
    let rows = six_node_tree();
    let flat = flatten(&rows, &ExpandMap::new());

    let page0 = paginate(&flat, 0, 4);
    assert_eq!(
        ids(page0),
        vec!["root1", "root1.child1", "root1.child2", "root2"]
    );

    let page1 = paginate(&flat, 1, 4);
    assert_eq!(ids(page1), vec!["root2.child1", "root2.child2"]);
}

#[test]
fn test_scenario_collapsed_root2_single_page() {
    let rows = six_node_tree();
    let flat = flatten(&rows, &ExpandMap::with_entries([("root2", false)]));
    assert_eq!(flat.len(), 4);

    assert_eq!(paginate(&flat, 0, 4).len(), 4);
    assert!(paginate(&flat, 1, 4).is_empty());
}

#[test]
fn test_pages_concatenate_to_flattened_list() {
    let rows = deep_tree();
    let expand = ExpandMap::with_entries([("a1y", false)]);
    let flat = flatten(&rows, &expand);

    for page_size in 1..=flat.len() + 1 {
        let pages = flat.len().div_ceil(page_size);
        let joined: Vec<&str> = (0..pages)
            .flat_map(|p| paginate(&flat, p, page_size).iter().map(|r| r.id()))
            .collect();
        assert_eq!(joined, ids(&flat), "page size {page_size}");
    }
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_find_and_count() {
    let rows = deep_tree();

    assert_eq!(count(&rows), 10);
    assert_eq!(find(&rows, "a1y-leaf").map(|r| r.id.as_str()), Some("a1y-leaf"));
    assert!(find(&rows, "missing").is_none());
}
