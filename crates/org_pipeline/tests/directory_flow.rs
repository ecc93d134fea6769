use org_algo::build_forest;
use org_core::seed::seed_nodes;
use org_core::{HealthParams, NodeId};
use org_pipeline::{
    analyze_scoped, load_nodes, save_nodes, BusinessUnitFilter, FixedClock, OrgDirectory, Source,
};

const T0: &str = "2024-01-01T00:00:00.000Z";
const T1: &str = "2024-02-01T09:30:00.000Z";

fn id(s: &str) -> NodeId {
    s.parse().unwrap()
}

fn wired_directory() -> OrgDirectory {
    let mut d = OrgDirectory::with_clock(seed_nodes(T0), Box::new(FixedClock::new(T1)));
    // COO, CFO, CoS under CMD; the two G5 heads under COO.
    for child in ["seed-1", "seed-2", "seed-3"] {
        d.set_reporting(&id(child), "Chairman & Managing Director (CMD)", false).unwrap();
    }
    for child in ["seed-4", "seed-5"] {
        d.set_reporting(&id(child), "Chief Operating Officer (COO)", false).unwrap();
    }
    d
}

#[test]
fn renaming_a_manager_never_leaves_orphans() {
    let mut d = wired_directory();
    d.rename(&id("seed-1"), "Group COO").unwrap();

    let forest = build_forest(d.nodes());
    assert!(forest.orphans.is_empty());
    assert!(d.get(&id("seed-4")).unwrap().reporting.up.is_empty());
    assert_eq!(d.get(&id("seed-2")).unwrap().reporting.up, "Chairman & Managing Director (CMD)");
}

#[test]
fn archive_moves_reports_out_of_the_tree() {
    let mut d = wired_directory();
    d.archive(&id("seed-0")).unwrap();

    let a = analyze_scoped(d.nodes(), &BusinessUnitFilter::All, &HealthParams::default()).unwrap();
    assert_eq!(a.stats.total_roles, 23);
    assert!(a.data_health.orphans.is_empty());
    assert_eq!(a.stats.reports_to("Chairman & Managing Director (CMD)"), 0);
    assert_eq!(a.stats.reports_to("Chief Operating Officer (COO)"), 2);
}

#[test]
fn store_round_trip_keeps_edits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("org.json");

    let mut d = wired_directory();
    let added = d.add_child_role(&id("seed-2")).unwrap();
    save_nodes(&path, d.nodes(), T1).unwrap();

    let back = load_nodes(&Source::Store(path), &FixedClock::new(T1), false).unwrap();
    assert_eq!(back.len(), 25);
    assert_eq!(back[0].id, added);
    assert_eq!(back[0].reporting.up, "Chief Financial Officer (CFO)");
    assert_eq!(back, d.nodes());
}
