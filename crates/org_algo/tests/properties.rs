// crates/org_algo/tests/properties.rs
//! Invariants of the analysis layer over arbitrary small collections.
//!
//! Titles and manager references are drawn from one small pool so that
//! duplicates, self-reports, dangling references and cycles all occur.

use org_algo::{
    build_forest, compute_data_health, compute_health_score, compute_stats, sweep_title_references,
    HealthBand, TitleIndex,
};
use org_core::{normalize_mix, Grade, OneDecimal, OrgNode, PartialWorkMix};
use proptest::prelude::*;

const POOL: [&str; 8] = ["", " ", "CEO", "CFO", " CFO", "Lead", "Dev", "Ghost"];

fn grade() -> impl Strategy<Value = Grade> {
    prop::sample::select(Grade::ALL.to_vec())
}

fn nodes() -> impl Strategy<Value = Vec<OrgNode>> {
    prop::collection::vec(
        (grade(), 0..POOL.len(), 0..POOL.len(), 0..POOL.len(), any::<bool>()),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (g, t, up, dual, filled))| {
                let mut n = OrgNode::new(format!("n{i}").parse().unwrap(), g, POOL[t], "t0");
                n.reporting.up = POOL[up].to_string();
                n.reporting.dual = POOL[dual].to_string();
                if filled {
                    n.incumbent_name = "Someone".into();
                }
                n
            })
            .collect()
    })
}

fn opt_pct() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        Just(None),
        Just(Some(f64::NAN)),
        Just(Some(f64::INFINITY)),
        (-1.0e6f64..1.0e6).prop_map(Some),
    ]
}

proptest! {
    #[test]
    fn totals_and_distribution_agree(ns in nodes()) {
        let s = compute_stats(&ns);
        prop_assert_eq!(s.total_roles as usize, ns.len());
        prop_assert_eq!(s.grade_dist.len(), 7);
        prop_assert_eq!(s.grade_dist.values().sum::<u32>(), s.total_roles);
        prop_assert_eq!(s.filled + s.vacancy, s.total_roles);
        prop_assert!(s.vacancy_rate.tenths() <= 1000);
        prop_assert!(s.leadership_ratio.tenths() <= 1000);
    }

    #[test]
    fn forest_holds_every_node_once(ns in nodes()) {
        let f = build_forest(&ns);
        prop_assert_eq!(f.node_count(), ns.len());
        for r in &f.roots {
            prop_assert!(r.node.grade.is_root_eligible() || r.node.up_ref().is_none());
        }
        for w in f.roots.windows(2) {
            prop_assert!(w[0].node.grade >= w[1].node.grade);
        }
    }

    #[test]
    fn score_is_bounded(ns in nodes()) {
        let s = compute_stats(&ns);
        let h = compute_data_health(&ns, &s);
        let score = compute_health_score(&s, &h);
        prop_assert!(score <= 100);
        prop_assert_eq!(HealthBand::from_score(score) == HealthBand::Healthy, score >= 80);
    }

    #[test]
    fn self_reports_never_count_as_orphans(ns in nodes()) {
        let s = compute_stats(&ns);
        let h = compute_data_health(&ns, &s);
        let index = TitleIndex::build(&ns);
        for o in &h.orphans {
            prop_assert!(!index.contains(&o.reports_to));
        }
        prop_assert_eq!(h.self_reports.len(), ns.iter().filter(|n| n.is_self_report()).count());
    }

    #[test]
    fn sweep_removes_every_reference(ns in nodes(), pick in 0..POOL.len()) {
        let mut ns = ns;
        let title = POOL[pick];
        sweep_title_references(&mut ns, title, "t1");
        let t = title.trim();
        if !t.is_empty() {
            prop_assert!(ns.iter().all(|n| n.up_ref() != Some(t) && n.dual_ref() != Some(t)));
        }
    }

    #[test]
    fn normalize_is_idempotent_and_bounded(
        s in opt_pct(), t in opt_pct(), o in opt_pct(), a in opt_pct()
    ) {
        let m = normalize_mix(Some(&PartialWorkMix { strategic: s, tactical: t, operational: o, admin: a }));
        prop_assert_eq!(m.normalized(), m);
        for v in [m.strategic, m.tactical, m.operational, m.admin] {
            prop_assert!((0.0..=100.0).contains(&v));
        }
    }
}

fn role(id: &str, grade: Grade, title: &str, up: &str, incumbent: &str) -> OrgNode {
    let mut n = OrgNode::new(id.parse().unwrap(), grade, title, "t0");
    n.reporting.up = up.into();
    n.incumbent_name = incumbent.into();
    n
}

#[test]
fn eleven_reports_flag_heavy_manager_and_wide_span() {
    let mut ns: Vec<OrgNode> = (0..11)
        .map(|i| role(&format!("r{i}"), Grade::G1, &format!("Analyst {i}"), "M", "x"))
        .collect();
    ns.push(role("m", Grade::G6, "M", "", "x"));

    let s = compute_stats(&ns);
    assert_eq!(s.reports_to("M"), 11);
    assert_eq!(s.span_of_control, OneDecimal::from_tenths(110));

    let h = compute_data_health(&ns, &s);
    assert_eq!(h.heavy_managers.len(), 1);
    assert_eq!((h.heavy_managers[0].manager.as_str(), h.heavy_managers[0].reports), ("M", 11));
    assert!(h.is_clean());

    // Only the span band fires: 1/12 leadership = 8.3 %, no vacancies.
    assert_eq!(compute_health_score(&s, &h), 90);
}

#[test]
fn well_balanced_org_scores_100() {
    let mut ns = vec![role("ceo", Grade::G7, "CEO", "", "A")];
    for m in 0..3 {
        let mgr = format!("Manager {m}");
        ns.push(role(&format!("m{m}"), Grade::G4, &mgr, "CEO", "B"));
        for r in 0..4 {
            ns.push(role(&format!("m{m}r{r}"), Grade::G2, &format!("Specialist {m}.{r}"), &mgr, "C"));
        }
    }
    let s = compute_stats(&ns);
    assert_eq!(s.vacancy_rate, OneDecimal::ZERO);
    assert_eq!(s.span_of_control.to_string(), "3.8");
    assert_eq!(s.leadership_ratio.to_string(), "6.3");

    let h = compute_data_health(&ns, &s);
    assert!(h.is_clean());
    assert_eq!(compute_health_score(&s, &h), 100);

    let f = build_forest(&ns);
    assert_eq!(f.roots.len(), 1);
    assert_eq!(f.roots[0].descendant_count(), 15);
}

#[test]
fn rename_sweep_turns_pointers_into_blank_roots() {
    let mut ns = vec![
        role("1", Grade::G5, "Old Title", "", ""),
        role("2", Grade::G3, "Lead", "Old Title", ""),
    ];
    ns[1].reporting.dual = "Old Title".into();
    ns[0].title = "New Title".into();
    let touched = sweep_title_references(&mut ns, "Old Title", "t1");
    assert_eq!(touched.len(), 1);
    assert_eq!(ns[1].reporting.up, "");
    assert_eq!(ns[1].reporting.dual, "");

    let f = build_forest(&ns);
    assert!(f.orphans.is_empty());
    assert_eq!(f.roots.len(), 2);
}
