//! Structural matching against the sample corpus

use licensing_parser::licensing::ast::{count_sections, walk_sections, NumberingContext};
use licensing_parser::licensing::formats::{forest_from_json, to_json_string};
use licensing_parser::licensing::matching::{
    match_sections, BusinessProfile, Gate, MatchPolicy, SeatCarveOut, Signal,
    StructuralMatcher, Verdict,
};
use licensing_parser::licensing::testing::assert_forest;
use licensing_parser::licensing::testing::samples::Samples;
use licensing_parser::licensing::vocabulary::Vocabulary;
use rstest::rstest;

use NumberingContext::{AnnexA, AnnexB, Normal};

fn profile(area: f64, seats: i64, gas: bool, meat: bool, delivery: bool) -> BusinessProfile {
    BusinessProfile::new(area, seats, gas, meat, delivery).unwrap()
}

#[test]
fn test_gas_restaurant() {
    let forest = Samples::full_specification();
    let matched = match_sections(&profile(150.0, 50, true, false, false), &forest);

    assert_forest(&matched)
        .is_sorted()
        .root_ids(&["3.2", "1.1"])
        .root(0, |root| {
            root.context_is(Normal).child_ids(&["3.2.1", "3.2.2"]);
        })
        .root(1, |root| {
            root.context_is(AnnexB).child_count(0);
        })
        .no_section(Normal, "3.5");
}

#[test]
fn test_large_meat_and_delivery_business() {
    let forest = Samples::full_specification();
    let matched = match_sections(&profile(40.0, 250, false, true, true), &forest);

    assert_forest(&matched)
        .is_sorted()
        .root_ids(&["3.5", "3.10", "4.1", "4.1"])
        .root(1, |root| {
            root.child_ids(&["3.10.1"]);
        })
        .root(2, |root| {
            root.context_is(Normal).offers_delivery(Some(true));
        })
        .root(3, |root| {
            root.context_is(AnnexA).child_ids(&["4.1.1"]).child(0, |child| {
                child.max_area(Some(50.0));
            });
        })
        .no_section(Normal, "3.2.1");
}

#[test]
fn test_annex_a_sibling_is_not_pulled_in() {
    // 4.1 in annex-A is only a path to 4.1.1; its sibling 4.2 stays out
    let forest = Samples::full_specification();
    let matched = match_sections(&profile(40.0, 250, false, true, true), &forest);

    assert_forest(&matched).no_section(AnnexA, "4.2");
}

#[test]
fn test_orphan_is_regathered_under_match() {
    let forest = Samples::orphans();
    let matched = match_sections(&profile(80.0, 20, false, false, true), &forest);

    assert_forest(&matched).root_ids(&["7.1"]).root(0, |root| {
        root.child_ids(&["7.1.2"]).child(0, |child| {
            child.child_ids(&["7.1.2.1"]);
        });
    });
}

#[test]
fn test_nothing_matches_plain_profile() {
    let forest = Samples::full_specification();
    // 2.3 mentions area without a number, so no phrase is read from it
    let matched = match_sections(&profile(80.0, 5, false, false, false), &forest);
    assert!(matched.is_empty());
}

#[test]
fn test_input_forest_is_untouched() {
    let forest = Samples::full_specification();
    let snapshot = forest.clone();
    let _ = match_sections(&profile(40.0, 250, false, true, true), &forest);
    assert_eq!(forest, snapshot);
}

#[rstest]
#[case(199, Verdict::CarvedOut)]
#[case(200, Verdict::Relevant(vec![Signal::MeatTerm, Signal::StructuredConstraint]))]
#[case(500, Verdict::Relevant(vec![Signal::MeatTerm, Signal::StructuredConstraint]))]
fn test_seat_carve_out_threshold(#[case] seats: i64, #[case] expected: Verdict) {
    let forest = Samples::full_specification();
    let node = walk_sections(&forest)
        .find(|n| n.context == Normal && n.id == "3.5")
        .unwrap();
    let verdict = StructuralMatcher::new().evaluate(&profile(40.0, seats, false, true, false), node);
    assert_eq!(verdict, expected);
}

#[test]
fn test_disabled_carve_out() {
    let forest = Samples::full_specification();
    let policy = MatchPolicy {
        carve_out: SeatCarveOut {
            enabled: false,
            ..SeatCarveOut::default()
        },
    };
    let matcher = StructuralMatcher::with(Vocabulary::default(), policy);
    let matched = matcher.match_forest(&profile(80.0, 10, false, true, false), &forest);

    assert_forest(&matched).root_ids(&["3.5", "3.10"]);
}

#[rstest]
#[case(99.0, false)]
#[case(100.0, true)]
#[case(150.0, true)]
fn test_min_area_gate_is_inclusive(#[case] area: f64, #[case] relevant: bool) {
    let forest = Samples::full_specification();
    let node = walk_sections(&forest)
        .find(|n| n.context == Normal && n.id == "3.2.1")
        .unwrap();
    let verdict = StructuralMatcher::new().evaluate(&profile(area, 10, true, false, false), node);
    assert_eq!(verdict.is_relevant(), relevant, "{verdict:?}");
    if !relevant {
        assert_eq!(verdict, Verdict::Excluded(Gate::MinArea));
    }
}

#[test]
fn test_report_counts() {
    let forest = Samples::full_specification();
    let report = StructuralMatcher::new().report(&profile(150.0, 50, true, false, false), &forest);

    assert_eq!(report.total_sections, 23);
    assert_eq!(report.matched_sections, 4);
    assert_eq!(report.matched_sections, count_sections(&report.matched));
}

#[test]
fn test_matching_a_reloaded_forest() {
    // A forest saved as JSON and read back matches exactly like the parsed one
    let forest = Samples::full_specification();
    let reloaded = forest_from_json(&to_json_string(&forest).unwrap()).unwrap();
    let p = profile(40.0, 250, false, true, true);

    assert_eq!(match_sections(&p, &reloaded), match_sections(&p, &forest));
}
