use proptest::prelude::*;
use statin_guard::domain::{
    CkGuidance, DecisionEngine, EvaluationInput, LiverGuidance, MyopathyEngine,
    MyopathyEvaluator, StatementKind, StatinEvaluator, Thresholds,
};

fn lab_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        0.0..10_000.0f64,
        // Exact multiples of the reference limits.
        prop::sample::select(vec![0.0, 40.0, 120.0, 200.0, 600.0, 2000.0, 2.0]),
        0.0..1e9f64,
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn evaluation_is_total_and_ordered(
        ck in lab_value(),
        transaminase in lab_value(),
        bilirubin in lab_value(),
        symptoms in any::<bool>(),
    ) {
        let rec = DecisionEngine::default()
            .evaluate(EvaluationInput::new(ck, transaminase, bilirubin, symptoms));
        let [first, second] = rec.statements();
        prop_assert_eq!(first.kind, StatementKind::Ck);
        prop_assert_eq!(second.kind, StatementKind::Liver);
        prop_assert!(!first.text.is_empty());
        prop_assert!(!second.text.is_empty());

        let rendered = rec.to_string();
        prop_assert_eq!(rendered.matches("CK: ").count(), 1);
        prop_assert_eq!(rendered.matches("Liver: ").count(), 1);
        prop_assert!(rendered.find("CK: ") < rendered.find("Liver: "));
    }

    #[test]
    fn branches_are_independent(
        ck in lab_value(),
        other_ck in lab_value(),
        transaminase in lab_value(),
        bilirubin in lab_value(),
        symptoms in any::<bool>(),
    ) {
        let engine = DecisionEngine::default();
        let a = engine.evaluate(EvaluationInput::new(ck, transaminase, bilirubin, symptoms));
        let b = engine.evaluate(EvaluationInput::new(other_ck, transaminase, bilirubin, !symptoms));
        prop_assert_eq!(a.liver(), b.liver());

        let c = engine.evaluate(EvaluationInput::new(ck, bilirubin, transaminase, symptoms));
        prop_assert_eq!(a.ck(), c.ck());
    }

    #[test]
    fn evaluation_is_deterministic(
        ck in lab_value(),
        transaminase in lab_value(),
        bilirubin in lab_value(),
        symptoms in any::<bool>(),
    ) {
        let input = EvaluationInput::new(ck, transaminase, bilirubin, symptoms);
        let engine = DecisionEngine::default();
        let first = engine.evaluate(input).to_string();
        let _ = engine.evaluate(EvaluationInput::new(bilirubin, ck, transaminase, !symptoms));
        prop_assert_eq!(engine.evaluate(input).to_string(), first);
    }

    #[test]
    fn simplified_top_branch_matches_redundant_form(ck in lab_value(), symptoms in any::<bool>()) {
        let t = Thresholds::default();
        #[allow(clippy::nonminimal_bool, clippy::overly_complex_bool_expr)]
        let legacy = ck > 10.0 * t.uln_ck || (symptoms && ck > 10.0 * t.uln_ck);
        let simplified = CkGuidance::classify(&t, ck, symptoms) == CkGuidance::WithdrawAndHydrate;
        prop_assert_eq!(simplified, legacy);
    }

    #[test]
    fn both_variants_classify_alike(ck in lab_value(), symptoms in any::<bool>()) {
        let full = DecisionEngine::default();
        let tool = MyopathyEngine::default();
        let input = statin_guard::domain::MyopathyInput::new(ck, symptoms);
        // Same branch means same number of follow-up clauses.
        prop_assert_eq!(
            full.evaluate_myopathy(input).follow_ups.len(),
            tool.evaluate_myopathy(input).follow_ups.len()
        );
    }

    #[test]
    fn high_transaminase_ignores_bilirubin(
        transaminase in 120.000_001..1e6f64,
        bilirubin in lab_value(),
    ) {
        let t = Thresholds::default();
        prop_assert_eq!(
            LiverGuidance::classify(&t, transaminase, bilirubin),
            LiverGuidance::HoldForTransaminase
        );
    }
}

#[test]
fn documented_examples() {
    let cases: &[(f64, f64, f64, bool, &str, &str)] = &[
        (2000.0, 0.0, 0.0, false, "Withdraw statin. Consider nonstatin-related causes", "Start statin."),
        (2000.01, 0.0, 0.0, false, "Withdraw statin, hydrate, and monitor renal function.", "Start statin."),
        (100.0, 0.0, 0.0, false, "Continue statin. Follow up CK in 2–4 weeks.", "Start statin."),
        (50.0, 120.0, 1.0, false, "Continue statin.", "Consider starting statin. Reassess liver function and bilirubin in 2–4 weeks."),
        (50.0, 80.0, 2.0, false, "Continue statin.", "Consider starting statin."),
        (50.0, 80.0, 2.01, false, "Continue statin.", "Do not start statin. Bilirubin above threshold."),
        (50.0, 121.0, 0.5, false, "Continue statin.", "Do not start statin. Transaminase above 3× upper limit."),
    ];
    for &(ck, transaminase, bilirubin, symptoms, ck_prefix, liver_prefix) in cases {
        let rec = statin_guard::evaluate(ck, transaminase, bilirubin, symptoms);
        assert!(
            rec.ck().text.starts_with(ck_prefix),
            "ck={} got {:?}",
            ck,
            rec.ck().text
        );
        assert!(
            rec.liver().text.starts_with(liver_prefix),
            "transaminase={} bilirubin={} got {:?}",
            transaminase,
            bilirubin,
            rec.liver().text
        );
    }

    let symptomatic = statin_guard::evaluate(100.0, 0.0, 0.0, true).ck().to_string();
    assert!(symptomatic.contains("reinitiate statin at a reduced dose"));
    assert!(symptomatic.contains("muscle biopsy"));
}
