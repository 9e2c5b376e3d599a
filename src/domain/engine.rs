//! Decision engine. Maps validated lab values to statin guidance.
//!
//! Classification (which branch applies) is shared by every evaluator; only the
//! wording differs between the combined tool and the CK-only tool. No I/O, no state.

use super::entities::{EvaluationInput, MyopathyInput};
use super::recommendation::{Recommendation, Statement, StatementKind};
use super::thresholds::Thresholds;

/// CK / myopathy branch, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CkGuidance {
    /// CK above 10 × ULN.
    WithdrawAndHydrate,
    /// CK above 3 × ULN, up to and including 10 × ULN.
    Withdraw,
    /// CK at or below 3 × ULN with muscle symptoms.
    WithdrawAndReassess,
    /// CK at or below 3 × ULN without muscle symptoms.
    ContinueAndRecheck,
}

impl CkGuidance {
    pub fn classify(thresholds: &Thresholds, ck_value: f64, muscle_symptoms: bool) -> Self {
        if ck_value > thresholds.ck_limit(10.0) {
            CkGuidance::WithdrawAndHydrate
        } else if ck_value > thresholds.ck_limit(3.0) {
            CkGuidance::Withdraw
        } else if muscle_symptoms {
            CkGuidance::WithdrawAndReassess
        } else {
            CkGuidance::ContinueAndRecheck
        }
    }
}

/// Liver-function branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiverGuidance {
    /// Transaminase at or below ULN.
    Start,
    /// Transaminase within (ULN, 3 × ULN], bilirubin at or below threshold.
    ConsiderStart,
    /// Transaminase within (ULN, 3 × ULN], bilirubin above threshold.
    HoldForBilirubin,
    /// Transaminase above 3 × ULN, whatever the bilirubin.
    HoldForTransaminase,
}

impl LiverGuidance {
    pub fn classify(thresholds: &Thresholds, transaminase: f64, bilirubin: f64) -> Self {
        if transaminase <= thresholds.transaminase_limit(1.0) {
            LiverGuidance::Start
        } else if transaminase <= thresholds.transaminase_limit(3.0) {
            if bilirubin <= thresholds.bilirubin_threshold {
                LiverGuidance::ConsiderStart
            } else {
                LiverGuidance::HoldForBilirubin
            }
        } else {
            LiverGuidance::HoldForTransaminase
        }
    }

    pub fn statement(self) -> Statement {
        let text = match self {
            LiverGuidance::Start => "Start statin. Follow-up liver function test in 12 weeks.",
            LiverGuidance::ConsiderStart => {
                "Consider starting statin. Reassess liver function and bilirubin in 2–4 weeks."
            }
            LiverGuidance::HoldForBilirubin => {
                "Do not start statin. Bilirubin above threshold. Consult hepatic experts."
            }
            LiverGuidance::HoldForTransaminase => {
                "Do not start statin. Transaminase above 3× upper limit. Consult hepatic experts."
            }
        };
        Statement::new(StatementKind::Liver, text)
    }
}

const WITHDRAW: &str =
    "Withdraw statin. Consider nonstatin-related causes and modify risk factors.";
const REINITIATE: &str = "If symptoms resolve and CK returns to normal: reinitiate statin at a reduced dose or switch to an alternative statin.";

const COMBINED_FOLLOW_UPS: &[&str] = &[
    REINITIATE,
    "If CK remains elevated or symptoms persist: consult a specialist or consider muscle biopsy.",
];
const MYOPATHY_TOOL_FOLLOW_UPS: &[&str] = &[
    REINITIATE,
    "If CK remains elevated (>3x ULN) or symptoms persist: consult a specialist or consider muscle biopsy.",
];

/// Wording set for CK statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phrasing {
    /// CK + liver tool.
    Combined,
    /// Stand-alone CK tool; differs in the hydration and continue-statin wording.
    MyopathyTool,
}

impl Phrasing {
    pub fn ck_statement(self, guidance: CkGuidance) -> Statement {
        use CkGuidance::*;
        let kind = StatementKind::Ck;
        match (self, guidance) {
            (Phrasing::Combined, WithdrawAndHydrate) => {
                Statement::new(kind, "Withdraw statin, hydrate, and monitor renal function.")
            }
            (Phrasing::MyopathyTool, WithdrawAndHydrate) => Statement::new(
                kind,
                "Withdraw statin. Provide hydration and monitor renal function.",
            ),
            (_, Withdraw) => Statement::new(kind, WITHDRAW),
            (Phrasing::Combined, WithdrawAndReassess) => {
                Statement::with_follow_ups(kind, WITHDRAW, COMBINED_FOLLOW_UPS)
            }
            (Phrasing::MyopathyTool, WithdrawAndReassess) => {
                Statement::with_follow_ups(kind, WITHDRAW, MYOPATHY_TOOL_FOLLOW_UPS)
            }
            (Phrasing::Combined, ContinueAndRecheck) => Statement::new(
                kind,
                "Continue statin. Follow up CK in 2–4 weeks. Consider nonstatin-related causes and modify risk factors.",
            ),
            (Phrasing::MyopathyTool, ContinueAndRecheck) => Statement::new(
                kind,
                "Continue statin therapy. Recheck CK in 2 to 4 weeks.\nConsider nonstatin-related causes and modify risk factors.",
            ),
        }
    }
}

/// CK-only capability.
pub trait MyopathyEvaluator: Send + Sync {
    fn evaluate_myopathy(&self, input: MyopathyInput) -> Statement;
}

/// Full CK + liver capability. Every full evaluator also answers CK-only questions.
pub trait StatinEvaluator: MyopathyEvaluator {
    fn evaluate(&self, input: EvaluationInput) -> Recommendation;
}

/// Combined CK + liver engine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DecisionEngine {
    thresholds: Thresholds,
}

impl DecisionEngine {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }
}

impl MyopathyEvaluator for DecisionEngine {
    fn evaluate_myopathy(&self, input: MyopathyInput) -> Statement {
        let guidance = CkGuidance::classify(&self.thresholds, input.ck_value, input.muscle_symptoms);
        Phrasing::Combined.ck_statement(guidance)
    }
}

impl StatinEvaluator for DecisionEngine {
    fn evaluate(&self, input: EvaluationInput) -> Recommendation {
        let ck = self.evaluate_myopathy(input.myopathy());
        let liver =
            LiverGuidance::classify(&self.thresholds, input.transaminase, input.bilirubin)
                .statement();
        Recommendation::new(ck, liver)
    }
}

/// Stand-alone CK tool. Same thresholds and branch order as [`DecisionEngine`],
/// with its own wording.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MyopathyEngine {
    thresholds: Thresholds,
}

impl MyopathyEngine {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }
}

impl MyopathyEvaluator for MyopathyEngine {
    fn evaluate_myopathy(&self, input: MyopathyInput) -> Statement {
        let guidance = CkGuidance::classify(&self.thresholds, input.ck_value, input.muscle_symptoms);
        Phrasing::MyopathyTool.ck_statement(guidance)
    }
}

/// Evaluate with the default thresholds.
pub fn evaluate(
    ck_value: f64,
    transaminase: f64,
    bilirubin: f64,
    muscle_symptoms: bool,
) -> Recommendation {
    DecisionEngine::default().evaluate(EvaluationInput::new(
        ck_value,
        transaminase,
        bilirubin,
        muscle_symptoms,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ck_text(ck: f64, symptoms: bool) -> String {
        evaluate(ck, 0.0, 0.0, symptoms).ck().to_string()
    }

    fn liver_text(transaminase: f64, bilirubin: f64) -> &'static str {
        evaluate(50.0, transaminase, bilirubin, false).liver().text
    }

    /// Top CK branch as the desktop tools wrote it.
    fn legacy_withdraw_and_hydrate(t: &Thresholds, ck: f64, symptoms: bool) -> bool {
        #[allow(clippy::nonminimal_bool, clippy::overly_complex_bool_expr)]
        let hit = ck > 10.0 * t.uln_ck || (symptoms && ck > 10.0 * t.uln_ck);
        hit
    }

    #[test]
    fn test_ck_boundary_at_ten_times_uln() {
        assert_eq!(
            ck_text(2000.0, false),
            "Withdraw statin. Consider nonstatin-related causes and modify risk factors."
        );
        assert_eq!(
            ck_text(2000.01, false),
            "Withdraw statin, hydrate, and monitor renal function."
        );
    }

    #[test]
    fn test_ck_boundary_at_three_times_uln() {
        let t = Thresholds::default();
        assert_eq!(
            CkGuidance::classify(&t, 600.0, false),
            CkGuidance::ContinueAndRecheck
        );
        assert_eq!(
            CkGuidance::classify(&t, 600.0, true),
            CkGuidance::WithdrawAndReassess
        );
        assert_eq!(CkGuidance::classify(&t, 600.5, false), CkGuidance::Withdraw);
    }

    #[test]
    fn test_symptoms_at_low_ck() {
        let with = ck_text(100.0, true);
        assert!(with.starts_with("Withdraw statin. Consider nonstatin-related causes"));
        assert!(with.contains("reinitiate statin at a reduced dose"));
        assert!(with.contains("consider muscle biopsy"));

        let without = ck_text(100.0, false);
        assert!(without.starts_with("Continue statin. Follow up CK in 2–4 weeks."));
        assert!(!without.contains("biopsy"));
    }

    #[test]
    fn test_symptoms_ignored_above_three_times_uln() {
        assert_eq!(ck_text(1000.0, true), ck_text(1000.0, false));
        assert_eq!(ck_text(5000.0, true), ck_text(5000.0, false));
    }

    #[test]
    fn test_liver_branch_independent_of_ck() {
        let rec = evaluate(50.0, 120.0, 1.0, false);
        assert!(rec.ck().text.starts_with("Continue statin."));
        assert_eq!(
            rec.liver().text,
            "Consider starting statin. Reassess liver function and bilirubin in 2–4 weeks."
        );

        for ck in [0.0, 100.0, 700.0, 2500.0] {
            for symptoms in [false, true] {
                assert_eq!(
                    evaluate(ck, 120.0, 1.0, symptoms).liver(),
                    rec.liver()
                );
            }
        }
    }

    #[test]
    fn test_ck_branch_independent_of_liver() {
        let base = evaluate(700.0, 10.0, 0.5, true);
        for (transaminase, bilirubin) in [(80.0, 3.0), (200.0, 0.1), (40.0, 9.0)] {
            assert_eq!(evaluate(700.0, transaminase, bilirubin, true).ck(), base.ck());
        }
    }

    #[test]
    fn test_bilirubin_gate() {
        assert!(liver_text(80.0, 2.0).starts_with("Consider starting statin."));
        assert_eq!(
            liver_text(80.0, 2.01),
            "Do not start statin. Bilirubin above threshold. Consult hepatic experts."
        );
    }

    #[test]
    fn test_high_transaminase_overrides_bilirubin() {
        for bilirubin in [0.0, 0.5, 2.0, 10.0] {
            assert_eq!(
                liver_text(121.0, bilirubin),
                "Do not start statin. Transaminase above 3× upper limit. Consult hepatic experts."
            );
        }
    }

    #[test]
    fn test_transaminase_at_uln_starts_statin() {
        assert_eq!(
            liver_text(40.0, 5.0),
            "Start statin. Follow-up liver function test in 12 weeks."
        );
        assert_ne!(liver_text(40.01, 0.0), liver_text(40.0, 0.0));
    }

    #[test]
    fn test_deterministic_output() {
        let first = evaluate(450.0, 95.0, 2.5, true).to_string();
        for _ in 0..10 {
            assert_eq!(evaluate(450.0, 95.0, 2.5, true).to_string(), first);
        }
    }

    #[test]
    fn test_rendered_text_layout() {
        let rec = evaluate(100.0, 20.0, 0.3, true);
        assert_eq!(
            rec.to_string(),
            "CK: Withdraw statin. Consider nonstatin-related causes and modify risk factors.\n\
             - If symptoms resolve and CK returns to normal: reinitiate statin at a reduced dose or switch to an alternative statin.\n\
             - If CK remains elevated or symptoms persist: consult a specialist or consider muscle biopsy.\n\n\
             Liver: Start statin. Follow-up liver function test in 12 weeks."
        );
    }

    #[test]
    fn test_simplified_top_branch_matches_legacy_form() {
        let t = Thresholds::default();
        let samples = [
            0.0, 1.0, 199.9, 200.0, 599.99, 600.0, 600.01, 1999.99, 2000.0, 2000.000_001,
            2000.01, 2500.0, 10_000.0, 1e9,
        ];
        for ck in samples {
            for symptoms in [false, true] {
                let simplified =
                    CkGuidance::classify(&t, ck, symptoms) == CkGuidance::WithdrawAndHydrate;
                assert_eq!(
                    simplified,
                    legacy_withdraw_and_hydrate(&t, ck, symptoms),
                    "ck={} symptoms={}",
                    ck,
                    symptoms
                );
            }
        }
    }

    #[test]
    fn test_custom_thresholds_move_boundaries() {
        let engine = DecisionEngine::new(Thresholds::new(100.0, 30.0, 1.0).unwrap());
        let rec = engine.evaluate(EvaluationInput::new(1000.5, 90.0, 1.5, false));
        assert_eq!(
            rec.ck().text,
            "Withdraw statin, hydrate, and monitor renal function."
        );
        assert_eq!(
            rec.liver().text,
            "Do not start statin. Bilirubin above threshold. Consult hepatic experts."
        );
    }

    #[test]
    fn test_full_engine_myopathy_matches_its_ck_statement() {
        let engine = DecisionEngine::default();
        for ck in [50.0, 600.0, 1500.0, 3000.0] {
            for symptoms in [false, true] {
                let input = EvaluationInput::new(ck, 10.0, 0.2, symptoms);
                assert_eq!(
                    &engine.evaluate_myopathy(input.myopathy()),
                    engine.evaluate(input).ck()
                );
            }
        }
    }

    #[test]
    fn test_myopathy_tool_wording() {
        let tool = MyopathyEngine::default();
        assert_eq!(
            tool.evaluate_myopathy(MyopathyInput::new(2500.0, false)).text,
            "Withdraw statin. Provide hydration and monitor renal function."
        );
        assert_eq!(
            tool.evaluate_myopathy(MyopathyInput::new(100.0, false)).text,
            "Continue statin therapy. Recheck CK in 2 to 4 weeks.\nConsider nonstatin-related causes and modify risk factors."
        );
        let symptomatic = tool.evaluate_myopathy(MyopathyInput::new(100.0, true));
        assert!(symptomatic.follow_ups[1].contains("(>3x ULN)"));
    }

    #[test]
    fn test_variants_share_classification() {
        let full = DecisionEngine::default();
        let tool = MyopathyEngine::default();
        // Withdraw headline is shared; follow-ups and the outer branches differ.
        let input = MyopathyInput::new(1000.0, true);
        assert_eq!(full.evaluate_myopathy(input), tool.evaluate_myopathy(input));
        let input = MyopathyInput::new(100.0, true);
        assert_eq!(
            full.evaluate_myopathy(input).text,
            tool.evaluate_myopathy(input).text
        );
    }

    #[test]
    fn test_evaluators_are_object_safe() {
        let engines: Vec<Box<dyn MyopathyEvaluator>> =
            vec![Box::new(DecisionEngine::default()), Box::new(MyopathyEngine::default())];
        for engine in engines {
            assert_eq!(
                engine.evaluate_myopathy(MyopathyInput::new(700.0, false)).kind,
                StatementKind::Ck
            );
        }
    }
}
