//! Suggestion ordering based on the user's last assessment.

use mindwell_core::models::assessment::{AssessmentResult, InstrumentKind};

use crate::rules::{ResponseBundle, RuleTable, Topic};

/// The topic a completed assessment points the conversation towards.
pub fn focus_topic(result: &AssessmentResult) -> Topic {
    match result.instrument {
        InstrumentKind::Depression => Topic::LowMood,
        InstrumentKind::Anxiety => Topic::Anxiety,
    }
}

/// Suggestion chips for `bundle`, with chips that lead to the focus topic of
/// `last` moved to the front. Relative order is otherwise preserved.
pub fn prioritized_suggestions(
    bundle: &ResponseBundle,
    rules: &RuleTable,
    last: Option<&AssessmentResult>,
) -> Vec<String> {
    let Some(result) = last else {
        return bundle.suggestion_list();
    };
    let focus = focus_topic(result);

    let (mut first, rest): (Vec<&str>, Vec<&str>) = bundle
        .suggestions
        .iter()
        .copied()
        .partition(|chip| rules.select(chip).topic == focus);
    first.extend(rest);
    first.into_iter().map(str::to_string).collect()
}
