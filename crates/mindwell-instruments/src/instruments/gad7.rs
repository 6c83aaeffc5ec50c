use mindwell_core::models::assessment::InstrumentKind;

use crate::Instrument;

/// GAD-7: Generalized Anxiety Disorder scale.
/// 7 items over the past two weeks, each rated 0–3. Total 0–21.
pub struct Gad7;

const QUESTIONS: [&str; 7] = [
    "Feeling nervous, anxious, or on edge?",
    "Not being able to stop or control worrying?",
    "Worrying too much about different things?",
    "Trouble relaxing?",
    "Being so restless that it is hard to sit still?",
    "Becoming easily annoyed or irritable?",
    "Feeling afraid, as if something awful might happen?",
];

impl Instrument for Gad7 {
    fn name(&self) -> &str {
        "GAD-7"
    }

    fn title(&self) -> &str {
        "Anxiety Screening"
    }

    fn description(&self) -> &str {
        "A brief questionnaire to assess symptoms of anxiety over the past 2 weeks"
    }

    fn kind(&self) -> InstrumentKind {
        InstrumentKind::Anxiety
    }

    fn questions(&self) -> &[&'static str] {
        &QUESTIONS
    }
}
