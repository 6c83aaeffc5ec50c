use mindwell_core::models::assessment::InstrumentKind;

use crate::Instrument;

/// PHQ-9: Patient Health Questionnaire, depression module.
/// 9 items over the past two weeks, each rated 0–3. Total 0–27.
pub struct Phq9;

const QUESTIONS: [&str; 9] = [
    "Little interest or pleasure in doing things?",
    "Feeling down, depressed, or hopeless?",
    "Trouble falling/staying asleep, or sleeping too much?",
    "Feeling tired or having little energy?",
    "Poor appetite or overeating?",
    "Feeling bad about yourself or that you are a failure?",
    "Trouble concentrating on things?",
    "Moving or speaking slowly, or being fidgety/restless?",
    "Thoughts that you would be better off dead?",
];

impl Instrument for Phq9 {
    fn name(&self) -> &str {
        "PHQ-9"
    }

    fn title(&self) -> &str {
        "Depression Screening"
    }

    fn description(&self) -> &str {
        "A brief questionnaire to assess symptoms of depression over the past 2 weeks"
    }

    fn kind(&self) -> InstrumentKind {
        InstrumentKind::Depression
    }

    fn questions(&self) -> &[&'static str] {
        &QUESTIONS
    }
}
