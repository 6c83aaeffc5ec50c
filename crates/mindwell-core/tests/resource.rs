use mindwell_core::models::locale::{Language, Localized};
use mindwell_core::models::resource::{
    Resource, ResourceCategory, ResourceQuery, ResourceType, browse, category_summaries,
};
use uuid::Uuid;

fn resource(title_en: &str, title_hi: &str, category: ResourceCategory) -> Resource {
    Resource {
        id: Uuid::new_v4(),
        title: Localized::new(title_en, title_hi),
        description: Localized::new("Description", "विवरण"),
        content: None,
        resource_type: ResourceType::Video,
        category,
        duration_minutes: Some(5),
        media_key: None,
        is_featured: false,
        view_count: 0,
        helpful_count: 0,
        not_helpful_count: 0,
        created_at: "2025-01-01T00:00:00Z".parse().unwrap(),
    }
}

#[test]
fn browse_filters_category_and_puts_featured_first() {
    let mut featured = resource("Zen Breathing", "", ResourceCategory::Relaxation);
    featured.is_featured = true;
    let resources = vec![
        resource("Body Scan", "", ResourceCategory::Relaxation),
        resource("Sleep Hygiene for Students", "", ResourceCategory::Sleep),
        featured,
    ];

    let views = browse(
        &resources,
        &ResourceQuery {
            language: Language::En,
            category: Some(ResourceCategory::Relaxation),
        },
    );
    let titles: Vec<&str> = views.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles, vec!["Zen Breathing", "Body Scan"]);
}

#[test]
fn hindi_view_falls_back_to_english_when_missing() {
    let resources = vec![
        resource("Meditation", "मानसिक शांति के लिए ध्यान", ResourceCategory::Relaxation),
        resource("Study Techniques", "", ResourceCategory::StudyStress),
    ];
    let views = browse(
        &resources,
        &ResourceQuery {
            language: Language::Hi,
            category: None,
        },
    );
    assert!(views.iter().any(|v| v.title == "मानसिक शांति के लिए ध्यान"));
    assert!(views.iter().any(|v| v.title == "Study Techniques"));
    assert!(views.iter().all(|v| v.description == "विवरण"));
}

#[test]
fn views_and_feedback_are_counted() {
    let mut r = resource("Breathing", "", ResourceCategory::Relaxation);
    r.record_view();
    r.record_view();
    r.record_feedback(true);
    r.record_feedback(false);
    r.record_feedback(true);
    assert_eq!(r.view_count, 2);
    assert_eq!(r.helpful_count, 2);
    assert_eq!(r.not_helpful_count, 1);
}

#[test]
fn category_slugs_serialize_kebab_case() {
    assert_eq!(
        serde_json::to_string(&ResourceCategory::StudyStress).unwrap(),
        "\"study-stress\""
    );
    assert_eq!(ResourceCategory::StudyStress.slug(), "study-stress");
}

#[test]
fn category_summaries_count_resources() {
    let resources = vec![
        resource("A", "", ResourceCategory::Sleep),
        resource("B", "", ResourceCategory::Sleep),
        resource("C", "", ResourceCategory::Relaxation),
    ];
    let summaries = category_summaries(&resources, Language::En);
    assert_eq!(summaries.len(), 3);
    let sleep = summaries
        .iter()
        .find(|s| s.category == ResourceCategory::Sleep)
        .unwrap();
    assert_eq!(sleep.resource_count, 2);
    assert_eq!(sleep.name, "Sleep");
}
