use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::locale::{Language, Localized};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ResourceType {
    Video,
    Pdf,
    Audio,
    Article,
}

/// Resource library sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum ResourceCategory {
    Relaxation,
    StudyStress,
    Sleep,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 3] = [
        ResourceCategory::Relaxation,
        ResourceCategory::StudyStress,
        ResourceCategory::Sleep,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ResourceCategory::Relaxation => "relaxation",
            ResourceCategory::StudyStress => "study-stress",
            ResourceCategory::Sleep => "sleep",
        }
    }

    pub fn name(self, language: Language) -> &'static str {
        match (self, language) {
            (ResourceCategory::Relaxation, Language::En) => "Relaxation",
            (ResourceCategory::Relaxation, Language::Hi) => "विश्राम",
            (ResourceCategory::StudyStress, Language::En) => "Study Stress",
            (ResourceCategory::StudyStress, Language::Hi) => "अध्ययन तनाव",
            (ResourceCategory::Sleep, Language::En) => "Sleep",
            (ResourceCategory::Sleep, Language::Hi) => "नींद",
        }
    }

    pub fn description(self, language: Language) -> &'static str {
        match (self, language) {
            (ResourceCategory::Relaxation, Language::En) => {
                "Mindfulness exercises, breathing techniques, and relaxation methods"
            }
            (ResourceCategory::Relaxation, Language::Hi) => {
                "माइंडफुलनेस अभ्यास, सांस की तकनीक, और विश्राम के तरीके"
            }
            (ResourceCategory::StudyStress, Language::En) => {
                "Exam pressure management, study techniques, and stress relief"
            }
            (ResourceCategory::StudyStress, Language::Hi) => {
                "परीक्षा दबाव प्रबंधन, अध्ययन तकनीक, और तनाव से राहत"
            }
            (ResourceCategory::Sleep, Language::En) => {
                "Sleep hygiene tips, bedtime routines, and rest improvement"
            }
            (ResourceCategory::Sleep, Language::Hi) => {
                "नींद की स्वच्छता के सुझाव, सोने का समय, और आराम में सुधार"
            }
        }
    }
}

/// A self-help resource with English and Hindi text.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Resource {
    pub id: Uuid,
    pub title: Localized,
    pub description: Localized,
    pub content: Option<Localized>,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub category: ResourceCategory,
    pub duration_minutes: Option<u32>,
    /// Object key of the media file, served through a presigned URL.
    pub media_key: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub helpful_count: u64,
    #[serde(default)]
    pub not_helpful_count: u64,
    pub created_at: jiff::Timestamp,
}

impl Resource {
    /// Resolve all localized text for `language`.
    pub fn view(&self, language: Language) -> ResourceView {
        ResourceView {
            id: self.id,
            title: self.title.get(language).to_string(),
            description: self.description.get(language).to_string(),
            content: self.content.as_ref().map(|c| c.get(language).to_string()),
            resource_type: self.resource_type,
            category: self.category,
            category_name: self.category.name(language).to_string(),
            duration_minutes: self.duration_minutes,
            has_media: self.media_key.is_some(),
            is_featured: self.is_featured,
            view_count: self.view_count,
            helpful_count: self.helpful_count,
            not_helpful_count: self.not_helpful_count,
        }
    }

    pub fn record_view(&mut self) {
        self.view_count = self.view_count.saturating_add(1);
    }

    pub fn record_feedback(&mut self, helpful: bool) {
        if helpful {
            self.helpful_count = self.helpful_count.saturating_add(1);
        } else {
            self.not_helpful_count = self.not_helpful_count.saturating_add(1);
        }
    }
}

/// A [`Resource`] with text resolved to one language.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResourceView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub category: ResourceCategory,
    pub category_name: String,
    pub duration_minutes: Option<u32>,
    pub has_media: bool,
    pub is_featured: bool,
    pub view_count: u64,
    pub helpful_count: u64,
    pub not_helpful_count: u64,
}

/// A helpful / not helpful vote on a resource. Guests vote anonymously.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResourceFeedback {
    pub id: Uuid,
    pub resource_id: Uuid,
    pub helpful: bool,
    pub created_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResourceQuery {
    #[serde(default)]
    pub language: Language,
    pub category: Option<ResourceCategory>,
}

/// Filter by category and resolve to `query.language`. Featured resources
/// come first, then alphabetical by localized title.
pub fn browse(resources: &[Resource], query: &ResourceQuery) -> Vec<ResourceView> {
    let mut views: Vec<ResourceView> = resources
        .iter()
        .filter(|r| query.category.is_none_or(|c| r.category == c))
        .map(|r| r.view(query.language))
        .collect();

    views.sort_by(|a, b| {
        b.is_featured
            .cmp(&a.is_featured)
            .then_with(|| a.title.cmp(&b.title))
    });
    views
}

/// A category card: localized name and description plus resource count.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategorySummary {
    pub category: ResourceCategory,
    pub name: String,
    pub description: String,
    pub resource_count: usize,
}

pub fn category_summaries(resources: &[Resource], language: Language) -> Vec<CategorySummary> {
    ResourceCategory::ALL
        .iter()
        .map(|&category| CategorySummary {
            category,
            name: category.name(language).to_string(),
            description: category.description(language).to_string(),
            resource_count: resources.iter().filter(|r| r.category == category).count(),
        })
        .collect()
}
