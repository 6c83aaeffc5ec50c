use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::locale::{Language, Localized};
use crate::error::CoreError;

/// Display name shown in place of the author on anonymous posts.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ForumCategory {
    pub id: Uuid,
    pub slug: String,
    pub name: Localized,
    pub description: Localized,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// A localized category as listed to users.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ForumCategoryView {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: String,
}

/// Active categories, sorted by English name, resolved to `language`.
pub fn active_categories(
    categories: &[ForumCategory],
    language: Language,
) -> Vec<ForumCategoryView> {
    let mut active: Vec<&ForumCategory> = categories.iter().filter(|c| c.is_active).collect();
    active.sort_by(|a, b| a.name.en.cmp(&b.name.en));
    active
        .into_iter()
        .map(|c| ForumCategoryView {
            id: c.id,
            slug: c.slug.clone(),
            name: c.name.get(language).to_string(),
            description: c.description.get(language).to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ForumPost {
    pub id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub is_anonymous: bool,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub is_locked: bool,
    /// Hidden pending moderator review.
    #[serde(default)]
    pub is_moderated: bool,
    #[serde(default)]
    pub upvotes: u32,
    #[serde(default)]
    pub view_count: u32,
    pub created_at: jiff::Timestamp,
}

impl ForumPost {
    pub fn author_name(&self) -> &str {
        if self.is_anonymous {
            ANONYMOUS_AUTHOR
        } else {
            &self.author_id
        }
    }

    pub fn upvote(&mut self) -> Result<(), CoreError> {
        if self.is_locked {
            return Err(CoreError::PostLocked(self.id));
        }
        self.upvotes = self.upvotes.saturating_add(1);
        Ok(())
    }

    /// Public representation. Never exposes the author id of an anonymous post.
    pub fn public_view(&self) -> ForumPostView {
        ForumPostView {
            id: self.id,
            category_id: self.category_id,
            title: self.title.clone(),
            content: self.content.clone(),
            author: self.author_name().to_string(),
            is_pinned: self.is_pinned,
            is_locked: self.is_locked,
            upvotes: self.upvotes,
            view_count: self.view_count,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ForumPostView {
    pub id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub upvotes: u32,
    pub view_count: u32,
    pub created_at: jiff::Timestamp,
}

/// Body of a create-post request.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewForumPost {
    pub category_id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub is_anonymous: bool,
}

impl NewForumPost {
    /// Validate against the known categories and build the stored post.
    pub fn into_post(
        self,
        author_id: impl Into<String>,
        categories: &[ForumCategory],
        now: jiff::Timestamp,
    ) -> Result<ForumPost, CoreError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(CoreError::MissingField("title".to_string()));
        }
        let content = self.content.trim();
        if content.is_empty() {
            return Err(CoreError::MissingField("content".to_string()));
        }
        if !categories
            .iter()
            .any(|c| c.id == self.category_id && c.is_active)
        {
            return Err(CoreError::UnknownCategory(self.category_id));
        }

        Ok(ForumPost {
            id: Uuid::new_v4(),
            category_id: self.category_id,
            title: title.to_string(),
            content: content.to_string(),
            author_id: author_id.into(),
            is_anonymous: self.is_anonymous,
            is_pinned: false,
            is_locked: false,
            is_moderated: false,
            upvotes: 0,
            view_count: 0,
            created_at: now,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PostQuery {
    pub category_id: Option<Uuid>,
    pub search: Option<String>,
}

/// Visible posts matching `query`: moderated posts are hidden, pinned posts
/// lead, then newest first.
pub fn list_posts(posts: &[ForumPost], query: &PostQuery) -> Vec<ForumPostView> {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut visible: Vec<&ForumPost> = posts
        .iter()
        .filter(|p| !p.is_moderated)
        .filter(|p| query.category_id.is_none_or(|id| p.category_id == id))
        .filter(|p| match &needle {
            Some(n) => p.title.to_lowercase().contains(n) || p.content.to_lowercase().contains(n),
            None => true,
        })
        .collect();

    visible.sort_by(|a, b| {
        b.is_pinned
            .cmp(&a.is_pinned)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });

    visible.into_iter().map(ForumPost::public_view).collect()
}
