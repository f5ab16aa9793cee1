//! Article and Tag domain models.
//!
//! This module contains the entities served by the bookmarking backend and
//! the client-side draft state used to build a new article submission.

use serde::{Deserialize, Serialize};

/// A label attached to zero or more articles.
///
/// Tags are created by the client but owned by the server: `id` is assigned
/// on creation and name uniqueness is enforced server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Server-assigned identifier.
    pub id: i64,
    /// Display name, non-empty.
    pub name: String,
}

/// A saved article as returned by the backend.
///
/// The client never assigns `id` and treats `url` as an opaque string to be
/// rendered as a hyperlink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Server-assigned identifier, immutable.
    pub id: i64,
    /// Title, non-empty.
    pub title: String,
    /// Saved URL, non-empty, opaque.
    pub url: String,
    /// Optional free-form note.
    pub memo: Option<String>,
    /// Read/unread flag, false on creation.
    pub is_read: bool,
    /// Tags attached to this article, order as served.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Request body for creating an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewArticle {
    pub url: String,
    pub title: String,
    pub memo: String,
    pub tag_ids: Vec<i64>,
}

/// Request body for the read-status partial update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadStatusPatch {
    pub is_read: bool,
}

/// Request body for creating a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTag {
    pub name: String,
}

/// Client-only draft state for the "save a new article" form.
///
/// The draft survives a failed submission unchanged so the user can retry
/// without retyping; it is reset only after the server accepts the article.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleDraft {
    pub url: String,
    pub title: String,
    pub memo: String,
    /// Ids of the tags selected for the draft, insertion order preserved.
    pub selected_tag_ids: Vec<i64>,
}

impl ArticleDraft {
    /// Validates the required fields, returning the submission body.
    ///
    /// `url` and `title` must be non-empty after trimming; `memo` and the tag
    /// selection are optional. This is the form-level constraint that keeps
    /// empty submissions off the network.
    pub fn to_new_article(&self) -> Option<NewArticle> {
        if self.url.trim().is_empty() || self.title.trim().is_empty() {
            return None;
        }
        Some(NewArticle {
            url: self.url.clone(),
            title: self.title.clone(),
            memo: self.memo.clone(),
            tag_ids: self.selected_tag_ids.clone(),
        })
    }

    /// Flips tag `id` in the selection: adds it if absent, removes it if present.
    pub fn toggle_tag(&mut self, id: i64) {
        if let Some(pos) = self.selected_tag_ids.iter().position(|&t| t == id) {
            self.selected_tag_ids.remove(pos);
        } else {
            self.selected_tag_ids.push(id);
        }
    }

    /// Whether tag `id` is currently selected.
    pub fn is_tag_selected(&self, id: i64) -> bool {
        self.selected_tag_ids.contains(&id)
    }

    /// Clears every field back to the initial empty state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
