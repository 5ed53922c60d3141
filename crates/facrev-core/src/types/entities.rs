//! Persisted entity types for every collection in the store.
//!
//! All IDs are opaque strings assigned at creation (UUID v4) and immutable
//! thereafter. Timestamps are `DateTime<Utc>`, persisted as RFC 3339 text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::{ModerationStatus, Role};

/// An account document. Never physically deleted — deactivation
/// (`is_active = false`) is the deletion substitute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    /// Display name, assigned for admin accounts only.
    pub username: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub logout_pending: bool,
    pub force_logout: bool,
}

impl User {
    pub fn new(id: String, email: String, role: Role, username: Option<String>) -> Self {
        Self {
            id,
            email,
            username,
            role,
            is_active: true,
            logout_pending: false,
            force_logout: false,
        }
    }
}

/// A faculty profile. `rating` and `review_count` are derived aggregates,
/// recomputed from approved reviews on every review transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: String,
    pub name: String,
    pub department: String,
    pub title: String,
    pub bio: String,
    pub avatar_url: String,
    pub rating: f64,
    pub review_count: i64,
    pub tags: Vec<String>,
    pub likes: i64,
    pub dislikes: i64,
}

impl Faculty {
    /// Build a fresh listing with zeroed aggregates, a name-seeded avatar,
    /// and a department boilerplate bio.
    pub fn new_listing(name: &str, department: &str, title: &str) -> Self {
        let seed: String = name.chars().filter(|c| !c.is_whitespace()).collect();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            department: department.to_string(),
            title: title.to_string(),
            bio: format!("An esteemed member of the {department} department."),
            avatar_url: format!("https://api.dicebear.com/8.x/micah/svg?seed={seed}"),
            rating: 0.0,
            review_count: 0,
            tags: Vec::new(),
            likes: 0,
            dislikes: 0,
        }
    }
}

/// Input for creating a faculty listing (admin add form or one CSV row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacultyDraft {
    pub name: String,
    pub department: String,
    pub title: String,
}

/// Partial update to a faculty profile. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacultyUpdate {
    pub name: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

/// A star-rated review of one faculty member by one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub faculty_id: String,
    /// 1..=5 stars.
    pub rating: i64,
    pub comment: String,
    pub date: DateTime<Utc>,
    pub status: ModerationStatus,
}

impl Review {
    pub fn new(user_id: &str, faculty_id: &str, rating: i64, comment: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            faculty_id: faculty_id.to_string(),
            rating,
            comment: comment.to_string(),
            date: Utc::now(),
            status: ModerationStatus::Pending,
        }
    }
}

/// A student-submitted suggestion for a faculty member missing from the
/// directory. Approval materializes the corresponding `Faculty` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFacultySuggestion {
    pub id: String,
    pub user_id: String,
    pub faculty_name: String,
    pub department: String,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
    pub status: ModerationStatus,
}

/// A historical exam paper upload. The image lives in blob storage; only
/// its URL is persisted here. Publicly listed only when approved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionPaper {
    pub id: String,
    pub user_id: String,
    /// Denormalized for display alongside the paper.
    pub user_email: String,
    pub course_name: String,
    pub slot: String,
    pub image_url: String,
    pub status: ModerationStatus,
    pub date: DateTime<Utc>,
}

/// One message in the shared chat room. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub user_id: String,
    pub user_email: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(user_id: &str, user_email: &str, text: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            user_email: user_email.to_string(),
            text: text.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Singleton feature toggles, read by every client and re-read live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub is_chat_enabled: bool,
    pub is_about_page_enabled: bool,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            is_chat_enabled: true,
            is_about_page_enabled: true,
        }
    }
}

/// Partial update to the settings singleton.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SiteSettingsUpdate {
    pub is_chat_enabled: Option<bool>,
    pub is_about_page_enabled: Option<bool>,
}
