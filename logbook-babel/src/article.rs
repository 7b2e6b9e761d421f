//! Article records and the admin capability.
//!
//! An article is created by a full save, replaced only by another full save
//! and removed by an explicit delete. Its slug is its identity: unique within
//! a store and safe to use in a URL path.

use serde::{Deserialize, Serialize};

/// A blog article as stored by the content backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    pub title: String,
    pub slug: String,
    /// Publication date, `YYYY-MM-DD`.
    pub date: String,
    pub category: String,
    pub featured_image: String,
    pub featured_image_alt: String,
    pub excerpt: String,
    pub author: String,
    /// Canonical Markdown body.
    pub content: String,
    pub published: bool,
    pub seo_title: String,
    pub seo_description: String,
}

impl Article {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            slug: slugify(&title),
            title,
            content: content.into(),
            ..Default::default()
        }
    }
}

/// `true` for slugs of the form `[a-z0-9]+(-[a-z0-9]+)*`.
pub fn is_valid_slug(slug: &str) -> bool {
    slug.split('-').all(|part| {
        !part.is_empty()
            && part
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
    })
}

/// Derive a slug from a title: ASCII letters and digits are kept (lowercased),
/// everything else separates words.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Capability held by an authenticated admin session.
///
/// Authentication itself happens outside this crate; whatever establishes
/// the session mints the token, and every mutating store operation asks for
/// it. Nothing in the editor inspects it beyond logging the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminToken {
    subject: String,
}

impl AdminToken {
    pub fn from_authenticated_session(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }
}
