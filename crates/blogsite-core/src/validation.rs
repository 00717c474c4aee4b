//! Write-payload validation.
//!
//! Every rule is evaluated and all violations are returned together as a
//! [`FieldErrors`] map, so a client sees every bad field in one response.

use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;
use validator::Validate;

use crate::domain::FieldUpdate;
use crate::error::FieldErrors;

pub const MISSING_FIELD: &str = "Missing data for required field.";
pub const TITLE_LENGTH: &str = "Length must be between 3 and 255.";
pub const CONTENT_LENGTH: &str = "Shorter than minimum length 10.";
pub const EXCERPT_LENGTH: &str = "Longer than maximum length 300.";
pub const IMAGE_LENGTH: &str = "Longer than maximum length 255.";
pub const INVALID_URL: &str = "Not a valid URL.";
pub const NOT_A_STRING: &str = "Not a valid string.";
pub const NOT_A_BOOLEAN: &str = "Not a valid boolean.";

const URL_SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];

/// Untrusted post payload as sent by a client.
///
/// Only JSON objects deserialize. Each known key keeps its raw value so a
/// value of the wrong type is reported against its own field. A key that is
/// absent stays `None`, an explicit `null` is `Some(Value::Null)`. System
/// fields (`id`, `created_at`, `updated_at`) and unknown keys are dropped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct PostInput {
    pub title: Option<Value>,
    pub content: Option<Value>,
    pub excerpt: Option<Value>,
    pub featured_image: Option<Value>,
    pub published: Option<Value>,
}

impl From<Map<String, Value>> for PostInput {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            title: body.remove("title"),
            content: body.remove("content"),
            excerpt: body.remove("excerpt"),
            featured_image: body.remove("featured_image"),
            published: body.remove("published"),
        }
    }
}

/// A payload that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPost {
    pub title: String,
    pub content: String,
    pub excerpt: FieldUpdate<String>,
    pub featured_image: FieldUpdate<String>,
    /// `None` when the payload did not carry the flag.
    pub published: Option<bool>,
}

#[derive(Debug, Validate)]
struct PostRules {
    #[validate(
        required(message = "Missing data for required field."),
        length(min = 3, max = 255, message = "Length must be between 3 and 255.")
    )]
    title: Option<String>,

    #[validate(
        required(message = "Missing data for required field."),
        length(min = 10, message = "Shorter than minimum length 10.")
    )]
    content: Option<String>,

    #[validate(length(max = 300, message = "Longer than maximum length 300."))]
    excerpt: Option<String>,

    // Matches the VARCHAR(255) column.
    #[validate(length(max = 255, message = "Longer than maximum length 255."))]
    featured_image: Option<String>,
}

/// `None` when absent, `Some(None)` for `null`. A non-string value records
/// [`NOT_A_STRING`] and reads as absent.
fn text(field: &str, value: Option<Value>, errors: &mut FieldErrors) -> Option<Option<String>> {
    match value? {
        Value::Null => Some(None),
        Value::String(text) => Some(Some(text)),
        _ => {
            errors.add(field, NOT_A_STRING);
            None
        }
    }
}

fn flag(field: &str, value: Option<Value>, errors: &mut FieldErrors) -> Option<bool> {
    match value? {
        Value::Null => None,
        Value::Bool(flag) => Some(flag),
        _ => {
            errors.add(field, NOT_A_BOOLEAN);
            None
        }
    }
}

/// Blank text counts as clearing the field.
fn normalize(field: Option<Option<String>>) -> FieldUpdate<String> {
    match field {
        None => FieldUpdate::Absent,
        Some(None) => FieldUpdate::Clear,
        Some(Some(text)) if text.trim().is_empty() => FieldUpdate::Clear,
        Some(Some(text)) => FieldUpdate::Set(text),
    }
}

/// Accepts absolute `http(s)`/`ftp(s)` URLs with a host, or relative
/// references starting with `/`.
pub fn is_url(value: &str) -> bool {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return false;
    }

    if value.starts_with('/') {
        return Url::parse("http://localhost")
            .and_then(|base| base.join(value))
            .is_ok();
    }

    match Url::parse(value) {
        Ok(url) => URL_SCHEMES.contains(&url.scheme()) && url.host().is_some(),
        Err(_) => false,
    }
}

impl PostInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(Value::String(title.into())),
            content: Some(Value::String(content.into())),
            ..Self::default()
        }
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(Value::String(excerpt.into()));
        self
    }

    pub fn with_featured_image(mut self, url: impl Into<String>) -> Self {
        self.featured_image = Some(Value::String(url.into()));
        self
    }

    pub fn with_published(mut self, published: bool) -> Self {
        self.published = Some(Value::Bool(published));
        self
    }

    /// Check every rule, returning the typed payload or all violations.
    pub fn validate(self) -> Result<ValidPost, FieldErrors> {
        // Type errors go first; a field with one skips its value rules.
        let mut errors = FieldErrors::new();
        let title = text("title", self.title, &mut errors).flatten();
        let content = text("content", self.content, &mut errors).flatten();
        let excerpt = normalize(text("excerpt", self.excerpt, &mut errors));
        let featured_image = normalize(text("featured_image", self.featured_image, &mut errors));
        let published = flag("published", self.published, &mut errors);

        let rules = PostRules {
            title,
            content,
            excerpt: excerpt.as_set().cloned(),
            featured_image: featured_image.as_set().cloned(),
        };
        if let Err(violations) = rules.validate() {
            for (field, messages) in FieldErrors::from(violations).into_inner() {
                if errors.get(&field).is_some() {
                    continue;
                }
                for message in messages {
                    errors.add(field.as_str(), message);
                }
            }
        }

        if let Some(image) = featured_image.as_set() {
            if !is_url(image) {
                errors.add("featured_image", INVALID_URL);
            }
        }

        match (rules.title, rules.content) {
            (Some(title), Some(content)) if errors.is_empty() => Ok(ValidPost {
                title,
                content,
                excerpt,
                featured_image,
                published,
            }),
            _ => Err(errors),
        }
    }
}
