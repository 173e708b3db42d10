use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{FolioError, Result};

pub type ProjectId = i64;

pub const DEFAULT_CATEGORY: &str = "General";

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref GITHUB_REPO_URL: Regex =
        Regex::new(r"^https://github\.com/[^/?#\s]+/[^/?#\s]+/?$").unwrap();
}

/// Derive the URL slug of a project name.
///
/// The name is lower-cased and every whitespace run is replaced with a
/// single hyphen. Slugs are never stored, so every caller must go through
/// this function to get identical results.
pub fn slugify(name: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&name.to_lowercase(), "-")
        .into_owned()
}

/// One portfolio entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    /// Live site
    #[serde(default)]
    pub url: Option<String>,
    /// Source repository
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stars: u32,
    #[serde(default)]
    pub is_featured: bool,
}

impl Project {
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.category == category
    }
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_owned()
}

/// Creation payload: a [`Project`] without its id.
///
/// Every field is optional at the deserialization level so that missing
/// fields are reported by [`NewProject::validate`] with their name instead
/// of failing as a generic parse error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub github_url: Option<String>,
    pub category: Option<String>,
    pub language: Option<String>,
    pub stars: Option<i64>,
    pub is_featured: Option<bool>,
}

impl NewProject {
    pub fn validate(&self) -> Result<()> {
        if is_blank(&self.name) {
            return Err(FolioError::validation("name", "Name is required"));
        }
        if is_blank(&self.description) {
            return Err(FolioError::validation(
                "description",
                "Description is required",
            ));
        }
        if let Some(category) = &self.category {
            if category.trim().is_empty() {
                return Err(FolioError::validation(
                    "category",
                    "Category must not be empty",
                ));
            }
        }
        if let Some(url) = present(&self.url) {
            if Url::parse(url).is_err() {
                return Err(FolioError::validation(
                    "url",
                    "Must be an absolute URL",
                ));
            }
        }
        if let Some(github_url) = present(&self.github_url) {
            if Url::parse(github_url).is_err()
                || !GITHUB_REPO_URL.is_match(github_url)
            {
                return Err(FolioError::validation(
                    "githubUrl",
                    "Must look like https://github.com/<owner>/<repo>",
                ));
            }
        }
        if let Some(stars) = self.stars {
            if stars < 0 {
                return Err(FolioError::validation(
                    "stars",
                    "Must not be negative",
                ));
            }
            if u32::try_from(stars).is_err() {
                return Err(FolioError::validation("stars", "Too large"));
            }
        }
        Ok(())
    }

    /// Slug the project will have once created, if it has a name.
    pub fn slug(&self) -> Option<String> {
        self.name.as_deref().map(|name| slugify(name.trim()))
    }

    /// Build the stored record, applying defaults and trimming input.
    ///
    /// Expects [`NewProject::validate`] to have passed.
    pub fn into_project(self, id: ProjectId) -> Project {
        Project {
            id,
            name: self.name.unwrap_or_default().trim().to_owned(),
            description: self
                .description
                .unwrap_or_default()
                .trim()
                .to_owned(),
            url: normalize(self.url),
            github_url: normalize(self.github_url),
            category: normalize(self.category)
                .unwrap_or_else(default_category),
            language: normalize(self.language),
            stars: self
                .stars
                .and_then(|s| u32::try_from(s).ok())
                .unwrap_or(0),
            is_featured: self.is_featured.unwrap_or(false),
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    present(value).is_none()
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn normalize(value: Option<String>) -> Option<String> {
    present(&value).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft() -> NewProject {
        NewProject {
            name: Some("My Cool App".to_owned()),
            description: Some("Does cool things".to_owned()),
            ..Default::default()
        }
    }

    #[rstest]
    #[case("My Cool App", "my-cool-app")]
    #[case("my   cool\tapp", "my-cool-app")]
    #[case("MY COOL APP", "my-cool-app")]
    #[case("Retrofit", "retrofit")]
    #[case(" padded ", "-padded-")]
    #[case("line\nbreak", "line-break")]
    fn slugify_cases(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(slugify(name), expected);
    }

    #[test]
    fn project_slug_uses_name() {
        let project = draft().into_project(7);
        assert_eq!(project.slug(), "my-cool-app");
        assert_eq!(draft().slug().as_deref(), Some("my-cool-app"));
    }

    #[test]
    fn defaults_are_applied() {
        let project = draft().into_project(1);
        assert_eq!(project.category, DEFAULT_CATEGORY);
        assert_eq!(project.stars, 0);
        assert!(!project.is_featured);
        assert_eq!(project.url, None);
    }

    #[test]
    fn largest_star_count_is_kept() {
        let new = NewProject {
            stars: Some(u32::MAX as i64),
            ..draft()
        };
        assert!(new.validate().is_ok());
        assert_eq!(new.into_project(1).stars, u32::MAX);
    }

    #[test]
    fn blank_optional_fields_are_dropped() {
        let mut new = draft();
        new.url = Some("  ".to_owned());
        new.language = Some(String::new());
        assert!(new.validate().is_ok());

        let project = new.into_project(1);
        assert_eq!(project.url, None);
        assert_eq!(project.language, None);
    }

    #[rstest]
    #[case::missing_name(NewProject { name: None, ..draft() }, "name")]
    #[case::blank_name(NewProject { name: Some(" ".into()), ..draft() }, "name")]
    #[case::missing_description(NewProject { description: None, ..draft() }, "description")]
    #[case::blank_category(NewProject { category: Some("".into()), ..draft() }, "category")]
    #[case::relative_url(NewProject { url: Some("/home".into()), ..draft() }, "url")]
    #[case::not_github(NewProject { github_url: Some("https://example.com/a/b".into()), ..draft() }, "githubUrl")]
    #[case::negative_stars(NewProject { stars: Some(-1), ..draft() }, "stars")]
    #[case::huge_stars(NewProject { stars: Some(5_000_000_000), ..draft() }, "stars")]
    fn validation_names_the_field(
        #[case] new: NewProject,
        #[case] expected: &str,
    ) {
        match new.validate() {
            Err(FolioError::Validation { field, .. }) => {
                assert_eq!(field, expected)
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[rstest]
    #[case("https://github.com/acme/widget")]
    #[case("https://github.com/acme/widget.git")]
    #[case("https://github.com/acme/widget/")]
    fn github_urls_accepted(#[case] url: &str) {
        let new = NewProject {
            github_url: Some(url.to_owned()),
            ..draft()
        };
        assert!(new.validate().is_ok());
    }

    #[test]
    fn deserializes_camel_case() {
        let json = r#"{
            "id": 3,
            "name": "LeakCanary",
            "description": "A memory leak detection library for Android.",
            "githubUrl": "https://github.com/square/leakcanary",
            "category": "Android",
            "stars": 29000,
            "isFeatured": false
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(
            project.github_url.as_deref(),
            Some("https://github.com/square/leakcanary")
        );
        assert_eq!(project.url, None);
        assert_eq!(project.slug(), "leakcanary");

        let back = serde_json::to_value(&project).unwrap();
        assert_eq!(back["isFeatured"], false);
        assert_eq!(back["githubUrl"], "https://github.com/square/leakcanary");
    }

    #[test]
    fn missing_category_defaults_to_general() {
        let json = r#"{"id": 1, "name": "a", "description": "b"}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.category, "General");
    }
}
