use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use strum_macros::Display;

use super::CatalogError;
use crate::{number::NumberProfile, search::SearchSession};

/// Dork categories shipped with the tool, named after their catalog files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[strum(serialize_all = "snake_case")]
pub enum DorkCategory {
    Individuals,
    Reputation,
    SocialMedias,
    DisposableNumProviders,
}

impl DorkCategory {
    pub fn file_name(self) -> String {
        format!("{self}.json")
    }

    const fn embedded(self) -> &'static str {
        match self {
            Self::Individuals => include_str!("../../dorks/individuals.json"),
            Self::Reputation => include_str!("../../dorks/reputation.json"),
            Self::SocialMedias => include_str!("../../dorks/social_medias.json"),
            Self::DisposableNumProviders => {
                include_str!("../../dorks/disposable_num_providers.json")
            }
        }
    }
}

/// One templated query of a category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DorkTemplate {
    /// Human label, stored as `site` or `title` in the catalog files.
    #[serde(alias = "site", alias = "title")]
    pub label: String,
    pub request: String,
    pub stop: usize,
    #[serde(rename = "dialCode", default)]
    pub dial_code: Option<String>,
}

/// A query ready to be sent, with its result cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDork {
    pub query: String,
    pub stop: usize,
}

enum CatalogSource {
    Directory(PathBuf),
    Inline(HashMap<DorkCategory, String>),
    Embedded,
}

pub struct DorkCatalog {
    source: CatalogSource,
}

impl DorkCatalog {
    /// The catalog compiled into the binary.
    pub const fn embedded() -> Self {
        Self {
            source: CatalogSource::Embedded,
        }
    }

    /// Reads `<dir>/<category>.json` on every load.
    pub fn from_directory(dir: impl AsRef<Path>) -> Self {
        Self {
            source: CatalogSource::Directory(dir.as_ref().to_path_buf()),
        }
    }

    /// Catalog backed by in-memory JSON documents; missing categories are unavailable.
    pub fn inline(documents: impl IntoIterator<Item = (DorkCategory, String)>) -> Self {
        Self {
            source: CatalogSource::Inline(documents.into_iter().collect()),
        }
    }

    /// Loads every template of `category`, in file order.
    pub fn load(&self, category: DorkCategory) -> Result<Vec<DorkTemplate>, CatalogError> {
        let document = match &self.source {
            CatalogSource::Embedded => category.embedded().to_string(),
            CatalogSource::Inline(documents) => {
                documents
                    .get(&category)
                    .cloned()
                    .ok_or_else(|| CatalogError::Unavailable {
                        category,
                        reason: "no such category".to_string(),
                    })?
            }
            CatalogSource::Directory(dir) => {
                let path = dir.join(category.file_name());
                fs::read_to_string(&path).map_err(|err| CatalogError::Unavailable {
                    category,
                    reason: format!("{}: {err}", path.display()),
                })?
            }
        };

        parse_templates(category, &document)
    }

    /// Substitutes the number placeholders of `template` and appends the
    /// session's custom format as an extra alternative.
    pub fn render(
        template: &DorkTemplate,
        profile: &NumberProfile,
        session: &SearchSession,
    ) -> RenderedDork {
        let mut query = substitute(&template.request, profile);
        if let Some(custom_format) = session.custom_format() {
            query.push_str(&format!(" OR \"{custom_format}\""));
        }

        RenderedDork {
            query,
            stop: template.stop,
        }
    }

    /// Whether an individuals template targets the profile's country.
    pub fn applies(template: &DorkTemplate, profile: &NumberProfile) -> bool {
        template
            .dial_code
            .as_deref()
            .is_none_or(|dial_code| dial_code == profile.country_code)
    }
}

fn parse_templates(category: DorkCategory, document: &str) -> Result<Vec<DorkTemplate>, CatalogError> {
    let templates: Vec<DorkTemplate> =
        serde_json::from_str(document).map_err(|err| CatalogError::Unavailable {
            category,
            reason: err.to_string(),
        })?;

    if let Some(index) = templates.iter().position(|template| template.stop == 0) {
        return Err(CatalogError::InvalidTemplate {
            category,
            index,
            reason: "stop must be at least 1".to_string(),
        });
    }

    Ok(templates)
}

fn substitute(request: &str, profile: &NumberProfile) -> String {
    request
        .replace("$n", &profile.default)
        .replace("$i", &profile.international)
        .replace("$l", &profile.local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn french() -> NumberProfile {
        NumberProfile::from_parts("+33 6 51 58 00 74", "33651580074", "+33", "+33 6 51 58 00 74", "FR")
            .unwrap()
    }

    fn template(request: &str) -> DorkTemplate {
        DorkTemplate {
            label: "example.com".to_string(),
            request: request.to_string(),
            stop: 3,
            dial_code: None,
        }
    }

    #[test]
    fn render_number_placeholder() {
        let rendered = DorkCatalog::render(
            &template("site:example.com intext:\"$n\""),
            &french(),
            &SearchSession::new(),
        );
        assert_eq!(rendered.query, "site:example.com intext:\"33651580074\"");
        assert_eq!(rendered.stop, 3);
    }

    #[test]
    fn render_all_placeholders_with_custom_format() {
        let mut session = SearchSession::new();
        session.set_custom_format("06.51.58.00.74");
        let rendered = DorkCatalog::render(
            &template("\"$n\" OR \"$i\" OR \"$l\""),
            &french(),
            &session,
        );
        assert_eq!(
            rendered.query,
            "\"33651580074\" OR \"+33 6 51 58 00 74\" OR \"651580074\" OR \"06.51.58.00.74\""
        );
    }

    #[test]
    fn embedded_catalog_renders_without_placeholders() {
        let catalog = DorkCatalog::embedded();
        let session = SearchSession::new();
        for category in DorkCategory::iter() {
            let templates = catalog.load(category).unwrap();
            assert!(!templates.is_empty(), "{category} is empty");
            for template in &templates {
                assert!(template.stop >= 1);
                let rendered = DorkCatalog::render(template, &french(), &session);
                for token in ["$n", "$i", "$l"] {
                    assert!(!rendered.query.contains(token), "{token} left in {}", rendered.query);
                }
            }
        }
    }

    #[test]
    fn labels_accept_site_or_title() {
        let catalog = DorkCatalog::inline([
            (
                DorkCategory::Reputation,
                r#"[{"title": "Who called", "request": "$n", "stop": 1}]"#.to_string(),
            ),
            (
                DorkCategory::SocialMedias,
                r#"[{"site": "vk.com", "request": "$n", "stop": 2}]"#.to_string(),
            ),
        ]);
        assert_eq!(catalog.load(DorkCategory::Reputation).unwrap()[0].label, "Who called");
        assert_eq!(catalog.load(DorkCategory::SocialMedias).unwrap()[0].label, "vk.com");
    }

    #[test]
    fn missing_category_is_unavailable() {
        let catalog = DorkCatalog::inline([]);
        assert!(matches!(
            catalog.load(DorkCategory::Individuals),
            Err(CatalogError::Unavailable { category: DorkCategory::Individuals, .. })
        ));

        let catalog = DorkCatalog::from_directory("/nonexistent/phonerecce/dorks");
        assert!(matches!(
            catalog.load(DorkCategory::Reputation),
            Err(CatalogError::Unavailable { .. })
        ));
    }

    #[test]
    fn malformed_or_zero_stop_is_rejected() {
        let catalog = DorkCatalog::inline([
            (DorkCategory::Reputation, "{not json".to_string()),
            (
                DorkCategory::SocialMedias,
                r#"[{"site": "a", "request": "$n", "stop": 1}, {"site": "b", "request": "$n", "stop": 0}]"#
                    .to_string(),
            ),
        ]);
        assert!(matches!(
            catalog.load(DorkCategory::Reputation),
            Err(CatalogError::Unavailable { .. })
        ));
        assert!(matches!(
            catalog.load(DorkCategory::SocialMedias),
            Err(CatalogError::InvalidTemplate { index: 1, .. })
        ));
    }

    #[test]
    fn directory_catalog_reads_category_files() {
        let catalog = DorkCatalog::from_directory(concat!(env!("CARGO_MANIFEST_DIR"), "/dorks"));
        let templates = catalog.load(DorkCategory::Individuals).unwrap();
        assert_eq!(templates[0].label, "numinfo.net");
    }

    #[test]
    fn dial_code_filtering() {
        let profile = french();
        let mut dork = template("$l");
        assert!(DorkCatalog::applies(&dork, &profile));

        dork.dial_code = Some("+33".to_string());
        assert!(DorkCatalog::applies(&dork, &profile));

        dork.dial_code = Some("+49".to_string());
        assert!(!DorkCatalog::applies(&dork, &profile));
    }

    #[test]
    fn category_file_names() {
        assert_eq!(DorkCategory::SocialMedias.file_name(), "social_medias.json");
        assert_eq!(
            DorkCategory::DisposableNumProviders.file_name(),
            "disposable_num_providers.json"
        );
    }
}
