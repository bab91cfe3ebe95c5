use crate::domain::fields::parse_date;
use crate::domain::{Citant, Entity, Model, Person};
use crate::utils::error::{CffError, Result};
use crate::utils::validation::{
    validate_doi, validate_non_empty_string, validate_orcid, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Project description used to seed a new citation file, e.g.
///
/// ```toml
/// [citation]
/// title = "My Research Tool"
/// version = "1.2.0"
///
/// [[authors]]
/// given_names = "Ada"
/// family_names = "Lovelace"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub citation: CitationConfig,
    #[serde(default)]
    pub authors: Vec<CitantConfig>,
    #[serde(default)]
    pub contact: Vec<CitantConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitationConfig {
    pub title: String,
    pub version: Option<String>,
    pub doi: Option<String>,
    pub commit: Option<String>,
    pub date_released: Option<String>,
    pub r#abstract: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// An author or contact. `given_names` makes it a person, otherwise `name`
/// is required and it becomes an entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitantConfig {
    pub given_names: Option<String>,
    pub family_names: Option<String>,
    pub name: Option<String>,
    pub affiliation: Option<String>,
    pub email: Option<String>,
    pub orcid: Option<String>,
    pub website: Option<String>,
}

impl ProjectConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${CFF_VERSION})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CffError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("citation.title", &self.citation.title)?;

        if let Some(doi) = &self.citation.doi {
            validate_doi("citation.doi", doi)?;
        }

        if let Some(date) = &self.citation.date_released {
            parse_date(date).map_err(|_| CffError::InvalidConfigValueError {
                field: "citation.date_released".to_string(),
                value: date.clone(),
                reason: "Not a recognizable date".to_string(),
            })?;
        }

        for (section, citants) in [("authors", &self.authors), ("contact", &self.contact)] {
            for (index, citant) in citants.iter().enumerate() {
                citant.validate_as(&format!("{}[{}]", section, index))?;
            }
        }

        Ok(())
    }

    /// Builds a fresh model from the project description.
    pub fn to_model(&self) -> Result<Model> {
        let citation = &self.citation;
        let mut model = Model::new(citation.title.clone());

        if let Some(message) = &citation.message {
            model.set("message", Some(message.as_str().into()))?;
        }
        if let Some(version) = &citation.version {
            model.set_version(version);
        }
        if let Some(doi) = &citation.doi {
            model.set("doi", Some(doi.as_str().into()))?;
        }
        if let Some(commit) = &citation.commit {
            model.set("commit", Some(commit.as_str().into()))?;
        }
        if let Some(summary) = &citation.r#abstract {
            model.set("abstract", Some(summary.as_str().into()))?;
        }
        if let Some(date) = &citation.date_released {
            model.set_date_released(date.as_str())?;
        }

        for author in &self.authors {
            model.authors_mut().push(author.to_citant()?);
        }
        for contact in &self.contact {
            model.contact_mut().push(contact.to_citant()?);
        }
        model.keywords_mut().extend(citation.keywords.iter().cloned());

        tracing::debug!(
            "Built model '{}' from project config ({} authors)",
            model.title(),
            model.authors().len()
        );
        Ok(model)
    }
}

impl CitantConfig {
    fn validate_as(&self, field: &str) -> Result<()> {
        match (&self.given_names, &self.name) {
            (Some(given), _) => validate_non_empty_string(&format!("{}.given_names", field), given)?,
            (None, Some(name)) => validate_non_empty_string(&format!("{}.name", field), name)?,
            (None, None) => {
                return Err(CffError::ValidationError {
                    message: format!("{} needs either given_names or name", field),
                })
            }
        }

        if let Some(orcid) = &self.orcid {
            validate_orcid(&format!("{}.orcid", field), orcid)?;
        }
        Ok(())
    }

    pub fn to_citant(&self) -> Result<Citant> {
        let optional = [
            ("affiliation", &self.affiliation),
            ("email", &self.email),
            ("orcid", &self.orcid),
            ("website", &self.website),
        ];

        if let Some(given) = &self.given_names {
            let family = self.family_names.clone().unwrap_or_default();
            let mut person = Person::new(given.clone(), family);
            for (key, value) in optional {
                if let Some(value) = value {
                    person.set(key, Some(value.as_str().into()))?;
                }
            }
            return Ok(Citant::Person(person));
        }

        let mut entity = Entity::new(self.name.clone().unwrap_or_default());
        for (key, value) in optional {
            // entities have no affiliation
            if key == "affiliation" {
                continue;
            }
            if let Some(value) = value {
                entity.set(key, Some(value.as_str().into()))?;
            }
        }
        Ok(Citant::Entity(entity))
    }
}

impl Validate for ProjectConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldValue;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[citation]
title = "My Research Tool"
version = "1.2.0"
doi = "10.5281/zenodo.1184077"
date_released = "2018-01-16"
keywords = ["citation", "metadata"]

[[authors]]
given_names = "Ada"
family_names = "Lovelace"
orcid = "https://orcid.org/0000-0002-1825-0097"

[[authors]]
name = "Analytical Engines Ltd"
website = "https://example.org"

[[contact]]
name = "Support Desk"
email = "support@example.org"
"#;

    #[test]
    fn test_parse_basic_project_config() {
        let config = ProjectConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.citation.title, "My Research Tool");
        assert_eq!(config.authors.len(), 2);
        assert_eq!(config.contact.len(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_to_model() {
        let model = ProjectConfig::from_toml_str(BASIC).unwrap().to_model().unwrap();

        assert_eq!(model.title(), "My Research Tool");
        assert_eq!(model.version(), "1.2.0");
        assert_eq!(model.date_released(), NaiveDate::from_ymd_opt(2018, 1, 16));
        assert_eq!(
            model.get("doi").unwrap(),
            FieldValue::from("10.5281/zenodo.1184077")
        );
        assert!(model.authors()[0].is_person());
        assert!(model.authors()[1].is_entity());
        assert!(model.contact()[0].is_entity());
        assert_eq!(model.keywords(), &vec!["citation".to_string(), "metadata".to_string()]);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CFF_TEST_PROJECT_VERSION", "3.1.4");

        let content = r#"
[citation]
title = "Env Tool"
version = "${CFF_TEST_PROJECT_VERSION}"
"#;
        let config = ProjectConfig::from_toml_str(content).unwrap();
        assert_eq!(config.citation.version.as_deref(), Some("3.1.4"));

        std::env::remove_var("CFF_TEST_PROJECT_VERSION");
    }

    #[test]
    fn test_config_validation() {
        let bad_doi = r#"
[citation]
title = "Tool"
doi = "zenodo-1184077"
"#;
        assert!(ProjectConfig::from_toml_str(bad_doi).unwrap().validate().is_err());

        let nameless = r#"
[citation]
title = "Tool"

[[authors]]
email = "someone@example.org"
"#;
        assert!(ProjectConfig::from_toml_str(nameless).unwrap().validate().is_err());

        let bad_date = r#"
[citation]
title = "Tool"
date_released = "the other day"
"#;
        assert!(ProjectConfig::from_toml_str(bad_date).unwrap().validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = ProjectConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.citation.title, "My Research Tool");
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            ProjectConfig::from_toml_str("[citation\ntitle = 1"),
            Err(CffError::TomlError(_))
        ));
    }
}
