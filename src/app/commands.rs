use crate::config::{CliConfig, Command, ProjectConfig};
use crate::core::cff_file::CffFile;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Runs one CLI command and returns what should be printed to stdout.
pub fn run(config: &CliConfig) -> Result<String> {
    match &config.command {
        Command::Init {
            title,
            config: project,
            output,
        } => {
            let file = match project {
                Some(path) => {
                    let project = ProjectConfig::from_file(path)?;
                    project.validate()?;
                    CffFile::from_model(project.to_model()?)
                }
                None => CffFile::new(title.clone().unwrap_or_default()),
            };
            file.write(output)?;
            Ok(format!("Created {}", output))
        }
        Command::Show { path, json } => {
            let file = CffFile::read(path)?;
            if *json {
                let value = serde_json::to_value(file.model().to_output_mapping())?;
                Ok(serde_json::to_string_pretty(&value)?)
            } else {
                file.to_yaml_string()
            }
        }
        Command::Set { field, value, path } => {
            let mut file = CffFile::read(path)?;
            set_field(&mut file, field, value)?;
            file.write(path)?;
            Ok(format!("Updated {} in {}", field, path))
        }
        Command::AddKeyword { keywords, path } => {
            let mut file = CffFile::read(path)?;
            file.model_mut().keywords_mut().extend(keywords.iter().cloned());
            file.write(path)?;
            Ok(format!("Added {} keyword(s) to {}", keywords.len(), path))
        }
    }
}

/// `date-released` and `version` go through their typed setters, anything
/// else through the allow-listed generic path.
fn set_field(file: &mut CffFile, field: &str, value: &str) -> Result<()> {
    let model = file.model_mut();
    match crate::domain::fields::normalize_field_name(field).as_str() {
        "date-released" => model.set_date_released(value),
        "version" => {
            model.set_version(value);
            Ok(())
        }
        _ => model.set(field, Some(value.into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(std::iter::once("cff").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_init_then_set_then_show() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("CITATION.cff");
        let path = path.to_str().unwrap();

        run(&cli(&["init", "--title", "Tool", "--output", path])).unwrap();
        run(&cli(&["set", "date_released", "2022-12-24", "--path", path])).unwrap();
        run(&cli(&["set", "version", "0.9", "--path", path])).unwrap();
        run(&cli(&["add-keyword", "rust", "--path", path])).unwrap();

        let shown = run(&cli(&["show", path])).unwrap();
        assert!(shown.contains("title: Tool"));
        assert!(shown.contains("2022-12-24"));
        assert!(shown.contains("- rust"));
    }

    #[test]
    fn test_set_unknown_field_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("CITATION.cff");
        let path = path.to_str().unwrap();

        run(&cli(&["init", "--title", "Tool", "--output", path])).unwrap();
        let err = run(&cli(&["set", "license", "MIT", "--path", path])).unwrap_err();
        assert!(matches!(err, crate::CffError::UnsupportedField { .. }));
    }

    #[test]
    fn test_show_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("CITATION.cff");
        let path = path.to_str().unwrap();

        run(&cli(&["init", "--title", "Tool", "--output", path])).unwrap();
        let shown = run(&cli(&["show", path, "--json"])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&shown).unwrap();
        assert_eq!(value["title"], "Tool");
    }
}
