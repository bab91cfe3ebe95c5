use crate::core::cff_file::CFF_FILENAME;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "cff")]
#[command(about = "Create, inspect and edit CITATION.cff files")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write a new citation file
    Init {
        #[arg(long, help = "Title of the software")]
        title: Option<String>,

        #[arg(long, help = "TOML project file to seed the citation from")]
        config: Option<String>,

        #[arg(long, default_value = CFF_FILENAME)]
        output: String,
    },

    /// Print a citation file
    Show {
        #[arg(default_value = CFF_FILENAME)]
        path: String,

        #[arg(long, help = "Print as JSON instead of YAML")]
        json: bool,
    },

    /// Set a scalar field in a citation file
    Set {
        field: String,

        value: String,

        #[arg(long, default_value = CFF_FILENAME)]
        path: String,
    },

    /// Append keywords to a citation file
    AddKeyword {
        #[arg(required = true)]
        keywords: Vec<String>,

        #[arg(long, default_value = CFF_FILENAME)]
        path: String,
    },
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Init {
                title,
                config,
                output,
            } => {
                validate_path("output", output)?;
                match (title, config) {
                    (_, Some(config)) => validate_path("config", config),
                    (Some(title), None) => validate_non_empty_string("title", title),
                    (None, None) => Err(crate::utils::error::CffError::ConfigError {
                        message: "either --title or --config is required".to_string(),
                    }),
                }
            }
            Command::Show { path, .. } => validate_path("path", path),
            Command::Set { field, path, .. } => {
                validate_non_empty_string("field", field)?;
                validate_path("path", path)
            }
            Command::AddKeyword { keywords, path } => {
                for keyword in keywords {
                    validate_non_empty_string("keywords", keyword)?;
                }
                validate_path("path", path)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_command() {
        let config =
            CliConfig::try_parse_from(["cff", "set", "date_released", "2024-02-29", "--verbose"])
                .unwrap();

        assert!(config.verbose);
        match config.command {
            Command::Set { field, value, path } => {
                assert_eq!(field, "date_released");
                assert_eq!(value, "2024-02-29");
                assert_eq!(path, CFF_FILENAME);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_init_requires_title_or_config() {
        let config = CliConfig::try_parse_from(["cff", "init"]).unwrap();
        assert!(config.validate().is_err());

        let config = CliConfig::try_parse_from(["cff", "init", "--title", "Tool"]).unwrap();
        assert!(config.validate().is_ok());

        let config = CliConfig::try_parse_from(["cff", "init", "--title", "  "]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_add_keyword_requires_values() {
        assert!(CliConfig::try_parse_from(["cff", "add-keyword"]).is_err());
        let config = CliConfig::try_parse_from(["cff", "add-keyword", "rust", "yaml"]).unwrap();
        assert!(config.validate().is_ok());
    }
}
