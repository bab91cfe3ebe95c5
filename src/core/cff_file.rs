use crate::domain::Model;
use crate::utils::error::{CffError, Result};
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Conventional name of a citation file at the root of a repository.
pub const CFF_FILENAME: &str = "CITATION.cff";

const YAML_HEADER: &str = "---\n";

/// A `CITATION.cff` document: the [`Model`] plus its YAML encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct CffFile {
    model: Model,
}

impl CffFile {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            model: Model::new(title),
        }
    }

    pub fn from_model(model: Model) -> Self {
        Self { model }
    }

    /// 從 YAML 字串解析 CFF 文件
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let document: Value = serde_yaml::from_str(content)?;

        match document {
            Value::Mapping(mapping) => Ok(Self {
                model: Model::from_mapping(mapping),
            }),
            Value::Null => Err(CffError::InvalidDocument {
                message: "document is empty".to_string(),
            }),
            _ => Err(CffError::InvalidDocument {
                message: "top level of a CFF document must be a mapping".to_string(),
            }),
        }
    }

    /// 從檔案載入 CFF 文件
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Reading citation file: {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// serde_yaml always indents by two spaces and never folds long
    /// scalars, which is the layout CFF files are written in.
    pub fn to_yaml_string(&self) -> Result<String> {
        let body = serde_yaml::to_string(&self.model.to_output_mapping())?;
        Ok(format!("{}{}", YAML_HEADER, body))
    }

    /// 寫入 CFF 文件，必要時建立上層目錄
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let yaml = self.to_yaml_string()?;
        fs::write(path, yaml)?;
        tracing::info!("Wrote citation file: {}", path.display());
        Ok(())
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    pub fn into_model(self) -> Model {
        self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldValue;

    #[test]
    fn test_new_file_yaml() {
        let file = CffFile::new("Tool");
        let yaml = file.to_yaml_string().unwrap();

        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("cff-version: 1.0.3\n"));
        assert!(yaml.contains("title: Tool\n"));
        assert!(!yaml.contains("authors"));
    }

    #[test]
    fn test_long_message_not_wrapped() {
        let yaml = CffFile::new("Tool").to_yaml_string().unwrap();
        let message_line = yaml
            .lines()
            .find(|l| l.starts_with("message:"))
            .unwrap();
        assert!(message_line.ends_with("following metadata"));
    }

    #[test]
    fn test_parse_rejects_non_mapping() {
        assert!(matches!(
            CffFile::from_yaml_str("- a\n- b\n"),
            Err(CffError::InvalidDocument { .. })
        ));
        assert!(matches!(
            CffFile::from_yaml_str(""),
            Err(CffError::InvalidDocument { .. })
        ));
        assert!(matches!(
            CffFile::from_yaml_str("title: [unclosed"),
            Err(CffError::YamlError(_))
        ));
    }

    #[test]
    fn test_parse_document() {
        let file = CffFile::from_yaml_str("---\ntitle: Tool\nversion: 0.4.1\n").unwrap();
        assert_eq!(file.model().title(), "Tool");
        assert_eq!(file.model().get("version").unwrap(), FieldValue::from("0.4.1"));
    }
}
