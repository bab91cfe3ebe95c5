use anyhow::Result;
use cff_model::{CffFile, Entity, FieldValue, Person, ProjectConfig, DEFAULT_MESSAGE};
use tempfile::TempDir;

#[test]
fn test_write_and_read_back() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("nested").join("CITATION.cff");

    let mut file = CffFile::new("Citation Tool");
    {
        let model = file.model_mut();
        model.set_version("1.0.0");
        model.set_date_released("2021-07-12")?;
        model.set("abstract", Some("A tool that does citations.".into()))?;
        model.authors_mut().push(Person::new("Grace", "Hopper").into());
        model.contact_mut().push(Entity::new("Navy Research Lab").into());
        model.keywords_mut().push("compilers".to_string());
    }
    file.write(&path)?;

    let read_back = CffFile::read(&path)?;
    let model = read_back.model();
    assert_eq!(model.title(), "Citation Tool");
    assert_eq!(model.get("message")?, FieldValue::from(DEFAULT_MESSAGE));
    assert_eq!(model.version(), "1.0.0");
    assert_eq!(model.date_released().map(|d| d.to_string()), Some("2021-07-12".to_string()));
    assert!(model.authors()[0].is_person());
    assert!(model.contact()[0].is_entity());
    assert_eq!(model.keywords(), &vec!["compilers".to_string()]);

    // a second write is byte-identical
    assert_eq!(read_back.to_yaml_string()?, std::fs::read_to_string(&path)?);
    Ok(())
}

#[test]
fn test_read_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = CffFile::read(temp_dir.path().join("absent.cff"));
    assert!(matches!(result, Err(cff_model::CffError::IoError(_))));
}

#[test]
fn test_project_config_to_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = ProjectConfig::from_toml_str(
        r#"
[citation]
title = "Seeded Tool"
version = "2.0.0"
keywords = ["seed"]

[[authors]]
given_names = "Alan"
family_names = "Turing"
"#,
    )?;

    let path = temp_dir.path().join("CITATION.cff");
    CffFile::from_model(config.to_model()?).write(&path)?;

    let yaml = std::fs::read_to_string(&path)?;
    assert!(yaml.starts_with("---\n"));
    assert!(yaml.contains("given-names: Alan"));
    assert!(yaml.contains("- seed"));
    Ok(())
}
