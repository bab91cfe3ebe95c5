use crate::utils::error::{CffError, Result};
use regex::Regex;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> CffError {
    CffError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn matches_pattern(pattern: &str, value: &str) -> Result<bool> {
    let re = Regex::new(pattern).map_err(|e| CffError::ConfigError {
        message: format!("invalid validation pattern: {}", e),
    })?;
    Ok(re.is_match(value))
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

/// DOIs look like `10.<registrant>/<suffix>`.
pub fn validate_doi(field_name: &str, doi: &str) -> Result<()> {
    if matches_pattern(r"^10\.\d{4,9}/\S+$", doi)? {
        Ok(())
    } else {
        Err(invalid(field_name, doi, "Expected a DOI such as 10.5281/zenodo.1184077"))
    }
}

pub fn validate_orcid(field_name: &str, orcid: &str) -> Result<()> {
    if matches_pattern(r"^https://orcid\.org/\d{4}-\d{4}-\d{4}-\d{3}[\dX]$", orcid)? {
        Ok(())
    } else {
        Err(invalid(
            field_name,
            orcid,
            "Expected an ORCID URL such as https://orcid.org/0000-0002-1825-0097",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output", "CITATION.cff").is_ok());
        assert!(validate_path("output", "").is_err());
        assert!(validate_path("output", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("title", "Tool").is_ok());
        assert!(validate_non_empty_string("title", " \t").is_err());
    }

    #[test]
    fn test_validate_doi() {
        assert!(validate_doi("doi", "10.5281/zenodo.1184077").is_ok());
        assert!(validate_doi("doi", "doi:10.5281/zenodo.1184077").is_err());
        assert!(validate_doi("doi", "10.12/short-registrant").is_err());
    }

    #[test]
    fn test_validate_orcid() {
        assert!(validate_orcid("orcid", "https://orcid.org/0000-0002-1825-0097").is_ok());
        assert!(validate_orcid("orcid", "https://orcid.org/0000-0002-1694-233X").is_ok());
        assert!(validate_orcid("orcid", "0000-0002-1825-0097").is_err());
    }
}
