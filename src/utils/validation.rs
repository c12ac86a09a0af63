use crate::utils::error::{EtlError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 類別與關鍵字可以只用其中一種，但不能兩者皆空
pub fn validate_search_terms(categories: &[String], keywords: &[String]) -> Result<()> {
    for category in categories {
        validate_non_empty_string("search.categories", category)?;
    }
    for keyword in keywords {
        validate_non_empty_string("search.keywords", keyword)?;
    }
    validate_positive_number("search", categories.len() + keywords.len(), 1)
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("endpoints.search", "https://maps.googleapis.com").is_ok());
        assert!(validate_url("endpoints.search", "http://127.0.0.1:8080/nearby").is_ok());
        assert!(validate_url("endpoints.search", "").is_err());
        assert!(validate_url("endpoints.search", "invalid-url").is_err());
        assert!(validate_url("endpoints.search", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("search.radius", 50_000u32, 1, 50_000).is_ok());
        assert!(validate_range("search.radius", 0u32, 1, 50_000).is_err());
        assert!(validate_range("search.radius", 50_001u32, 1, 50_000).is_err());
        assert!(validate_range("filter.max_rating", 4.0f64, 0.0, 5.0).is_ok());
    }

    #[test]
    fn test_validate_search_terms() {
        let keywords = vec!["repair".to_string()];
        assert!(validate_search_terms(&[], &keywords).is_ok());
        assert!(validate_search_terms(&keywords, &[]).is_ok());
        assert!(validate_search_terms(&[], &[]).is_err());

        let blank = vec![" ".to_string()];
        assert!(validate_search_terms(&keywords, &blank).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("load.output_path", "./output").is_ok());
        assert!(validate_path("load.output_path", "").is_err());
        assert!(validate_path("load.output_path", "bad\0path").is_err());
    }
}
