use regex::Regex;
use std::sync::LazyLock;

/// Feature names, including `dep:name` and `crate/feature` forms.
static FEATURE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_+\-./:]*$").expect("feature pattern is valid")
});

/// Package ID specs: `name`, `name@1.2.3`, `registry-url#name@1.2.3`.
static PACKAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_+\-.:@/#]*$").expect("package pattern is valid")
});

/// Target triples or a path to a custom target spec file.
static TARGET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.][A-Za-z0-9_\-./]*$").expect("target pattern is valid")
});

static BIN_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_\-]*$").expect("bin name pattern is valid")
});

/// Validation error types
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} value '{value}' starts with '-' and would be read as a cargo flag")]
    FlagInjection { field: &'static str, value: String },
    #[error("{field} value '{value}' is not a valid {kind}")]
    InvalidName {
        field: &'static str,
        kind: &'static str,
        value: String,
    },
}

/// Trait for request types that need validation before an argument vector is built
pub trait Validatable {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Reject values cargo would parse as an option rather than a value.
pub fn validate_not_flag(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.starts_with('-') {
        return Err(ValidationError::FlagInjection {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn validate_pattern(
    field: &'static str,
    kind: &'static str,
    pattern: &Regex,
    value: &str,
) -> Result<(), ValidationError> {
    validate_not_flag(field, value)?;
    if !pattern.is_match(value) {
        return Err(ValidationError::InvalidName {
            field,
            kind,
            value: value.to_string(),
        });
    }
    Ok(())
}

pub fn validate_features(features: Option<&[String]>) -> Result<(), ValidationError> {
    for feature in features.unwrap_or_default() {
        validate_pattern("features", "feature name", &FEATURE_PATTERN, feature)?;
    }
    Ok(())
}

pub fn validate_package(package: Option<&str>) -> Result<(), ValidationError> {
    match package.filter(|p| !p.is_empty()) {
        Some(p) => validate_pattern("package", "package spec", &PACKAGE_PATTERN, p),
        None => Ok(()),
    }
}

pub fn validate_target(target: Option<&str>) -> Result<(), ValidationError> {
    match target.filter(|t| !t.is_empty()) {
        Some(t) => validate_pattern("target", "target triple", &TARGET_PATTERN, t),
        None => Ok(()),
    }
}

pub fn validate_bin_name(bin_name: Option<&str>) -> Result<(), ValidationError> {
    match bin_name.filter(|b| !b.is_empty()) {
        Some(b) => validate_pattern("bin_name", "binary name", &BIN_NAME_PATTERN, b),
        None => Ok(()),
    }
}

/// Positional filters (test or bench names) are free-form but must not look like flags.
pub fn validate_filter(field: &'static str, filter: Option<&str>) -> Result<(), ValidationError> {
    match filter {
        Some(f) => validate_not_flag(field, f),
        None => Ok(()),
    }
}
