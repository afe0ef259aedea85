use std::fmt;

/// The tokens passed to the build tool after its program name.
///
/// Only constructed through [`CommandLine::finish`]; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentVector(Vec<String>);

impl ArgumentVector {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Render the full invocation for display, e.g. `cargo build --release`.
    pub fn display_with(&self, program: &str) -> String {
        let mut parts = Vec::with_capacity(self.0.len() + 1);
        parts.push(program);
        parts.extend(self.0.iter().map(String::as_str));
        parts.join(" ")
    }

    #[cfg(test)]
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tokens.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for ArgumentVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

/// Builder applying the mapping rules shared by every operation.
///
/// Empty strings and empty lists count as absent.
#[derive(Debug)]
pub struct CommandLine {
    tokens: Vec<String>,
    passthrough: Vec<String>,
}

impl CommandLine {
    pub fn new(subcommand: &str) -> Self {
        Self {
            tokens: vec![subcommand.to_string()],
            passthrough: Vec::new(),
        }
    }

    /// `--flag` once when enabled; never `--flag false`.
    pub fn flag(mut self, name: &str, enabled: Option<bool>) -> Self {
        if enabled.unwrap_or(false) {
            self.tokens.push(name.to_string());
        }
        self
    }

    /// `--name value` when a value is present.
    pub fn option(mut self, name: &str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.tokens.push(name.to_string());
            self.tokens.push(value.to_string());
        }
        self
    }

    /// `--name a,b,c` as a single flag, preserving input order.
    pub fn list(mut self, name: &str, values: Option<&[String]>) -> Self {
        if let Some(values) = values.filter(|v| !v.is_empty()) {
            self.tokens.push(name.to_string());
            self.tokens.push(values.join(","));
        }
        self
    }

    /// Bare token, always placed before any `--` separator.
    pub fn positional(mut self, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.tokens.push(value.to_string());
        }
        self
    }

    /// Arguments for the built binary, emitted after `--`.
    pub fn passthrough(mut self, args: Option<&[String]>) -> Self {
        if let Some(args) = args {
            self.passthrough.extend(args.iter().cloned());
        }
        self
    }

    pub fn finish(self) -> ArgumentVector {
        let mut tokens = self.tokens;
        if !self.passthrough.is_empty() {
            tokens.push("--".to_string());
            tokens.extend(self.passthrough);
        }
        ArgumentVector(tokens)
    }
}
