use std::ffi::OsString;

/// Default build tool invoked for every operation.
pub const DEFAULT_PROGRAM: &str = "cargo";

/// File whose presence marks a directory as a project root.
pub const DEFAULT_MARKER_FILE: &str = "Cargo.toml";

/// Overrides the program name (e.g. a cargo wrapper).
const PROGRAM_ENV: &str = "CARGO_MCP_PROGRAM";

/// PATH-style list of directories searched instead of `PATH`.
const SEARCH_PATH_ENV: &str = "CARGO_MCP_SEARCH_PATH";

/// How the external build tool is located and where projects are rooted.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    pub program: String,
    pub marker_file: String,
    /// `None` means read `PATH` at lookup time.
    pub search_path: Option<OsString>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            marker_file: DEFAULT_MARKER_FILE.to_string(),
            search_path: None,
        }
    }
}

impl ToolConfig {
    /// Build a config from defaults, applying any non-blank environment overrides.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let mut config = Self::default();
        if let Some(program) = lookup(PROGRAM_ENV)
            .and_then(|v| v.into_string().ok())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
        {
            config.program = program;
        }
        if let Some(search_path) = lookup(SEARCH_PATH_ENV).filter(|v| !v.is_empty()) {
            config.search_path = Some(search_path);
        }
        config
    }

    /// Config for a specific program, keeping the default marker and search path.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }
}
