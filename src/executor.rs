use std::ffi::OsStr;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::command::ArgumentVector;
use crate::config::ToolConfig;
use crate::error::CargoError;
use crate::workspace;

/// Whether the child's output streams are captured into the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Capture,
    /// stdout is discarded (it carries the protocol), stderr goes to our stderr.
    Discard,
}

/// Where the working directory of an execution came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceSource {
    Explicit,
    Located,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDirectory {
    pub path: PathBuf,
    pub source: WorkspaceSource,
}

/// Outcome of one completed invocation. Built once, then only read or formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    command: String,
    exit_code: Option<i32>,
    stdout: Option<String>,
    stderr: Option<String>,
    success: bool,
    working_directory: WorkingDirectory,
}

impl ExecutionResult {
    fn new(
        command: String,
        exit_code: Option<i32>,
        output: Option<(String, String)>,
        working_directory: WorkingDirectory,
    ) -> Self {
        let (stdout, stderr) = match output {
            Some((out, err)) => (Some(out), Some(err)),
            None => (None, None),
        };
        Self {
            command,
            exit_code,
            stdout,
            stderr,
            success: exit_code == Some(0),
            working_directory,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// `None` when the process was terminated by a signal.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    pub fn stdout(&self) -> Option<&str> {
        self.stdout.as_deref()
    }

    pub fn stderr(&self) -> Option<&str> {
        self.stderr.as_deref()
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory.path
    }

    pub fn workspace_source(&self) -> WorkspaceSource {
        self.working_directory.source
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Command: {}", self.command())?;
        let cwd = self.working_directory().display();
        write!(f, "Working Directory: {}", cwd)?;
        if self.workspace_source() == WorkspaceSource::Fallback {
            write!(f, " (fallback: current directory)")?;
        }
        writeln!(f)?;
        match self.exit_code {
            Some(code) => writeln!(f, "Exit Code: {}", code)?,
            None => writeln!(f, "Exit Code: none")?,
        }
        write!(f, "Success: {}", self.success)?;
        if let Some(out) = self.stdout().filter(|s| !s.is_empty()) {
            write!(f, "\n\n--- STDOUT ---\n{}", out)?;
        }
        if let Some(err) = self.stderr().filter(|s| !s.is_empty()) {
            write!(f, "\n\n--- STDERR ---\n{}", err)?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && (m.permissions().mode() & 0o111 != 0))
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_file())
        .unwrap_or(false)
}

/// Find `program` in a PATH-style directory list, or check it directly if it is a path.
pub fn find_executable(program: &str, search_path: &OsStr) -> Option<PathBuf> {
    let program = program.trim();
    if program.is_empty() {
        return None;
    }
    if program.contains(std::path::MAIN_SEPARATOR) || program.contains('/') {
        let path = PathBuf::from(program);
        return is_executable(&path).then_some(path);
    }
    for dir in std::env::split_paths(search_path) {
        if dir.as_os_str().is_empty() {
            continue;
        }
        let candidate = dir.join(program);
        if is_executable(&candidate) {
            return Some(candidate);
        }
        if cfg!(windows) {
            let candidate = dir.join(format!("{}.exe", program));
            if is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

async fn drain<R: AsyncRead + Unpin>(stream: Option<R>) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut stream) = stream {
        stream.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_string()
}

/// Runs the configured build tool as a subprocess.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor {
    config: ToolConfig,
}

impl ProcessExecutor {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    /// Locate the tool binary on the search path without spawning anything.
    pub fn locate_tool(&self) -> Result<PathBuf, CargoError> {
        let search_path = self
            .config
            .search_path
            .clone()
            .or_else(|| std::env::var_os("PATH"));
        search_path
            .and_then(|path| find_executable(&self.config.program, &path))
            .ok_or_else(|| CargoError::ToolUnavailable {
                program: self.config.program.clone(),
            })
    }

    /// Explicit path, else the nearest project root above the current
    /// directory, else the current directory itself.
    pub fn resolve_working_directory(&self, explicit: Option<&Path>) -> WorkingDirectory {
        if let Some(path) = explicit {
            return WorkingDirectory {
                path: path.to_path_buf(),
                source: WorkspaceSource::Explicit,
            };
        }
        if let Some(root) = workspace::resolve_from_current_dir(&self.config.marker_file) {
            return WorkingDirectory {
                path: root,
                source: WorkspaceSource::Located,
            };
        }
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        warn!(
            cwd = %cwd.display(),
            marker = %self.config.marker_file,
            "no project root found, falling back to current directory"
        );
        WorkingDirectory {
            path: cwd,
            source: WorkspaceSource::Fallback,
        }
    }

    /// Run the tool with `args` and collect its exit status (and output, when captured).
    ///
    /// A nonzero exit is returned as a normal result. The child is killed if
    /// this future is dropped before it completes.
    pub async fn execute(
        &self,
        args: &ArgumentVector,
        workspace_path: Option<&Path>,
        mode: OutputMode,
    ) -> Result<ExecutionResult, CargoError> {
        let program = self.locate_tool()?;
        let cwd = self.resolve_working_directory(workspace_path);
        let command = args.display_with(&self.config.program);

        info!(command = %command, cwd = %cwd.path.display(), "running cargo command");
        debug!(program = %program.display(), ?mode, "resolved tool binary");

        let mut cmd = Command::new(&program);
        cmd.args(args.as_slice())
            .current_dir(&cwd.path)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let failed = |source: io::Error| CargoError::ExecutionFailed {
            command: command.clone(),
            source,
        };

        let (status, output) = match mode {
            OutputMode::Capture => {
                cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
                let mut child = cmd.spawn().map_err(failed)?;
                let stdout = child.stdout.take();
                let stderr = child.stderr.take();
                let (status, out, err) =
                    tokio::try_join!(child.wait(), drain(stdout), drain(stderr)).map_err(failed)?;
                (status, Some((decode(&out), decode(&err))))
            }
            OutputMode::Discard => {
                cmd.stdout(Stdio::null()).stderr(Stdio::inherit());
                let mut child = cmd.spawn().map_err(failed)?;
                let status = child.wait().await.map_err(failed)?;
                (status, None)
            }
        };

        let result = ExecutionResult::new(command, status.code(), output, cwd);
        info!(
            exit_code = ?result.exit_code(),
            success = result.success(),
            workspace = ?result.workspace_source(),
            "cargo command finished"
        );
        Ok(result)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use tempfile::TempDir;

    fn shell() -> ProcessExecutor {
        ProcessExecutor::new(ToolConfig::with_program("sh"))
    }

    fn script(body: &str) -> ArgumentVector {
        ArgumentVector::from_tokens(["-c", body])
    }

    #[test]
    fn test_find_executable_on_path() {
        let path = std::env::var_os("PATH").unwrap();
        let found = find_executable("sh", &path).unwrap();
        assert!(found.ends_with("sh"));
    }

    #[test]
    fn test_find_executable_missing() {
        let empty = TempDir::new().unwrap();
        assert!(find_executable("sh", empty.path().as_os_str()).is_none());
        assert!(find_executable("", OsStr::new("/bin:/usr/bin")).is_none());
    }

    #[test]
    fn test_find_executable_skips_non_executable_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("cargo"), "not a program").unwrap();
        assert!(find_executable("cargo", dir.path().as_os_str()).is_none());
    }

    #[tokio::test]
    async fn test_tool_unavailable_before_spawn() {
        let empty = TempDir::new().unwrap();
        let executor = ProcessExecutor::new(ToolConfig {
            search_path: Some(OsString::from(empty.path())),
            ..ToolConfig::default()
        });
        // Spawning in a missing directory would fail with ExecutionFailed;
        // ToolUnavailable proves the lookup short-circuits first.
        let missing = empty.path().join("missing");
        let err = executor
            .execute(&script("exit 0"), Some(&missing), OutputMode::Capture)
            .await
            .unwrap_err();
        assert!(matches!(err, CargoError::ToolUnavailable { ref program } if program == "cargo"));
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_a_result() {
        let dir = TempDir::new().unwrap();
        let result = shell()
            .execute(
                &script(
                    "echo '   Compiling fixture' >&2; \
                     echo 'error[E0308]: mismatched types' >&2; exit 101",
                ),
                Some(dir.path()),
                OutputMode::Capture,
            )
            .await
            .unwrap();
        assert!(!result.success());
        assert_eq!(result.exit_code(), Some(101));
        assert_eq!(
            result.stderr(),
            Some("Compiling fixture\nerror[E0308]: mismatched types")
        );
        assert_eq!(result.stdout(), Some(""));
    }

    #[tokio::test]
    async fn test_success_trims_output() {
        let dir = TempDir::new().unwrap();
        let result = shell()
            .execute(
                &script("printf '\\n  Finished  \\n\\n'"),
                Some(dir.path()),
                OutputMode::Capture,
            )
            .await
            .unwrap();
        assert!(result.success());
        assert_eq!(result.exit_code(), Some(0));
        assert_eq!(result.stdout(), Some("Finished"));
        assert_eq!(result.command(), "sh -c printf '\\n  Finished  \\n\\n'");
    }

    #[tokio::test]
    async fn test_runs_in_explicit_directory() {
        let dir = TempDir::new().unwrap();
        let result = shell()
            .execute(&script("pwd -P"), Some(dir.path()), OutputMode::Capture)
            .await
            .unwrap();
        assert_eq!(result.working_directory(), dir.path());
        assert_eq!(result.workspace_source(), WorkspaceSource::Explicit);
        assert_eq!(
            PathBuf::from(result.stdout().unwrap()),
            dir.path().canonicalize().unwrap()
        );
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_replaced() {
        let dir = TempDir::new().unwrap();
        let result = shell()
            .execute(
                &script("printf 'ok\\377done'"),
                Some(dir.path()),
                OutputMode::Capture,
            )
            .await
            .unwrap();
        let stdout = result.stdout().unwrap();
        assert!(stdout.starts_with("ok"));
        assert!(stdout.contains('\u{FFFD}'));
        assert!(stdout.ends_with("done"));
    }

    #[tokio::test]
    async fn test_large_output_on_both_streams() {
        let dir = TempDir::new().unwrap();
        let body = "head -c 1000000 /dev/zero | tr '\\000' e >&2; \
                    head -c 1000000 /dev/zero | tr '\\000' o; \
                    head -c 1000000 /dev/zero | tr '\\000' e >&2";
        let result = shell()
            .execute(&script(body), Some(dir.path()), OutputMode::Capture)
            .await
            .unwrap();
        assert!(result.success());
        assert_eq!(result.stdout().unwrap().len(), 1_000_000);
        assert_eq!(result.stderr().unwrap().len(), 2_000_000);
    }

    #[tokio::test]
    async fn test_missing_directory_is_execution_failed() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone");
        let err = shell()
            .execute(&script("exit 0"), Some(&missing), OutputMode::Capture)
            .await
            .unwrap_err();
        match err {
            CargoError::ExecutionFailed { command, .. } => assert_eq!(command, "sh -c exit 0"),
            other => panic!("expected ExecutionFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_signal_has_no_exit_code() {
        let dir = TempDir::new().unwrap();
        let result = shell()
            .execute(
                &script("kill -9 $$"),
                Some(dir.path()),
                OutputMode::Capture,
            )
            .await
            .unwrap();
        assert_eq!(result.exit_code(), None);
        assert!(!result.success());
        assert!(result.to_string().contains("Exit Code: none"));
    }

    #[tokio::test]
    async fn test_discard_mode_keeps_only_status() {
        let dir = TempDir::new().unwrap();
        let result = shell()
            .execute(
                &script("printf 'hid''den'; exit 3"),
                Some(dir.path()),
                OutputMode::Discard,
            )
            .await
            .unwrap();
        assert_eq!(result.exit_code(), Some(3));
        assert_eq!(result.stdout(), None);
        assert_eq!(result.stderr(), None);
        let text = result.to_string();
        assert!(!text.contains("--- STDOUT ---"));
        assert!(!text.contains("hidden"));
    }

    #[test]
    fn test_resolution_locates_project_root() {
        let wd = ProcessExecutor::default().resolve_working_directory(None);
        assert_eq!(wd.source, WorkspaceSource::Located);
        assert!(wd.path.join("Cargo.toml").is_file());
    }

    #[test]
    fn test_resolution_falls_back_to_current_dir() {
        let executor = ProcessExecutor::new(ToolConfig {
            marker_file: "no-such-marker-6f1d.toml".to_string(),
            ..ToolConfig::default()
        });
        let wd = executor.resolve_working_directory(None);
        assert_eq!(wd.source, WorkspaceSource::Fallback);
        assert_eq!(wd.path, std::env::current_dir().unwrap());
    }

    #[test]
    fn test_display_format() {
        let result = ExecutionResult::new(
            "cargo build".to_string(),
            Some(0),
            Some(("Finished".to_string(), String::new())),
            WorkingDirectory {
                path: PathBuf::from("/work"),
                source: WorkspaceSource::Located,
            },
        );
        assert_eq!(
            result.to_string(),
            "Command: cargo build\nWorking Directory: /work\nExit Code: 0\nSuccess: true\n\n--- STDOUT ---\nFinished"
        );
    }

    #[test]
    fn test_display_marks_fallback_and_stderr() {
        let stderr = "error: could not find `Cargo.toml`";
        let result = ExecutionResult::new(
            "cargo check".to_string(),
            Some(101),
            Some((String::new(), stderr.to_string())),
            WorkingDirectory {
                path: PathBuf::from("/tmp"),
                source: WorkspaceSource::Fallback,
            },
        );
        let text = result.to_string();
        assert!(text.contains("Working Directory: /tmp (fallback: current directory)"));
        assert!(text.contains("Success: false"));
        assert!(!text.contains("--- STDOUT ---"));
        assert!(text.ends_with("--- STDERR ---\nerror: could not find `Cargo.toml`"));
    }
}
