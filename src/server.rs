use std::future::Future;
use std::sync::Arc;

use rmcp::{
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject,
        ListToolsResult, PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
        Tool,
    },
    service::RequestContext,
    ErrorData, RoleServer, ServerHandler,
};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::ToolConfig;
use crate::error::CargoError;
use crate::executor::{ExecutionResult, OutputMode, ProcessExecutor};
use crate::operation::{build_argument_vector, catalogue};

#[derive(Clone)]
pub struct CargoServer {
    executor: Arc<ProcessExecutor>,
    tools: Arc<Vec<Tool>>,
}

impl CargoServer {
    pub fn new(config: ToolConfig) -> Self {
        Self {
            executor: Arc::new(ProcessExecutor::new(config)),
            tools: Arc::new(catalogue()),
        }
    }

    /// The static operation catalogue, in a fixed order.
    pub fn list_operations(&self) -> Vec<Tool> {
        self.tools.as_ref().clone()
    }

    /// Run one operation and render the outcome as the response text.
    ///
    /// Never fails: every error is converted to a single line.
    pub async fn invoke_operation(&self, name: &str, arguments: Option<JsonObject>) -> String {
        match self.dispatch(name, arguments.unwrap_or_default()).await {
            Ok(result) => result.to_string(),
            Err(e) => {
                if e.is_expected() {
                    error!(operation = name, error = %e, "cargo error");
                } else {
                    error!(operation = name, error = %e, "unexpected error");
                }
                e.to_response_text()
            }
        }
    }

    async fn dispatch(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<ExecutionResult, CargoError> {
        let prepared = build_argument_vector(name, arguments)?;
        info!(operation = %prepared.operation, args = %prepared.args, "dispatching");
        self.executor
            .execute(
                &prepared.args,
                prepared.workspace_path.as_deref(),
                OutputMode::Capture,
            )
            .await
    }
}

impl Default for CargoServer {
    fn default() -> Self {
        Self::new(ToolConfig::default())
    }
}

const SERVER_INSTRUCTIONS: &str = r#"A Cargo MCP server that runs cargo commands (build, test, run, check, clippy, fmt, doc, clean, tree, update, bench) for a Rust project.

All tools accept an optional workspace_path. When it is omitted the server walks up from its current directory to the nearest Cargo.toml, and falls back to the current directory when none is found.

Each call returns the executed command, the working directory, the exit code, a success flag, and the captured stdout/stderr verbatim. A failing build is reported with Success: false, not as an error."#;

impl ServerHandler for CargoServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.list_operations()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let name = request.name.to_string();
        let server = self.clone();
        let task_name = name.clone();
        let call = async move { server.invoke_operation(&task_name, request.arguments).await };

        let text = run_contained(&name, call, context.ct.cancelled()).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

/// Aborts the task when dropped. Aborting a finished task is a no-op.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Run one tool call in its own task.
///
/// A panic in the call is reported as an unexpected error instead of tearing
/// down the connection. When `cancelled` resolves first, or this future is
/// dropped, the task is aborted and any child process it owns is killed.
async fn run_contained<F>(name: &str, call: F, cancelled: impl Future<Output = ()>) -> String
where
    F: Future<Output = String> + Send + 'static,
{
    let mut task = AbortOnDrop(tokio::spawn(call));

    tokio::select! {
        joined = &mut task.0 => match joined {
            Ok(text) => text,
            Err(e) => {
                error!(operation = %name, error = %e, "tool call task failed");
                format!("Unexpected error: {}", e)
            }
        },
        _ = cancelled => {
            task.0.abort();
            info!(operation = %name, "tool call cancelled");
            "Error: request cancelled".to_string()
        }
    }
}
