use serde_json::{Map, Value};

use crate::chat::Tool;

use super::builtin::builtin_tools;
use super::context::ToolContext;
use super::definition::ToolDefinition;
use super::error::ToolError;

/// Fixed set of tools offered to the model, built once per session.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ToolRegistry {
    /// All built-in tools.
    pub fn builtin() -> Self {
        Self {
            tools: builtin_tools(),
        }
    }

    /// Built-in tools restricted to `enabled`. An empty list keeps them all.
    pub fn with_enabled(enabled: &[String]) -> Self {
        let mut tools = builtin_tools();
        if !enabled.is_empty() {
            tools.retain(|tool| enabled.iter().any(|name| name == tool.name));
        }
        Self { tools }
    }

    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Get the list of tool names
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name).collect()
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name == name)
    }

    /// Wire schemas for the gateway.
    pub fn tools(&self) -> Vec<Tool> {
        self.tools.iter().map(ToolDefinition::to_tool).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn execute(
        &self,
        name: &str,
        args: &Map<String, Value>,
        context: &ToolContext,
    ) -> Result<String, ToolError> {
        let tool = self
            .tools
            .iter()
            .find(|tool| tool.name == name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        (tool.executor)(context, Value::Object(args.clone()))
    }

    /// Run a tool and render the outcome as text for the model. Never fails.
    pub fn dispatch(&self, name: &str, args: &Map<String, Value>, context: &ToolContext) -> String {
        log::debug!("dispatching tool {name}");
        match self.execute(name, args, context) {
            Ok(output) => output,
            Err(err) => {
                log::debug!("tool {name} failed: {err}");
                format!("Tool error: {err}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn args(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn builtin_tools_are_advertised_in_order() {
        let registry = ToolRegistry::builtin();
        assert_eq!(
            registry.tool_names(),
            vec![
                "read_file",
                "write_file",
                "execute_command",
                "list_directory",
                "search_files"
            ]
        );
    }

    #[test]
    fn wire_schema_carries_required_and_defaults() {
        let tools = ToolRegistry::builtin().tools();
        let exec = tools
            .iter()
            .find(|t| t.function.name == "execute_command")
            .unwrap();
        let params = &exec.function.parameters;

        assert_eq!(exec.tool_type, "function");
        assert_eq!(params["type"], "object");
        assert_eq!(params["required"], json!(["command"]));
        assert_eq!(params["properties"]["working_dir"]["default"], ".");
        assert_eq!(params["properties"]["command"]["type"], "string");
    }

    #[test]
    fn enabled_list_filters_builtins() {
        let registry =
            ToolRegistry::with_enabled(&["read_file".to_string(), "search_files".to_string()]);
        assert_eq!(registry.tool_names(), vec!["read_file", "search_files"]);
        assert!(!registry.has_tool("execute_command"));

        let all = ToolRegistry::with_enabled(&[]);
        assert_eq!(all.definitions().len(), 5);
    }

    #[test]
    fn unknown_tool_is_not_found() {
        let registry = ToolRegistry::builtin();
        let ctx = ToolContext::new(".");
        let err = registry.execute("delete_everything", &Map::new(), &ctx).unwrap_err();
        assert!(matches!(err, ToolError::NotFound(name) if name == "delete_everything"));
    }

    #[test]
    fn dispatch_renders_failures_as_text() {
        let registry = ToolRegistry::builtin();
        let ctx = ToolContext::new(".");

        let unknown = registry.dispatch("nope", &Map::new(), &ctx);
        assert_eq!(unknown, "Tool error: unknown tool: nope");

        let missing_arg = registry.dispatch("read_file", &Map::new(), &ctx);
        assert!(missing_arg.starts_with("Tool error: invalid tool arguments"));
    }

    #[test]
    fn dispatch_reports_missing_file() {
        let dir = tempdir().unwrap();
        let registry = ToolRegistry::builtin();
        let ctx = ToolContext::new(dir.path());

        let out = registry.dispatch("read_file", &args(json!({ "file_path": "nope.txt" })), &ctx);
        assert!(out.starts_with("Tool error: could not read file 'nope.txt'"));
    }

    #[test]
    fn write_then_read_through_dispatch() {
        let dir = tempdir().unwrap();
        let registry = ToolRegistry::builtin();
        let ctx = ToolContext::new(dir.path());

        let written = registry.dispatch(
            "write_file",
            &args(json!({ "file_path": "hello.py", "content": "print('hi')" })),
            &ctx,
        );
        assert_eq!(written, "Wrote 11 bytes to hello.py");

        let read = registry.dispatch("read_file", &args(json!({ "file_path": "hello.py" })), &ctx);
        assert_eq!(read, "print('hi')");
    }
}
