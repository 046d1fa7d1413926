use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Represents a parameter in a function tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterProperty {
    /// The type of the parameter (e.g. "string", "number", "array", etc)
    #[serde(rename = "type")]
    pub property_type: String,
    /// Description of what the parameter does
    pub description: String,
    /// Value the tool assumes when the parameter is omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Represents the parameters schema for a function tool
#[derive(Debug, Clone, Serialize)]
pub struct ParametersSchema {
    /// The type of the parameters object (usually "object")
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Map of parameter names to their properties
    pub properties: BTreeMap<String, ParameterProperty>,
    /// List of required parameter names
    pub required: Vec<String>,
}

/// Represents a function definition for a tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionTool {
    /// Name of the function
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON Schema describing the parameters
    pub parameters: Value,
}

/// Represents a tool that can be used in chat
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tool {
    /// The type of tool (e.g. "function")
    #[serde(rename = "type")]
    pub tool_type: String,
    /// The function definition if this is a function tool
    pub function: FunctionTool,
}

/// Tool choice determines how the LLM uses available tools.
///
/// Only sent alongside a non-empty tool list; a request without tools
/// omits it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    /// Model can use any tool, and may elect to use none.
    #[default]
    Auto,
}
