use serde_json::Value;
use std::sync::Arc;

use crate::builder::{FunctionBuilder, ParamBuilder};
use crate::chat::Tool;

use super::context::ToolContext;
use super::error::ToolError;

pub type ToolExecutor = Arc<dyn Fn(&ToolContext, Value) -> Result<String, ToolError> + Send + Sync>;

#[derive(Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ToolParam>,
    pub required: Vec<&'static str>,
    pub executor: ToolExecutor,
}

impl std::fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("required", &self.required)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ToolParam {
    pub name: &'static str,
    pub description: &'static str,
    pub param_type: &'static str,
    pub default: Option<&'static str>,
}

impl ToolParam {
    /// Create a string parameter.
    pub const fn string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            param_type: "string",
            default: None,
        }
    }

    /// Set the value the tool assumes when the parameter is omitted.
    pub fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }
}

impl ToolDefinition {
    pub fn function_builder(&self) -> FunctionBuilder {
        let mut builder = FunctionBuilder::new(self.name).description(self.description);
        for param in &self.params {
            let mut param_builder = ParamBuilder::new(param.name)
                .description(param.description)
                .type_of(param.param_type);
            if let Some(default) = param.default {
                param_builder = param_builder.default_value(default);
            }
            builder = builder.param(param_builder);
        }
        if !self.required.is_empty() {
            builder = builder.required(self.required.iter().map(|s| s.to_string()).collect());
        }
        builder
    }

    pub fn to_tool(&self) -> Tool {
        self.function_builder().build()
    }
}
