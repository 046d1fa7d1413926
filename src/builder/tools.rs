use std::collections::BTreeMap;

use serde_json::Value;

use crate::chat::{FunctionTool, ParameterProperty, ParametersSchema, Tool};

/// Builder for function parameters.
pub struct ParamBuilder {
    name: String,
    property_type: String,
    description: String,
    default: Option<Value>,
}

impl ParamBuilder {
    /// Creates a new parameter builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            property_type: "string".to_string(),
            description: String::new(),
            default: None,
        }
    }

    /// Sets the parameter type.
    pub fn type_of(mut self, type_str: impl Into<String>) -> Self {
        self.property_type = type_str.into();
        self
    }

    /// Sets the parameter description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Sets the value assumed when the model omits the parameter.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    fn build(self) -> (String, ParameterProperty) {
        (
            self.name,
            ParameterProperty {
                property_type: self.property_type,
                description: self.description,
                default: self.default,
            },
        )
    }
}

/// Builder for function tools.
pub struct FunctionBuilder {
    name: String,
    description: String,
    parameters: Vec<ParamBuilder>,
    required: Vec<String>,
}

impl FunctionBuilder {
    /// Creates a new function builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            parameters: Vec::new(),
            required: Vec::new(),
        }
    }

    /// Sets the function description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Adds a parameter to the function.
    pub fn param(mut self, param: ParamBuilder) -> Self {
        self.parameters.push(param);
        self
    }

    /// Marks parameters as required.
    pub fn required(mut self, param_names: Vec<String>) -> Self {
        self.required = param_names;
        self
    }

    /// Builds the function tool.
    pub fn build(self) -> Tool {
        let FunctionBuilder {
            name,
            description,
            parameters,
            required,
        } = self;

        Tool {
            tool_type: "function".to_string(),
            function: FunctionTool {
                name,
                description,
                parameters: build_parameters(parameters, required),
            },
        }
    }
}

fn build_parameters(parameters: Vec<ParamBuilder>, required: Vec<String>) -> Value {
    let mut properties = BTreeMap::new();
    for param in parameters {
        let (name, prop) = param.build();
        properties.insert(name, prop);
    }

    serde_json::to_value(ParametersSchema {
        schema_type: "object".to_string(),
        properties,
        required,
    })
    .unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_object_schema_with_defaults() {
        let tool = FunctionBuilder::new("search_files")
            .description("Search text in files")
            .param(ParamBuilder::new("pattern").description("Text to look for"))
            .param(
                ParamBuilder::new("directory")
                    .description("Root directory")
                    .default_value("."),
            )
            .required(vec!["pattern".to_string()])
            .build();

        assert_eq!(tool.tool_type, "function");
        assert_eq!(tool.function.name, "search_files");
        assert_eq!(
            tool.function.parameters,
            json!({
                "type": "object",
                "properties": {
                    "directory": {"type": "string", "description": "Root directory", "default": "."},
                    "pattern": {"type": "string", "description": "Text to look for"}
                },
                "required": ["pattern"]
            })
        );
    }
}
