//! Tool System
//!
//! Lookups over the hospital records exposed as named tools. The intent
//! router builds a [`ToolCall`]; the registry validates it and runs it.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServerError};

/// Tool call request
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool identifier
    pub name: String,

    /// Arguments as key-value pairs
    pub arguments: HashMap<String, serde_json::Value>,

    /// Optional call ID for tracking
    #[serde(default)]
    pub id: Option<String>,
}

impl ToolCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn arg(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// String argument, if present
    pub fn str_arg(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(serde_json::Value::as_str)
    }

    /// String argument that the chosen action cannot do without
    pub fn require(&self, key: &str) -> Result<&str> {
        self.str_arg(key)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ServerError::ToolValidation(format!("Missing required parameter: {key}")))
    }
}

/// Result from tool execution
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool that was called
    pub name: String,

    /// Call ID (if provided in request)
    pub id: Option<String>,

    /// Whether execution succeeded
    pub success: bool,

    /// Reply text, or the reason the lookup failed
    pub output: String,
}

impl ToolResult {
    pub fn success(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            success: true,
            output: output.into(),
        }
    }

    pub fn failure(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            success: false,
            output: error.into(),
        }
    }

    /// Lookup misses become failed results carrying the miss text; anything
    /// else is a real error.
    pub fn from_lookup(name: &str, lookup: Result<String>) -> Result<Self> {
        match lookup {
            Ok(output) => Ok(Self::success(name, output)),
            Err(ServerError::NotFound(msg)) => Ok(Self::failure(name, msg)),
            Err(e) => Err(e),
        }
    }
}

/// Parameter definition for tool schema
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// Parameter name
    pub name: String,

    /// JSON Schema type (string, number, boolean, object, array)
    #[serde(rename = "type")]
    pub param_type: String,

    /// Human-readable description
    pub description: String,

    /// Whether this parameter is required
    #[serde(default)]
    pub required: bool,

    /// Enum of allowed values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,
}

/// Tool definition schema
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Unique tool identifier
    pub name: String,

    /// Human-readable description (also used in the help reply)
    pub description: String,

    /// Parameter definitions
    pub parameters: Vec<ParameterSchema>,

    /// Category for grouping
    #[serde(default)]
    pub category: Option<String>,
}

/// Tool trait - implement to add new lookups
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool's schema
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult>;

    /// Validate arguments before execution
    fn validate(&self, call: &ToolCall) -> Result<()> {
        let schema = self.schema();

        for param in &schema.parameters {
            let value = call.arguments.get(&param.name);
            if param.required && value.is_none() {
                return Err(ServerError::ToolValidation(format!(
                    "Missing required parameter: {}",
                    param.name
                )));
            }
            if let (Some(value), Some(allowed)) = (value, &param.enum_values) {
                if !allowed.contains(value) {
                    return Err(ServerError::ToolValidation(format!(
                        "Invalid value {value} for parameter: {}",
                        param.name
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Registry for available tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let schema = tool.schema();
        self.tools.insert(schema.name, Arc::new(tool));
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Execute a tool call
    pub async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        let tool = self
            .get(&call.name)
            .ok_or_else(|| ServerError::ToolNotFound(call.name.clone()))?;

        // Validate first
        tool.validate(call)?;

        let mut result = tool.execute(call).await?;
        result.id.clone_from(&call.id);
        Ok(result)
    }

    /// All tool schemas, ordered by name
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools.values().map(|t| t.schema()).collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "echo".into(),
                description: "Repeat the text back".into(),
                parameters: vec![
                    ParameterSchema {
                        name: "mode".into(),
                        param_type: "string".into(),
                        description: "Echo mode".into(),
                        required: true,
                        enum_values: Some(vec![json!("plain"), json!("loud")]),
                    },
                    ParameterSchema {
                        name: "text".into(),
                        param_type: "string".into(),
                        description: "Text to repeat".into(),
                        required: false,
                        enum_values: None,
                    },
                ],
                category: None,
            }
        }

        async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
            let text = call.require("text")?;
            let output = match call.str_arg("mode") {
                Some("loud") => text.to_uppercase(),
                _ => text.to_string(),
            };
            Ok(ToolResult::success("echo", output))
        }
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);
        registry
    }

    #[tokio::test]
    async fn test_execute_carries_call_id() {
        let call = ToolCall::new("echo").arg("mode", "loud").arg("text", "icu").with_id("s-1");
        let result = registry().execute(&call).await.unwrap();
        assert!(result.success);
        assert_eq!(result.output, "ICU");
        assert_eq!(result.id.as_deref(), Some("s-1"));
    }

    #[tokio::test]
    async fn test_validation() {
        let registry = registry();

        let missing = registry.execute(&ToolCall::new("echo")).await.unwrap_err();
        assert!(matches!(missing, ServerError::ToolValidation(_)));

        let bad_mode = ToolCall::new("echo").arg("mode", "whisper").arg("text", "x");
        assert!(matches!(
            registry.execute(&bad_mode).await,
            Err(ServerError::ToolValidation(_))
        ));

        let blank = ToolCall::new("echo").arg("mode", "plain").arg("text", "  ");
        assert!(registry.execute(&blank).await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let err = registry().execute(&ToolCall::new("teleport")).await.unwrap_err();
        assert!(matches!(err, ServerError::ToolNotFound(name) if name == "teleport"));
    }

    #[test]
    fn test_lookup_miss_is_a_failed_result() {
        let miss = ToolResult::from_lookup("x", Err(ServerError::NotFound("Doctor 'Who' not found".into())));
        let miss = miss.unwrap();
        assert!(!miss.success);
        assert_eq!(miss.output, "Doctor 'Who' not found");

        assert!(ToolResult::from_lookup("x", Err(ServerError::Data("bad".into()))).is_err());
    }
}
