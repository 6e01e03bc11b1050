//! Action interpreter for tool execution
//!
//! The Interpreter module bridges LLM responses and tool execution by parsing,
//! validating, and coordinating tool calls from agent decisions.
//!
//! # Interpreter Responsibilities
//!
//! - **Parse Tool Calls**: Extract tool invocations from agent messages
//! - **Validate Actions**: Ensure tool calls are safe and well-formed
//! - **Coordinate Execution**: Manage tool execution lifecycle
//! - **Handle Results**: Process tool outputs for agent feedback
//! - **Error Recovery**: Gracefully handle tool failures
//!
//! # Interpretation Pipeline
//!
//! ```text
//! LLM Response → Parse → Validate → Execute → Results
//!     ↓            ↓         ↓          ↓         ↓
//! ToolCall   ActionCall  Policy   ToolBridge  ToolResult
//!  Message    Struct     Check     Execute     Message
//! ```
//!
//! ## Pipeline Stages
//!
//! 1. **Parse**: Extract tool calls from agent state (ToolCall messages)
//! 2. **Validate**: Check tool exists, validate parameters, apply policies
//! 3. **Execute**: Invoke tool via DirectToolBridge
//! 4. **Results**: Package execution results for agent consumption
//!
//! # Integration with TaskExecutor
//!
//! The TaskExecutor uses the Interpreter to:
//! - Extract tool calls from agent patterns (ReAct, Plan-Execute, etc.)
//! - Validate tool calls before execution
//! - Execute tools and feed results back to agents
//! - Handle execution errors gracefully
//!
//! The Interpreter is pattern-agnostic - it works with any agent pattern
//! that produces ToolCall messages.

use crate::error::{OrcaError, Result};
use crate::tools::DirectToolBridge;
use async_trait::async_trait;
use langgraph_core::messages::Message;
use langgraph_core::tool::ToolCall;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Parsed action call ready for execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionCall {
    /// Tool name to invoke
    pub tool_name: String,

    /// Tool parameters as JSON
    pub parameters: JsonValue,

    /// Tool call ID for result correlation
    pub call_id: String,
}

impl ActionCall {
    /// Create a new action call
    pub fn new(tool_name: impl Into<String>, parameters: JsonValue, call_id: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            parameters,
            call_id: call_id.into(),
        }
    }

    /// Create from a ToolCall message
    pub fn from_tool_call(tool_call: &ToolCall) -> Self {
        Self {
            tool_name: tool_call.name.clone(),
            parameters: tool_call.args.clone(),
            call_id: tool_call.id.clone(),
        }
    }
}

/// Action execution result
#[derive(Debug, Clone)]
pub struct ActionResult {
    /// The original action call
    pub action: ActionCall,

    /// Execution success status
    pub success: bool,

    /// Result data (if successful)
    pub result: Option<JsonValue>,

    /// Error message (if failed)
    pub error: Option<String>,
}

impl ActionResult {
    /// Create a successful result
    pub fn success(action: ActionCall, result: JsonValue) -> Self {
        Self {
            action,
            success: true,
            result: Some(result),
            error: None,
        }
    }

    /// Create a failure result
    pub fn failure(action: ActionCall, error: impl Into<String>) -> Self {
        Self {
            action,
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }

    /// Convert to a Message for agent feedback
    pub fn to_message(&self) -> Message {
        let content = if self.success {
            self.result
                .as_ref()
                .and_then(|v| v.as_str())
                .unwrap_or("Success")
                .to_string()
        } else {
            format!("Error: {}", self.error.as_deref().unwrap_or("Unknown error"))
        };

        // Create a tool result message
        Message::tool(content, &self.action.call_id)
            .with_name(&self.action.tool_name)
    }
}

/// Interpreter trait for action interpretation and execution
///
/// Implementors parse tool calls from agent messages, validate them,
/// and coordinate execution via DirectToolBridge.
#[async_trait]
pub trait Interpreter: Send + Sync {
    /// Parse tool calls from agent messages
    ///
    /// # Arguments
    /// * `messages` - Agent state messages to parse
    ///
    /// # Returns
    /// Vector of parsed ActionCall structs
    fn parse_actions(&self, messages: &[Message]) -> Result<Vec<ActionCall>>;

    /// Validate an action before execution
    ///
    /// # Arguments
    /// * `action` - The action to validate
    ///
    /// # Returns
    /// Ok(()) if valid, Err with details if invalid
    async fn validate_action(&self, action: &ActionCall) -> Result<()>;

    /// Execute an action via tool bridge
    ///
    /// # Arguments
    /// * `action` - The action to execute
    ///
    /// # Returns
    /// ActionResult with execution outcome
    async fn execute_action(&self, action: &ActionCall) -> Result<ActionResult>;

    /// Interpret and execute all actions from messages
    ///
    /// This is the main entry point that combines parse, validate, and execute.
    ///
    /// # Arguments
    /// * `messages` - Agent state messages
    ///
    /// # Returns
    /// Vector of ActionResults
    async fn interpret(&self, messages: &[Message]) -> Result<Vec<ActionResult>> {
        // Parse actions from messages
        let actions = self.parse_actions(messages)?;

        if actions.is_empty() {
            return Ok(Vec::new());
        }

        // Validate and execute each action
        let mut results = Vec::new();

        for action in actions {
            // Validate before execution
            if let Err(e) = self.validate_action(&action).await {
                results.push(ActionResult::failure(action, e.to_string()));
                continue;
            }

            // Execute the action
            match self.execute_action(&action).await {
                Ok(result) => results.push(result),
                Err(e) => results.push(ActionResult::failure(action, e.to_string())),
            }
        }

        Ok(results)
    }
}

/// Default interpreter implementation using DirectToolBridge
pub struct DefaultInterpreter {
    /// Tool bridge for execution
    tool_bridge: Arc<DirectToolBridge>,
}

impl DefaultInterpreter {
    /// Create a new default interpreter
    pub fn new(tool_bridge: Arc<DirectToolBridge>) -> Self {
        Self { tool_bridge }
    }
}

#[async_trait]
impl Interpreter for DefaultInterpreter {
    fn parse_actions(&self, messages: &[Message]) -> Result<Vec<ActionCall>> {
        let mut actions = Vec::new();

        // Iterate through messages looking for tool calls
        for message in messages {
            // Check if message has tool calls
            if let Some(tool_calls) = &message.tool_calls {
                // Parse each tool call in the message
                for tool_call in tool_calls {
                    // Validate JSON structure
                    if !tool_call.args.is_object() && !tool_call.args.is_null() {
                        return Err(OrcaError::ToolExecution(format!(
                            "Tool '{}' arguments must be a JSON object, got: {}",
                            tool_call.name,
                            tool_call.args
                        )));
                    }

                    // Create ActionCall from ToolCall
                    let action = ActionCall::from_tool_call(tool_call);
                    actions.push(action);
                }
            }
        }

        Ok(actions)
    }

    async fn validate_action(&self, action: &ActionCall) -> Result<()> {
        // 1. Validate tool exists in registry
        // This will return error if tool not found
        self.tool_bridge
            .get_tool_schema(&action.tool_name)
            .map_err(|e| {
                OrcaError::ToolExecution(format!(
                    "Tool '{}' not found in registry: {}",
                    action.tool_name, e
                ))
            })?;

        // 2. Validate arguments are properly formatted
        // Arguments must be a JSON object or null
        if !action.parameters.is_object() && !action.parameters.is_null() {
            return Err(OrcaError::ToolExecution(format!(
                "Tool '{}' requires object or null arguments, got: {}",
                action.tool_name,
                serde_json::to_string(&action.parameters).unwrap_or_else(|_| "invalid".to_string())
            )));
        }

        // 3. Policy constraints (allowlist/denylist) are enforced by the
        // ToolExecutor during execution via PolicyRegistry. The tool bridge
        // checks policies when actually running the tool.
        //
        // Additional pre-execution policy checks could be added here if needed,
        // but the current architecture handles this at the execution layer.

        Ok(())
    }

    async fn execute_action(&self, action: &ActionCall) -> Result<ActionResult> {
        // Execute tool via DirectToolBridge
        match self.tool_bridge.execute_tool(&action.tool_name, action.parameters.clone()).await {
            Ok(result) => {
                // Successful execution
                Ok(ActionResult::success(action.clone(), result))
            }
            Err(e) => {
                // Tool execution failed
                Ok(ActionResult::failure(action.clone(), e.to_string()))
            }
        }
    }
}
