//! Task Executor - Main execution engine for tasks
//!
//! Coordinates task execution using LangGraph agents with DirectToolBridge and LLM providers.

use crate::config::OrcaConfig;
use crate::error::{OrcaError, Result};
use crate::executor::{LlmProvider, ToolAdapter, create_llm_function};
use crate::pattern::PatternType;
use crate::tools::DirectToolBridge;
use crate::workflow::Task;
use langgraph_prebuilt::agents::{create_react_agent, create_plan_execute_agent, create_reflection_agent};
use langgraph_core::{StreamMode, StreamEvent};
use serde_json::{json, Value};
use std::sync::Arc;
use futures::StreamExt;
use tracing::{debug, info};

/// Result of task execution
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether execution succeeded
    pub success: bool,

    /// Result value if successful
    pub result: Option<String>,

    /// Error message if failed
    pub error: Option<String>,

    /// Final agent state
    pub final_state: Value,

    /// Message history
    pub messages: Vec<Value>,
}

impl ExecutionResult {
    /// Create a successful execution result
    pub fn success(result: String, final_state: Value, messages: Vec<Value>) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
            final_state,
            messages,
        }
    }

    /// Create a failed execution result
    pub fn failure(error: String, final_state: Value, messages: Vec<Value>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error),
            final_state,
            messages,
        }
    }
}

/// Task executor that runs tasks using LangGraph agents
pub struct TaskExecutor {
    /// Direct tool bridge for tool execution
    bridge: Arc<DirectToolBridge>,

    /// LLM provider for agent reasoning
    llm_provider: Arc<LlmProvider>,

    /// Configuration
    config: OrcaConfig,
}

impl std::fmt::Debug for TaskExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskExecutor")
            .field("bridge", &self.bridge)
            .field("llm_provider", &self.llm_provider)
            .field("config", &self.config)
            .finish()
    }
}

impl TaskExecutor {
    /// Create a new task executor
    ///
    /// # Arguments
    /// * `bridge` - DirectToolBridge for tool execution
    /// * `config` - Orca configuration
    ///
    /// # Returns
    /// A new TaskExecutor instance
    pub fn new(bridge: Arc<DirectToolBridge>, config: OrcaConfig) -> Result<Self> {
        // Create LLM provider from config
        let llm_provider = Arc::new(LlmProvider::from_config(&config)?);

        Ok(Self {
            bridge,
            llm_provider,
            config,
        })
    }

    /// Execute a task
    ///
    /// # Arguments
    /// * `task` - The task to execute
    ///
    /// # Returns
    /// ExecutionResult with outcome and final state
    pub async fn execute_task(&self, task: &Task) -> Result<ExecutionResult> {
        use tokio::time::{timeout, Duration};

        info!(
            task_id = %task.id,
            description = %task.description,
            timeout_secs = self.config.execution.task_timeout,
            "Starting task execution with timeout"
        );

        // Create timeout duration from config
        let timeout_duration = Duration::from_secs(self.config.execution.task_timeout);

        // Execute with timeout
        let result = timeout(timeout_duration, self.execute_task_internal(task)).await;

        match result {
            Ok(exec_result) => {
                info!(
                    task_id = %task.id,
                    success = exec_result.as_ref().map(|r| r.success).unwrap_or(false),
                    "Task execution completed"
                );
                exec_result
            }
            Err(_) => {
                // Timeout occurred
                info!(
                    task_id = %task.id,
                    timeout_secs = self.config.execution.task_timeout,
                    "Task execution timed out"
                );
                Err(OrcaError::Timeout {
                    task_id: task.id.clone(),
                    duration_secs: self.config.execution.task_timeout,
                })
            }
        }
    }

    /// Internal task execution without timeout (for testing and timeout wrapper)
    async fn execute_task_internal(&self, task: &Task) -> Result<ExecutionResult> {
        // Parse pattern from task metadata or use default (React)
        let pattern = self.get_pattern_from_task(task)?;

        debug!(
            task_id = %task.id,
            pattern = %pattern,
            "Using pattern for execution"
        );

        // Execute based on pattern
        match pattern {
            PatternType::React => self.execute_react(task).await,
            PatternType::PlanExecute => self.execute_plan_execute(task).await,
            PatternType::Reflection => self.execute_reflection(task).await,
        }
    }

    /// Execute a task using the ReAct pattern
    async fn execute_react(&self, task: &Task) -> Result<ExecutionResult> {
        // Create tools from bridge
        let tools = ToolAdapter::from_bridge(self.bridge.clone());

        debug!(
            task_id = %task.id,
            tool_count = tools.len(),
            "Created tool adapters"
        );

        // Create LLM function
        let llm_fn = create_llm_function(self.llm_provider.clone());

        // Create ReAct agent
        let agent = create_react_agent(llm_fn, tools)
            .with_max_iterations(self.config.execution.max_iterations)
            .build()
            .map_err(|e| OrcaError::Execution(format!("Failed to build agent: {}", e)))?;

        // Prepare initial state with task description
        let initial_state = json!({
            "messages": vec![
                json!({
                    "type": "human",
                    "content": task.description.clone()
                })
            ]
        });

        // Execute with or without streaming based on config
        let (final_state, messages) = if self.config.execution.streaming {
            debug!(task_id = %task.id, "Streaming agent execution");
            self.execute_with_streaming(&agent, initial_state, task).await?
        } else {
            debug!(task_id = %task.id, "Invoking agent");

            let final_state = agent
                .invoke(initial_state)
                .await
                .map_err(|e| OrcaError::Execution(format!("Agent execution failed: {}", e)))?;

            // Extract messages from final state
            let messages = final_state
                .get("messages")
                .and_then(|m| m.as_array())
                .cloned()
                .unwrap_or_default();

            (final_state, messages)
        };

        // Extract final AI message as result
        let result = messages
            .iter()
            .rev()
            .find(|msg| {
                msg.get("type")
                    .and_then(|t| t.as_str())
                    .map(|t| t == "ai")
                    .unwrap_or(false)
            })
            .and_then(|msg| msg.get("content"))
            .and_then(|c| c.as_str())
            .unwrap_or("No response generated")
            .to_string();

        debug!(
            task_id = %task.id,
            message_count = messages.len(),
            "Agent execution completed"
        );

        Ok(ExecutionResult::success(result, final_state, messages))
    }

    /// Execute a task using the Plan-Execute pattern
    async fn execute_plan_execute(&self, task: &Task) -> Result<ExecutionResult> {
        // Create tools from bridge
        let tools = ToolAdapter::from_bridge(self.bridge.clone());

        debug!(
            task_id = %task.id,
            tool_count = tools.len(),
            "Created tool adapters for Plan-Execute"
        );

        // Create LLM function (used for both planner and executor)
        let llm_fn = create_llm_function(self.llm_provider.clone());
        let llm_fn_executor = create_llm_function(self.llm_provider.clone());

        // Create Plan-Execute agent
        let agent = create_plan_execute_agent(llm_fn, llm_fn_executor, tools)
            .with_max_steps(self.config.execution.max_iterations)
            .build()
            .map_err(|e| OrcaError::Execution(format!("Failed to build Plan-Execute agent: {}", e)))?;

        // Prepare initial state with task description
        let initial_state = json!({
            "messages": vec![
                json!({
                    "type": "human",
                    "content": task.description.clone()
                })
            ]
        });

        // Execute with or without streaming based on config
        let (final_state, messages) = if self.config.execution.streaming {
            debug!(task_id = %task.id, "Streaming Plan-Execute agent execution");
            self.execute_with_streaming(&agent, initial_state, task).await?
        } else {
            debug!(task_id = %task.id, "Invoking Plan-Execute agent");

            let final_state = agent
                .invoke(initial_state)
                .await
                .map_err(|e| OrcaError::Execution(format!("Plan-Execute agent execution failed: {}", e)))?;

            // Extract messages from final state
            let messages = final_state
                .get("messages")
                .and_then(|m| m.as_array())
                .cloned()
                .unwrap_or_default();

            (final_state, messages)
        };

        // Extract final AI message as result
        let result = messages
            .iter()
            .rev()
            .find(|msg| {
                msg.get("type")
                    .and_then(|t| t.as_str())
                    .map(|t| t == "ai")
                    .unwrap_or(false)
            })
            .and_then(|msg| msg.get("content"))
            .and_then(|c| c.as_str())
            .unwrap_or("No response generated")
            .to_string();

        debug!(
            task_id = %task.id,
            message_count = messages.len(),
            "Plan-Execute agent execution completed"
        );

        Ok(ExecutionResult::success(result, final_state, messages))
    }

    /// Execute a task using the Reflection pattern
    async fn execute_reflection(&self, task: &Task) -> Result<ExecutionResult> {
        // Create tools from bridge
        let tools = ToolAdapter::from_bridge(self.bridge.clone());

        debug!(
            task_id = %task.id,
            tool_count = tools.len(),
            "Created tool adapters for Reflection"
        );

        // Create LLM functions (used for both generator and reflector)
        let llm_fn_generator = create_llm_function(self.llm_provider.clone());
        let llm_fn_reflector = create_llm_function(self.llm_provider.clone());

        // Create Reflection agent
        let agent = create_reflection_agent(llm_fn_generator, llm_fn_reflector, tools)
            .with_max_iterations(self.config.execution.max_iterations)
            .build()
            .map_err(|e| OrcaError::Execution(format!("Failed to build Reflection agent: {}", e)))?;

        // Prepare initial state with task description
        let initial_state = json!({
            "messages": vec![
                json!({
                    "type": "human",
                    "content": task.description.clone()
                })
            ]
        });

        // Execute with or without streaming based on config
        let (final_state, messages) = if self.config.execution.streaming {
            debug!(task_id = %task.id, "Streaming Reflection agent execution");
            self.execute_with_streaming(&agent, initial_state, task).await?
        } else {
            debug!(task_id = %task.id, "Invoking Reflection agent");

            let final_state = agent
                .invoke(initial_state)
                .await
                .map_err(|e| OrcaError::Execution(format!("Reflection agent execution failed: {}", e)))?;

            // Extract messages from final state
            let messages = final_state
                .get("messages")
                .and_then(|m| m.as_array())
                .cloned()
                .unwrap_or_default();

            (final_state, messages)
        };

        // Extract final AI message as result
        let result = messages
            .iter()
            .rev()
            .find(|msg| {
                msg.get("type")
                    .and_then(|t| t.as_str())
                    .map(|t| t == "ai")
                    .unwrap_or(false)
            })
            .and_then(|msg| msg.get("content"))
            .and_then(|c| c.as_str())
            .unwrap_or("No response generated")
            .to_string();

        debug!(
            task_id = %task.id,
            message_count = messages.len(),
            "Reflection agent execution completed"
        );

        Ok(ExecutionResult::success(result, final_state, messages))
    }

    /// Execute agent with streaming output
    async fn execute_with_streaming(
        &self,
        agent: &langgraph_core::CompiledGraph,
        initial_state: Value,
        task: &Task,
    ) -> Result<(Value, Vec<Value>)> {
        use std::io::{self, Write};

        // Create stream with Messages and Updates modes
        let mut stream = agent
            .stream_chunks_with_modes(
                initial_state,
                vec![StreamMode::Messages, StreamMode::Updates],
                None,
            )
            .await
            .map_err(|e| OrcaError::Execution(format!("Failed to create stream: {}", e)))?;

        let mut final_state = json!({});

        // Process stream chunks
        while let Some(chunk) = stream.next().await {
            match chunk.event {
                StreamEvent::Values { state } => {
                    // Update final state
                    final_state = state;
                }
                StreamEvent::Updates { node, update: _ } => {
                    // Print progress indicator
                    print!(".");
                    io::stdout().flush().unwrap_or(());

                    debug!(
                        task_id = %task.id,
                        node = %node,
                        "Node update"
                    );
                }
                StreamEvent::Message { message, metadata: _ } => {
                    // Print message content in real-time
                    if let Some(content) = message.get("content").and_then(|c| c.as_str()) {
                        if !content.is_empty() {
                            println!("\n{}", content);
                        }
                    }
                }
                StreamEvent::MessageChunk { chunk, message_id: _, node: _, metadata: _ } => {
                    // Print token chunks for real-time streaming
                    if !chunk.is_empty() {
                        print!("{}", chunk);
                        io::stdout().flush().unwrap_or(());
                    }
                }
                _ => {
                    // Ignore other event types
                }
            }
        }

        println!(); // New line after streaming

        // Extract messages from final state
        let messages = final_state
            .get("messages")
            .and_then(|m| m.as_array())
            .cloned()
            .unwrap_or_default();

        debug!(
            task_id = %task.id,
            message_count = messages.len(),
            "Streaming execution completed"
        );

        Ok((final_state, messages))
    }

    /// Get pattern from task metadata or default
    fn get_pattern_from_task(&self, task: &Task) -> Result<PatternType> {
        // Try to parse metadata JSON
        if let Ok(metadata) = serde_json::from_str::<Value>(&task.metadata) {
            if let Some(pattern_str) = metadata.get("pattern").and_then(|p| p.as_str()) {
                if let Some(pattern) = PatternType::from_str(pattern_str) {
                    return Ok(pattern);
                }
            }
        }

        // Default to React
        Ok(PatternType::React)
    }

    /// Get configuration
    pub fn config(&self) -> &OrcaConfig {
        &self.config
    }

    /// Get bridge
    pub fn bridge(&self) -> &Arc<DirectToolBridge> {
        &self.bridge
    }
}
