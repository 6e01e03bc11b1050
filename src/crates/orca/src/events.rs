//! Execution event logging for observability
//!
//! This module provides event types and logging infrastructure for tracking
//! task and workflow execution events.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Event types for execution tracking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExecutionEvent {
    /// Task execution started
    TaskStarted {
        task_id: String,
        description: String,
        timestamp: i64,
    },
    /// Task execution completed successfully
    TaskCompleted {
        task_id: String,
        result: Option<String>,
        timestamp: i64,
        duration_ms: u64,
    },
    /// Task execution failed
    TaskFailed {
        task_id: String,
        error: String,
        timestamp: i64,
        duration_ms: u64,
    },
    /// Task was cancelled
    TaskCancelled {
        task_id: String,
        timestamp: i64,
    },
    /// Workflow execution started
    WorkflowStarted {
        workflow_id: String,
        name: String,
        task_count: usize,
        timestamp: i64,
    },
    /// Workflow execution completed
    WorkflowCompleted {
        workflow_id: String,
        completed_tasks: usize,
        failed_tasks: usize,
        timestamp: i64,
        duration_ms: u64,
    },
    /// Workflow was paused
    WorkflowPaused {
        workflow_id: String,
        timestamp: i64,
    },
    /// Workflow was resumed
    WorkflowResumed {
        workflow_id: String,
        timestamp: i64,
    },
    /// Pattern execution started
    PatternExecutionStarted {
        task_id: String,
        pattern: String,
        timestamp: i64,
    },
    /// Pattern execution completed
    PatternExecutionCompleted {
        task_id: String,
        pattern: String,
        iterations: usize,
        timestamp: i64,
        duration_ms: u64,
    },
}

impl ExecutionEvent {
    /// Get the timestamp of the event
    pub fn timestamp(&self) -> i64 {
        match self {
            ExecutionEvent::TaskStarted { timestamp, .. }
            | ExecutionEvent::TaskCompleted { timestamp, .. }
            | ExecutionEvent::TaskFailed { timestamp, .. }
            | ExecutionEvent::TaskCancelled { timestamp, .. }
            | ExecutionEvent::WorkflowStarted { timestamp, .. }
            | ExecutionEvent::WorkflowCompleted { timestamp, .. }
            | ExecutionEvent::WorkflowPaused { timestamp, .. }
            | ExecutionEvent::WorkflowResumed { timestamp, .. }
            | ExecutionEvent::PatternExecutionStarted { timestamp, .. }
            | ExecutionEvent::PatternExecutionCompleted { timestamp, .. } => *timestamp,
        }
    }

    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            ExecutionEvent::TaskStarted { task_id, description, .. } => {
                format!("Task started: {} ({})", task_id, description)
            }
            ExecutionEvent::TaskCompleted { duration_ms, .. } => {
                format!("Task completed ({}ms)", duration_ms)
            }
            ExecutionEvent::TaskFailed { task_id, error, .. } => {
                format!("Task failed: {} - {}", task_id, error)
            }
            ExecutionEvent::TaskCancelled { task_id, .. } => {
                format!("Task cancelled: {}", task_id)
            }
            ExecutionEvent::WorkflowStarted { name, task_count, .. } => {
                format!("Workflow started: {} ({} tasks)", name, task_count)
            }
            ExecutionEvent::WorkflowCompleted { completed_tasks, failed_tasks, .. } => {
                format!("Workflow completed: {} succeeded, {} failed", completed_tasks, failed_tasks)
            }
            ExecutionEvent::WorkflowPaused { workflow_id, .. } => {
                format!("Workflow paused: {}", workflow_id)
            }
            ExecutionEvent::WorkflowResumed { workflow_id, .. } => {
                format!("Workflow resumed: {}", workflow_id)
            }
            ExecutionEvent::PatternExecutionStarted { task_id, pattern, .. } => {
                format!("Pattern execution started: {} ({})", task_id, pattern)
            }
            ExecutionEvent::PatternExecutionCompleted { task_id, pattern, iterations, duration_ms, .. } => {
                format!("Pattern execution completed: {} ({}) - {} iterations in {}ms",
                    task_id, pattern, iterations, duration_ms)
            }
        }
    }

    /// Create a TaskStarted event
    pub fn task_started(task_id: impl Into<String>, description: impl Into<String>) -> Self {
        ExecutionEvent::TaskStarted {
            task_id: task_id.into(),
            description: description.into(),
            timestamp: Utc::now().timestamp(),
        }
    }

    /// Create a TaskCompleted event
    pub fn task_completed(
        task_id: impl Into<String>,
        result: Option<String>,
        duration_ms: u64,
    ) -> Self {
        ExecutionEvent::TaskCompleted {
            task_id: task_id.into(),
            result,
            timestamp: Utc::now().timestamp(),
            duration_ms,
        }
    }

    /// Create a TaskFailed event
    pub fn task_failed(
        task_id: impl Into<String>,
        error: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        ExecutionEvent::TaskFailed {
            task_id: task_id.into(),
            error: error.into(),
            timestamp: Utc::now().timestamp(),
            duration_ms,
        }
    }

    /// Create a TaskCancelled event
    pub fn task_cancelled(task_id: impl Into<String>) -> Self {
        ExecutionEvent::TaskCancelled {
            task_id: task_id.into(),
            timestamp: Utc::now().timestamp(),
        }
    }

    /// Create a WorkflowStarted event
    pub fn workflow_started(
        workflow_id: impl Into<String>,
        name: impl Into<String>,
        task_count: usize,
    ) -> Self {
        ExecutionEvent::WorkflowStarted {
            workflow_id: workflow_id.into(),
            name: name.into(),
            task_count,
            timestamp: Utc::now().timestamp(),
        }
    }

    /// Create a WorkflowCompleted event
    pub fn workflow_completed(
        workflow_id: impl Into<String>,
        completed_tasks: usize,
        failed_tasks: usize,
        duration_ms: u64,
    ) -> Self {
        ExecutionEvent::WorkflowCompleted {
            workflow_id: workflow_id.into(),
            completed_tasks,
            failed_tasks,
            timestamp: Utc::now().timestamp(),
            duration_ms,
        }
    }

    /// Create a WorkflowPaused event
    pub fn workflow_paused(workflow_id: impl Into<String>) -> Self {
        ExecutionEvent::WorkflowPaused {
            workflow_id: workflow_id.into(),
            timestamp: Utc::now().timestamp(),
        }
    }

    /// Create a WorkflowResumed event
    pub fn workflow_resumed(workflow_id: impl Into<String>) -> Self {
        ExecutionEvent::WorkflowResumed {
            workflow_id: workflow_id.into(),
            timestamp: Utc::now().timestamp(),
        }
    }

    /// Create a PatternExecutionStarted event
    pub fn pattern_execution_started(
        task_id: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        ExecutionEvent::PatternExecutionStarted {
            task_id: task_id.into(),
            pattern: pattern.into(),
            timestamp: Utc::now().timestamp(),
        }
    }

    /// Create a PatternExecutionCompleted event
    pub fn pattern_execution_completed(
        task_id: impl Into<String>,
        pattern: impl Into<String>,
        iterations: usize,
        duration_ms: u64,
    ) -> Self {
        ExecutionEvent::PatternExecutionCompleted {
            task_id: task_id.into(),
            pattern: pattern.into(),
            iterations,
            timestamp: Utc::now().timestamp(),
            duration_ms,
        }
    }
}

/// Event logger for recording execution events
#[derive(Debug, Clone)]
pub struct EventLogger {
    enabled: bool,
}

impl EventLogger {
    /// Create a new event logger
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Log an execution event
    pub fn log(&self, event: &ExecutionEvent) {
        if !self.enabled {
            return;
        }

        // Log using tracing infrastructure
        tracing::info!(
            event_type = ?event,
            timestamp = event.timestamp(),
            description = %event.description(),
            "Execution event"
        );
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(true)
    }
}
