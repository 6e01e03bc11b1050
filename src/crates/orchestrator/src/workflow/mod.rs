//! Workflow orchestration module
//!
//! Provides multi-step workflow execution with conditional transitions
//! and state management.

pub mod executor;
pub mod llm_executor;

pub use executor::WorkflowExecutor;
pub use llm_executor::{LlmWorkflowExecutor, WorkflowExecutionResult, WorkflowStepInfo};
