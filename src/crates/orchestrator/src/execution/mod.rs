//! Task Execution Module
//!
//! Provides task execution capabilities with LLM integration,
//! state management, and streaming support.

pub mod task_engine;

pub use task_engine::TaskExecutionEngine;
