//! Router and supervisor configuration
//!
//! Defines configuration for dynamic pattern selection and routing based on
//! input messages and context.

use serde::{Deserialize, Serialize};

/// Router/Supervisor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Router identifier
    pub id: String,
    /// Description of the router's purpose
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Pattern registry configuration
    pub registry: RegistryConfig,
    /// Routing policy settings
    pub settings: RouterSettings,
}

/// Pattern registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Allowed pattern IDs (allowlist)
    #[serde(default)]
    pub allow: Vec<String>,
    /// Blocked pattern IDs (denylist)
    #[serde(default)]
    pub deny: Vec<String>,
}

/// Router settings for pattern selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterSettings {
    /// Route policy configuration
    pub route_policy: RoutePolicyConfig,
    /// Termination conditions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination: Option<TerminationConfig>,
    /// Guard configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guards: Option<GuardConfig>,
}

/// Route policy with rules for pattern selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePolicyConfig {
    /// Routing rules (evaluated in order)
    #[serde(default)]
    pub rules: Vec<RouteRule>,
    /// Default pattern IDs if no rules match
    #[serde(default)]
    pub default: Vec<String>,
}

/// A single routing rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRule {
    /// Rule name/identifier
    pub name: String,
    /// Conditions for this rule to match
    pub when: RuleCondition,
    /// Preferred patterns if rule matches
    pub prefer: Vec<String>,
    /// Rule priority (higher = evaluated first)
    #[serde(default)]
    pub priority: i32,
}

/// Conditions for rule matching
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleCondition {
    /// Single condition
    Single(ConditionCheck),
    /// All conditions must match (AND)
    All { all: Vec<ConditionCheck> },
    /// Any condition must match (OR)
    Any { any: Vec<ConditionCheck> },
    /// No conditions must match (NOT)
    Not { not: Vec<ConditionCheck> },
}

/// Individual condition check
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConditionCheck {
    /// Match text against regex pattern
    Text { pattern: String },
    /// Check if context has a specific key
    ContextHas { key: String },
    /// Check if context key equals value
    ContextEquals { key: String, value: serde_json::Value },
    /// Check if input contains keywords
    Contains { keywords: Vec<String> },
    /// Custom condition expression
    Expression { expr: String },
}

/// Termination conditions for routing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminationConfig {
    /// Any of these conditions triggers termination
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any: Option<Vec<TerminationCondition>>,
    /// All of these conditions must be met
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<Vec<TerminationCondition>>,
}

/// Individual termination condition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TerminationCondition {
    /// Maximum number of steps
    MaxSteps(usize),
    /// Output contains specific keywords
    Contains(Vec<String>),
    /// Pattern name matches
    PatternName(String),
    /// Custom termination expression
    Expression(String),
}

/// Guard configuration for router safety
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Enforce registry allowlist
    #[serde(default = "default_true")]
    pub enforce_registry: bool,
    /// Fallback to default if no matches
    #[serde(default = "default_true")]
    pub fallback_to_default: bool,
    /// Maximum routing attempts
    #[serde(default = "default_max_routing_attempts")]
    pub max_routing_attempts: usize,
}

fn default_true() -> bool {
    true
}

fn default_max_routing_attempts() -> usize {
    10
}
