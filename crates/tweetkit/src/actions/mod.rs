//! Action system for agent capability dispatch
//!
//! Design: Each action declares the messages it can handle via `validate()`
//! and performs the work via `handle()`. ActionRegistry dispatches to the
//! first validating action.

mod parse_post;

pub use parse_post::{ParsePostAction, ParsePostActionBuilder};

use crate::types::{ActionExample, ActionInput, ActionResult, Message, State};
use async_trait::async_trait;
use schemars::schema_for;
use std::sync::Arc;

/// Trait for agent actions
///
/// The host runtime calls `validate()` speculatively, possibly many times per
/// message, so it must be cheap and free of side effects. `handle()` is only
/// called after a successful validation, but must cope with any message.
#[async_trait]
pub trait Action: Send + Sync {
    /// Unique action name, e.g. `PARSE_TWEET`
    fn name(&self) -> &'static str;

    /// Human description used by the runtime for matching
    fn description(&self) -> &'static str;

    /// Alternative names the runtime may match against
    fn similes(&self) -> &'static [&'static str];

    /// Example conversations for few-shot matching
    fn examples(&self) -> &'static [&'static [ActionExample]];

    /// Tool input schema as JSON
    ///
    /// Defaults to [`ActionInput`], a single `text` field carrying the
    /// message.
    fn input_schema(&self) -> serde_json::Value {
        let schema = schema_for!(ActionInput);
        serde_json::to_value(schema).unwrap_or_default()
    }

    /// Returns true if this action can handle the message
    fn validate(&self, message: &Message) -> bool;

    /// Run the action
    ///
    /// Never fails: every error path is reported as
    /// [`ActionResult::Failure`].
    async fn handle(&self, message: &Message, state: Option<&State>) -> ActionResult;
}

/// Registry of actions held by the runtime
///
/// Maintains actions in registration order. Dispatch uses the first one
/// whose `validate()` accepts the message.
#[derive(Default)]
pub struct ActionRegistry {
    actions: Vec<Arc<dyn Action>>,
}

impl ActionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action
    ///
    /// Actions are checked in registration order, so register more
    /// specific actions before generic ones.
    pub fn register(&mut self, action: Arc<dyn Action>) {
        self.actions.push(action);
    }

    /// Look up an action by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Action>> {
        self.actions
            .iter()
            .find(|action| action.name() == name)
            .cloned()
    }

    /// Registered actions, in order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Action>> {
        self.actions.iter()
    }

    /// Names of registered actions, in order
    pub fn names(&self) -> Vec<&'static str> {
        self.actions.iter().map(|action| action.name()).collect()
    }

    /// All actions that accept the message
    pub fn validating(&self, message: &Message) -> Vec<Arc<dyn Action>> {
        self.actions
            .iter()
            .filter(|action| action.validate(message))
            .cloned()
            .collect()
    }

    /// Handle a message with the first action that validates it
    ///
    /// Returns `None` if no registered action accepts the message.
    pub async fn dispatch(&self, message: &Message, state: Option<&State>) -> Option<ActionResult> {
        for action in &self.actions {
            if action.validate(message) {
                tracing::debug!(action = action.name(), "Using action");
                return Some(action.handle(message, state).await);
            }
        }

        tracing::debug!("No action accepted message");
        None
    }
}
