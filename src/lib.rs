//! chatflow - conversation flow engine for an embeddable chat widget
//!
//! A pure state machine drives a scripted conversation (message timeline,
//! typing reveals, quick-reply branches, a browsing consent sub-flow, and a
//! validated project form); an async runtime executes the resulting effects
//! and streams UI events back to the host.

#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod engine;
pub mod gateway;
pub mod runtime;
pub mod timeline;
pub mod validate;

pub use config::{EngineConfig, ScriptTiming};
pub use engine::{
    transition, BrowsingStep, ConversationMode, DelayKind, Effect, Event, FlowContext, FlowState,
    GatewayCall, TransitionError, TransitionResult,
};
pub use gateway::{Gateway, GatewayError, GatewayErrorKind, GatewayReply, HttpGateway};
pub use runtime::{ConversationHandle, ConversationRuntime, UiEvent};
pub use timeline::{Message, MessageId, Sender, Timeline};
pub use validate::{ContactError, ContactInfo, FormErrors, FormGate, ProjectFieldErrors};
