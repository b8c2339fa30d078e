//! Pure conversation flow state machine
//!
//! State changes are pure transitions; side effects are described as
//! values and executed by the runtime.

mod browsing;
pub mod dispatch;
mod effect;
pub mod event;
pub(crate) mod script;
pub mod state;
pub mod transition;


pub use effect::{DelayKind, Effect, GatewayCall};
pub use event::Event;
pub use state::{BrowsingStep, ConversationMode, FlowContext, FlowState};
pub use transition::{transition, TransitionError, TransitionResult};
