//! Assistant domain — typed client for the backend AI operations.
//!
//! External code should only use the items exported here.
//!
//!   - gateway.rs — AssistantGateway: one method per operation
//!   - types.rs   — request/response wire types, AssistantRequest/Response
//!   - policy.rs  — operation catalogue + minimum-input table
//!   - error.rs   — AssistantError taxonomy

pub mod error;
mod gateway;
pub mod policy;
pub mod types;

pub use error::{AssistantError, AssistantResult, GENERIC_RETRY_MESSAGE};
pub use gateway::AssistantGateway;
pub use policy::{InputRule, Operation, ShortInput};
pub use types::{
    AssistantRequest, AssistantResponse, ChatTurn, Comment, GeneratedContent, Role, Tone,
};
