//! Domain model for the agent registry.
//!
//! Agent cards and skills are immutable values parsed from an agent's
//! well-known endpoint. An [`AgentRecord`] pairs a card with the liveness
//! bookkeeping the registry keeps for its [`AgentUrl`]. All infrastructure
//! concerns are kept outside the domain boundary.

mod card;
mod error;
mod query;
mod record;
mod url;

pub use card::{AgentCard, Skill};
pub use error::RegistryDomainError;
pub use query::SkillQuery;
pub use record::AgentRecord;
pub use url::AgentUrl;
