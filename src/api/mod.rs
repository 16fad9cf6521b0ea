//! HTTP boundary for the agent registry.
//!
//! Maps the registry operations onto the routes agents and clients use:
//!
//! | Route | Operation |
//! |---|---|
//! | `GET /` | health |
//! | `POST /register` | register an agent by URL |
//! | `GET /discover?skill=` | discover agents by skill |
//! | `GET /agents` | list every agent |
//! | `DELETE /unregister?url=` | remove an agent |

mod error;
mod handlers;
mod router;

pub use error::{ApiError, ErrorBody};
pub use handlers::{
    AgentView, DiscoverParams, HealthResponse, RegisterRequest, RegisterResponse,
    UnregisterParams, UnregisterResponse,
};
pub use router::{cors_layer, create_router};
