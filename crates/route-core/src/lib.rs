pub mod config;
pub mod cost;
pub mod error;
pub mod escalation;
pub mod io;
pub mod paths;
pub mod router;
pub mod task;
pub mod tier;

pub use error::{Result, RouteError};
pub use router::{Router, RoutingDecision, Strategy};
pub use task::TaskDescriptor;
pub use tier::Tier;
