pub mod config;
pub mod plan;
pub mod route;
pub mod tiers;
