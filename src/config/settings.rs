//! Lifetime settings for spawned stages

use serde::{Deserialize, Serialize};

/// What the coordinator does with its stages once the last prime is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShutdownPolicy {
    /// Detach every stage and keep the pipeline tail open, so all stages stay
    /// parked on their next send or receive until the process exits
    #[default]
    Abandon,
    /// Close the pipeline tail, let the hang-up cascade back to the generator
    /// and join every stage
    Join,
}

impl std::fmt::Display for ShutdownPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShutdownPolicy::Abandon => write!(f, "Abandon"),
            ShutdownPolicy::Join => write!(f, "Join"),
        }
    }
}
