pub mod manifest;
pub mod planner;

pub use manifest::{
    commit_message, info_contents, ArtifactManifest, DeploymentTarget, ManifestEntry,
};
pub use planner::{DeployError, DeploymentPathPlanner, PlanRequest};
