pub mod args;
pub mod artifact;
pub mod config;
pub mod deploy;
pub mod layout;
pub mod platform;

pub use deploy::{ArtifactManifest, DeployError, DeploymentPathPlanner, ManifestEntry, PlanRequest};
pub use layout::BuildLayout;
pub use platform::{Architecture, BuildType, PlatformError, PlatformOs, PlatformProfile};
