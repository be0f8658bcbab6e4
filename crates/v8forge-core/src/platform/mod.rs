pub mod profile;

pub use profile::{
    library_convention, registry, supported_profiles, Architecture, BuildType,
    LibraryConvention, PlatformError, PlatformOs, PlatformProfile, TargetDescriptor,
};
