//! Domain models for osgi-target
//!
//! Plain value types shared by the index, the resolver and the sinks.

pub mod bundle;
pub mod platform;

pub use bundle::ResolvedBundle;
pub use platform::PlatformDescriptor;
