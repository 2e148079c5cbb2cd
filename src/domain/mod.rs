//! Domain values for the formatter bridge
//!
//! Pure value types without any I/O concerns.

mod coordinate;
mod features;
mod identity;

pub use coordinate::{compare_versions, version_lt, CoordinateError, LibraryCoordinate};
pub use features::{Feature, FeatureRequest, DEFAULT_STYLE};
pub use identity::ConfigurationIdentity;
