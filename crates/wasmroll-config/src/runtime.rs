//! Hand-off seam to the external bundler runtime.

use crate::descriptor::BuildDescriptor;

/// A consumer of resolved build plans.
///
/// The descriptor is moved in: each resolution feeds exactly one build.
/// Compilation, watching and serving all happen behind this trait.
pub trait BuildRuntime {
    type Output;
    type Error;

    fn execute(&mut self, descriptor: BuildDescriptor) -> Result<Self::Output, Self::Error>;
}
