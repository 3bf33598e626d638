//! Errors raised while building a binding. Every variant aborts the bind call that raised it.

use scenebind_core::ContainerError;
use thiserror::Error;

use super::locator::LocationSpec;

#[derive(Error, Debug)]
pub enum BindError {
    #[error("{concrete} is not assignable to {key}")]
    NotAssignable {
        key: &'static str,
        concrete: &'static str,
    },
    #[error("{concrete} is neither a container entity nor an attachable behavior")]
    UnsupportedCategory { concrete: &'static str },
    #[error("{key} is not a loadable asset type")]
    NotObjectCategory { key: &'static str },
    #[error("no target found: {0}")]
    TargetMissing(String),
    #[error("catalog has no resource named {name:?}")]
    ResourceMissing { name: String },
    #[error("{concrete} cannot be built from {target}")]
    IncompatibleTarget {
        concrete: &'static str,
        target: String,
    },
    #[error("transient bindings need a template instantiation location, got {0}")]
    TransientRequiresTemplate(LocationSpec),
    #[error(transparent)]
    Container(#[from] ContainerError),
    #[error("installer failed: {0}")]
    Installer(String),
}

impl BindError {
    /// Fold a host error raised inside an installer: `.map_err(BindError::installer)?`.
    pub fn installer<E: std::error::Error>(error: E) -> Self {
        BindError::Installer(error.to_string())
    }
}
