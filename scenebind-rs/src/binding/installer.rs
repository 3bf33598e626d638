//! Installer: a group of bindings committed together. Same idea as a module registering its routes.

use super::binder::Binder;
use super::error::BindError;

/// Group of related bindings; `binder.install(&mut installer)` runs it.
pub trait Installer {
    fn install(&mut self, binder: &mut Binder) -> Result<(), BindError>;
}

impl<F> Installer for F
where
    F: FnMut(&mut Binder) -> Result<(), BindError>,
{
    fn install(&mut self, binder: &mut Binder) -> Result<(), BindError> {
        self(binder)
    }
}
