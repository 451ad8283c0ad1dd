//! Permission mutation trait

/// Capability that changes the permission bits of a path
///
/// This is the only write operation permwalk performs, and only the chmod plan
/// calls it.
pub trait PermissionSetter<P> {
    /// The error type raised when a change fails
    type Error;

    /// Set the permission bits of `path` to `mode`
    ///
    /// # Parameters
    ///
    /// * `path` - Entry to change
    /// * `mode` - Permission bits, e.g. `0o755`
    ///
    /// # Errors
    ///
    /// Returns `Err(Self::Error)` if the change is refused or the path is gone.
    fn set_permissions(&self, path: &P, mode: u32) -> Result<(), Self::Error>;
}
