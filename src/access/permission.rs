use core::fmt;
use serde::{Deserialize, Serialize};

/// Access mode a task requests on a field.
///
/// `ReadWrite` is shorthand: recording it inserts both `Read` and `Write`, and
/// coalescing produces it again when a field ends up with mixed permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Permission {
    /// Field is named but not accessed.
    NoAccess,
    /// Read-only access.
    Read,
    /// Write-discard access.
    Write,
    /// Read followed by write.
    ReadWrite,
    /// Reduction through a registered operator.
    Reduction,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Permission::NoAccess => "NO_ACCESS",
            Permission::Read => "READ",
            Permission::Write => "WRITE",
            Permission::ReadWrite => "READ_WRITE",
            Permission::Reduction => "REDUCTION",
        };
        f.write_str(name)
    }
}
