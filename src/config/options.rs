use serde::{Deserialize, Serialize};

use crate::types::MappingTag;

/// Per-launch settings that do not affect the argument buffer.
///
/// `mapper` is library-local and translated through
/// [`LibraryConfig::mapper_id`](super::LibraryConfig::mapper_id).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherOptions {
    /// Library-local mapper the engine consults for placement decisions.
    #[serde(default)]
    pub mapper: u32,
    /// Tag handed to the mapper alongside the launch.
    #[serde(default)]
    pub tag: MappingTag,
}

impl LauncherOptions {
    /// Options selecting library-local mapper `mapper` with a zero tag.
    pub const fn with_mapper(mapper: u32) -> Self {
        Self { mapper, tag: 0 }
    }

    /// Same options with `tag`.
    pub const fn tagged(self, tag: MappingTag) -> Self {
        Self { tag, ..self }
    }
}
