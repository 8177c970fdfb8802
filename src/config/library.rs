use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{LaunchResult, UsageError};
use crate::types::{MapperId, TaskId};

/// Errors raised while loading or validating a [`LibraryConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON or does not match the schema.
    #[error("failed to parse library configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// The library name is empty.
    #[error("library name must not be empty")]
    EmptyName,
    /// The library reserves no task ids.
    #[error("library `{0}` reserves no task ids")]
    NoTasks(String),
    /// `base + count` does not fit the engine's id space.
    #[error("{kind} id range of `{library}` overflows: base {base} + count {count}")]
    RangeOverflow {
        /// Library name.
        library: String,
        /// `"task"` or `"mapper"`.
        kind: &'static str,
        /// First reserved id.
        base: u32,
        /// Number of reserved ids.
        count: u32,
    },
}

/// Engine ids reserved for one library.
///
/// Library-local ids are translated as `base + local` and must stay below the
/// reserved count.
///
/// | Field | Default |
/// |-------|---------|
/// | `max_mappers` | `1` |
/// | `mapper_id_base` | `0` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Library name, used in diagnostics.
    pub name: String,
    /// First engine task id owned by the library.
    pub task_id_base: u32,
    /// Number of task ids owned by the library.
    pub max_tasks: u32,
    /// First engine mapper id owned by the library.
    #[serde(default)]
    pub mapper_id_base: u32,
    /// Number of mapper ids owned by the library.
    #[serde(default = "default_max_mappers")]
    pub max_mappers: u32,
}

fn default_max_mappers() -> u32 {
    1
}

impl LibraryConfig {
    /// Configuration reserving `max_tasks` task ids from `task_id_base` and a
    /// single mapper id `0`.
    pub fn new(name: impl Into<String>, task_id_base: u32, max_tasks: u32) -> Self {
        Self {
            name: name.into(),
            task_id_base,
            max_tasks,
            mapper_id_base: 0,
            max_mappers: default_max_mappers(),
        }
    }

    /// Sets the mapper id range.
    pub fn with_mappers(mut self, mapper_id_base: u32, max_mappers: u32) -> Self {
        self.mapper_id_base = mapper_id_base;
        self.max_mappers = max_mappers;
        self
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: LibraryConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that the name is set and both ranges fit in `u32`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.max_tasks == 0 {
            return Err(ConfigError::NoTasks(self.name.clone()));
        }
        self.check_range("task", self.task_id_base, self.max_tasks)?;
        self.check_range("mapper", self.mapper_id_base, self.max_mappers)
    }

    fn check_range(&self, kind: &'static str, base: u32, count: u32) -> Result<(), ConfigError> {
        match base.checked_add(count) {
            Some(_) => Ok(()),
            None => Err(ConfigError::RangeOverflow {
                library: self.name.clone(),
                kind,
                base,
                count,
            }),
        }
    }

    /// Engine task id of library-local task `local`.
    pub fn task_id(&self, local: u32) -> LaunchResult<TaskId> {
        match translate(self.task_id_base, self.max_tasks, local) {
            Some(id) => Ok(TaskId(id)),
            None => Err(UsageError::TaskIdOutOfRange {
                library: self.name.clone(),
                local,
                count: self.max_tasks,
            }
            .into()),
        }
    }

    /// Engine mapper id of library-local mapper `local`.
    pub fn mapper_id(&self, local: u32) -> LaunchResult<MapperId> {
        match translate(self.mapper_id_base, self.max_mappers, local) {
            Some(id) => Ok(MapperId(id)),
            None => Err(UsageError::MapperIdOutOfRange {
                library: self.name.clone(),
                local,
                count: self.max_mappers,
            }
            .into()),
        }
    }
}

fn translate(base: u32, count: u32, local: u32) -> Option<u32> {
    if local < count {
        base.checked_add(local)
    } else {
        None
    }
}
