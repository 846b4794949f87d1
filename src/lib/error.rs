use std::{process::ExitStatus, time::Duration};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to spawn {cmd:?}: {source}")]
    Spawn {
        cmd: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command failure: cmd={cmd:?}, status={status}, stderr={stderr:?}")]
    CommandFailed {
        cmd: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Timed-out after {timeout:?}: cmd={cmd:?}")]
    Timeout { cmd: String, timeout: Duration },

    #[error("Interface not found: {0:?}")]
    InterfaceNotFound(String),

    #[error("Field {field:?} not found in interface {interface:?}")]
    FieldNotFound { interface: String, field: String },

    #[error("No interface could be parsed from the given dump")]
    Unparseable,

    #[error("Invalid size {value:?} for mount point {mount_point:?}")]
    InvalidSize { mount_point: String, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
