use std::process::ExitCode;

use crate::tail::TailError;

/// Fatal outcomes of a run, each with its own process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Config,
    StoreReset,
    LiveDataMissing,
    LiveDataRead,
    Unexpected,
}

impl Failure {
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Config | Self::Unexpected => 1,
            Self::StoreReset => 2,
            Self::LiveDataMissing => 10,
            Self::LiveDataRead => 11,
        }
    }

    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

impl From<&TailError> for Failure {
    fn from(error: &TailError) -> Self {
        match error {
            TailError::NotFound { .. } => Self::LiveDataMissing,
            TailError::Read { .. } => Self::LiveDataRead,
        }
    }
}
