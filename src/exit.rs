// src/exit.rs
//! Process exit codes for `repoaudit`.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum AuditExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (I/O, config, unknown category).
    Error = 1,
    /// The repository had no analyzable files.
    EmptyRepository = 2,
}

impl AuditExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for AuditExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
