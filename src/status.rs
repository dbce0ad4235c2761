//! Device status codes and their human-readable classification.
//!
//! The integer values follow the driver library's convention, where zero is
//! success and every failure is a small negative number.

use num_enum::FromPrimitive;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(i32)]
pub enum Status {
    Success = 0,
    Unsupported = -1,
    TypeMismatch = -2,
    Error = -3,
    IO = -4,
    Memory = -5,
    Protocol = -6,
    Timeout = -7,
    // 1 is never returned by a device; it only keeps the discriminants unique
    #[num_enum(catch_all)]
    Unknown(i32) = 1,
}

impl Status {
    pub fn code(&self) -> i32 {
        match *self {
            Status::Success => 0,
            Status::Unsupported => -1,
            Status::TypeMismatch => -2,
            Status::Error => -3,
            Status::IO => -4,
            Status::Memory => -5,
            Status::Protocol => -6,
            Status::Timeout => -7,
            Status::Unknown(code) => code,
        }
    }

    pub fn is_success(&self) -> bool {
        *self == Status::Success
    }

    pub fn message(&self) -> &'static str {
        match self {
            Status::Success => "Success",
            Status::Unsupported => "Unsupported operation",
            Status::TypeMismatch => "Device type mismatch",
            Status::Error => "Generic error",
            Status::IO => "Input/output error",
            Status::Memory => "Memory error",
            Status::Protocol => "Protocol error",
            Status::Timeout => "Timeout",
            Status::Unknown(_) => "Unknown error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Classifies a raw status code. Total: codes outside the known set map to
/// "Unknown error".
pub fn status_to_message(code: i32) -> &'static str {
    Status::from(code).message()
}
