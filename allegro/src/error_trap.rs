//! Process-wide promotion of recoverable faults into hard errors.
//!
//! Service applications must not limp along after a condition that would
//! normally be a warning: a half-ignored fault tends to surface later as
//! silent data corruption. This module installs a process-global "trap"
//! that converts recoverable faults (warnings, notices, deprecations)
//! into [`AllegroError::RuntimeFault`] values carrying severity, message
//! and source location.
//!
//! The trap is explicit global state, registered once at startup:
//!
//! - [`install`] arms the trap; calling it again is a no-op.
//! - [`set_mask`] controls which severities are trapped. A masked
//!   severity is silently ignored, mirroring a runtime error-reporting
//!   filter.
//! - [`raise`] is the reporting entry point; the [`fault!`] macro wraps
//!   it and captures `file!()`/`line!()` at the call site.
//!
//! Before the trap is armed, raised faults are logged through `tracing`
//! and otherwise ignored, so early-boot code can report conditions
//! without aborting the process.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::error::AllegroError;

static INSTALLED: AtomicBool = AtomicBool::new(false);
static MASK: AtomicU8 = AtomicU8::new(FaultMask::ALL.0);

/// Severity classes of recoverable runtime conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultSeverity {
    /// A condition that is almost certainly a bug in the caller.
    Warning,
    /// A condition worth surfacing but not necessarily a bug.
    Notice,
    /// Use of functionality scheduled for removal.
    Deprecation,
}

impl FaultSeverity {
    fn bit(self) -> u8 {
        match self {
            FaultSeverity::Warning => 0b001,
            FaultSeverity::Notice => 0b010,
            FaultSeverity::Deprecation => 0b100,
        }
    }
}

impl fmt::Display for FaultSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FaultSeverity::Warning => "warning",
            FaultSeverity::Notice => "notice",
            FaultSeverity::Deprecation => "deprecation",
        };
        write!(f, "{name}")
    }
}

/// Bit set of severities the trap currently promotes to errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultMask(u8);

impl FaultMask {
    /// Trap nothing; every raised fault is ignored.
    pub const NONE: FaultMask = FaultMask(0);
    /// Trap every severity. This is the default.
    pub const ALL: FaultMask = FaultMask(0b111);

    /// Returns whether `severity` is trapped under this mask.
    pub fn traps(self, severity: FaultSeverity) -> bool {
        self.0 & severity.bit() != 0
    }

    /// Returns this mask with `severity` additionally trapped.
    pub fn with(self, severity: FaultSeverity) -> FaultMask {
        FaultMask(self.0 | severity.bit())
    }

    /// Returns this mask with `severity` no longer trapped.
    pub fn without(self, severity: FaultSeverity) -> FaultMask {
        FaultMask(self.0 & !severity.bit())
    }
}

impl Default for FaultMask {
    fn default() -> Self {
        FaultMask::ALL
    }
}

/// Arms the trap for the remainder of the process. Idempotent.
pub fn install() {
    INSTALLED.store(true, Ordering::SeqCst);
}

/// Returns whether the trap has been armed.
pub fn is_installed() -> bool {
    INSTALLED.load(Ordering::SeqCst)
}

/// Replaces the active severity mask.
pub fn set_mask(mask: FaultMask) {
    MASK.store(mask.0, Ordering::SeqCst);
}

/// Returns the active severity mask.
pub fn mask() -> FaultMask {
    FaultMask(MASK.load(Ordering::SeqCst))
}

/// Reports a recoverable fault.
///
/// Returns `Err(RuntimeFault)` when the trap is armed and the severity is
/// trapped by the active mask. Masked faults return `Ok(())` silently.
/// When the trap was never armed, the fault is logged and `Ok(())` is
/// returned.
///
/// Prefer the [`fault!`] macro, which fills in the source location.
pub fn raise(
    severity: FaultSeverity,
    message: impl Into<String>,
    file: &'static str,
    line: u32,
) -> Result<(), AllegroError> {
    let message = message.into();
    if !is_installed() {
        tracing::warn!(%severity, file, line, "{message}");
        return Ok(());
    }
    if !mask().traps(severity) {
        return Ok(());
    }
    Err(AllegroError::RuntimeFault {
        severity,
        message,
        file,
        line,
    })
}

/// Reports a recoverable fault at the call site.
///
/// ```ignore
/// fault!(FaultSeverity::Warning, "chunk {} was truncated", id)?;
/// ```
#[macro_export]
macro_rules! fault {
    ($severity:expr, $($arg:tt)*) => {
        $crate::error_trap::raise($severity, format!($($arg)*), file!(), line!())
    };
}
