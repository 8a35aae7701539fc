use monsvc_types::Status;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("status transition from '{from}' to '{to}' is not allowed")]
pub struct TransitionError {
    pub from: Status,
    pub to: Status,
}

/// Decides whether a machine in status `current` may report `requested`.
pub trait TransitionPolicy: Send + Sync {
    fn name(&self) -> &'static str;

    fn allows(&self, current: Status, requested: Status) -> bool;

    fn check(&self, current: Status, requested: Status) -> Result<(), TransitionError> {
        if self.allows(current, requested) {
            Ok(())
        } else {
            Err(TransitionError {
                from: current,
                to: requested,
            })
        }
    }
}

/// Any recognized status may replace any other.
#[derive(Debug, Clone, Copy, Default)]
pub struct Permissive;

impl TransitionPolicy for Permissive {
    fn name(&self) -> &'static str {
        "permissive"
    }

    fn allows(&self, _current: Status, _requested: Status) -> bool {
        true
    }
}

/// Only the natural provisioning order is accepted:
/// `init -> os_start -> {os_fail | os_end} -> ek_start -> {ek_fail | finish}`.
///
/// Re-reporting the current status is always allowed, and a failed stage may
/// be retried (`os_fail -> init | os_start`, `ek_fail -> ek_start`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Progression;

impl TransitionPolicy for Progression {
    fn name(&self) -> &'static str {
        "progression"
    }

    fn allows(&self, current: Status, requested: Status) -> bool {
        use Status::*;
        current == requested
            || matches!(
                (current, requested),
                (Init, OsStart)
                    | (OsStart, OsFail)
                    | (OsStart, OsEnd)
                    | (OsEnd, EkStart)
                    | (EkStart, EkFail)
                    | (EkStart, Finish)
                    | (OsFail, Init)
                    | (OsFail, OsStart)
                    | (EkFail, EkStart)
            )
    }
}
