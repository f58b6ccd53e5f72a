//! Signal handling while the launcher waits on its child.
//!
//! SIGINT and SIGQUIT from the terminal already reach the child through the
//! foreground process group, so the launcher ignores them and survives to
//! report. SIGTERM and SIGHUP are usually aimed at the launcher alone and are
//! re-sent to the child.
//!
//! The launcher cannot tell a terminal SIGINT from one sent with `kill(1)`,
//! so `kill -INT <launcher>` is ignored too. A child running in the
//! background only stops once it exits or the launcher gets SIGTERM or SIGHUP.

use std::os::raw::c_int;
use std::sync::atomic::{AtomicI32, Ordering};

use nix::sys::signal::{kill, sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
use nix::unistd::Pid;

const IGNORED: [Signal; 2] = [Signal::SIGINT, Signal::SIGQUIT];
const FORWARDED: [Signal; 2] = [Signal::SIGTERM, Signal::SIGHUP];

// 0 means no child to forward to.
static CHILD_PID: AtomicI32 = AtomicI32::new(0);

/// Pid that forwarded signals currently go to, if a guard is live.
pub fn forward_target() -> Option<u32> {
    match CHILD_PID.load(Ordering::SeqCst) {
        pid if pid > 0 => Some(pid as u32),
        _ => None,
    }
}

extern "C" fn forward_to_child(signum: c_int) {
    let pid = CHILD_PID.load(Ordering::SeqCst);
    if pid <= 0 {
        return;
    }
    if let Ok(sig) = Signal::try_from(signum) {
        let _ = kill(Pid::from_raw(pid), sig);
    }
}

/// Restores the previous dispositions when dropped.
///
/// Must be created after the child is spawned: an ignored disposition
/// survives exec and would leak into the child.
pub struct ForwardGuard {
    saved: Vec<(Signal, SigAction)>,
}

impl ForwardGuard {
    pub fn install(child: u32) -> ForwardGuard {
        CHILD_PID.store(child as i32, Ordering::SeqCst);

        let ignore = SigAction::new(SigHandler::SigIgn, SaFlags::empty(), SigSet::empty());
        let forward = SigAction::new(
            SigHandler::Handler(forward_to_child),
            SaFlags::SA_RESTART,
            SigSet::empty(),
        );

        let mut saved = Vec::with_capacity(IGNORED.len() + FORWARDED.len());
        let plan = IGNORED
            .iter()
            .map(|s| (*s, &ignore))
            .chain(FORWARDED.iter().map(|s| (*s, &forward)));
        for (sig, action) in plan {
            // Safe: the handler only touches an atomic and calls kill(2),
            // both async-signal-safe.
            match unsafe { sigaction(sig, action) } {
                Ok(old) => saved.push((sig, old)),
                Err(e) => log::warn!("cannot install handler for {}: {}", sig, e),
            }
        }
        ForwardGuard { saved }
    }
}

impl Drop for ForwardGuard {
    fn drop(&mut self) {
        // The child may already be reaped; stop forwarding before anything else.
        CHILD_PID.store(0, Ordering::SeqCst);
        for (sig, old) in self.saved.drain(..).rev() {
            if let Err(e) = unsafe { sigaction(sig, &old) } {
                log::warn!("cannot restore handler for {}: {}", sig, e);
            }
        }
    }
}

