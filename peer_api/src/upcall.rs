//! Completion upcalls

use crate::api::PeerApi;
use client_types::CompletionStatus;
use std::fmt;

/// A completion callback delivered by the cooperative scheduler
///
/// The upcall runs on the client's own stack at one of its yield points,
/// so it may re-enter the environment - revoking a lease and clearing its
/// own subscription slot are exactly what a completion handler does.
///
/// `FnOnce` makes single delivery structural: the environment consumes the
/// upcall to invoke it, so a second delivery has nothing left to call.
pub struct Upcall {
    f: Box<dyn FnOnce(&mut dyn PeerApi, CompletionStatus)>,
}

impl Upcall {
    /// Wraps a closure as an upcall
    pub fn new(f: impl FnOnce(&mut dyn PeerApi, CompletionStatus) + 'static) -> Self {
        Self { f: Box::new(f) }
    }

    /// Invokes the upcall, consuming it
    pub fn invoke(self, env: &mut dyn PeerApi, status: CompletionStatus) {
        (self.f)(env, status)
    }
}

impl fmt::Debug for Upcall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Upcall")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_types::{ClientError, Command, PeerHandle, PeerIdentity};
    use std::cell::Cell;
    use std::rc::Rc;

    struct NullEnv;

    impl PeerApi for NullEnv {
        fn resolve(&mut self, identity: &PeerIdentity) -> Result<PeerHandle, ClientError> {
            Err(ClientError::PeerNotFound(identity.clone()))
        }

        fn share(
            &mut self,
            _peer: PeerHandle,
            _region: Option<crate::SharedRegion>,
        ) -> Result<(), ClientError> {
            Ok(())
        }

        fn subscribe(
            &mut self,
            _peer: PeerHandle,
            _slot: u32,
            _upcall: Option<Upcall>,
        ) -> Result<(), ClientError> {
            Ok(())
        }

        fn send_command(
            &mut self,
            _peer: PeerHandle,
            _command: Command,
        ) -> Result<(), ClientError> {
            Ok(())
        }

        fn yield_wait(&mut self) {}

        fn yield_no_wait(&mut self) -> bool {
            false
        }
    }

    #[test]
    fn test_upcall_invoked_with_status() {
        let seen = Rc::new(Cell::new(None));
        let upcall = {
            let seen = Rc::clone(&seen);
            Upcall::new(move |_env, status| seen.set(Some(status)))
        };

        let mut env = NullEnv;
        upcall.invoke(&mut env, CompletionStatus::Success);
        assert_eq!(seen.get(), Some(CompletionStatus::Success));
    }

    #[test]
    fn test_upcall_may_reenter_environment() {
        let upcall = Upcall::new(|env, _status| {
            let _ = env.subscribe(PeerHandle::new(), crate::COMPLETION_SLOT, None);
        });

        let mut env = NullEnv;
        upcall.invoke(&mut env, CompletionStatus::Fail);
    }
}
