//! Single-slot completion rendezvous
//!
//! The completion upcall and the code that asked for the request run on
//! the same thread but on different logical stack frames. The rendezvous
//! is the one cell both sides agree on: the upcall fills it exactly once,
//! the requester polls it or attaches a continuation.

use client_types::CompletionStatus;
use std::cell::RefCell;
use std::rc::Rc;

struct SlotState {
    status: Option<CompletionStatus>,
    continuation: Option<Box<dyn FnOnce(CompletionStatus)>>,
}

/// The producer half of a rendezvous
///
/// Held by the completion upcall. Completing consumes the slot, so a
/// status can only ever be recorded once per request.
pub struct CompletionSlot {
    state: Rc<RefCell<SlotState>>,
}

/// The consumer half of a rendezvous
///
/// Held by the requester (inside a `PendingRequest`). Cloneable so a
/// caller can keep polling after handing one copy elsewhere.
#[derive(Clone)]
pub struct CompletionFuture {
    state: Rc<RefCell<SlotState>>,
}

impl CompletionSlot {
    /// Creates a connected slot/future pair
    pub fn new() -> (CompletionSlot, CompletionFuture) {
        let state = Rc::new(RefCell::new(SlotState {
            status: None,
            continuation: None,
        }));
        (
            CompletionSlot {
                state: Rc::clone(&state),
            },
            CompletionFuture { state },
        )
    }

    /// Records the status and fires the continuation, if any
    ///
    /// The cell borrow is released before the continuation runs, so the
    /// continuation may itself poll the future.
    pub fn complete(self, status: CompletionStatus) {
        let continuation = {
            let mut state = self.state.borrow_mut();
            if state.status.is_some() {
                return;
            }
            state.status = Some(status);
            state.continuation.take()
        };
        if let Some(continuation) = continuation {
            continuation(status);
        }
    }
}

impl CompletionFuture {
    /// Returns the status if the request has completed
    pub fn poll(&self) -> Option<CompletionStatus> {
        self.state.borrow().status
    }

    /// Checks if the request has completed
    pub fn is_done(&self) -> bool {
        self.poll().is_some()
    }

    /// Attaches a continuation to run at completion
    ///
    /// If the request already completed, the continuation runs
    /// immediately. At most one continuation is held; attaching again
    /// replaces the previous one.
    pub fn on_complete<F: FnOnce(CompletionStatus) + 'static>(&self, f: F) {
        let already = self.state.borrow().status;
        match already {
            Some(status) => f(status),
            None => self.state.borrow_mut().continuation = Some(Box::new(f)),
        }
    }
}
