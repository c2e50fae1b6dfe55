//! Readiness gate between intent delivery and the native core.
//!
//! The core starts asynchronously, so intents can arrive before it can take a
//! path. The gate remembers that one arrived and releases it once the core
//! reports ready. Only the fact that something is pending is kept here. The
//! event itself lives with the bridge, so the latest one wins.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GateState {
    Waiting { pending: bool },
    Ready,
}

#[derive(Debug)]
pub struct ReadinessGate {
    state: GateState,
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadinessGate {
    pub fn new() -> Self {
        Self {
            state: GateState::Waiting { pending: false },
        }
    }

    /// App launched with an intent. Marks it pending if it is one we handle.
    pub fn on_launch(&mut self, recognized: bool) {
        if let GateState::Waiting { pending } = &mut self.state {
            *pending |= recognized;
        }
    }

    /// New intent while running. Returns true if it should be handled now.
    pub fn on_event(&mut self) -> bool {
        match &mut self.state {
            GateState::Ready => true,
            GateState::Waiting { pending } => {
                *pending = true;
                false
            }
        }
    }

    /// Core is ready. Returns true if a pending intent must be handled now.
    /// Only the first call can return true.
    pub fn on_core_ready(&mut self) -> bool {
        let was_pending = matches!(self.state, GateState::Waiting { pending: true });
        self.state = GateState::Ready;
        was_pending
    }

    pub fn is_ready(&self) -> bool {
        self.state == GateState::Ready
    }

    pub fn is_pending(&self) -> bool {
        self.state == GateState::Waiting { pending: true }
    }
}
