/// Outcome of asking to clear every bookmark.
///
/// Clearing takes two consecutive requests: the first arms a confirmation,
/// the second performs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearRequest {
    NothingToClear,
    ConfirmationRequired,
    Cleared(usize),
}

/// Pending-confirmation flag for the clear-all handshake.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ClearGuard {
    armed: bool,
}

impl ClearGuard {
    pub(crate) fn is_armed(self) -> bool {
        self.armed
    }

    /// Advances the handshake. Returns `true` when the clear should happen now.
    pub(crate) fn press(&mut self) -> bool {
        if self.armed {
            self.armed = false;
            true
        } else {
            self.armed = true;
            false
        }
    }

    pub(crate) fn disarm(&mut self) {
        self.armed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_press_fires_and_resets() {
        let mut guard = ClearGuard::default();
        assert!(!guard.press());
        assert!(guard.is_armed());
        assert!(guard.press());
        assert!(!guard.is_armed());
        assert!(!guard.press());
    }

    #[test]
    fn disarm_restarts_the_handshake() {
        let mut guard = ClearGuard::default();
        guard.press();
        guard.disarm();
        assert!(!guard.press());
    }
}
