/// Ticket handed out when a fetch starts
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Generation(u64);

/// Staleness guard for the fetches of one view
///
/// Every (re)start or teardown bumps the generation, so a response carrying an
/// older ticket is known to belong to a superseded request and gets dropped.
/// The request itself is never cancelled.
#[derive(Debug, Default)]
pub struct StaleGuard {
    current: u64,
}

impl StaleGuard {
    pub fn new() -> StaleGuard {
        StaleGuard::default()
    }

    /// Invalidate everything in flight and hand out a fresh ticket
    pub fn begin(&mut self) -> Generation {
        self.current += 1;
        Generation(self.current)
    }

    /// Ticket for a follow-up request that must not invalidate the others
    pub fn current(&self) -> Generation {
        Generation(self.current)
    }

    pub fn invalidate(&mut self) {
        self.current += 1;
    }

    pub fn is_current(&self, g: Generation) -> bool {
        g.0 == self.current
    }
}
