use std::fmt;

/// Ordering tier of a system within one frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Runs first, in registration order.
    Normal,
    /// Runs after every normal-phase system, in registration order.
    Late,
}

/// Handle assigned to each registered system.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SystemHandle {
    serial: u32,
    phase: Phase,
}

impl SystemHandle {
    pub(crate) fn new(serial: u32, phase: Phase) -> Self {
        Self { serial, phase }
    }

    /// Registration serial; unique for the lifetime of a scheduler.
    #[inline]
    pub fn index(self) -> u32 {
        self.serial
    }

    #[inline]
    pub fn phase(self) -> Phase {
        self.phase
    }
}

impl fmt::Display for SystemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.serial)
    }
}
