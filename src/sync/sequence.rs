use std::cell::Cell;
use std::rc::Rc;

/// Numbers read requests of a read-only view so that only the newest response
/// is applied.
#[derive(Debug, Clone, Default)]
pub struct ReadSequence {
    latest: Rc<Cell<u64>>,
}

impl ReadSequence {
    pub fn begin(&self) -> u64 {
        let next = self.latest.get().wrapping_add(1);
        self.latest.set(next);
        next
    }

    pub fn is_current(&self, request: u64) -> bool {
        self.latest.get() == request
    }
}
