use serde::Serialize;

/// Serialized form used to decide whether local state diverged from the server.
pub fn snapshot_of<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

/// Proof that a read was issued; only the newest ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observed {
    /// Local state matches the last synced form.
    Clean,
    /// Caller must start the single writer.
    Write,
    /// A write is in flight; the change rides on its follow-up.
    Queued,
}

/// Bookkeeping for one view's editable state: the last synced snapshot, the
/// read sequence, and the single-writer flags.
#[derive(Debug, Default)]
pub struct Reconciler {
    baseline: Option<String>,
    generation: u64,
    posting: bool,
    dirty: bool,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_posting(&self) -> bool {
        self.posting
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn baseline(&self) -> Option<&str> {
        self.baseline.as_deref()
    }

    /// Reads are skipped while a write is in flight.
    pub fn begin_read(&mut self) -> Option<ReadTicket> {
        if self.posting {
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        Some(ReadTicket {
            generation: self.generation,
        })
    }

    /// Applies a read result unless a write or a newer read superseded it.
    pub fn accept_read(&mut self, ticket: ReadTicket, serialized: String) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.baseline = Some(serialized);
        true
    }

    pub fn is_current(&self, ticket: ReadTicket) -> bool {
        !self.posting && ticket.generation == self.generation
    }

    pub fn observe(&mut self, serialized: &str) -> Observed {
        match self.baseline.as_deref() {
            None => Observed::Clean,
            Some(baseline) if baseline == serialized => Observed::Clean,
            Some(_) if self.posting => {
                self.dirty = true;
                Observed::Queued
            }
            Some(_) => {
                self.posting = true;
                // Any read issued before this point carries pre-edit state.
                self.generation = self.generation.wrapping_add(1);
                Observed::Write
            }
        }
    }

    pub fn record_sent(&mut self, serialized: String) {
        self.baseline = Some(serialized);
    }

    /// Returns `true` when another write must follow with the latest value.
    pub fn write_succeeded(&mut self, latest: Option<&str>) -> bool {
        if std::mem::take(&mut self.dirty) {
            if let Some(latest) = latest {
                if self.baseline.as_deref() != Some(latest) {
                    return true;
                }
            }
        }
        self.posting = false;
        false
    }

    pub fn write_failed(&mut self) {
        self.posting = false;
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(serialized: &str) -> Reconciler {
        let mut reconciler = Reconciler::new();
        let ticket = reconciler.begin_read().unwrap();
        assert!(reconciler.accept_read(ticket, serialized.to_string()));
        reconciler
    }

    #[test]
    fn nothing_to_do_before_first_load() {
        let mut reconciler = Reconciler::new();
        assert_eq!(reconciler.observe("{}"), Observed::Clean);
        assert!(!reconciler.is_posting());
    }

    #[test]
    fn identical_snapshot_issues_no_write() {
        let mut reconciler = loaded(r#"{"pitch":0}"#);
        assert_eq!(reconciler.observe(r#"{"pitch":0}"#), Observed::Clean);
        assert!(!reconciler.is_posting());
    }

    #[test]
    fn divergence_starts_exactly_one_writer() {
        let mut reconciler = loaded(r#"{"pitch":0}"#);
        assert_eq!(reconciler.observe(r#"{"pitch":1}"#), Observed::Write);
        reconciler.record_sent(r#"{"pitch":1}"#.to_string());

        assert_eq!(reconciler.observe(r#"{"pitch":2}"#), Observed::Queued);
        assert_eq!(reconciler.observe(r#"{"pitch":3}"#), Observed::Queued);
        assert!(reconciler.is_dirty());

        assert!(reconciler.write_succeeded(Some(r#"{"pitch":3}"#)));
        assert!(reconciler.is_posting());
        reconciler.record_sent(r#"{"pitch":3}"#.to_string());

        assert!(!reconciler.write_succeeded(Some(r#"{"pitch":3}"#)));
        assert!(!reconciler.is_posting());
        assert_eq!(reconciler.baseline(), Some(r#"{"pitch":3}"#));
    }

    #[test]
    fn queued_change_reverted_before_completion_needs_no_follow_up() {
        let mut reconciler = loaded(r#"{"pitch":0}"#);
        assert_eq!(reconciler.observe(r#"{"pitch":1}"#), Observed::Write);
        reconciler.record_sent(r#"{"pitch":1}"#.to_string());
        assert_eq!(reconciler.observe(r#"{"pitch":2}"#), Observed::Queued);

        assert!(!reconciler.write_succeeded(Some(r#"{"pitch":1}"#)));
        assert!(!reconciler.is_posting());
        assert!(!reconciler.is_dirty());
    }

    #[test]
    fn reads_are_skipped_while_posting() {
        let mut reconciler = loaded("0");
        assert_eq!(reconciler.observe("1"), Observed::Write);
        assert!(reconciler.begin_read().is_none());
    }

    #[test]
    fn write_invalidates_reads_in_flight() {
        let mut reconciler = loaded("0");
        let ticket = reconciler.begin_read().unwrap();
        assert_eq!(reconciler.observe("1"), Observed::Write);
        reconciler.record_sent("1".to_string());
        assert!(!reconciler.write_succeeded(Some("1")));

        assert!(!reconciler.accept_read(ticket, "0".to_string()));
        assert_eq!(reconciler.baseline(), Some("1"));
    }

    #[test]
    fn older_read_arriving_last_is_discarded() {
        let mut reconciler = Reconciler::new();
        let first = reconciler.begin_read().unwrap();
        let second = reconciler.begin_read().unwrap();
        assert!(reconciler.accept_read(second, "new".to_string()));
        assert!(!reconciler.accept_read(first, "old".to_string()));
        assert_eq!(reconciler.baseline(), Some("new"));
    }

    #[test]
    fn failed_write_releases_the_writer() {
        let mut reconciler = loaded("0");
        assert_eq!(reconciler.observe("1"), Observed::Write);
        assert_eq!(reconciler.observe("2"), Observed::Queued);
        reconciler.write_failed();
        assert!(!reconciler.is_posting());
        assert!(!reconciler.is_dirty());
        assert!(reconciler.begin_read().is_some());
    }
}
