use super::reconciler::{snapshot_of, Observed, Reconciler};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

/// A remote resource a view mirrors: read as a whole, written back through its
/// editable part.
#[allow(async_fn_in_trait)]
pub trait Endpoint {
    type Snapshot: Clone;
    type Editable: Serialize;

    fn editable(snapshot: &Self::Snapshot) -> &Self::Editable;

    async fn fetch(&self) -> Result<Self::Snapshot, String>;

    async fn push(&self, snapshot: &Self::Snapshot) -> Result<(), String>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Refresh<T> {
    Fresh(T),
    /// A write is in flight; server state would clobber it.
    Skipped,
    /// Superseded by a write or a newer read while in flight.
    Stale,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    Converged,
    Failed(String),
}

/// A write that failed, and the refresh that replaced the unsynced edit.
#[derive(Debug, Clone, PartialEq)]
pub struct Resync<T> {
    pub error: String,
    pub refresh: Refresh<T>,
}

/// One view's connection to its endpoint. Clones share the reconciler, so the
/// poll task, the change observer and the writer all see the same flags.
pub struct SyncSession<E> {
    endpoint: Rc<E>,
    state: Rc<RefCell<Reconciler>>,
}

impl<E> Clone for SyncSession<E> {
    fn clone(&self) -> Self {
        Self {
            endpoint: self.endpoint.clone(),
            state: self.state.clone(),
        }
    }
}

impl<E: Endpoint> SyncSession<E> {
    pub fn new(endpoint: E) -> Self {
        Self {
            endpoint: Rc::new(endpoint),
            state: Rc::new(RefCell::new(Reconciler::new())),
        }
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    pub fn is_posting(&self) -> bool {
        self.state.borrow().is_posting()
    }

    pub async fn refresh(&self) -> Refresh<E::Snapshot> {
        let Some(ticket) = self.state.borrow_mut().begin_read() else {
            return Refresh::Skipped;
        };

        let result = self.endpoint.fetch().await;

        if !self.state.borrow().is_current(ticket) {
            return Refresh::Stale;
        }
        match result {
            Ok(snapshot) => match snapshot_of(E::editable(&snapshot)) {
                Ok(serialized) => {
                    self.state.borrow_mut().accept_read(ticket, serialized);
                    Refresh::Fresh(snapshot)
                }
                Err(e) => Refresh::Failed(e),
            },
            Err(e) => Refresh::Failed(e),
        }
    }

    /// Change observer. Returns `true` when the caller has to spawn
    /// [`SyncSession::write`]; a change noticed mid-write is folded into the
    /// running writer instead.
    pub fn observe(&self, local: &E::Snapshot) -> bool {
        let Ok(serialized) = snapshot_of(E::editable(local)) else {
            return false;
        };
        self.state.borrow_mut().observe(&serialized) == Observed::Write
    }

    /// Applies `edit` to the local value and observes it in the same step, so
    /// a read already in flight can no longer land on top of the edit.
    /// Returns `true` when the caller has to spawn the writer.
    pub fn edit<F>(&self, local: &mut E::Snapshot, edit: F) -> bool
    where
        F: FnOnce(&mut E::Snapshot),
    {
        edit(local);
        self.observe(local)
    }

    /// The single writer. `latest` reads the current local value; it is
    /// consulted before each push and after each success, so a follow-up
    /// always carries the newest edit.
    pub async fn write<F>(&self, mut latest: F) -> WriteOutcome
    where
        F: FnMut() -> Option<E::Snapshot>,
    {
        loop {
            let Some(snapshot) = latest() else {
                self.state.borrow_mut().write_failed();
                return WriteOutcome::Failed("no local state to write".to_string());
            };
            let serialized = match snapshot_of(E::editable(&snapshot)) {
                Ok(serialized) => serialized,
                Err(e) => {
                    self.state.borrow_mut().write_failed();
                    return WriteOutcome::Failed(e);
                }
            };
            self.state.borrow_mut().record_sent(serialized);

            if let Err(e) = self.endpoint.push(&snapshot).await {
                self.state.borrow_mut().write_failed();
                return WriteOutcome::Failed(e);
            }

            let latest_serialized = latest().and_then(|s| snapshot_of(E::editable(&s)).ok());
            if !self
                .state
                .borrow_mut()
                .write_succeeded(latest_serialized.as_deref())
            {
                return WriteOutcome::Converged;
            }
        }
    }

    /// [`SyncSession::write`], and on failure an immediate refresh so server
    /// state replaces the edit that could not be stored.
    pub async fn write_or_resync<F>(&self, latest: F) -> Result<(), Resync<E::Snapshot>>
    where
        F: FnMut() -> Option<E::Snapshot>,
    {
        match self.write(latest).await {
            WriteOutcome::Converged => Ok(()),
            WriteOutcome::Failed(error) => Err(Resync {
                error,
                refresh: self.refresh().await,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::cell::Cell;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Knob {
        level: i32,
    }

    type Hook = Box<dyn FnOnce()>;

    #[derive(Default)]
    struct FakeEndpoint {
        server_level: Cell<i32>,
        fetches: Cell<u32>,
        pushes: RefCell<Vec<i32>>,
        fail_pushes: Cell<bool>,
        during_push: RefCell<Option<Hook>>,
        during_fetch: RefCell<Option<Hook>>,
    }

    impl Endpoint for FakeEndpoint {
        type Snapshot = Knob;
        type Editable = Knob;

        fn editable(snapshot: &Knob) -> &Knob {
            snapshot
        }

        async fn fetch(&self) -> Result<Knob, String> {
            self.fetches.set(self.fetches.get() + 1);
            if let Some(hook) = self.during_fetch.borrow_mut().take() {
                hook();
            }
            Ok(Knob {
                level: self.server_level.get(),
            })
        }

        async fn push(&self, snapshot: &Knob) -> Result<(), String> {
            self.pushes.borrow_mut().push(snapshot.level);
            if let Some(hook) = self.during_push.borrow_mut().take() {
                hook();
            }
            if self.fail_pushes.get() {
                return Err("500 Internal Server Error".to_string());
            }
            self.server_level.set(snapshot.level);
            Ok(())
        }
    }

    async fn loaded_session() -> (SyncSession<FakeEndpoint>, Rc<RefCell<Knob>>) {
        let session = SyncSession::new(FakeEndpoint::default());
        let Refresh::Fresh(knob) = session.refresh().await else {
            panic!("first refresh must apply");
        };
        (session, Rc::new(RefCell::new(knob)))
    }

    fn edit(session: &SyncSession<FakeEndpoint>, local: &Rc<RefCell<Knob>>, level: i32) -> bool {
        session.edit(&mut local.borrow_mut(), |knob| knob.level = level)
    }

    #[tokio::test]
    async fn unchanged_state_is_never_written() {
        let (session, local) = loaded_session().await;
        assert!(!session.observe(&local.borrow().clone()));
        assert!(session.endpoint().pushes.borrow().is_empty());
    }

    #[tokio::test]
    async fn edit_mid_write_coalesces_into_one_follow_up() {
        let (session, local) = loaded_session().await;
        assert!(edit(&session, &local, 1));

        let hook_session = session.clone();
        let hook_local = local.clone();
        *session.endpoint().during_push.borrow_mut() = Some(Box::new(move || {
            assert!(!edit(&hook_session, &hook_local, 2));
            assert!(!edit(&hook_session, &hook_local, 3));
        }));

        let reader = local.clone();
        let outcome = session.write(|| Some(reader.borrow().clone())).await;

        assert_eq!(outcome, WriteOutcome::Converged);
        assert_eq!(*session.endpoint().pushes.borrow(), vec![1, 3]);
        assert!(!session.is_posting());
        assert_eq!(session.endpoint().server_level.get(), 3);
    }

    #[tokio::test]
    async fn failed_write_yields_to_server_state() {
        let (session, local) = loaded_session().await;
        session.endpoint().fail_pushes.set(true);
        assert!(edit(&session, &local, 8));

        let reader = local.clone();
        let outcome = session.write(|| Some(reader.borrow().clone())).await;
        assert!(matches!(outcome, WriteOutcome::Failed(_)));
        assert!(!session.is_posting());

        let fetches_before = session.endpoint().fetches.get();
        match session.refresh().await {
            Refresh::Fresh(server) => *local.borrow_mut() = server,
            other => panic!("refresh after failure must apply, got {other:?}"),
        }
        assert_eq!(session.endpoint().fetches.get(), fetches_before + 1);
        assert_eq!(local.borrow().level, 0);
    }

    #[tokio::test]
    async fn failed_write_resyncs_with_exactly_one_fetch() {
        let (session, local) = loaded_session().await;
        session.endpoint().fail_pushes.set(true);
        assert!(edit(&session, &local, 8));

        let fetches_before = session.endpoint().fetches.get();
        let reader = local.clone();
        let resync = session
            .write_or_resync(|| Some(reader.borrow().clone()))
            .await
            .expect_err("push fails");

        assert_eq!(resync.error, "500 Internal Server Error");
        assert_eq!(resync.refresh, Refresh::Fresh(Knob { level: 0 }));
        assert_eq!(session.endpoint().fetches.get(), fetches_before + 1);
        assert_eq!(*session.endpoint().pushes.borrow(), vec![8]);
        assert!(!session.is_posting());
    }

    #[tokio::test]
    async fn successful_write_does_not_refetch() {
        let (session, local) = loaded_session().await;
        assert!(edit(&session, &local, 4));

        let fetches_before = session.endpoint().fetches.get();
        let reader = local.clone();
        assert_eq!(
            session
                .write_or_resync(|| Some(reader.borrow().clone()))
                .await,
            Ok(())
        );
        assert_eq!(session.endpoint().fetches.get(), fetches_before);
        assert_eq!(session.endpoint().server_level.get(), 4);
    }

    #[tokio::test]
    async fn edit_during_a_poll_read_keeps_the_local_value() {
        let (session, local) = loaded_session().await;

        // The edit lands while the poll's GET is outstanding; the response
        // still carries the old server value.
        let hook_session = session.clone();
        let hook_local = local.clone();
        *session.endpoint().during_fetch.borrow_mut() = Some(Box::new(move || {
            assert!(edit(&hook_session, &hook_local, 6));
        }));

        let refresh = session.refresh().await;
        assert_eq!(refresh, Refresh::Stale);
        assert_eq!(local.borrow().level, 6);

        let reader = local.clone();
        assert_eq!(
            session
                .write_or_resync(|| Some(reader.borrow().clone()))
                .await,
            Ok(())
        );
        assert_eq!(*session.endpoint().pushes.borrow(), vec![6]);
        assert_eq!(session.endpoint().server_level.get(), 6);
    }

    #[tokio::test]
    async fn read_overtaken_by_an_edit_is_discarded() {
        let (session, local) = loaded_session().await;

        let hook_session = session.clone();
        let hook_local = local.clone();
        *session.endpoint().during_fetch.borrow_mut() = Some(Box::new(move || {
            assert!(edit(&hook_session, &hook_local, 5));
        }));

        assert_eq!(session.refresh().await, Refresh::Stale);
        assert_eq!(local.borrow().level, 5);
        assert!(session.is_posting());
        assert_eq!(session.refresh().await, Refresh::Skipped);
    }
}
