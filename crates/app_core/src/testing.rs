//! In-memory ports for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use contracts::system::auth::{
    AuthResponse, EmailAuthData, EmailSignInRequest, EmailSignUpRequest, SessionData,
    SocialSignInData, SocialSignInRequest,
};
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;

use crate::auth::client::{AuthClient, ClientError};
use crate::platform::{
    AppearanceSource, KeyValueStore, Navigation, Notice, Presenter, Spawner, StorageError,
};
use crate::subscription::{Observers, Subscription};

#[derive(Default)]
pub struct MemoryStore {
    pub values: RefCell<HashMap<String, String>>,
    pub fail_reads: Cell<bool>,
    pub fail_writes: Cell<bool>,
    writes: Cell<usize>,
    write_gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl MemoryStore {
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    /// Successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// The next `set` waits until the returned sender fires (or is dropped).
    pub fn hold_next_write(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.write_gate.borrow_mut() = Some(rx);
        tx
    }
}

#[async_trait(?Send)]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.get() {
            return Err(StorageError::Unavailable("reads disabled".to_string()));
        }
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let gate = self.write_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.fail_writes.get() {
            return Err(StorageError::Operation("quota exceeded".to_string()));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// OS signal driven by the test.
#[derive(Default)]
pub struct ManualAppearance {
    dark: Cell<bool>,
    queries: Cell<usize>,
    listeners: Observers<bool>,
}

impl ManualAppearance {
    pub fn new(dark: bool) -> Self {
        let appearance = Self::default();
        appearance.dark.set(dark);
        appearance
    }

    pub fn emit(&self, is_dark: bool) {
        self.dark.set(is_dark);
        self.listeners.notify(&is_dark);
    }

    /// How often `is_dark` was asked.
    pub fn query_count(&self) -> usize {
        self.queries.get()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl AppearanceSource for ManualAppearance {
    fn is_dark(&self) -> bool {
        self.queries.set(self.queries.get() + 1);
        self.dark.get()
    }

    fn subscribe(&self, on_change: Box<dyn Fn(bool)>) -> Subscription {
        self.listeners.subscribe(move |is_dark| on_change(*is_dark))
    }
}

/// Queues spawned work until the test runs it.
#[derive(Default)]
pub struct ManualSpawner {
    queue: RefCell<VecDeque<LocalBoxFuture<'static, ()>>>,
}

impl ManualSpawner {
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn run_all(&self) {
        loop {
            let next = self.queue.borrow_mut().pop_front();
            match next {
                Some(task) => futures::executor::block_on(task),
                None => break,
            }
        }
    }
}

impl Spawner for ManualSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.queue.borrow_mut().push_back(task);
    }
}

/// Spawns onto the current tokio `LocalSet`.
pub struct LocalTaskSpawner;

impl Spawner for LocalTaskSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }
}

#[derive(Default)]
pub struct RecordingPresenter {
    pub notices: RefCell<Vec<Notice>>,
    pub navigations: RefCell<Vec<Navigation>>,
}

impl RecordingPresenter {
    pub fn last_notice(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }
}

impl Presenter for RecordingPresenter {
    fn alert(&self, notice: &Notice) {
        self.notices.borrow_mut().push(notice.clone());
    }

    fn navigate(&self, to: &Navigation) {
        self.navigations.borrow_mut().push(to.clone());
    }
}

type Scripted<T> = RefCell<Option<Result<AuthResponse<T>, ClientError>>>;

/// Auth client returning canned responses and recording every call.
#[derive(Default)]
pub struct ScriptedAuthClient {
    pub calls: RefCell<Vec<String>>,
    pub session: Scripted<SessionData>,
    pub social: Scripted<SocialSignInData>,
    pub sign_in: Scripted<EmailAuthData>,
    pub sign_up: Scripted<EmailAuthData>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl ScriptedAuthClient {
    /// The next call waits until the returned sender fires (or is dropped).
    pub fn hold_next_call(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.borrow_mut() = Some(rx);
        tx
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    async fn respond<T: Default>(
        &self,
        call: String,
        slot: &Scripted<T>,
    ) -> Result<AuthResponse<T>, ClientError> {
        self.calls.borrow_mut().push(call);
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        slot.borrow_mut()
            .take()
            .unwrap_or_else(|| Ok(AuthResponse::ok(T::default())))
    }
}

#[async_trait(?Send)]
impl AuthClient for ScriptedAuthClient {
    async fn get_session(&self) -> Result<AuthResponse<SessionData>, ClientError> {
        self.calls.borrow_mut().push("get_session".to_string());
        self.session
            .borrow_mut()
            .take()
            .unwrap_or_else(|| Ok(AuthResponse::empty()))
    }

    async fn sign_in_social(
        &self,
        request: SocialSignInRequest,
    ) -> Result<AuthResponse<SocialSignInData>, ClientError> {
        self.respond(format!("social:{}:{}", request.provider, request.callback_url), &self.social)
            .await
    }

    async fn sign_in_email(
        &self,
        request: EmailSignInRequest,
    ) -> Result<AuthResponse<EmailAuthData>, ClientError> {
        self.respond(format!("sign_in:{}", request.email), &self.sign_in)
            .await
    }

    async fn sign_up_email(
        &self,
        request: EmailSignUpRequest,
    ) -> Result<AuthResponse<EmailAuthData>, ClientError> {
        self.respond(format!("sign_up:{}:{}", request.email, request.name), &self.sign_up)
            .await
    }
}
