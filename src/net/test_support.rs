//! Scripted transport shared by the client tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::error::AppError;
use super::http::{ApiClient, PreparedRequest, RawResponse, Transport};
use crate::state::credentials::{CredentialKind, CredentialStore};
use crate::state::session::{ChangeCallback, CredentialChange, ExternalCredentialFeed, Subscription};
use crate::util::navigation::RecordingNavigator;
use crate::util::storage::MemoryStorage;

/// Replays scripted responses (200 `{}` once exhausted) and records requests.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<Result<RawResponse, AppError>>>>,
    sent: Arc<Mutex<Vec<PreparedRequest>>>,
}

impl ScriptedTransport {
    pub fn respond(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(RawResponse {
            status,
            body: body.to_owned(),
        }));
    }

    pub fn fail(&self, err: AppError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub fn sent(&self) -> Vec<PreparedRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, AppError> {
        self.sent.lock().unwrap().push(request);
        self.responses.lock().unwrap().pop_front().unwrap_or(Ok(RawResponse {
            status: 200,
            body: "{}".to_owned(),
        }))
    }
}

pub struct Harness {
    pub client: ApiClient<ScriptedTransport>,
    pub transport: ScriptedTransport,
    pub storage: Arc<MemoryStorage>,
    pub navigator: Arc<RecordingNavigator>,
}

/// Client over in-memory storage with the browser sitting at `path`.
pub fn harness(path: &str) -> Harness {
    let storage = Arc::new(MemoryStorage::new());
    let store = CredentialStore::new(storage.clone());
    let navigator = Arc::new(RecordingNavigator::at(path));
    let transport = ScriptedTransport::default();
    let client = ApiClient::new(transport.clone(), store, navigator.clone(), "http://api.test/");
    Harness {
        client,
        transport,
        storage,
        navigator,
    }
}

type Listener = (u64, CredentialKind, ChangeCallback);

/// In-process feed; `emit` plays the part of another tab.
#[derive(Clone, Default)]
pub struct LocalCredentialFeed {
    listeners: Arc<Mutex<Vec<Listener>>>,
    next_id: Arc<Mutex<u64>>,
}

impl LocalCredentialFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, change: CredentialChange) {
        let targets: Vec<ChangeCallback> = self
            .listeners
            .lock()
            .map(|listeners| {
                listeners
                    .iter()
                    .filter(|(_, kind, _)| *kind == change.kind())
                    .map(|(_, _, callback)| Arc::clone(callback))
                    .collect()
            })
            .unwrap_or_default();
        for callback in targets {
            callback(change);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().map(|l| l.len()).unwrap_or_default()
    }
}

impl ExternalCredentialFeed for LocalCredentialFeed {
    fn subscribe(&self, kind: CredentialKind, callback: ChangeCallback) -> Subscription {
        let id = match self.next_id.lock() {
            Ok(mut next) => {
                *next += 1;
                *next
            }
            Err(_) => 0,
        };
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push((id, kind, callback));
        }
        let listeners = Arc::clone(&self.listeners);
        Subscription::new(move || {
            if let Ok(mut listeners) = listeners.lock() {
                listeners.retain(|(listener_id, _, _)| *listener_id != id);
            }
        })
    }
}
