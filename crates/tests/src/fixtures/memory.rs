//! Deterministic in-memory doubles for the dispatcher's injected seams.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use bson::{DateTime, oid::ObjectId};
use koinonia_db::models::{DevicePlatform, DeviceToken, Notification};
use koinonia_services::dao::base::{DaoError, DaoResult};
use koinonia_services::notify::{DeviceTokenStore, NotificationStore};
use koinonia_services::push::{
    DeliveryFailure, DeliveryOutcome, PushError, PushMessage, PushTransport,
};

#[derive(Default)]
pub struct MemoryNotificationStore {
    pub records: Mutex<Vec<Notification>>,
    pub fail_writes: AtomicBool,
}

impl MemoryNotificationStore {
    pub fn failing() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_writes: AtomicBool::new(true),
        }
    }

    pub fn all(&self) -> Vec<Notification> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn create(&self, record: &Notification) -> DaoResult<ObjectId> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DaoError::Unavailable("record store down".to_string()));
        }
        let id = ObjectId::new();
        let mut stored = record.clone();
        stored.id = Some(id);
        self.records.lock().unwrap().push(stored);
        Ok(id)
    }
}

#[derive(Default)]
pub struct MemoryDeviceTokenStore {
    pub registrations: Mutex<Vec<DeviceToken>>,
    pub fail_lookups: AtomicBool,
    /// Token values whose cleanup should fail, for partial-failure tests.
    pub failing_deletes: Mutex<HashSet<String>>,
    pub lookup_count: AtomicUsize,
}

impl MemoryDeviceTokenStore {
    pub fn register(&self, owner_id: ObjectId, token: &str) {
        let now = DateTime::now();
        self.registrations.lock().unwrap().push(DeviceToken {
            id: Some(ObjectId::new()),
            owner_id,
            token: token.to_string(),
            platform: DevicePlatform::Web,
            created_at: now,
            updated_at: now,
        });
    }

    pub fn tokens(&self) -> Vec<String> {
        self.registrations
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.token.clone())
            .collect()
    }
}

#[async_trait]
impl DeviceTokenStore for MemoryDeviceTokenStore {
    async fn tokens_for_owner(&self, owner_id: ObjectId) -> DaoResult<Vec<DeviceToken>> {
        self.lookup_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(DaoError::Unavailable("token store down".to_string()));
        }
        Ok(self
            .registrations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn delete_by_token(&self, token: &str) -> DaoResult<u64> {
        if self.failing_deletes.lock().unwrap().contains(token) {
            return Err(DaoError::Unavailable("token store down".to_string()));
        }
        let mut registrations = self.registrations.lock().unwrap();
        let before = registrations.len();
        registrations.retain(|r| r.token != token);
        Ok((before - registrations.len()) as u64)
    }
}

/// Transport double: returns scripted per-token failures and records every
/// call it receives.
#[derive(Default)]
pub struct ScriptedTransport {
    pub failures: Mutex<HashMap<String, DeliveryFailure>>,
    pub calls: Mutex<Vec<Vec<String>>>,
    pub messages: Mutex<Vec<PushMessage>>,
    pub fail_whole_call: AtomicBool,
}

impl ScriptedTransport {
    pub fn fail_token(&self, token: &str, failure: DeliveryFailure) {
        self.failures
            .lock()
            .unwrap()
            .insert(token.to_string(), failure);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PushTransport for ScriptedTransport {
    async fn send_to_tokens(
        &self,
        tokens: &[String],
        message: &PushMessage,
    ) -> Result<Vec<DeliveryOutcome>, PushError> {
        self.calls.lock().unwrap().push(tokens.to_vec());
        self.messages.lock().unwrap().push(message.clone());

        if self.fail_whole_call.load(Ordering::SeqCst) {
            return Err(PushError::Auth(503));
        }

        let failures = self.failures.lock().unwrap();
        Ok(tokens
            .iter()
            .map(|token| DeliveryOutcome {
                token: token.clone(),
                error: failures.get(token).copied(),
            })
            .collect())
    }
}
