//! In-memory backends for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use common::email::EmailRelay;
use common::models::{Enquiry, NewEnquiry, Project, StatusFilter, StoredContact, WorkItem};
use common::store::DataStore;
use common::{AppError, AppResult};

/// Records inserts; every call fails when `fail` is set.
#[derive(Default)]
pub struct RecordingStore {
    pub fail: bool,
    pub inserted: Mutex<Vec<NewEnquiry>>,
    pub work: Vec<WorkItem>,
    pub contact: Option<StoredContact>,
}

impl RecordingStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn inserted(&self) -> Vec<NewEnquiry> {
        self.inserted.lock().unwrap().clone()
    }

    fn check(&self) -> AppResult<()> {
        if self.fail {
            Err(AppError::Store("503 Service Unavailable".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DataStore for RecordingStore {
    async fn list_enquiries(&self, _filter: StatusFilter) -> AppResult<Vec<Enquiry>> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn insert_enquiry(&self, enquiry: &NewEnquiry) -> AppResult<()> {
        self.check()?;
        self.inserted.lock().unwrap().push(enquiry.clone());
        Ok(())
    }

    async fn set_contacted(&self, _id: &str, _contacted: bool) -> AppResult<()> {
        self.check()
    }

    async fn delete_enquiry(&self, _id: &str) -> AppResult<()> {
        self.check()
    }

    async fn list_projects(&self) -> AppResult<Vec<Project>> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn list_work(&self) -> AppResult<Vec<WorkItem>> {
        self.check()?;
        Ok(self.work.clone())
    }

    async fn contact_info(&self) -> AppResult<Option<StoredContact>> {
        self.check()?;
        Ok(self.contact.clone())
    }
}

/// Records sent template params; fails every send when `fail` is set.
#[derive(Default)]
pub struct RecordingRelay {
    pub fail: bool,
    pub sent: Mutex<Vec<serde_json::Map<String, serde_json::Value>>>,
}

impl RecordingRelay {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailRelay for RecordingRelay {
    async fn send_form(
        &self,
        template_params: &serde_json::Map<String, serde_json::Value>,
    ) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Email("400 Bad Request: template not found".into()));
        }
        self.sent.lock().unwrap().push(template_params.clone());
        Ok(())
    }
}
