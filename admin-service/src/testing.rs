//! In-memory store for unit tests.
//!
//! Mutating calls can be held at a gate so tests can observe local state
//! while the remote call is still in flight.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore};

use common::auth::{AdminUser, AuthProvider, Session};
use common::models::{Enquiry, NewEnquiry, Project, StatusFilter, StoredContact, WorkItem};
use common::store::DataStore;
use common::{AppError, AppResult};

pub fn enquiry(id: &str, contacted: bool, created_at: &str) -> Enquiry {
    Enquiry {
        id: id.to_string(),
        name: format!("Visitor {id}"),
        email: format!("visitor{id}@example.com"),
        phone: "+91 90000 00000".to_string(),
        project_title: None,
        message: "Please call me back".to_string(),
        created_at: created_at.parse().unwrap(),
        contacted,
    }
}

pub fn project(id: &str, status: bool, created_at: &str) -> Project {
    Project {
        id: id.to_string(),
        title: format!("Project {id}"),
        description: "Client build".to_string(),
        status,
        created_at: created_at.parse().unwrap(),
    }
}

pub struct GatedStore {
    rows: Mutex<Vec<Enquiry>>,
    pub projects: Vec<Project>,
    gated: bool,
    fail_lists: AtomicBool,
    fail_mutations: AtomicBool,
    entered: Notify,
    gate: Semaphore,
    list_calls: Mutex<Vec<StatusFilter>>,
    contacted_writes: Mutex<Vec<(String, bool)>>,
}

impl GatedStore {
    /// Mutations complete immediately.
    pub fn open(rows: Vec<Enquiry>) -> Self {
        Self {
            rows: Mutex::new(rows),
            projects: Vec::new(),
            gated: false,
            fail_lists: AtomicBool::new(false),
            fail_mutations: AtomicBool::new(false),
            entered: Notify::new(),
            gate: Semaphore::new(0),
            list_calls: Mutex::new(Vec::new()),
            contacted_writes: Mutex::new(Vec::new()),
        }
    }

    /// Mutations wait for `release`.
    pub fn gated(rows: Vec<Enquiry>) -> Self {
        Self {
            gated: true,
            ..Self::open(rows)
        }
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    pub fn fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    /// Resolves once a mutating call has reached the store.
    pub async fn wait_for_mutation(&self) {
        self.entered.notified().await;
    }

    /// Lets one held mutation finish.
    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    pub fn list_calls(&self) -> Vec<StatusFilter> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn contacted_writes(&self) -> Vec<(String, bool)> {
        self.contacted_writes.lock().unwrap().clone()
    }

    async fn pass_gate(&self) -> AppResult<()> {
        self.entered.notify_one();
        if self.gated {
            self.gate
                .acquire()
                .await
                .map_err(|e| AppError::Internal(e.to_string()))?
                .forget();
        }
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(AppError::Store("500 Internal Server Error".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DataStore for GatedStore {
    async fn list_enquiries(&self, filter: StatusFilter) -> AppResult<Vec<Enquiry>> {
        self.list_calls.lock().unwrap().push(filter);
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(AppError::Store("503 Service Unavailable".into()));
        }
        let mut rows: Vec<Enquiry> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| filter.contacted().map_or(true, |c| c == e.contacted))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert_enquiry(&self, _enquiry: &NewEnquiry) -> AppResult<()> {
        Err(AppError::Internal("not used by the admin service".into()))
    }

    async fn set_contacted(&self, id: &str, contacted: bool) -> AppResult<()> {
        self.pass_gate().await?;
        self.contacted_writes
            .lock()
            .unwrap()
            .push((id.to_string(), contacted));
        if let Some(row) = self.rows.lock().unwrap().iter_mut().find(|e| e.id == id) {
            row.contacted = contacted;
        }
        Ok(())
    }

    async fn delete_enquiry(&self, id: &str) -> AppResult<()> {
        self.pass_gate().await?;
        self.rows.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }

    async fn list_projects(&self) -> AppResult<Vec<Project>> {
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(AppError::Store("503 Service Unavailable".into()));
        }
        let mut projects = self.projects.clone();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    async fn list_work(&self) -> AppResult<Vec<WorkItem>> {
        Ok(Vec::new())
    }

    async fn contact_info(&self) -> AppResult<Option<StoredContact>> {
        Ok(None)
    }
}

/// Accepts one fixed credential pair; knows two staff tokens.
pub struct StaticAuth;

pub const TEST_TOKEN: &str = "test-session-token";
pub const OTHER_STAFF_TOKEN: &str = "other-staff-token";

#[async_trait]
impl AuthProvider for StaticAuth {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        if email == "admin@agency.dev" && password == "correct horse" {
            Ok(Session {
                access_token: TEST_TOKEN.to_string(),
                expires_in: Some(3600),
                user: AdminUser {
                    id: "staff-1".to_string(),
                    email: Some(email.to_string()),
                },
            })
        } else {
            Err(AppError::Unauthorized("invalid login credentials".into()))
        }
    }

    async fn verify(&self, access_token: &str) -> AppResult<AdminUser> {
        let (id, email) = match access_token {
            TEST_TOKEN => ("staff-1", "admin@agency.dev"),
            OTHER_STAFF_TOKEN => ("staff-2", "sales@agency.dev"),
            _ => return Err(AppError::Unauthorized("invalid or expired session".into())),
        };
        Ok(AdminUser {
            id: id.to_string(),
            email: Some(email.to_string()),
        })
    }
}
