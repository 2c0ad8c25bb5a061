//! Shared data models for the site and admin services.

pub mod contact;
pub mod enquiry;
pub mod project;
pub mod work;

mod id;

pub use contact::{ContactInfo, StoredContact};
pub use enquiry::{Enquiry, NewEnquiry, StatusFilter};
pub use project::Project;
pub use work::WorkItem;
