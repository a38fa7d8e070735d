//! Test doubles shared by the integration tests.

pub mod mock_contact_repository;
pub mod mock_deletion_log;

#[allow(unused_imports)]
pub use mock_contact_repository::MockContactRepository;
#[allow(unused_imports)]
pub use mock_deletion_log::MockDeletionLog;
