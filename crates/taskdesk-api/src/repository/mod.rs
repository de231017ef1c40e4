//! 자격증명 저장소 구현.
//!
//! [`taskdesk_core::CredentialStore`] trait의 PostgreSQL 구현과 인메모리 구현.

pub mod memory;
pub mod principals;

pub use memory::MemoryCredentialStore;
pub use principals::PgCredentialStore;
