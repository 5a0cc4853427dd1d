//! Credential pool and remote-call fallback policy.
//!
//! Credentials are tried strictly in configured order. A transient failure
//! moves on to the next credential; a fatal failure stops immediately. Each
//! call starts again from the first credential.

mod pool;

pub use pool::CredentialPool;
