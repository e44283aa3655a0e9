//! Service layer persisting the quiz question collection.
//! - `storage` holds the store contract and its file and table backends.
//! - Load never fails to the caller; replace-all is all-or-nothing.
//! - Store outcomes are counted in `metrics`.

pub mod errors;
pub mod question;
pub mod metrics;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
pub mod storage;
