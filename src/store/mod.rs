//! Durable state: holdings, session credentials, synced transactions

pub mod holdings;
pub mod session;
pub mod transactions;
