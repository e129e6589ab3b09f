//! Ledger domain models: bank identifiers, transactions, and the
//! bank-scoped lists they aggregate into.

pub mod account;
pub mod bank;
pub mod list;
pub mod transaction;

pub use account::BankAccountID;
pub use bank::{Bank, BankCode, BankZone};
pub use list::{BalanceReport, FlowTotal, TransactionList};
pub use transaction::{Category, Flow, Transaction};
