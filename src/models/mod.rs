pub mod ledger;
pub mod telegram;
