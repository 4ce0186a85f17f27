pub mod ledger;
pub mod screening;
