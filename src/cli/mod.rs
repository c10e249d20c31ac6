pub mod query;
pub mod ui;
