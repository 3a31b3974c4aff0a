pub mod history;
pub mod listing;
pub mod spreadsheet;
pub mod tasks;
