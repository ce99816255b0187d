pub mod reminders;
pub mod transfer;
pub mod words;
