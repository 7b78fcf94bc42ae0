pub mod choice;
pub mod common;
pub mod question;
