pub mod choice;
pub mod question;
pub mod sample;
pub mod vote;
