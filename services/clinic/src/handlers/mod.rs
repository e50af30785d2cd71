pub mod account;
pub mod health;
pub mod inquiry;
pub mod patient;
pub mod survey;
