pub mod account;
pub mod inquiry;
pub mod patient;
pub mod survey;
