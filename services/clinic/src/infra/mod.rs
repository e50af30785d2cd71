pub mod attachment;
pub mod db;
