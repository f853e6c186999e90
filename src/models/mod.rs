// src/models/mod.rs

pub mod bilet;
pub mod question;
pub mod test_result;
pub mod topic;
pub mod user;
