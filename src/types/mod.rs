pub mod axis;
pub mod config;
pub mod profile;
pub mod question;
pub mod quiz;
pub mod report;
pub mod scoring;
