//! KeepNote: a small note-taking web application.
//!
//! Notes live in a SQLite database ([`db`]) and are managed through HTML form
//! submissions handled by the [`api`] router.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
