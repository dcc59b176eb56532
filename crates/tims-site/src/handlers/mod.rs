//! Request Handlers

pub mod home;
pub mod research;
pub mod webhook;
