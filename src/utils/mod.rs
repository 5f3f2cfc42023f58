//! Small helpers shared by the handler

pub mod keys;
