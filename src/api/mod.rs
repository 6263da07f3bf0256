//! API Module - thin command surface over the classification logic.

pub mod commands;
