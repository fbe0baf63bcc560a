// --- File: crates/scheduler_rooms/src/lib.rs ---
// Declare modules within this crate
pub mod doc;
pub mod duplicates;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod memory;
pub mod routes;
pub mod sequencer;
pub mod service;
