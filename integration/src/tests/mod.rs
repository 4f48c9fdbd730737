//! Integration test definitions, registered into the test inventory

mod distribution;
mod escrow;
mod supply;
