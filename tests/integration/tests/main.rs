//! End-to-End Integration Tests
//!
//! These tests drive the dataset and admin clients against an in-process
//! double of both services that keeps realms, users and the job slot in
//! memory.

mod cli;
mod common;
mod dataset_workflow;
mod smoke;
