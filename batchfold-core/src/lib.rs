//! Batchfold Core
//!
//! Core types and pure helpers for submitting structure-prediction jobs to a
//! managed batch service and inspecting their outputs.
//!
//! This crate contains:
//! - Domain types: jobs, logs, compute stacks and their batch resources
//! - DTOs: job submission requests and the fold/download parameter sets
//! - File helpers: job naming, FASTA serialization, PDB renumbering, MSA math
//!
//! Nothing here talks to the network; see `batchfold-client` for that.

pub mod domain;
pub mod dto;
pub mod error;
pub mod fasta;
pub mod msa;
pub mod naming;
pub mod pdb;

pub use error::{CoreError, Result};
