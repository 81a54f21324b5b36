//! Data Transfer Objects for the batch service
//!
//! Request shapes sent to the batch service, plus the fold and download
//! parameter sets that build them. Field names serialize the way the batch
//! service spells them so a request can be printed or logged verbatim.

pub mod download;
pub mod fold;
pub mod submit;
