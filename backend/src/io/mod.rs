//! # IO Module
//!
//! HTTP surface of the backend. Procedures are exposed as named RPC routes under
//! `/rpc`; everything here is translation between HTTP and the domain services.

pub mod rpc;
