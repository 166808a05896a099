//! Inbound adapters that translate external requests into domain records
//! while keeping framework details at the edge.

pub mod http;
