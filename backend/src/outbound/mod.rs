//! Outbound adapters implementing driven ports.
//!
//! - **memory**: an in-process store implementing every repository port
//! - **jwt**: HS256 bearer-token verification
//!
//! Adapters translate between storage or wire representations and domain
//! types. They contain no business rules.

pub mod jwt;
pub mod memory;
