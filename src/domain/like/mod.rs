//! Like domain module.

mod like;

pub use like::Like;
