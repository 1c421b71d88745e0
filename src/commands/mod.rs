pub mod claim;
pub mod error;
pub mod req;
