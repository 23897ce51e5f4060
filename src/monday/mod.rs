//! monday.com remote API: GraphQL client, typed operations, and error
//! normalization.

pub mod client;
pub mod error;

pub use client::{ColumnValue, MondayApi, MondayClient, ParentContext, SubitemRef};
pub use error::ApiError;
