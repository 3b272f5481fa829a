//! Domain primitives shared by the store and HTTP layers.
//!
//! Zero internal dependencies: nothing in here touches the database or axum.

pub mod api_keys;
pub mod error;
pub mod guid;
pub mod labels;
pub mod pagination;
pub mod plan;
pub mod transaction;
pub mod types;
