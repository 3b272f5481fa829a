pub mod company;
pub mod customer;
pub mod page;
pub mod plan;
pub mod subscription;
pub mod transaction;
