pub mod pagination;

pub use pagination::{Paged, Pagination};
