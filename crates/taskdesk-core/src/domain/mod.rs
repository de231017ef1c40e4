//! 도메인 모델.

mod principal;
mod store;

pub use principal::*;
pub use store::*;
