//! Typed repositories over the redb store

mod member;
mod order;
mod product;

pub use member::MemberRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
