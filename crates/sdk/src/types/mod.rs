mod order;

pub use order::{Order, OrderSide, OrderType};

/// EIP-155 chain identifier.
pub type ChainId = u64;
