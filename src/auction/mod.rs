pub mod model;

pub use model::{Auction, AuctionStatus, ProductCondition};
