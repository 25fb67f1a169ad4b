/// 저장 형식의 경매 레코드
/// 시간은 epoch 초(정수)로 보관하여 숫자 비교로 만료를 판정한다.
// region:    --- Imports
use crate::auction::{Auction, AuctionStatus, ProductCondition};
use crate::error::StoreError;
use chrono::DateTime;

// endregion: --- Imports

// region:    --- Codes
pub const STATUS_ACTIVE: i32 = 0;
pub const STATUS_COMPLETED: i32 = 1;

pub const CONDITION_NEW: i32 = 1;
pub const CONDITION_USED: i32 = 2;

pub fn status_code(status: AuctionStatus) -> i32 {
    match status {
        AuctionStatus::Active => STATUS_ACTIVE,
        AuctionStatus::Completed => STATUS_COMPLETED,
    }
}

pub fn condition_code(condition: ProductCondition) -> i32 {
    match condition {
        ProductCondition::New => CONDITION_NEW,
        ProductCondition::Used => CONDITION_USED,
    }
}

// endregion: --- Codes

// region:    --- Auction Record
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AuctionRecord {
    pub id: String,
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: i32,
    pub status: i32,
    pub timestamp: i64,
}

impl From<&Auction> for AuctionRecord {
    fn from(auction: &Auction) -> Self {
        Self {
            id: auction.id.clone(),
            product_name: auction.product_name.clone(),
            category: auction.category.clone(),
            description: auction.description.clone(),
            condition: condition_code(auction.condition),
            status: status_code(auction.status),
            timestamp: auction.timestamp.timestamp(),
        }
    }
}

impl TryFrom<AuctionRecord> for Auction {
    type Error = StoreError;

    fn try_from(record: AuctionRecord) -> Result<Self, Self::Error> {
        let condition = match record.condition {
            CONDITION_NEW => ProductCondition::New,
            CONDITION_USED => ProductCondition::Used,
            other => {
                return Err(StoreError::InvalidRecord(format!(
                    "{}: unknown condition {}",
                    record.id, other
                )))
            }
        };
        let status = match record.status {
            STATUS_ACTIVE => AuctionStatus::Active,
            STATUS_COMPLETED => AuctionStatus::Completed,
            other => {
                return Err(StoreError::InvalidRecord(format!(
                    "{}: unknown status {}",
                    record.id, other
                )))
            }
        };
        let timestamp = DateTime::from_timestamp(record.timestamp, 0).ok_or_else(|| {
            StoreError::InvalidRecord(format!(
                "{}: timestamp out of range {}",
                record.id, record.timestamp
            ))
        })?;

        Ok(Auction {
            id: record.id,
            product_name: record.product_name,
            category: record.category,
            description: record.description,
            condition,
            status,
            timestamp,
        })
    }
}

// endregion: --- Auction Record

// endregion: --- Tests
