// region:    --- Imports
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Enums
/// 경매 상태
/// Active -> Completed 방향으로만 바뀐다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuctionStatus {
    Active,
    Completed,
}

/// 상품 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCondition {
    New,
    Used,
}

// endregion: --- Enums

// region:    --- Auction Model
/// 경매 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Auction {
    pub id: String,
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: ProductCondition,
    pub status: AuctionStatus,
    pub timestamp: DateTime<Utc>,
}

impl Auction {
    /// 신규 경매 생성 (Active 상태, 현재 시각)
    pub fn new(
        product_name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        condition: ProductCondition,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            product_name: product_name.into(),
            category: category.into(),
            description: description.into(),
            condition,
            status: AuctionStatus::Active,
            // 저장소는 초 단위로 보관한다
            timestamp: Utc::now().trunc_subsecs(0),
        }
    }

    /// 필수 입력값 검증
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.product_name.trim().is_empty() {
            return Err("product_name 은 비어 있을 수 없습니다.");
        }
        if self.category.trim().is_empty() {
            return Err("category 는 비어 있을 수 없습니다.");
        }
        if self.description.trim().is_empty() {
            return Err("description 은 비어 있을 수 없습니다.");
        }
        Ok(())
    }
}

// endregion: --- Auction Model

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_auction_starts_active_with_second_precision() {
        let auction = Auction::new("노트북", "electronics", "거의 새 것", ProductCondition::Used);

        assert_eq!(auction.status, AuctionStatus::Active);
        assert_eq!(auction.timestamp.timestamp_subsec_nanos(), 0);
        assert!(Uuid::parse_str(&auction.id).is_ok());
        assert!(auction.validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_fields() {
        let mut auction = Auction::new("노트북", "electronics", "설명", ProductCondition::New);
        auction.category = "  ".to_string();
        assert!(auction.validate().is_err());
    }
}
// endregion: --- Tests
