//! Member Model

use serde::{Deserialize, Serialize};

/// Loyalty member (会员), keyed by phone number
///
/// `first_bonus_awarded` records whether the one-time signup bonus has been
/// credited. Older records created before the bonus existed carry `false`
/// and get the bonus backfilled on their next order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub phone: String,
    pub points: i64,
    pub first_bonus_awarded: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_camel_case_wire_format() {
        let member = Member {
            id: "m-1".to_string(),
            phone: "0912345678".to_string(),
            points: 5000,
            first_bonus_awarded: true,
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_000_000,
        };
        let json = serde_json::to_string(&member).unwrap();
        assert!(json.contains("\"firstBonusAwarded\":true"));
        assert!(json.contains("\"points\":5000"));
    }
}
