use serde::{Deserialize, Serialize};

use crate::typedid::{TypedId, TypedIdMarker};

pub mod db;
pub mod endpoints;
pub mod form;
pub mod manager;
pub use endpoints::*;

pub type CampaignId = TypedId<Campaign>;

/// Negative match types that add campaign-level negative keyword rows to an export.
pub const CAMPAIGN_NEGATIVE_MATCH_TYPES: [&str; 2] =
    ["campaign negative phrase", "campaign negative exact"];

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Campaign {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CampaignId>,
    pub campaign_name: String,
    pub start_date: String,
    pub daily_budget: String,
    pub match_type: String,
    pub bid: String,
    pub sku: String,
    pub total_keywords_per_block: u32,
    pub keywords: Vec<String>,
    pub negative_match_type: String,
    pub negative_keywords: Vec<String>,
}

impl Campaign {
    pub fn has_campaign_negatives(&self) -> bool {
        CAMPAIGN_NEGATIVE_MATCH_TYPES.contains(&self.negative_match_type.as_str())
    }
}

impl TypedIdMarker for Campaign {
    fn tag() -> &'static str {
        "CPN"
    }
}
