use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::Campaign;

/// Campaign start dates are the current day in this time zone.
pub const START_DATE_TZ: Tz = chrono_tz::America::Los_Angeles;

/// The fields posted by the campaign form, as entered.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CampaignForm {
    pub campaign_name: String,
    pub daily_budget: String,
    pub match_type: String,
    pub bid: String,
    pub sku: String,
    pub total_keywords: String,
    pub keywords: String,
    pub negative_match_type: String,
    pub negative_keywords: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldParseError {
    pub field: &'static str,
    pub value: String,
}

impl Display for FieldParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "field {} has invalid value {:?}", self.field, self.value)
    }
}

impl std::error::Error for FieldParseError {}

impl CampaignForm {
    /// Builds an unsaved campaign. Numeric fields that fail to parse are logged
    /// and stored as zero.
    pub fn into_campaign(self, now: DateTime<Utc>) -> Campaign {
        let keywords = split_lines(&self.keywords);
        let negative_keywords = split_lines(&self.negative_keywords);

        let daily_budget = parse_amount("daily_budget", &self.daily_budget).unwrap_or_else(zero);
        let bid = parse_amount("bid", &self.bid).unwrap_or_else(zero);
        let total_keywords_per_block = if self.total_keywords.trim().is_empty() {
            keywords.len() as u32
        } else {
            parse_count("total_keywords", &self.total_keywords).unwrap_or_else(zero)
        };

        Campaign {
            id: None,
            campaign_name: self.campaign_name,
            start_date: start_date(now),
            daily_budget: format!("{:.2}", daily_budget),
            match_type: self.match_type,
            bid: format!("{:.2}", bid),
            sku: self.sku,
            total_keywords_per_block,
            keywords,
            negative_match_type: self.negative_match_type,
            negative_keywords,
        }
    }
}

fn zero<T: Default>(err: FieldParseError) -> T {
    warn!("{}, using zero", err);
    T::default()
}

/// Amounts are single precision so `{:.2}` rounds the way the bulk sheets expect.
pub fn parse_amount(field: &'static str, value: &str) -> Result<f32, FieldParseError> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| FieldParseError {
            field,
            value: value.to_string(),
        })
}

pub fn parse_count(field: &'static str, value: &str) -> Result<u32, FieldParseError> {
    value.trim().parse::<u32>().map_err(|_| FieldParseError {
        field,
        value: value.to_string(),
    })
}

/// One entry per textarea line, kept as typed; blank lines are dropped.
pub fn split_lines(value: &str) -> Vec<String> {
    value
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// `MM/DD/YYYY` of `now` in [`START_DATE_TZ`].
pub fn start_date(now: DateTime<Utc>) -> String {
    now.with_timezone(&START_DATE_TZ)
        .format("%m/%d/%Y")
        .to_string()
}
