//! Expands a campaign into the rows of a Sponsored Products bulk sheet.
//!
//! Keywords are cut into blocks of `total_keywords_per_block` in their stored
//! order. Every block repeats the campaign template (a campaign row, three
//! placement rows, an ad group row and an ad row) followed by one row per
//! keyword, all under a display name of `campaign_name + suffix`:
//!
//! | block            | suffix                  |
//! |------------------|-------------------------|
//! | first            | `" - " + match_type`    |
//! | `j`-th (`j > 0`) | `" - " + match_type + j`|
//! | leftover         | `" - Exact1"`           |
//!
//! Only full blocks are laid out, plus a leftover block when at least one full
//! block exists. A campaign with fewer keywords than the block size therefore
//! produces a sheet with nothing but the header row.

use std::ops::Range;

use crate::campaign::Campaign;
use crate::error::Error;

use super::{Column, Sheet};

/// Template rows in each block that are not keyword rows.
const BLOCK_OVERHEAD: usize = 6;
const LEFTOVER_SUFFIX: &str = " - Exact1";
const AD_GROUP_NAME: &str = "Ad Group 1";
const ENABLED: &str = "enabled";

#[derive(Clone, Debug, PartialEq)]
pub struct CampaignLayout {
    pub sheet: Sheet,
    pub blocks: Vec<BlockLayout>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlockLayout {
    pub suffix: String,
    /// Row offset the block template is placed at; its campaign row is `start + 2`.
    pub start: u32,
    pub keywords: Vec<KeywordRow>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeywordRow {
    pub keyword: String,
    pub row: u32,
    /// Rows written with the campaign negative keywords after this keyword.
    pub negative_rows: Range<u32>,
}

/// Lays out every block of `campaign`.
///
/// Fails with [`Error::InvalidKeywordsPerBlock`] when the block size is zero.
#[tracing::instrument(skip(campaign), fields(campaign_id = ?campaign.id))]
pub fn layout_campaign(campaign: &Campaign) -> Result<CampaignLayout, Error> {
    let per_block = campaign.total_keywords_per_block as usize;
    if per_block == 0 {
        return Err(Error::InvalidKeywordsPerBlock {
            campaign_id: campaign.id,
        });
    }

    let keywords = &campaign.keywords;
    let block_count = keywords.len() / per_block;
    let leftover = keywords.len() % per_block;
    let negatives_per_block = if campaign.has_campaign_negatives() {
        campaign.negative_keywords.len()
    } else {
        0
    };

    let mut layout = CampaignLayout {
        sheet: Sheet::with_headers(),
        blocks: Vec::with_capacity(block_count + 1),
    };

    // rows consumed by keywords and negatives of the blocks written so far
    let mut count = 0;
    for j in 0..block_count {
        let suffix = block_suffix(&campaign.match_type, j);
        let block_keywords = &keywords[per_block * j..per_block * (j + 1)];
        let start = BLOCK_OVERHEAD * j + count;

        let block = write_block(&mut layout.sheet, start, campaign, suffix, block_keywords);
        layout.blocks.push(block);

        count += per_block + negatives_per_block;
    }

    if block_count > 0 && leftover > 0 {
        let block_keywords = &keywords[per_block * block_count..];
        let start = BLOCK_OVERHEAD * block_count + count;

        let block = write_block(
            &mut layout.sheet,
            start,
            campaign,
            LEFTOVER_SUFFIX.to_string(),
            block_keywords,
        );
        layout.blocks.push(block);
    }

    tracing::debug!(
        blocks = layout.blocks.len(),
        last_row = ?layout.sheet.last_row(),
        "laid out campaign"
    );

    Ok(layout)
}

pub fn block_suffix(match_type: &str, block: usize) -> String {
    if block == 0 {
        format!(" - {}", match_type)
    } else {
        format!(" - {}{}", match_type, block)
    }
}

fn write_block(
    sheet: &mut Sheet,
    start: usize,
    campaign: &Campaign,
    suffix: String,
    keywords: &[String],
) -> BlockLayout {
    let r = start as u32;
    let name = format!("{}{}", campaign.campaign_name, suffix);

    sheet.set(r + 2, Column::RecordType, "Campaign");
    sheet.set(r + 2, Column::Campaign, name.as_str());
    sheet.set(r + 2, Column::CampaignDailyBudget, campaign.daily_budget.as_str());
    sheet.set(r + 2, Column::CampaignStartDate, campaign.start_date.as_str());
    sheet.set(r + 2, Column::CampaignTargetingType, "Manual");
    sheet.set(r + 2, Column::CampaignStatus, ENABLED);
    sheet.set(r + 2, Column::BiddingStrategy, "Dynamic bidding (down only)");
    sheet.set(r + 2, Column::PlacementType, "All");

    let placements = [
        ("Top of search (page 1)", Some("0%")),
        ("Rest of search", None),
        ("Product pages", Some("0%")),
    ];
    for (i, (placement, increase)) in placements.iter().enumerate() {
        let row = r + 3 + i as u32;
        sheet.set(row, Column::RecordType, "Campaign By Placement");
        sheet.set(row, Column::Campaign, name.as_str());
        sheet.set(row, Column::PlacementType, *placement);
        if let Some(increase) = increase {
            sheet.set(row, Column::IncreaseBidsByPlacement, *increase);
        }
    }

    sheet.set(r + 6, Column::RecordType, "Ad Group");
    sheet.set(r + 6, Column::Campaign, name.as_str());
    sheet.set(r + 6, Column::AdGroup, AD_GROUP_NAME);
    sheet.set(r + 6, Column::MaxBid, campaign.bid.as_str());
    sheet.set(r + 6, Column::CampaignStatus, ENABLED);
    sheet.set(r + 6, Column::AdGroupStatus, ENABLED);

    sheet.set(r + 7, Column::RecordType, "Ad");
    sheet.set(r + 7, Column::Campaign, name.as_str());
    sheet.set(r + 7, Column::AdGroup, AD_GROUP_NAME);
    sheet.set(r + 7, Column::Sku, campaign.sku.as_str());
    sheet.set(r + 7, Column::CampaignStatus, ENABLED);
    sheet.set(r + 7, Column::AdGroupStatus, ENABLED);
    sheet.set(r + 7, Column::Status, ENABLED);

    let negatives: &[String] = if campaign.has_campaign_negatives() {
        campaign.negative_keywords.as_slice()
    } else {
        &[]
    };

    let mut rows = Vec::with_capacity(keywords.len());
    for (j, keyword) in keywords.iter().enumerate() {
        let row = r + 8 + j as u32;
        sheet.set(row, Column::RecordType, "Keyword");
        sheet.set(row, Column::Campaign, name.as_str());
        sheet.set(row, Column::AdGroup, AD_GROUP_NAME);
        sheet.set(row, Column::KeywordOrProductTargeting, keyword.as_str());
        sheet.set(row, Column::MatchType, campaign.match_type.as_str());
        sheet.set(row, Column::CampaignStatus, ENABLED);
        sheet.set(row, Column::AdGroupStatus, ENABLED);
        sheet.set(row, Column::Status, ENABLED);

        // the whole negative list follows every keyword; the next keyword row
        // lands on top of it, so only the run after the last keyword survives
        let negative_rows = row + 1..row + 1 + negatives.len() as u32;
        for (negative_row, negative) in negative_rows.clone().zip(negatives) {
            sheet.set(negative_row, Column::RecordType, "Keyword");
            sheet.set(negative_row, Column::Campaign, name.as_str());
            sheet.set(negative_row, Column::KeywordOrProductTargeting, negative.as_str());
            sheet.set(
                negative_row,
                Column::MatchType,
                campaign.negative_match_type.as_str(),
            );
            sheet.set(negative_row, Column::CampaignStatus, ENABLED);
            sheet.set(negative_row, Column::Status, ENABLED);
        }

        rows.push(KeywordRow {
            keyword: keyword.clone(),
            row,
            negative_rows,
        });
    }

    BlockLayout {
        suffix,
        start: r,
        keywords: rows,
    }
}
