use std::collections::BTreeMap;

pub mod layout;
pub mod workbook;

pub const SHEET_NAME: &str = "Sponsored Products Campaigns";

/// Columns of the Sponsored Products bulk sheet, in sheet order (`A` through `AB`).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Column {
    RecordId,
    RecordType,
    CampaignId,
    Campaign,
    CampaignDailyBudget,
    PortfolioId,
    CampaignStartDate,
    CampaignEndDate,
    CampaignTargetingType,
    AdGroup,
    MaxBid,
    KeywordOrProductTargeting,
    ProductTargetingId,
    MatchType,
    Sku,
    CampaignStatus,
    AdGroupStatus,
    Status,
    Impressions,
    Clicks,
    Spend,
    Orders,
    TotalUnits,
    Sales,
    Acos,
    BiddingStrategy,
    PlacementType,
    IncreaseBidsByPlacement,
}

impl Column {
    pub const ALL: [Column; 28] = [
        Column::RecordId,
        Column::RecordType,
        Column::CampaignId,
        Column::Campaign,
        Column::CampaignDailyBudget,
        Column::PortfolioId,
        Column::CampaignStartDate,
        Column::CampaignEndDate,
        Column::CampaignTargetingType,
        Column::AdGroup,
        Column::MaxBid,
        Column::KeywordOrProductTargeting,
        Column::ProductTargetingId,
        Column::MatchType,
        Column::Sku,
        Column::CampaignStatus,
        Column::AdGroupStatus,
        Column::Status,
        Column::Impressions,
        Column::Clicks,
        Column::Spend,
        Column::Orders,
        Column::TotalUnits,
        Column::Sales,
        Column::Acos,
        Column::BiddingStrategy,
        Column::PlacementType,
        Column::IncreaseBidsByPlacement,
    ];

    /// Zero-based column index.
    pub fn index(self) -> u16 {
        self as u16
    }

    /// Spreadsheet column letters, e.g. `D` or `AA`.
    pub fn letters(self) -> String {
        let index = self.index() as u8;
        if index < 26 {
            char::from(b'A' + index).to_string()
        } else {
            format!("A{}", char::from(b'A' + index - 26))
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            Column::RecordId => "Record ID",
            Column::RecordType => "Record Type",
            Column::CampaignId => "Campaign ID",
            Column::Campaign => "Campaign",
            Column::CampaignDailyBudget => "Campaign Daily Budget",
            Column::PortfolioId => "Portfolio ID",
            Column::CampaignStartDate => "Campaign Start Date",
            Column::CampaignEndDate => "Campaign End Date",
            Column::CampaignTargetingType => "Campaign Targeting Type",
            Column::AdGroup => "Ad Group",
            Column::MaxBid => "Max Bid",
            Column::KeywordOrProductTargeting => "Keyword or Product Targeting",
            Column::ProductTargetingId => "Product Targeting ID",
            Column::MatchType => "Match Type",
            Column::Sku => "SKU",
            Column::CampaignStatus => "Campaign Status",
            Column::AdGroupStatus => "Ad Group Status",
            Column::Status => "Status",
            Column::Impressions => "Impressions",
            Column::Clicks => "Clicks",
            Column::Spend => "Spend",
            Column::Orders => "Orders",
            Column::TotalUnits => "Total units",
            Column::Sales => "Sales",
            Column::Acos => "ACoS",
            Column::BiddingStrategy => "Bidding strategy",
            Column::PlacementType => "Placement Type",
            Column::IncreaseBidsByPlacement => "Increase bids by placement",
        }
    }
}

/// In-memory contents of the bulk sheet, keyed by spreadsheet row number (1-based, row 1
/// holds the headers) and column. Writing a cell twice keeps the last value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sheet {
    cells: BTreeMap<(u32, Column), String>,
}

impl Sheet {
    pub fn new() -> Sheet {
        Sheet::default()
    }

    /// A sheet with the bulk sheet header row filled in.
    pub fn with_headers() -> Sheet {
        let mut sheet = Sheet::new();
        for column in Column::ALL.iter().copied() {
            sheet.set(1, column, column.header());
        }
        sheet
    }

    pub fn set(&mut self, row: u32, column: Column, value: impl Into<String>) {
        debug_assert!(row > 0, "sheet rows start at 1");
        self.cells.insert((row, column), value.into());
    }

    pub fn get(&self, row: u32, column: Column) -> Option<&str> {
        self.cells.get(&(row, column)).map(String::as_str)
    }

    /// Looks up a cell by its `A1`-style address.
    pub fn cell(&self, address: &str) -> Option<&str> {
        let split = address.find(|c: char| c.is_ascii_digit())?;
        let (letters, row) = address.split_at(split);
        let column = Column::ALL
            .iter()
            .copied()
            .find(|column| column.letters() == letters)?;
        let row = row.parse().ok()?;

        self.get(row, column)
    }

    pub fn cells(&self) -> impl Iterator<Item = (u32, Column, &str)> + '_ {
        self.cells
            .iter()
            .map(|((row, column), value)| (*row, *column, value.as_str()))
    }

    pub fn last_row(&self) -> Option<u32> {
        self.cells.keys().map(|(row, _)| *row).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_letters_follow_sheet_order() {
        assert_eq!(Column::RecordId.letters(), "A");
        assert_eq!(Column::RecordType.letters(), "B");
        assert_eq!(Column::Campaign.letters(), "D");
        assert_eq!(Column::KeywordOrProductTargeting.letters(), "L");
        assert_eq!(Column::BiddingStrategy.letters(), "Z");
        assert_eq!(Column::PlacementType.letters(), "AA");
        assert_eq!(Column::IncreaseBidsByPlacement.letters(), "AB");
    }

    #[test]
    fn headers_occupy_the_first_row() {
        let sheet = Sheet::with_headers();

        assert_eq!(sheet.cell("A1"), Some("Record ID"));
        assert_eq!(sheet.cell("L1"), Some("Keyword or Product Targeting"));
        assert_eq!(sheet.cell("AB1"), Some("Increase bids by placement"));
        assert_eq!(sheet.cells().count(), Column::ALL.len());
        assert_eq!(sheet.last_row(), Some(1));
    }

    #[test]
    fn later_writes_replace_earlier_ones() {
        let mut sheet = Sheet::new();
        sheet.set(4, Column::Campaign, "first");
        sheet.set(4, Column::Campaign, "second");

        assert_eq!(sheet.get(4, Column::Campaign), Some("second"));
        assert_eq!(sheet.cell("D4"), Some("second"));
        assert_eq!(sheet.cell("D5"), None);
        assert_eq!(sheet.cell("ZZ4"), None);
        assert_eq!(sheet.cell("D"), None);
    }
}
