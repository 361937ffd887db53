use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::campaign::CampaignId;
use crate::error::Error;

use super::{Sheet, SHEET_NAME};

pub fn export_file_name(campaign_id: CampaignId) -> String {
    format!("{}.xlsx", campaign_id)
}

/// Writes `sheet` as the bulk sheet of a new workbook saved at `path`.
#[tracing::instrument(skip(sheet))]
pub fn save_sheet(sheet: &Sheet, path: &Path) -> Result<(), Error> {
    let mut workbook = Workbook::new();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;
    for (row, column, value) in sheet.cells() {
        // xlsx rows are zero-based
        worksheet.write_string(row - 1, column.index(), value)?;
    }

    workbook.save(path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::export::Column;

    #[test]
    fn file_name_is_campaign_id() {
        let campaign_id: CampaignId = "CPN-16E77539-8873-4C8A-BCA3-2036010474AD".parse().unwrap();

        assert_eq!(
            export_file_name(campaign_id),
            "CPN-16E77539-8873-4C8A-BCA3-2036010474AD.xlsx"
        );
    }

    #[test]
    fn saves_xlsx_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campaign.xlsx");
        let mut sheet = Sheet::with_headers();
        sheet.set(2, Column::RecordType, "Campaign");
        sheet.set(2, Column::IncreaseBidsByPlacement, "0%");

        save_sheet(&sheet, &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        // xlsx files are zip archives
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("campaign.xlsx");

        let result = save_sheet(&Sheet::with_headers(), &path);

        assert!(matches!(result, Err(Error::FailedToWriteWorkbook(_))));
        assert!(!path.exists());
    }
}
