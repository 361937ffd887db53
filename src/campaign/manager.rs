use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::database::Database;
use crate::error::Error;
use crate::export::{layout, workbook};

use super::{Campaign, CampaignId};

#[derive(Clone, Debug, PartialEq)]
pub struct ExportedFile {
    pub campaign_id: CampaignId,
    pub file_name: String,
    pub path: PathBuf,
}

#[tracing::instrument(skip(db))]
pub async fn create_campaign(db: &dyn Database, campaign: Campaign) -> Result<Campaign, Error> {
    let campaign = db.campaigns().insert_campaign(&campaign).await?;

    Ok(campaign)
}

#[tracing::instrument(skip(db))]
pub async fn get_campaigns(db: &dyn Database) -> Result<Vec<Campaign>, Error> {
    let campaigns = db.campaigns().fetch_campaigns().await?;

    Ok(campaigns)
}

#[tracing::instrument(skip(db))]
pub async fn get_campaign_by_id(
    db: &dyn Database,
    campaign_id: CampaignId,
) -> Result<Option<Campaign>, Error> {
    let campaign = db.campaigns().fetch_campaign_by_id(campaign_id).await?;

    Ok(campaign)
}

#[tracing::instrument(skip(db))]
pub async fn delete_campaign(db: &dyn Database, campaign_id: CampaignId) -> Result<(), Error> {
    db.campaigns().delete_campaign_by_id(campaign_id).await?;

    Ok(())
}

/// Lays out `campaign` and saves it as `<id>.xlsx` in `export_dir`. Nothing is
/// written if the layout fails.
#[tracing::instrument(skip(campaign), fields(campaign_id = ?campaign.id))]
pub fn export_campaign(campaign: &Campaign, export_dir: &Path) -> Result<ExportedFile, Error> {
    let campaign_id = campaign
        .id
        .ok_or_else(|| Error::ExistentialState("cannot export an unsaved campaign".into()))?;

    let layout = layout::layout_campaign(campaign)?;

    fs::create_dir_all(export_dir)?;
    let file_name = workbook::export_file_name(campaign_id);
    let path = export_dir.join(&file_name);
    workbook::save_sheet(&layout.sheet, &path)?;

    info!(blocks = layout.blocks.len(), path = %path.display(), "exported campaign");

    Ok(ExportedFile {
        campaign_id,
        file_name,
        path,
    })
}
