use actix_web::http::header;
use actix_web::web::{self, Data, Form, Path};
use actix_web::{get, post, HttpResponse};
use chrono::Utc;
use tracing::{error, warn};

use crate::config::Config;
use crate::database::Database;
use crate::error::Error;
use crate::pages;

use super::form::CampaignForm;
use super::{manager, CampaignId};

fn html(page: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page)
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn temporary_redirect(location: &str) -> HttpResponse {
    HttpResponse::TemporaryRedirect()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[get("/")]
#[tracing::instrument]
pub async fn home() -> HttpResponse {
    html(pages::home())
}

#[get("/campaign")]
#[tracing::instrument]
pub async fn campaign_form() -> HttpResponse {
    html(pages::campaign_form())
}

#[post("/campaign")]
#[tracing::instrument(skip(db))]
pub async fn create_campaign(
    db: Data<Box<dyn Database>>,
    form: Form<CampaignForm>,
) -> HttpResponse {
    let campaign = form.into_inner().into_campaign(Utc::now());

    if let Err(err) = manager::create_campaign(&***db, campaign).await {
        error!("failed to store campaign: {}", err);
    }

    see_other("/campaign")
}

#[get("/show/campaigns")]
#[tracing::instrument(skip(db))]
pub async fn get_campaigns(db: Data<Box<dyn Database>>) -> HttpResponse {
    match manager::get_campaigns(&***db).await {
        Ok(campaigns) => html(pages::campaign_list(&campaigns)),
        Err(err) => {
            error!("failed to fetch campaigns: {}", err);
            see_other("/")
        }
    }
}

#[post("/export/{campaign_id}")]
#[tracing::instrument(skip(db, config))]
pub async fn export_campaign(
    db: Data<Box<dyn Database>>,
    config: Data<Config>,
    params: Path<String>,
) -> Result<HttpResponse, Error> {
    let campaign_id = match params.parse::<CampaignId>() {
        Ok(campaign_id) => campaign_id,
        Err(err) => {
            warn!("cannot export {:?}: {}", params.as_str(), err);
            return Ok(temporary_redirect("/"));
        }
    };

    let campaign = match manager::get_campaign_by_id(&***db, campaign_id).await {
        Ok(Some(campaign)) => campaign,
        Ok(None) => {
            warn!("{}", Error::CampaignNotFound { campaign_id });
            return Ok(temporary_redirect("/"));
        }
        Err(err) => {
            error!("failed to fetch campaign: {}", err);
            return Ok(temporary_redirect("/"));
        }
    };

    // workbook writing is blocking file io
    let export_dir = config.export_dir.clone();
    let exported = web::block(move || manager::export_campaign(&campaign, &export_dir))
        .await?
        .map_err(|err| {
            error!("failed to export campaign: {}", err);
            err
        })?;

    Ok(see_other(&config.export_url(&exported.file_name)))
}

#[get("/delete/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn delete_campaign(db: Data<Box<dyn Database>>, params: Path<String>) -> HttpResponse {
    match params.parse::<CampaignId>() {
        Ok(campaign_id) => {
            if let Err(err) = manager::delete_campaign(&***db, campaign_id).await {
                error!("failed to delete campaign: {}", err);
            }
        }
        Err(err) => warn!("cannot delete {:?}: {}", params.as_str(), err),
    }

    see_other("/show/campaigns")
}
