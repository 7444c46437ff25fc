//! Thin HTTP surface over the pipeline: one route per source profile plus a
//! health probe. Handlers do no extraction work of their own; they map the
//! pipeline outcome to an HTTP status and serialize the envelope.

use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware::Logger, web};
use anyhow::Result;
use tracing::info;

use crate::config::AppConfig;
use crate::pipeline::{self, profile::SourceProfile};
use crate::scraper::InvestorgainScraper;

pub async fn run(config: AppConfig) -> Result<()> {
    let scraper = web::Data::new(InvestorgainScraper::new(&config.scraper)?);
    let (host, port) = (config.server.host.clone(), config.server.port);

    info!("Listening on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(scraper.clone())
            .service(health)
            .service(open_listings)
            .service(upcoming_listings)
    })
    .bind((host, port))?
    .run()
    .await?;

    Ok(())
}

#[get("/")]
async fn health() -> impl Responder {
    HttpResponse::Ok().body("ipo-gmp-service is up")
}

#[get("/ipo/open")]
async fn open_listings(scraper: web::Data<InvestorgainScraper>) -> impl Responder {
    listing_response(scraper.get_ref(), SourceProfile::MainboardLive).await
}

#[get("/ipo/upcoming")]
async fn upcoming_listings(scraper: web::Data<InvestorgainScraper>) -> impl Responder {
    listing_response(scraper.get_ref(), SourceProfile::MainboardUpcoming).await
}

/// Acquisition failures map to 502; everything else, including the advisory
/// empty result, is a 200 with the status carried in the body.
async fn listing_response(source: &InvestorgainScraper, profile: SourceProfile) -> HttpResponse {
    let outcome = pipeline::fetch_listings(source, profile).await;

    if outcome.failure.is_some() {
        HttpResponse::BadGateway().json(outcome.envelope)
    } else {
        HttpResponse::Ok().json(outcome.envelope)
    }
}
