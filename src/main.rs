#[macro_use] extern crate rocket;

use std::{env, net::IpAddr, sync::Arc};

use anyhow::{anyhow, Context};
use bracket::BracketService;
use config::{deserialize_bracket_config, BracketConfig};
use database::Database;
use log::{info, warn};
use rocket::{Build, Rocket, Config, figment::Figment};

mod util;
mod config;
mod database;
mod bracket;
mod http;

fn setup_logger() -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] [{}] {}",
                chrono::Local::now().format("[%Y-%m-%d] [%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .level_for("bracket_api_rs", log::LevelFilter::Debug)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

// shared with every request handler through rocket managed state
#[derive(Clone)]
pub struct BracketAPIState {
    pub config: Arc<BracketConfig>,
    pub database: Arc<Database>,
    pub service: Arc<BracketService>
}

fn rocket(state: BracketAPIState) -> anyhow::Result<Rocket<Build>> {
    let mounts : Vec<&dyn Fn(Rocket<Build>) -> Rocket<Build>> = vec![
        &http::status::mount,
        &http::bracket::mount,
        &http::r#match::mount,
        &http::signup::mount
    ];
    let is_debug = env::var("BRACKET_DEBUG").unwrap_or("false".to_owned()).parse::<bool>().unwrap_or(false);
    let address : IpAddr = state.config.options.host.parse()
        .with_context(|| format!("Invalid listen-host {}", state.config.options.host))?;
    let config : Config = Figment::from(
        if is_debug { Config::debug_default() } else { Config::release_default() }
    )
        .merge(("address", address))
        .merge(("port", state.config.options.port))
        .extract()
        .context("Invalid Rocket configuration")?;

    let rocket_build = rocket::custom(config)
        .manage(state)
        .register("/", catchers![http::not_found, http::internal_error, http::unprocessable]);

    Ok(mounts.iter().fold(rocket_build, |build, mount_fn| (mount_fn)(build)))
}

async fn seed_series(state: &BracketAPIState) {
    for seed in state.config.data.series.iter() {
        match state.service.ensure_series(seed.clone().into()).await {
            Ok(true) => info!("Seeded series {}", seed.id),
            Ok(false) => {},
            Err(e) => warn!("Could not seed series {}: {}", seed.id, e)
        };
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logger().context("Logger Setup Error")?;

    let bracket_config = Arc::new(deserialize_bracket_config().await.context("Config Error")?);

    // one pooled client for the whole process
    let options = &bracket_config.options;
    let database = Arc::new(
        database::connect(
            &options.mongo_url,
            &options.mongo_database,
            options.min_pool_size,
            options.max_pool_size,
            options.store_timeout
        ).await.context("Mongo Error")?
    );
    let service = Arc::new(BracketService::new(database.clone()));

    let state = BracketAPIState {
        config: Arc::clone(&bracket_config),
        database,
        service
    };
    seed_series(&state).await;

    if let Err(rocket_err) = rocket(state)?.launch().await {
        return Err(anyhow!("Rocket Error: {}", rocket_err));
    };
    info!("Server stopped.");
    Ok(())
}
