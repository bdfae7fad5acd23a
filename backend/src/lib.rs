pub mod assets;
pub mod catchers;
pub mod config;
pub mod cors;
pub mod error;
pub mod routes;
pub mod storage;
pub mod store;

pub use shared::{models::*, error::*, validation::*};

use std::path::PathBuf;
use rocket::{catchers, routes, Build, Rocket};
use rocket::figment::Figment;
use crate::{
    catchers::{bad_request, internal_error, not_found, unprocessable},
    cors::CORS,
    routes::{all_options, list_entries, reset, static_files, submit, AppState, StaticDir},
    store::RosterStore,
};

/// Assembles the server. `/api/reset` is only mounted when `reset_enabled`.
pub fn build_rocket(
    figment: Figment,
    store: RosterStore,
    static_dir: PathBuf,
    reset_enabled: bool,
) -> Rocket<Build> {
    let mut api = routes![list_entries, submit, all_options];
    if reset_enabled {
        api.extend(routes![reset]);
    }

    rocket::custom(figment)
        .attach(CORS)
        .manage(AppState::new(store))
        .manage(StaticDir(static_dir))
        .mount("/api", api)
        .mount("/", routes![static_files])
        .register(
            "/",
            catchers![
                bad_request,
                unprocessable,
                internal_error,
                not_found
            ],
        )
}
