use wasm_bindgen::prelude::*;

mod bodies;
mod catalog;
mod config;
mod error;
mod game;
mod orbit;
mod sky;
mod transition;
use game::SolarDescent;

skyward_web::export_game!(SolarDescent, "solar-descent");
