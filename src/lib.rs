//! Flat application desk: intake, eligibility, adjudication, and unit
//! booking for time-boxed housing projects.

pub mod actors;
pub mod config;
pub mod error;
pub mod seed;
pub mod store;
pub mod telemetry;
pub mod temporal;
pub mod workflows;

mod cli;
mod demo;
mod infra;
mod server;

pub use error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
