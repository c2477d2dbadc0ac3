pub mod backlog;
pub mod config;
pub mod plan;
pub mod profile;
pub mod session;
pub mod stats;
pub mod timer;

use focusflow_core::{Config, DynBackend, Store};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Load the configuration and open the store it points at.
pub fn open_store() -> Result<(Config, Store<DynBackend>), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = focusflow_core::open_store(&config)?;
    Ok((config, store))
}

pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
}
