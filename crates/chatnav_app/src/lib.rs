//! Chatnav app: glue between the pure core, the page engine and the host
//! platform (overlay surface, timers, configuration, logging).
pub mod config;
pub mod controller;
pub mod host;
pub mod logging;
pub mod scheduler;
pub mod surface;
