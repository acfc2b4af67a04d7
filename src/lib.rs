// Library for tests to access modules

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod hdc;
pub mod models;
pub mod routes;
pub mod transport;
pub mod version;
