// Adapters layer: concrete implementations of the domain ports for external
// systems (geocoder HTTP API, MySQL access log store) plus an in-memory
// store for tests and database-less runs.

pub mod heartrails;
pub mod memory;
pub mod mysql;
