//! # Probekit Core
//!
//! In-memory transformations over `nmap-service-probes` files:
//!
//! * **[`filter`]**: keeps or drops whole probe sections by service, probe name and SSL policy.
//! * **[`extract`]**: lists the probes that can identify a given service.
//! * **[`file`]**: loads and saves probe files.

pub mod extract;
pub mod file;
pub mod filter;
