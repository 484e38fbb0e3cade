//! # API Module
//!
//! HTTP handlers for the record collection's web interface.
//!
//! ## Endpoints
//!
//! ### Collection
//!
//! - [`index`] - Collection listing with cover thumbnails
//! - [`add_form`] / [`add_submit`] - Add a record via a web form
//! - [`edit_form`] / [`edit_submit`] - Edit a record, including cover
//!   instructions (manual URL or automatic lookup)
//! - [`delete_record`] - Remove a record
//!
//! ### Covers
//!
//! - [`serve_cover`] - Streams a file from the covers directory
//! - [`delete_cover`] - Deletes a record's cover file and nulls its path
//! - [`repair_covers`] - Runs the missing-cover sweep
//!
//! ### Monitoring
//!
//! - [`health`] - Health check returning status, version and record count
//!
//! ## Architecture
//!
//! Built on [Axum](https://docs.rs/axum); shared state (catalog behind a
//! mutex plus the cover source) is injected through an `Extension` layer.
//! Pages are rendered as plain HTML strings with escaped interpolation; the
//! interface is deliberately minimal.

mod covers;
mod health;
mod records;

pub use covers::delete_cover;
pub use covers::repair_covers;
pub use covers::serve_cover;
pub use health::health;
pub use records::add_form;
pub use records::add_submit;
pub use records::delete_record;
pub use records::edit_form;
pub use records::edit_submit;
pub use records::index;
