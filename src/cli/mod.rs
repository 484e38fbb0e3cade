//! # CLI Module
//!
//! This module provides the command-line interface layer for the record
//! collection manager. It implements all user-facing CLI commands and
//! coordinates between the catalog store, the cover resolver and the update
//! reconciler.
//!
//! ## Command Categories
//!
//! ### Record Operations
//!
//! - [`add`] - Appends a new record, optionally fetching cover art
//! - [`list`] - Displays the collection as a table
//! - [`search`] - Filters the collection by artist/album/genre/year
//! - [`edit`] - Applies field and cover changes to one record
//! - [`delete`] - Removes a record
//! - [`sort`] - Reorders the collection and persists the new order
//!
//! ### Cover Operations
//!
//! - [`repair_covers`] - Sweeps for missing covers and downloads what it can
//! - [`clear_cover`] - Removes a record's cover file and nulls its path
//!
//! ## Error Handling Philosophy
//!
//! Validation problems and persistence failures terminate the command with a
//! clear message; anything cover-related degrades to a warning and the
//! command still succeeds. The worst outcome of any cover operation is "no
//! cover art", never loss of a record's fields.

mod covers;
mod records;

pub use covers::clear_cover;
pub use covers::repair_covers;
pub use records::SortKey;
pub use records::add;
pub use records::delete;
pub use records::edit;
pub use records::list;
pub use records::search;
pub use records::sort;
