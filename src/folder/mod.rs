//! Folder source helpers that run locally, without the platform.

mod scan;

pub use scan::{ACCEPTED_EXTENSIONS, ScannedFile, is_accepted_extension, scan_folder};
