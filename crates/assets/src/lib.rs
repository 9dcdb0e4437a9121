//! Asset loading for embedded images.
//!
//! An [`AssetSource`] resolves asset references (logos, category icons) to
//! bytes. [`settle`] is the bounded waiter in front of capture: every asset
//! gets its own fixed timeout, and the overall wait is a join over those
//! independent bounded waits, so one stuck asset can never hang an export.

mod source;
mod waiter;

pub use source::{AssetSource, FilesystemAssetSource, InMemoryAssetSource, SharedAssetData};
pub use waiter::{ASSET_TIMEOUT, SettledAssets, settle};

use thiserror::Error;

/// Error type for asset loading. All variants are non-fatal at the job
/// level: a failed asset renders as empty space.
#[derive(Error, Debug, Clone)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load asset '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Asset '{0}' did not settle within {1}ms")]
    Timeout(String, u128),
}
