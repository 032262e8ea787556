//! Asset management for sprite images
//!
//! Images live in an [`ImageStore`] and objects refer to them through
//! copyable [`ImageHandle`]s, so render hooks never own pixel data.

pub mod image_loader;

pub use image_loader::ImageData;

use crate::foundation::collections::{HandleMap, TypedHandle};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Handle to an image stored in an [`ImageStore`]
pub type ImageHandle = TypedHandle<ImageData>;

/// Image storage keyed by stable handles
#[derive(Default)]
pub struct ImageStore {
    images: HandleMap<ImageData>,
    by_name: HashMap<String, ImageHandle>,
}

impl ImageStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store already-decoded image data under a name
    ///
    /// Inserting under an existing name replaces the name binding; the old
    /// image stays reachable through handles already handed out.
    pub fn insert(&mut self, name: impl Into<String>, image: ImageData) -> ImageHandle {
        let handle = ImageHandle::new(self.images.insert(image));
        self.by_name.insert(name.into(), handle);
        handle
    }

    /// Decode an image file and store it under its file stem
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<ImageHandle, AssetError> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            return Err(AssetError::NotFound(path_ref.display().to_string()));
        }
        let name = path_ref
            .file_stem()
            .map_or_else(|| path_ref.display().to_string(), |s| s.to_string_lossy().into_owned());
        let image = ImageData::from_file(path_ref)?;
        Ok(self.insert(name, image))
    }

    /// Look up an image by handle
    pub fn get(&self, handle: ImageHandle) -> Option<&ImageData> {
        self.images.get(handle.key())
    }

    /// Look up a handle by the name it was stored under
    pub fn handle(&self, name: &str) -> Option<ImageHandle> {
        self.by_name.get(name).copied()
    }

    /// Drop an image. Outstanding handles resolve to `None` afterwards.
    pub fn remove(&mut self, handle: ImageHandle) -> Option<ImageData> {
        self.by_name.retain(|_, h| *h != handle);
        self.images.remove(handle.key())
    }

    /// Number of stored images
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the store holds no images
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Asset errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),
    
    /// Asset loading failed
    #[error("Asset loading failed: {0}")]
    LoadFailed(String),
}
