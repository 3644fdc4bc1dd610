//! Asset download host-service contracts.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`AssetDownloadService`].
pub type DownloadFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service that fetches a remote asset and hands it to the user as a saved file.
pub trait AssetDownloadService {
    /// Fetches `url` and triggers a save named `file_name`.
    fn download<'a>(
        &'a self,
        url: &'a str,
        file_name: &'a str,
    ) -> DownloadFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Download service for hosts without file saving.
pub struct NoopAssetDownloadService;

impl AssetDownloadService for NoopAssetDownloadService {
    fn download<'a>(
        &'a self,
        _url: &'a str,
        _file_name: &'a str,
    ) -> DownloadFuture<'a, Result<(), String>> {
        Box::pin(async { Err("asset download is unavailable on this host".to_string()) })
    }
}

/// One completed save recorded by [`MemoryAssetDownloadService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedAsset {
    /// Source URL.
    pub url: String,
    /// File name handed to the save action.
    pub file_name: String,
}

#[derive(Debug, Clone, Default)]
/// In-memory download service that records saves instead of touching the network.
pub struct MemoryAssetDownloadService {
    saved: Rc<RefCell<Vec<SavedAsset>>>,
    error: Rc<RefCell<Option<String>>>,
}

impl MemoryAssetDownloadService {
    /// Makes every subsequent download fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.error.borrow_mut() = Some(message.into());
    }

    /// Saves recorded so far.
    pub fn saved(&self) -> Vec<SavedAsset> {
        self.saved.borrow().clone()
    }
}

impl AssetDownloadService for MemoryAssetDownloadService {
    fn download<'a>(
        &'a self,
        url: &'a str,
        file_name: &'a str,
    ) -> DownloadFuture<'a, Result<(), String>> {
        Box::pin(async move {
            if let Some(message) = self.error.borrow().clone() {
                return Err(message);
            }
            self.saved.borrow_mut().push(SavedAsset {
                url: url.to_string(),
                file_name: file_name.to_string(),
            });
            Ok(())
        })
    }
}
