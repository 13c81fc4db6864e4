//! Asset manager: queue named images, load them concurrently, report once
//!
//! Loading is split in two:
//! - [`AssetLoader`] is the host capability that turns an id into an
//!   [`Image`] (the file-backed [`FileLoader`] is the default one).
//! - [`AssetManager`] owns the queue and the cache, runs every load on the
//!   blocking pool at once, and calls the completion callback exactly once,
//!   after every queued load has either succeeded or failed.
//!
//! A failed load is logged and counted but never cached, so it shows up as a
//! permanent miss in [`AssetManager::get_asset`]. Callers must handle `None`.

use crate::error::AssetError;
use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

/// Delay before the completion callback fires for an empty queue.
pub const EMPTY_QUEUE_DELAY: Duration = Duration::from_millis(100);

/// A loaded image: raw file bytes plus the dimensions read from its header.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub bytes: Arc<[u8]>,
}

impl Image {
    /// An image with known dimensions and no pixel data. Used by headless
    /// runs and tests where nothing is actually blitted.
    pub fn placeholder(id: &str, width: u32, height: u32) -> Self {
        Image {
            id: id.to_string(),
            width,
            height,
            bytes: Arc::from(Vec::new()),
        }
    }
}

/// Host capability: resolve one identifier to an image.
///
/// Runs on tokio's blocking pool, so implementations may do file I/O.
pub trait AssetLoader: Send + Sync + 'static {
    fn load(&self, id: &str) -> Result<Image, AssetError>;
}

/// Loads ids such as `./img/black.png` relative to a root directory.
#[derive(Debug, Clone)]
pub struct FileLoader {
    root: PathBuf,
}

impl FileLoader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        FileLoader {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn resolve(&self, id: &str) -> PathBuf {
        self.root.join(id.trim_start_matches("./"))
    }
}

impl AssetLoader for FileLoader {
    fn load(&self, id: &str) -> Result<Image, AssetError> {
        let path = self.resolve(id);
        let bytes = std::fs::read(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                AssetError::NotFound(id.to_string())
            } else {
                AssetError::Io {
                    id: id.to_string(),
                    source,
                }
            }
        })?;

        let (width, height) = image::ImageReader::new(Cursor::new(&bytes))
            .with_guessed_format()
            .map_err(|source| AssetError::Io {
                id: id.to_string(),
                source,
            })?
            .into_dimensions()
            .map_err(|e| AssetError::Decode {
                id: id.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Image {
            id: id.to_string(),
            width,
            height,
            bytes: Arc::from(bytes),
        })
    }
}

/// Serves placeholder images of known sizes from memory. Ids it does not
/// know fail with [`AssetError::NotFound`]. Used for headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    sizes: HashMap<String, (u32, u32)>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: &str, width: u32, height: u32) -> Self {
        self.sizes.insert(id.to_string(), (width, height));
        self
    }
}

impl AssetLoader for MemoryLoader {
    fn load(&self, id: &str) -> Result<Image, AssetError> {
        self.sizes
            .get(id)
            .map(|(width, height)| Image::placeholder(id, *width, *height))
            .ok_or_else(|| AssetError::NotFound(id.to_string()))
    }
}

pub struct AssetManager {
    loader: Arc<dyn AssetLoader>,
    download_queue: Vec<String>,
    cache: HashMap<String, Image>,
    success_count: usize,
    error_count: usize,
}

impl AssetManager {
    pub fn new(loader: impl AssetLoader) -> Self {
        AssetManager {
            loader: Arc::new(loader),
            download_queue: Vec::new(),
            cache: HashMap::new(),
            success_count: 0,
            error_count: 0,
        }
    }

    /// Append an id to the queue. Duplicates are kept.
    pub fn queue_download(&mut self, id: impl Into<String>) {
        let id = id.into();
        debug!("queued asset {}", id);
        self.download_queue.push(id);
    }

    pub fn queued(&self) -> &[String] {
        &self.download_queue
    }

    pub fn success_count(&self) -> usize {
        self.success_count
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Every queued load has resolved one way or the other.
    pub fn is_done(&self) -> bool {
        self.download_queue.len() == self.success_count + self.error_count
    }

    /// Load every queued id concurrently, then call `on_complete` once.
    ///
    /// Counters restart on each call and the whole queue is loaded again.
    /// With an empty queue the callback still runs, after
    /// [`EMPTY_QUEUE_DELAY`], never synchronously.
    pub async fn download_all<F>(&mut self, on_complete: F)
    where
        F: FnOnce(&AssetManager),
    {
        self.success_count = 0;
        self.error_count = 0;
        let mut on_complete = Some(on_complete);

        if self.download_queue.is_empty() {
            tokio::time::sleep(EMPTY_QUEUE_DELAY).await;
            if let Some(callback) = on_complete.take() {
                callback(self);
            }
            return;
        }

        let mut loads = JoinSet::new();
        for id in self.download_queue.iter().cloned() {
            let loader = Arc::clone(&self.loader);
            loads.spawn_blocking(move || {
                let result = loader.load(&id);
                (id, result)
            });
        }

        while let Some(joined) = loads.join_next().await {
            match joined {
                Ok((id, Ok(image))) => {
                    info!("loaded {} ({}x{})", id, image.width, image.height);
                    self.success_count += 1;
                    self.cache.insert(id, image);
                }
                Ok((id, Err(err))) => {
                    warn!("failed to load {}: {}", id, err);
                    self.error_count += 1;
                    // A reload that fails must not leave the earlier image behind
                    self.cache.remove(&id);
                }
                Err(join_err) => {
                    error!("asset load task aborted: {}", join_err);
                    self.error_count += 1;
                }
            }

            if self.is_done() {
                if let Some(callback) = on_complete.take() {
                    callback(self);
                }
            }
        }
    }

    /// The loaded image, or `None` if it was never queued or failed to load.
    pub fn get_asset(&self, id: &str) -> Option<&Image> {
        self.cache.get(id)
    }

    pub fn loaded(&self) -> impl Iterator<Item = &Image> {
        self.cache.values()
    }

    /// Put an already-decoded image straight into the cache.
    pub fn insert(&mut self, image: Image) {
        self.cache.insert(image.id.clone(), image);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Wraps a [`MemoryLoader`], counting calls and failing every call
    /// from `fail_from` on.
    struct CountingLoader {
        inner: MemoryLoader,
        calls: Arc<AtomicUsize>,
        fail_from: usize,
    }

    impl CountingLoader {
        fn new(inner: MemoryLoader) -> Self {
            CountingLoader {
                inner,
                calls: Arc::new(AtomicUsize::new(0)),
                fail_from: usize::MAX,
            }
        }
    }

    impl AssetLoader for CountingLoader {
        fn load(&self, id: &str) -> Result<Image, AssetError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call >= self.fail_from {
                return Err(AssetError::NotFound(id.to_string()));
            }
            self.inner.load(id)
        }
    }

    #[tokio::test]
    async fn test_download_all_loads_every_asset() {
        let mut assets = AssetManager::new(
            MemoryLoader::new()
                .with("./img/black.png", 40, 40)
                .with("./img/white.png", 40, 40),
        );
        assets.queue_download("./img/black.png");
        assets.queue_download("./img/white.png");

        let mut fired = 0;
        assets.download_all(|_| fired += 1).await;

        assert_eq!(fired, 1);
        assert!(assets.is_done());
        assert_eq!(assets.success_count(), 2);
        assert_eq!(assets.get_asset("./img/white.png").map(|i| i.width), Some(40));
    }

    #[tokio::test]
    async fn test_failed_load_is_isolated() {
        let mut assets = AssetManager::new(MemoryLoader::new().with("./img/black.png", 40, 40));
        assets.queue_download("./img/black.png");
        assets.queue_download("./img/missing.png");

        let mut seen = None;
        assets
            .download_all(|a| seen = Some((a.success_count(), a.error_count())))
            .await;

        assert_eq!(seen, Some((1, 1)));
        assert!(assets.get_asset("./img/black.png").is_some());
        assert!(assets.get_asset("./img/missing.png").is_none());
    }

    #[tokio::test]
    async fn test_duplicates_are_not_deduplicated() {
        let loader = CountingLoader::new(MemoryLoader::new().with("./img/black.png", 40, 40));
        let calls = Arc::clone(&loader.calls);
        let mut assets = AssetManager::new(loader);
        assets.queue_download("./img/black.png");
        assets.queue_download("./img/black.png");

        assets.download_all(|_| {}).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(assets.success_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_reload_drops_cached_image() {
        let mut loader = CountingLoader::new(MemoryLoader::new().with("./img/black.png", 40, 40));
        loader.fail_from = 1;
        let mut assets = AssetManager::new(loader);
        assets.queue_download("./img/black.png");

        assets.download_all(|_| {}).await;
        assert!(assets.get_asset("./img/black.png").is_some());

        assets.download_all(|_| {}).await;
        assert_eq!(assets.error_count(), 1);
        assert!(assets.get_asset("./img/black.png").is_none());
    }

    #[tokio::test]
    async fn test_empty_queue_completes_after_delay() {
        let mut assets = AssetManager::new(MemoryLoader::new());
        let started = std::time::Instant::now();

        let mut fired = false;
        assets.download_all(|_| fired = true).await;

        assert!(fired);
        assert!(started.elapsed() >= EMPTY_QUEUE_DELAY);
    }

    #[test]
    fn test_unknown_asset_is_a_miss() {
        let assets = AssetManager::new(MemoryLoader::new());
        assert!(assets.get_asset("./img/never.png").is_none());
    }

    #[test]
    fn test_file_loader_reads_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("img")).unwrap();
        image::RgbaImage::new(3, 2)
            .save(dir.path().join("img/dot.png"))
            .unwrap();

        let loader = FileLoader::new(dir.path());
        let image = loader.load("./img/dot.png").unwrap();
        assert_eq!((image.width, image.height), (3, 2));

        assert!(matches!(
            loader.load("./img/none.png"),
            Err(AssetError::NotFound(_))
        ));
    }

    #[test]
    fn test_file_loader_rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.png"), b"definitely not a png").unwrap();

        let loader = FileLoader::new(dir.path());
        assert!(matches!(
            loader.load("./notes.png"),
            Err(AssetError::Decode { .. })
        ));
    }
}
