use std::{
    collections::HashMap,
    path::{Component, Path, PathBuf},
};

use anyhow::Context;
use image::RgbImage;

use crate::{
    assets::decode::decode_rgb,
    foundation::error::{PosterError, PosterResult},
    model::MediaRecord,
};

/// Caller-side byte source for image references.
///
/// Network fetches, caching and retries live behind this trait; the renderer only ever sees
/// decoded rasters.
pub trait ImageSource {
    fn fetch(&self, reference: &str) -> PosterResult<Vec<u8>>;
}

/// Resolves references as relative paths under `root`.
#[derive(Clone, Debug)]
pub struct FsImageSource {
    root: PathBuf,
}

impl FsImageSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a reference to a file under the root.
    ///
    /// Backslashes count as separators and `.` segments are dropped. Absolute paths, `..` and
    /// URLs are refused; remote artwork has to come through a fetching [`ImageSource`].
    pub fn resolve(&self, reference: &str) -> PosterResult<PathBuf> {
        let reference = reference.trim();
        if reference.contains("://") {
            return Err(PosterError::input(format!(
                "'{reference}' is a URL; the filesystem source only reads local files"
            )));
        }
        let unified = reference.replace('\\', "/");

        let mut path = self.root.clone();
        let mut segments = 0usize;
        for component in Path::new(&unified).components() {
            match component {
                Component::Normal(seg) => {
                    path.push(seg);
                    segments += 1;
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    return Err(PosterError::input(format!(
                        "'{reference}' climbs out of the image root"
                    )));
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(PosterError::input(format!(
                        "'{reference}' must be relative to the image root"
                    )));
                }
            }
        }
        if segments == 0 {
            return Err(PosterError::input("image reference names no file"));
        }
        Ok(path)
    }
}

impl ImageSource for FsImageSource {
    fn fetch(&self, reference: &str) -> PosterResult<Vec<u8>> {
        let path = self.resolve(reference)?;
        if !path.is_file() {
            return Err(PosterError::input(format!(
                "image reference '{reference}' not found at '{}'",
                path.display()
            )));
        }
        std::fs::read(&path)
            .with_context(|| format!("read image bytes from '{}'", path.display()))
            .map_err(PosterError::from)
    }
}

/// Prefetched bytes keyed by reference; useful when fetches were done in parallel upstream.
#[derive(Clone, Debug, Default)]
pub struct MemoryImageSource {
    by_ref: HashMap<String, Vec<u8>>,
}

impl MemoryImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, reference: impl Into<String>, bytes: Vec<u8>) {
        self.by_ref.insert(reference.into(), bytes);
    }
}

impl ImageSource for MemoryImageSource {
    fn fetch(&self, reference: &str) -> PosterResult<Vec<u8>> {
        self.by_ref
            .get(reference)
            .cloned()
            .ok_or_else(|| PosterError::input(format!("unknown image reference '{reference}'")))
    }
}

/// Decoded cover and backdrop rasters for one poster.
#[derive(Clone, Debug)]
pub struct PreparedArtwork {
    pub cover: RgbImage,
    /// `None` means the cover doubles as the backdrop.
    pub backdrop: Option<RgbImage>,
}

impl PreparedArtwork {
    /// Fetch and decode the record's artwork up front so rendering stays IO-free.
    pub fn prepare(record: &MediaRecord, source: &dyn ImageSource) -> PosterResult<Self> {
        if record.cover_image_ref.trim().is_empty() {
            return Err(PosterError::input("media record has no cover image reference"));
        }
        let cover = fetch_and_decode(source, &record.cover_image_ref)?;

        let backdrop = match record.backdrop_image_ref.as_deref().map(str::trim) {
            Some(r) if !r.is_empty() && r != record.cover_image_ref => {
                Some(fetch_and_decode(source, r)?)
            }
            _ => None,
        };

        Ok(Self { cover, backdrop })
    }

    pub fn from_rasters(cover: RgbImage, backdrop: Option<RgbImage>) -> Self {
        Self { cover, backdrop }
    }

    pub fn backdrop_or_cover(&self) -> &RgbImage {
        self.backdrop.as_ref().unwrap_or(&self.cover)
    }
}

fn fetch_and_decode(source: &dyn ImageSource, reference: &str) -> PosterResult<RgbImage> {
    let bytes = source.fetch(reference)?;
    decode_rgb(&bytes).map_err(|e| match e {
        PosterError::Decode(msg) => PosterError::decode(format!("'{reference}': {msg}")),
        other => other,
    })
}
