//! Sample image shown inside the preview frame.
//!
//! Decoding belongs to the host. The preview only tracks where the image
//! comes from and, once the host reports completion, its native size. Until
//! then the image step of the draw pass is skipped.

/// Load progress of the sample image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageState {
    /// Load requested, not finished
    Pending,
    /// Decoded with the given native size
    Loaded {
        /// Native width in pixels
        width: u32,
        /// Native height in pixels
        height: u32,
    },
    /// The host gave up on the image
    Failed,
}

/// The sample image drawn into the resolution box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleImage {
    source: String,
    state: ImageState,
}

impl SampleImage {
    /// Starts tracking an image load from `source`.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            state: ImageState::Pending,
        }
    }

    /// Where the host loads the image from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Current load state.
    pub fn state(&self) -> ImageState {
        self.state
    }

    /// Records a finished load.
    ///
    /// An image with a zero dimension cannot be fitted and is treated as a
    /// failed load.
    ///
    /// # Returns
    ///
    /// `true` if the image became drawable.
    pub fn finish_loading(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            log::warn!("sample image {} has no pixels", self.source);
            self.state = ImageState::Failed;
            return false;
        }
        self.state = ImageState::Loaded { width, height };
        true
    }

    /// Records a failed load.
    pub fn fail(&mut self) {
        log::warn!("sample image {} failed to load", self.source);
        self.state = ImageState::Failed;
    }

    /// Native size, once loaded.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match self.state {
            ImageState::Loaded { width, height } => Some((width, height)),
            _ => None,
        }
    }

    /// Whether the image can be drawn.
    pub fn is_loaded(&self) -> bool {
        self.dimensions().is_some()
    }
}
