//! Per-image detection controller.
//!
//! [`FaceDetector`] remembers the response for one image so repeated reads
//! do not hit the service again. Changing the controls invalidates it.

use std::path::{Path, PathBuf};

use facecloud_models::{Attributes, ControlData, Demographics, FaceRect, Landmark, Mode};
use tracing::{debug, warn};

use crate::client::FaceClient;
use crate::error::ClientResult;
use crate::reader::ResponseDocument;

#[derive(Debug, Clone, Default)]
pub struct FaceDetector {
    image: PathBuf,
    document: Option<ResponseDocument>,
    bounding_box: Option<FaceRect>,
    landmarks: Vec<Landmark>,
    attributes: Attributes,
    demographics: Option<Demographics>,
}

impl FaceDetector {
    pub fn new(image: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            ..Default::default()
        }
    }

    pub fn image(&self) -> &Path {
        &self.image
    }

    pub fn document(&self) -> Option<&ResponseDocument> {
        self.document.as_ref()
    }

    pub fn is_fetched(&self) -> bool {
        self.document.is_some()
    }

    /// Drop the cached response and the decoded results.
    pub fn invalidate(&mut self) {
        self.document = None;
        self.bounding_box = None;
        self.landmarks.clear();
        self.attributes.clear();
        self.demographics = None;
    }

    /// Request detection once. Returns whether the response has content.
    ///
    /// A failed call leaves the detector unfetched so the next call retries.
    pub async fn fetch(&mut self, client: &FaceClient) -> ClientResult<bool> {
        if let Some(document) = &self.document {
            debug!(image = %self.image.display(), "Reusing fetched response");
            return Ok(!document.is_empty());
        }

        let document = client.detect(&self.image).await?;
        let updated = !document.is_empty();
        self.document = Some(document);
        Ok(updated)
    }

    /// Fetch if needed and decode the features enabled on the client.
    pub async fn run(&mut self, client: &FaceClient) -> ClientResult<bool> {
        let updated = self.fetch(client).await?;
        let Some(document) = &self.document else {
            return Ok(false);
        };

        self.bounding_box = document.bounding_box();

        self.landmarks = if client.landmarks() {
            document.landmarks().unwrap_or_else(|e| {
                warn!(image = %self.image.display(), error = %e, "Landmarks not decoded");
                Vec::new()
            })
        } else {
            Vec::new()
        };

        self.attributes = if client.attributes() {
            document.attributes()
        } else {
            Attributes::new()
        };

        self.demographics = if client.demographics() {
            document.demographics()
        } else {
            None
        };

        Ok(updated)
    }

    /// Apply a control snapshot in detect mode and run again.
    pub async fn refetch(&mut self, client: &mut FaceClient, controls: &ControlData) -> ClientResult<bool> {
        client.set_mode(Mode::Detect);
        client.apply_controls(controls);
        self.invalidate();
        self.run(client).await
    }

    pub fn bounding_box(&self) -> Option<FaceRect> {
        self.bounding_box
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn demographics(&self) -> Option<&Demographics> {
        self.demographics.as_ref()
    }
}
