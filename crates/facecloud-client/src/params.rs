//! Mode-aware parameter state behind the facade setters.

use facecloud_models::{ControlData, DetectParams, FaceRect, MatchParams, Mode};
use tracing::debug;

/// Detection and match parameters plus the mode selecting which set the
/// setters write to. Feature flags always write both sets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceParameters {
    mode: Mode,
    detect: DetectParams,
    matching: MatchParams,
}

impl FaceParameters {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn detect(&self) -> &DetectParams {
        &self.detect
    }

    pub fn matching(&self) -> &MatchParams {
        &self.matching
    }

    /// Returns `false` when the write was rejected.
    pub fn set_min_size(&mut self, min: i32) -> bool {
        let applied = self.mode == Mode::Detect && self.detect.set_min_size(min);
        if !applied {
            debug!(min, mode = %self.mode, "min_size write rejected");
        }
        applied
    }

    pub fn set_max_size(&mut self, max: i32) -> bool {
        let applied = self.mode == Mode::Detect && self.detect.set_max_size(max);
        if !applied {
            debug!(max, mode = %self.mode, "max_size write rejected");
        }
        applied
    }

    pub fn set_threshold(&mut self, threshold: f32) -> bool {
        let applied = self.mode == Mode::Detect && self.detect.set_threshold(threshold);
        if !applied {
            debug!(threshold, mode = %self.mode, "threshold write rejected");
        }
        applied
    }

    /// Face on the (first) image. In detect mode this is refused while
    /// size bounds are set.
    pub fn set_face1(&mut self, face: FaceRect) -> bool {
        let applied = match self.mode {
            Mode::Detect => self.detect.set_face(face),
            Mode::Match => {
                self.matching.set_face1(face);
                true
            }
        };
        if !applied {
            debug!(%face, "face write rejected: size bounds are set");
        }
        applied
    }

    /// Face on the second image; match mode only.
    pub fn set_face2(&mut self, face: FaceRect) -> bool {
        if self.mode != Mode::Match {
            debug!(%face, "face2 write ignored outside match mode");
            return false;
        }
        self.matching.set_face2(face);
        true
    }

    pub fn set_demographics(&mut self, enable: bool) {
        self.detect.set_demographics(enable);
        self.matching.set_demographics(enable);
    }

    pub fn set_attributes(&mut self, enable: bool) {
        self.detect.set_attributes(enable);
        self.matching.set_attributes(enable);
    }

    pub fn set_landmarks(&mut self, enable: bool) {
        self.detect.set_landmarks(enable);
        self.matching.set_landmarks(enable);
    }

    pub fn min_size(&self) -> i32 {
        self.detect.min_size()
    }

    pub fn max_size(&self) -> i32 {
        self.detect.max_size()
    }

    pub fn threshold(&self) -> f32 {
        self.detect.threshold()
    }

    pub fn face(&self) -> FaceRect {
        match self.mode {
            Mode::Detect => self.detect.face(),
            Mode::Match => self.matching.face1(),
        }
    }

    pub fn face2(&self) -> FaceRect {
        self.matching.face2()
    }

    pub fn demographics(&self) -> bool {
        match self.mode {
            Mode::Detect => self.detect.demographics(),
            Mode::Match => self.matching.demographics(),
        }
    }

    pub fn attributes(&self) -> bool {
        match self.mode {
            Mode::Detect => self.detect.attributes(),
            Mode::Match => self.matching.attributes(),
        }
    }

    pub fn landmarks(&self) -> bool {
        match self.mode {
            Mode::Detect => self.detect.landmarks(),
            Mode::Match => self.matching.landmarks(),
        }
    }

    /// Apply a full control snapshot through the setters. The face is
    /// written before the size bounds, so a set face wins.
    pub fn apply(&mut self, controls: &ControlData) {
        self.set_demographics(controls.demographics);
        self.set_attributes(controls.attributes);
        self.set_landmarks(controls.landmarks);
        self.set_face1(controls.face);
        if self.mode == Mode::Match {
            self.set_face2(controls.face2);
        }
        self.set_min_size(controls.min_size);
        self.set_max_size(controls.max_size);
        self.set_threshold(controls.threshold);
    }
}
