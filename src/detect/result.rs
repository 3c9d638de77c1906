use crate::{ColorClass, PixelPoint};

/// One detected ball: integer pixel center plus the fitted circle radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BallSighting {
    pub center: PixelPoint,
    pub radius: f32,
}

/// Per-frame detection outcome, one optional sighting per color class.
/// Recomputed from scratch every frame; an undetected ball is simply `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameDetections {
    sightings: [Option<BallSighting>; 3],
}

impl FrameDetections {
    pub fn get(&self, class: ColorClass) -> Option<BallSighting> {
        self.sightings[class.index()]
    }

    pub fn set(&mut self, class: ColorClass, sighting: Option<BallSighting>) {
        self.sightings[class.index()] = sighting;
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColorClass, Option<BallSighting>)> + '_ {
        ColorClass::ALL
            .iter()
            .map(move |&class| (class, self.get(class)))
    }

    pub fn detected_count(&self) -> usize {
        self.sightings.iter().filter(|s| s.is_some()).count()
    }
}
