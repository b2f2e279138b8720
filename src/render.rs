use crate::models::{classify, Bucket, CoachRecord};

/// One coach card of the train visual
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachCard {
    pub badge: String,
    pub status_label: &'static str,
    pub occupancy_label: String,
    pub bucket: Bucket,
}

impl CoachCard {
    #[must_use]
    pub fn from_record(record: &CoachRecord) -> Self {
        let occupancy = classify(record);
        Self {
            badge: record.name.clone(),
            status_label: occupancy.bucket.label(),
            occupancy_label: format!("Occupancy: {}", occupancy.percent_text()),
            bucket: occupancy.bucket,
        }
    }

    #[must_use]
    pub fn css_class(&self) -> String {
        format!("coach {}", self.bucket.css_class())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisualBlock {
    Engine,
    Coach(CoachCard),
}

/// Engine followed by the coaches, ready to be turned into DOM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainVisual {
    pub heading: String,
    pub blocks: Vec<VisualBlock>,
}

impl TrainVisual {
    pub fn coach_cards(&self) -> impl Iterator<Item = &CoachCard> {
        self.blocks.iter().filter_map(|block| match block {
            VisualBlock::Coach(card) => Some(card),
            VisualBlock::Engine => None,
        })
    }
}

/// Lay out a train: the engine first, then one card per coach in the order given
#[must_use]
pub fn render_train(title: &str, coaches: &[CoachRecord]) -> TrainVisual {
    let blocks = std::iter::once(VisualBlock::Engine)
        .chain(coaches.iter().map(|c| VisualBlock::Coach(CoachCard::from_record(c))))
        .collect();

    TrainVisual {
        heading: format!("{title} — Coaches"),
        blocks,
    }
}
