use chainhand_core::MagicChoice;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AutoAction {
    Play { indices: Vec<usize> },
    Pass,
    Redraw,
    Buy { item: String },
    ContinueShop,
    Magic {
        choice: MagicChoice,
        target: Option<usize>,
    },
}

impl AutoAction {
    pub fn stable_key(&self) -> String {
        match self {
            Self::Play { indices } => format!("play:{indices:?}"),
            Self::Pass => "pass".to_string(),
            Self::Redraw => "redraw".to_string(),
            Self::Buy { item } => format!("buy:{item}"),
            Self::ContinueShop => "continue".to_string(),
            Self::Magic { choice, target } => match target {
                Some(idx) => format!("magic:{}:{idx}", choice.id()),
                None => format!("magic:{}", choice.id()),
            },
        }
    }

    pub fn short_label(&self) -> String {
        match self {
            Self::Play { indices } => format!("play {indices:?}"),
            Self::Pass => "pass".to_string(),
            Self::Redraw => "redraw".to_string(),
            Self::Buy { item } => format!("buy {item}"),
            Self::ContinueShop => "continue".to_string(),
            Self::Magic { choice, target } => match target {
                Some(idx) => format!("magic {} {idx}", choice.id()),
                None => format!("magic {}", choice.id()),
            },
        }
    }
}
