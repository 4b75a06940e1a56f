use chainhand_core::MagicChoice;

#[derive(Debug, Clone)]
pub struct AutoplayConfig {
    pub seed: u64,
    pub max_steps: u32,
    /// Spend gold in the shop; otherwise the shop is always skipped.
    pub buy_upgrades: bool,
    /// Magic choices in order of preference. Targeted choices are skipped
    /// while the hand is empty.
    pub magic_preference: Vec<MagicChoice>,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            seed: 0xC0FFEE,
            max_steps: 500,
            buy_upgrades: true,
            magic_preference: vec![
                MagicChoice::HandScoreUpgrade,
                MagicChoice::DrawBoost,
                MagicChoice::DiscardRedraw,
            ],
        }
    }
}
