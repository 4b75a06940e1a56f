use anyhow::{bail, Context};
use chainhand_core::GameConfig;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub const RULES_FILE: &str = "rules.json";

pub fn load_game_config(dir: &Path) -> anyhow::Result<GameConfig> {
    let path = dir.join(RULES_FILE);
    let config: GameConfig = load_json(&path)?;
    validate_config(&config).with_context(|| format!("validate {}", path.display()))?;
    Ok(config)
}

pub fn validate_config(config: &GameConfig) -> anyhow::Result<()> {
    if config.hand_size == 0 {
        bail!("hand_size must be positive");
    }
    if config.level_targets.is_empty() {
        bail!("level_targets must name at least one level");
    }
    if config.level_targets.len() > usize::from(u8::MAX) {
        bail!("too many levels ({})", config.level_targets.len());
    }
    for (idx, target) in config.level_targets.iter().enumerate() {
        if !target.is_finite() || *target < 0.0 {
            bail!("level {} target {} is not a valid score", idx + 1, target);
        }
    }
    if !config.chain_step.is_finite() || config.chain_step < 0.0 {
        bail!("chain_step {} must be a non-negative number", config.chain_step);
    }
    if config.log_capacity == 0 {
        bail!("log_capacity must be positive");
    }
    let mut seen = HashSet::new();
    for offer in &config.shop {
        if !seen.insert(offer.id.as_str()) {
            bail!("duplicate shop offer {}", offer.id);
        }
        if offer.cost <= 0.0 {
            bail!("shop offer {} has non-positive cost {}", offer.id, offer.cost);
        }
    }
    for rule in &config.level_overrides {
        if config.target_for(rule.level).is_none() {
            bail!(
                "override for {} names level {} beyond the last level",
                rule.kind,
                rule.level
            );
        }
    }
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainhand_core::{HandKind, ShopOffer};
    use std::path::PathBuf;

    fn assets_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets")
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "chainhand-data-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn bundled_rules_match_defaults() {
        let config = load_game_config(&assets_dir()).expect("load bundled rules");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn defaults_are_valid() {
        validate_config(&GameConfig::default()).expect("defaults validate");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = scratch_dir("missing");
        let err = load_game_config(&dir).expect_err("no rules file");
        assert!(format!("{err:#}").contains(RULES_FILE));
    }

    #[test]
    fn malformed_json_reports_the_path() {
        let dir = scratch_dir("malformed");
        fs::write(dir.join(RULES_FILE), "{ not json").expect("write rules");
        let err = load_game_config(&dir).expect_err("parse failure");
        let message = format!("{err:#}");
        assert!(message.starts_with("parse "), "{message}");
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn log_capacity_defaults_when_omitted() {
        let mut value = serde_json::to_value(GameConfig::default()).expect("to value");
        value
            .as_object_mut()
            .expect("object")
            .remove("log_capacity");
        let dir = scratch_dir("capacity");
        fs::write(dir.join(RULES_FILE), value.to_string()).expect("write rules");
        let config = load_game_config(&dir).expect("load");
        assert_eq!(config.log_capacity, 8);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn rejects_empty_targets() {
        let mut config = GameConfig::default();
        config.level_targets.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_zero_hand_size() {
        let mut config = GameConfig::default();
        config.hand_size = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_free_or_duplicate_offers() {
        let mut config = GameConfig::default();
        config.shop[0].cost = 0.0;
        assert!(validate_config(&config).is_err());

        let mut config = GameConfig::default();
        config.shop.push(ShopOffer {
            id: "pair_bonus".to_string(),
            name: "Another Pair Bonus".to_string(),
            kind: HandKind::Pair,
            bonus: 1.0,
            cost: 5.0,
        });
        let err = validate_config(&config).expect_err("duplicate id");
        assert!(err.to_string().contains("pair_bonus"));
    }

    #[test]
    fn rejects_overrides_past_the_last_level() {
        let mut config = GameConfig::default();
        config.level_targets.truncate(2);
        let err = validate_config(&config).expect_err("level 3 override");
        assert!(err.to_string().contains("level 3"));
    }
}
