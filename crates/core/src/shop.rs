use crate::{GameConfig, HandKind, Modifiers, ShopOffer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ShopError {
    #[error("unknown shop item '{0}'")]
    UnknownItem(String),
    #[error("insufficient funds: costs {cost}, have {gold}")]
    InsufficientFunds { cost: f64, gold: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShopPurchase {
    pub id: String,
    pub kind: HandKind,
    pub bonus: f64,
    pub cost: f64,
    pub gold_left: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShopListing {
    pub id: String,
    pub name: String,
    pub kind: HandKind,
    pub bonus: f64,
    pub cost: f64,
    pub affordable: bool,
}

pub fn shop_listings(config: &GameConfig, gold: f64) -> Vec<ShopListing> {
    config
        .shop
        .iter()
        .map(|offer| ShopListing {
            id: offer.id.clone(),
            name: offer.name.clone(),
            kind: offer.kind,
            bonus: offer.bonus,
            cost: offer.cost,
            affordable: gold >= offer.cost,
        })
        .collect()
}

/// Finds an offer by id or by its 1-based position in the listing.
pub fn find_offer<'a>(config: &'a GameConfig, item: &str) -> Result<&'a ShopOffer, ShopError> {
    let item = item.trim();
    if let Some(offer) = config.shop_offer(item) {
        return Ok(offer);
    }
    item.parse::<usize>()
        .ok()
        .and_then(|slot| slot.checked_sub(1))
        .and_then(|idx| config.shop.get(idx))
        .ok_or_else(|| ShopError::UnknownItem(item.to_string()))
}

/// Offers never sell out; the same upgrade stacks as long as gold lasts.
pub fn purchase(
    offer: &ShopOffer,
    gold: &mut f64,
    modifiers: &mut Modifiers,
) -> Result<ShopPurchase, ShopError> {
    if *gold < offer.cost {
        return Err(ShopError::InsufficientFunds {
            cost: offer.cost,
            gold: *gold,
        });
    }
    *gold -= offer.cost;
    modifiers.add_bonus(offer.kind, offer.bonus);
    Ok(ShopPurchase {
        id: offer.id.clone(),
        kind: offer.kind,
        bonus: offer.bonus,
        cost: offer.cost,
        gold_left: *gold,
    })
}
