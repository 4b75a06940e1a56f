use super::*;
use crate::{find_offer, purchase, shop_listings, Event, EventBus, ShopListing, ShopPurchase};

impl RunState {
    pub fn shop_listings(&self) -> Vec<ShopListing> {
        shop_listings(&self.config, self.state.gold)
    }

    /// Buys one stackable upgrade by id (or 1-based slot). Shop phase only.
    pub fn buy_upgrade(
        &mut self,
        item: &str,
        events: &mut EventBus,
    ) -> Result<ShopPurchase, RunError> {
        self.ensure_shop()?;
        let offer = find_offer(&self.config, item)?.clone();
        let bought = purchase(&offer, &mut self.state.gold, &mut self.modifiers)?;
        self.emit(
            events,
            Event::ShopBought {
                id: bought.id.clone(),
                kind: bought.kind,
                bonus: bought.bonus,
                cost: bought.cost,
                gold: bought.gold_left,
            },
        );
        Ok(bought)
    }

    pub fn continue_from_shop(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.ensure_shop()?;
        self.state.phase = Phase::MagicChoice;
        self.emit(events, Event::ShopClosed);
        Ok(())
    }

    fn ensure_shop(&self) -> Result<(), RunError> {
        match self.state.phase {
            Phase::Shop => Ok(()),
            phase if phase.is_terminal() => Err(RunError::RunOver(phase)),
            _ => Err(RunError::ShopNotAvailable),
        }
    }
}
