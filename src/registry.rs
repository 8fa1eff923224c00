/*!
 * Player registry
 */

use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::Result;
use crate::models::Player;
use crate::store::Store;

#[derive(Clone)]
pub struct PlayerRegistry {
    store: Arc<dyn Store>,
}

impl PlayerRegistry {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Register a player. Names need not be unique, the store assigns the id.
    #[instrument(skip(self), err)]
    pub async fn register_player(&self, name: &str) -> Result<Player> {
        let player = self.store.insert_player(name).await?;
        info!("Registered player {} ({})", player.id, player.name);
        Ok(player)
    }

    pub async fn count_players(&self) -> Result<i64> {
        self.store.count_players().await
    }

    pub async fn players(&self) -> Result<Vec<Player>> {
        self.store.players().await
    }

    /// Remove every player. Their matches are removed along with them.
    #[instrument(skip(self), err)]
    pub async fn delete_players(&self) -> Result<()> {
        let deleted = self.store.delete_players().await?;
        info!("Deleted {} players", deleted);
        Ok(())
    }
}
