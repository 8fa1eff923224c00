/*!
 * Public operation surface of a tournament
 */

use std::sync::Arc;

use crate::error::Result;
use crate::ledger::MatchLedger;
use crate::models::{Match, Outcome, Pairing, Player, PlayerId, StandingsRow};
use crate::pairing::PairingEngine;
use crate::registry::PlayerRegistry;
use crate::standings::Standings;
use crate::store::{MemoryStore, Store};

/// A single Swiss tournament, wired to one store.
#[derive(Clone)]
pub struct Tournament {
    registry: PlayerRegistry,
    ledger: MatchLedger,
    standings: Standings,
    pairing: PairingEngine,
}

impl Tournament {
    pub fn new(store: Arc<dyn Store>) -> Self {
        let standings = Standings::new(store.clone());
        Self {
            registry: PlayerRegistry::new(store.clone()),
            ledger: MatchLedger::new(store),
            pairing: PairingEngine::new(standings.clone()),
            standings,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub async fn delete_matches(&self) -> Result<()> {
        self.ledger.delete_matches().await
    }

    pub async fn delete_players(&self) -> Result<()> {
        self.registry.delete_players().await
    }

    pub async fn count_players(&self) -> Result<i64> {
        self.registry.count_players().await
    }

    pub async fn register_player(&self, name: &str) -> Result<Player> {
        self.registry.register_player(name).await
    }

    pub async fn players(&self) -> Result<Vec<Player>> {
        self.registry.players().await
    }

    pub async fn player_standings(&self) -> Result<Vec<StandingsRow>> {
        self.standings.player_standings().await
    }

    pub async fn report_match(&self, winner: PlayerId, loser: PlayerId) -> Result<Match> {
        self.ledger.report_match(winner, loser).await
    }

    pub async fn report_round(&self, outcomes: &[Outcome]) -> Result<Vec<Match>> {
        self.ledger.report_round(outcomes).await
    }

    pub async fn swiss_pairings(&self) -> Result<Vec<Pairing>> {
        self.pairing.swiss_pairings().await
    }
}
