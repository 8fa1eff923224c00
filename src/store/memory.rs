//! In-process store, for embedding the tournament without a database and for tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{instrument, trace};

use crate::error::{Error, Result};
use crate::models::{Match, MatchId, Outcome, Player, PlayerId, StandingsRow};
use crate::standings::tally;

use super::Store;

#[derive(Debug, Default)]
struct Tables {
    players: BTreeMap<PlayerId, Player>,
    matches: Vec<Match>,
    // Serials keep counting across deletions, like postgres sequences
    player_seq: PlayerId,
    match_seq: MatchId,
}

/// Both tables live behind one lock: writers are serialized and readers see whole batches.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    #[instrument(skip(self))]
    async fn insert_player(&self, name: &str) -> Result<Player> {
        let mut tables = self.tables.write().await;
        tables.player_seq += 1;
        let player = Player {
            id: tables.player_seq,
            name: name.to_owned(),
            created_at: Utc::now(),
        };
        tables.players.insert(player.id, player.clone());
        Ok(player)
    }

    async fn count_players(&self) -> Result<i64> {
        Ok(self.tables.read().await.players.len() as i64)
    }

    async fn players(&self) -> Result<Vec<Player>> {
        Ok(self.tables.read().await.players.values().cloned().collect())
    }

    #[instrument(skip(self))]
    async fn delete_players(&self) -> Result<usize> {
        let mut tables = self.tables.write().await;
        let deleted = tables.players.len();
        // Cascade, as the foreign keys do in postgres
        tables.players.clear();
        tables.matches.clear();
        Ok(deleted)
    }

    #[instrument(skip(self), err)]
    async fn insert_matches(&self, outcomes: &[Outcome]) -> Result<Vec<Match>> {
        let mut tables = self.tables.write().await;
        trace!("Acquired ledger write lock");

        if let Some(id) = outcomes
            .iter()
            .flat_map(|o| [o.winner, o.loser])
            .find(|id| !tables.players.contains_key(id))
        {
            return Err(Error::UnknownPlayer(id));
        }
        if let Some(o) = outcomes.iter().find(|o| o.winner == o.loser) {
            return Err(Error::SelfMatch(o.winner));
        }

        let now = Utc::now();
        let mut inserted = Vec::with_capacity(outcomes.len());
        for o in outcomes {
            tables.match_seq += 1;
            inserted.push(Match {
                id: tables.match_seq,
                winner: o.winner,
                loser: o.loser,
                created_at: now,
            });
        }
        tables.matches.extend(inserted.iter().cloned());
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn delete_matches(&self) -> Result<usize> {
        let mut tables = self.tables.write().await;
        let deleted = tables.matches.len();
        tables.matches.clear();
        Ok(deleted)
    }

    async fn standings(&self) -> Result<Vec<StandingsRow>> {
        let tables = self.tables.read().await;
        Ok(tally(tables.players.values(), &tables.matches))
    }
}
