/*!
 * Append-only ledger of match outcomes
 */

use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::{Error, Result};
use crate::models::{Match, Outcome, PlayerId};
use crate::store::Store;

#[derive(Clone)]
pub struct MatchLedger {
    store: Arc<dyn Store>,
}

impl MatchLedger {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Record the outcome of a single match.
    pub async fn report_match(&self, winner: PlayerId, loser: PlayerId) -> Result<Match> {
        let mut inserted = self.report_round(&[Outcome::new(winner, loser)]).await?;
        inserted.pop().ok_or(Error::Db(diesel::result::Error::NotFound))
    }

    /// Record every outcome of a round at once: either all of them are stored or none is.
    #[instrument(skip(self), err)]
    pub async fn report_round(&self, outcomes: &[Outcome]) -> Result<Vec<Match>> {
        if let Some(o) = outcomes.iter().find(|o| o.winner == o.loser) {
            return Err(Error::SelfMatch(o.winner));
        }
        if outcomes.is_empty() {
            return Ok(Vec::new());
        }

        let inserted = self.store.insert_matches(outcomes).await?;
        for m in &inserted {
            info!("Reported match {}: {} beat {}", m.id, m.winner, m.loser);
        }
        Ok(inserted)
    }

    #[instrument(skip(self), err)]
    pub async fn delete_matches(&self) -> Result<()> {
        let deleted = self.store.delete_matches().await?;
        info!("Deleted {} matches", deleted);
        Ok(())
    }
}
