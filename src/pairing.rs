/*!
 * Swiss pairing engine
 */

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::models::{Pairing, StandingsRow};
use crate::standings::Standings;

/// Pair ranked standings two by two: first against second, third against fourth, and so on.
///
/// Nothing is remembered between rounds, so two players may meet again.
pub fn pair(standings: Vec<StandingsRow>) -> Result<Vec<Pairing>> {
    if standings.len() % 2 != 0 {
        return Err(Error::OddPlayerCount(standings.len()));
    }

    Ok(standings
        .into_iter()
        .tuples()
        .map(|(first, second)| Pairing { first: first.into(), second: second.into() })
        .collect())
}

#[derive(Clone)]
pub struct PairingEngine {
    standings: Standings,
}

impl PairingEngine {
    pub fn new(standings: Standings) -> Self {
        Self { standings }
    }

    /// Pairings for the next round, from a single standings snapshot.
    #[instrument(skip(self), err)]
    pub async fn swiss_pairings(&self) -> Result<Vec<Pairing>> {
        let pairings = pair(self.standings.player_standings().await?)?;
        debug!(
            "Paired next round: {}",
            pairings.iter().map(|p| format!("{} vs {}", p.first.id, p.second.id)).join(", ")
        );
        Ok(pairings)
    }
}
