/*!
 * Standings calculator: win and match counts derived from the ledger
 */

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::instrument;

use crate::error::Result;
use crate::models::{Match, Player, PlayerId, StandingsRow};
use crate::store::Store;

/// Count wins and matches for every player, whether they played or not.
///
/// Matches referencing an unknown player are ignored.
pub fn tally<'a>(
    players: impl IntoIterator<Item = &'a Player>,
    matches: &[Match],
) -> Vec<StandingsRow> {
    let mut rows = players
        .into_iter()
        .map(|p| (p.id, StandingsRow::new(p.id, p.name.clone())))
        .collect::<BTreeMap<PlayerId, _>>();

    for m in matches {
        if let Some(row) = rows.get_mut(&m.winner) {
            row.wins += 1;
            row.matches += 1;
        }
        if let Some(row) = rows.get_mut(&m.loser) {
            row.matches += 1;
        }
    }

    let mut rows = rows.into_values().collect::<Vec<_>>();
    rank(&mut rows);
    rows
}

/// Order standings by wins, best first. Equal records keep registration order (ascending id).
pub fn rank(rows: &mut [StandingsRow]) {
    rows.sort_by_key(|row| (Reverse(row.wins), row.id));
}

#[derive(Clone)]
pub struct Standings {
    store: Arc<dyn Store>,
}

impl Standings {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Current standings, every registered player exactly once, ranked by [`rank`].
    #[instrument(skip(self), err)]
    pub async fn player_standings(&self) -> Result<Vec<StandingsRow>> {
        let mut rows = self.store.standings().await?;
        rank(&mut rows);
        Ok(rows)
    }
}
