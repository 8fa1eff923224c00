/*!
 * DB models for the tournament
 */

use chrono::{DateTime, Utc};
use diesel::sql_types::{BigInt, Integer, Text};
use diesel::{Insertable, Queryable, QueryableByName};

pub use crate::schema::{matches, players};

/// Serial id handed out by storage on registration. Never reused.
pub type PlayerId = i32;
pub type MatchId = i32;

#[derive(Queryable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = players)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = players)]
pub struct NewPlayer<'a> {
    pub name: &'a str,
}

#[derive(Queryable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = matches)]
pub struct Match {
    pub id: MatchId,
    pub winner: PlayerId,
    pub loser: PlayerId,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, Copy)]
#[diesel(table_name = matches)]
pub struct NewMatch {
    pub winner: PlayerId,
    pub loser: PlayerId,
}

/// Result of a single match, as reported by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub winner: PlayerId,
    pub loser: PlayerId,
}

impl Outcome {
    pub fn new(winner: PlayerId, loser: PlayerId) -> Self {
        Self { winner, loser }
    }
}

impl From<Outcome> for NewMatch {
    fn from(o: Outcome) -> NewMatch {
        NewMatch { winner: o.winner, loser: o.loser }
    }
}

impl From<(PlayerId, PlayerId)> for Outcome {
    fn from((winner, loser): (PlayerId, PlayerId)) -> Outcome {
        Outcome { winner, loser }
    }
}

/// One line of the standings table. Derived from the ledger on every query, never stored.
#[derive(QueryableByName, Debug, Clone, PartialEq, Eq)]
pub struct StandingsRow {
    #[diesel(sql_type = Integer)]
    pub id: PlayerId,
    #[diesel(sql_type = Text)]
    pub name: String,
    #[diesel(sql_type = BigInt)]
    pub wins: i64,
    #[diesel(sql_type = BigInt)]
    pub matches: i64,
}

impl StandingsRow {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), wins: 0, matches: 0 }
    }

    pub fn losses(&self) -> i64 {
        self.matches - self.wins
    }
}

/// A player seated in a pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contender {
    pub id: PlayerId,
    pub name: String,
}

impl From<StandingsRow> for Contender {
    fn from(row: StandingsRow) -> Contender {
        Contender { id: row.id, name: row.name }
    }
}

/// Two players meeting in the next round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub first: Contender,
    pub second: Contender,
}

impl Pairing {
    pub fn ids(&self) -> (PlayerId, PlayerId) {
        (self.first.id, self.second.id)
    }

    /// Flat `(id1, name1, id2, name2)` form.
    pub fn into_tuple(self) -> (PlayerId, String, PlayerId, String) {
        (self.first.id, self.first.name, self.second.id, self.second.name)
    }
}
