/*!
 * Swiss-system tournament: players, match results, standings and pairings
 */

pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod pairing;
pub mod registry;
pub mod schema;
pub mod standings;
pub mod store;
pub mod tournament;

pub use error::{Error, ErrorKind, Result};
pub use models::{Contender, Match, Outcome, Pairing, Player, PlayerId, StandingsRow};
pub use tournament::Tournament;
