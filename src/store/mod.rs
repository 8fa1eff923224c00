/*!
 * Storage capability shared by every tournament component
 */

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Match, Outcome, Player, StandingsRow};

pub mod memory;
pub mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

/// Relational store holding the `players` and `matches` tables.
///
/// Every method is one unit of work: it either fully applies or leaves the store untouched.
/// Implementations must keep match insertion and the standings snapshot mutually consistent,
/// so that a standings read never observes part of a batch of outcomes.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a player, letting the store assign its id.
    async fn insert_player(&self, name: &str) -> Result<Player>;

    async fn count_players(&self) -> Result<i64>;

    /// Registered players, by ascending id.
    async fn players(&self) -> Result<Vec<Player>>;

    /// Remove every player, and with them every match referencing them.
    async fn delete_players(&self) -> Result<usize>;

    /// Insert all the outcomes at once, after checking that every referenced player exists.
    async fn insert_matches(&self, outcomes: &[Outcome]) -> Result<Vec<Match>>;

    async fn delete_matches(&self) -> Result<usize>;

    /// Win and match counts for every registered player, including those who never played.
    /// Row order is not significant.
    async fn standings(&self) -> Result<Vec<StandingsRow>>;
}
