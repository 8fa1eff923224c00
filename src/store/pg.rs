//! PostgreSQL store on a deadpool of async diesel connections

use async_trait::async_trait;
use diesel::prelude::{ExpressionMethods, QueryDsl};
use diesel_async::{
    pooled_connection::{
        deadpool::{Object, Pool},
        AsyncDieselConnectionManager,
    },
    scoped_futures::ScopedFutureExt,
    AsyncPgConnection, RunQueryDsl, SimpleAsyncConnection,
};
use tracing::{info, instrument, trace};

use crate::config::DbConfig;
use crate::error::{Error, Result};
use crate::models::{
    matches, players, Match, NewMatch, NewPlayer, Outcome, Player, PlayerId, StandingsRow,
};

use super::Store;

const MIGRATION: &str = include_str!("../../migrations/2024-03-02-101500_create_tournament/up.sql");

// Left join so that players without any match still get a (0, 0) row
const STANDINGS: &str = "\
    SELECT players.id, players.name, \
        COUNT(matches.id) FILTER (WHERE matches.winner = players.id) AS wins, \
        COUNT(matches.id) AS matches \
    FROM players \
    LEFT JOIN matches ON players.id = matches.winner OR players.id = matches.loser \
    GROUP BY players.id, players.name \
    ORDER BY wins DESC, players.id ASC";

#[derive(Clone)]
pub struct PgStore {
    pool: Pool<AsyncPgConnection>,
}

impl PgStore {
    pub fn new(pool: Pool<AsyncPgConnection>) -> Self {
        Self { pool }
    }

    /// Build the connection pool. No connection is opened until the first operation.
    pub fn connect(config: &DbConfig) -> Result<Self> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);
        let pool = Pool::builder(manager).max_size(config.pool_size).build()?;
        Ok(Self::new(pool))
    }

    /// Create the tables if they do not exist yet.
    #[instrument(skip(self), err)]
    pub async fn migrate(&self) -> Result<()> {
        let mut conn = self.conn().await?;
        conn.batch_execute(MIGRATION).await?;
        info!("Schema is up to date");
        Ok(())
    }

    async fn conn(&self) -> Result<Object<AsyncPgConnection>> {
        trace!("Checking out a pooled connection");
        Ok(self.pool.get().await?)
    }
}

#[async_trait]
impl Store for PgStore {
    #[instrument(skip(self), err)]
    async fn insert_player(&self, name: &str) -> Result<Player> {
        let mut conn = self.conn().await?;
        let player = diesel::insert_into(players::table)
            .values(NewPlayer { name })
            .get_result::<Player>(&mut conn)
            .await?;
        Ok(player)
    }

    #[instrument(skip(self), err)]
    async fn count_players(&self) -> Result<i64> {
        let mut conn = self.conn().await?;
        Ok(players::table.count().get_result(&mut conn).await?)
    }

    #[instrument(skip(self), err)]
    async fn players(&self) -> Result<Vec<Player>> {
        let mut conn = self.conn().await?;
        Ok(players::table.order_by(players::id.asc()).load(&mut conn).await?)
    }

    #[instrument(skip(self), err)]
    async fn delete_players(&self) -> Result<usize> {
        let mut conn = self.conn().await?;
        // Matches go with them through ON DELETE CASCADE
        Ok(diesel::delete(players::table).execute(&mut conn).await?)
    }

    #[instrument(skip(self), err)]
    async fn insert_matches(&self, outcomes: &[Outcome]) -> Result<Vec<Match>> {
        if outcomes.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.conn().await?;
        let conn: &mut AsyncPgConnection = &mut conn;

        conn.build_transaction()
            .serializable()
            .run(|conn| {
                async move {
                    let mut ids =
                        outcomes.iter().flat_map(|o| [o.winner, o.loser]).collect::<Vec<_>>();
                    ids.sort_unstable();
                    ids.dedup();

                    let known = players::table
                        .filter(players::id.eq_any(&ids))
                        .select(players::id)
                        .load::<PlayerId>(conn)
                        .await?;
                    if let Some(id) = ids.into_iter().find(|id| !known.contains(id)) {
                        return Err(Error::UnknownPlayer(id));
                    }

                    let rows = outcomes.iter().copied().map(NewMatch::from).collect::<Vec<_>>();
                    let inserted = diesel::insert_into(matches::table)
                        .values(&rows)
                        .get_results::<Match>(conn)
                        .await?;
                    Ok::<_, Error>(inserted)
                }
                .scope_boxed()
            })
            .await
    }

    #[instrument(skip(self), err)]
    async fn delete_matches(&self) -> Result<usize> {
        let mut conn = self.conn().await?;
        Ok(diesel::delete(matches::table).execute(&mut conn).await?)
    }

    #[instrument(skip(self), err)]
    async fn standings(&self) -> Result<Vec<StandingsRow>> {
        let mut conn = self.conn().await?;
        let conn: &mut AsyncPgConnection = &mut conn;

        conn.build_transaction()
            .serializable()
            .read_only()
            .run(|conn| {
                async move {
                    let rows = diesel::sql_query(STANDINGS).load::<StandingsRow>(conn).await?;
                    Ok::<_, Error>(rows)
                }
                .scope_boxed()
            })
            .await
    }
}
