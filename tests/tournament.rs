//! End-to-end tournament behaviour on the in-memory store.

use std::sync::Arc;

use futures::future::join_all;
use swiss_tournament::{
    store::{MemoryStore, Store},
    Error, ErrorKind, Outcome, PlayerId, Tournament,
};

async fn tournament_with_players(names: &[&str]) -> (Tournament, Vec<PlayerId>) {
    let t = Tournament::in_memory();
    let mut ids = Vec::new();
    for name in names {
        ids.push(t.register_player(name).await.unwrap().id);
    }
    (t, ids)
}

fn summary(rows: &[swiss_tournament::StandingsRow]) -> Vec<(PlayerId, i64, i64)> {
    rows.iter().map(|r| (r.id, r.wins, r.matches)).collect()
}

#[tokio::test]
async fn reset_empties_everything() {
    let (t, ids) = tournament_with_players(&["Ada", "Brian"]).await;
    t.report_match(ids[0], ids[1]).await.unwrap();

    t.delete_matches().await.unwrap();
    t.delete_players().await.unwrap();

    assert_eq!(t.count_players().await.unwrap(), 0);
    assert!(t.player_standings().await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_players_removes_their_matches() {
    let (t, ids) = tournament_with_players(&["Ada", "Brian"]).await;
    t.report_match(ids[0], ids[1]).await.unwrap();
    t.delete_players().await.unwrap();

    let a = t.register_player("Chloe").await.unwrap();
    let b = t.register_player("Dan").await.unwrap();
    let rows = t.player_standings().await.unwrap();
    assert_eq!(summary(&rows), vec![(a.id, 0, 0), (b.id, 0, 0)]);
    // Ids are never handed out twice
    assert!(a.id > ids[1]);
}

#[tokio::test]
async fn new_players_start_at_zero() {
    let (t, ids) = tournament_with_players(&["Ada", "Brian", "Chloe", "Ada"]).await;
    assert_eq!(t.count_players().await.unwrap(), 4);

    let rows = t.player_standings().await.unwrap();
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| r.wins == 0 && r.matches == 0));
    assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), ids);
    assert_eq!(rows[3].name, "Ada");
}

#[tokio::test]
async fn reporting_updates_both_players() {
    let (t, ids) = tournament_with_players(&["Ada", "Brian", "Chloe", "Dan"]).await;
    let m = t.report_match(ids[1], ids[2]).await.unwrap();
    assert_eq!((m.winner, m.loser), (ids[1], ids[2]));

    let rows = t.player_standings().await.unwrap();
    assert_eq!(
        summary(&rows),
        vec![(ids[1], 1, 1), (ids[0], 0, 0), (ids[2], 0, 1), (ids[3], 0, 0)]
    );
}

#[tokio::test]
async fn standings_are_sorted_and_stable() {
    let (t, ids) = tournament_with_players(&["Ada", "Brian", "Chloe", "Dan", "Eve", "Fay"]).await;
    t.report_round(&[
        Outcome::new(ids[5], ids[0]),
        Outcome::new(ids[3], ids[1]),
        Outcome::new(ids[2], ids[4]),
    ])
    .await
    .unwrap();
    t.report_round(&[
        Outcome::from((ids[5], ids[3])),
        Outcome::from((ids[0], ids[2])),
        Outcome::from((ids[4], ids[1])),
    ])
    .await
    .unwrap();

    let first = t.player_standings().await.unwrap();
    assert!(first.windows(2).all(|w| w[0].wins >= w[1].wins));
    assert!(first.iter().all(|r| r.wins <= r.matches && r.matches == 2));
    assert_eq!(first[0].id, ids[5]);

    let second = t.player_standings().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn pairs_by_standings() {
    let (t, ids) = tournament_with_players(&["P1", "P2", "P3", "P4"]).await;
    // P1: 2 wins, P2: 1, P3: 1, P4: 0
    t.report_match(ids[0], ids[3]).await.unwrap();
    t.report_match(ids[1], ids[2]).await.unwrap();
    t.report_match(ids[0], ids[1]).await.unwrap();
    t.report_match(ids[2], ids[3]).await.unwrap();

    let pairings = t.swiss_pairings().await.unwrap();
    let pairings = pairings.into_iter().map(|p| p.into_tuple()).collect::<Vec<_>>();
    assert_eq!(
        pairings,
        vec![
            (ids[0], "P1".to_owned(), ids[1], "P2".to_owned()),
            (ids[2], "P3".to_owned(), ids[3], "P4".to_owned()),
        ]
    );
}

#[tokio::test]
async fn odd_player_count_is_a_precondition_failure() {
    let (t, _) = tournament_with_players(&["Ada", "Brian", "Chloe"]).await;
    let err = t.swiss_pairings().await.unwrap_err();
    assert!(matches!(err, Error::OddPlayerCount(3)));
    assert_eq!(err.kind(), ErrorKind::Precondition);
}

#[tokio::test]
async fn rejects_invalid_reports() {
    let (t, ids) = tournament_with_players(&["Ada", "Brian"]).await;

    let err = t.report_match(ids[0], ids[0]).await.unwrap_err();
    assert!(matches!(err, Error::SelfMatch(id) if id == ids[0]));
    assert_eq!(err.kind(), ErrorKind::Constraint);

    let err = t.report_match(ids[0], 4242).await.unwrap_err();
    assert!(matches!(err, Error::UnknownPlayer(4242)));
    assert_eq!(err.kind(), ErrorKind::Constraint);

    let rows = t.player_standings().await.unwrap();
    assert!(rows.iter().all(|r| r.matches == 0));
}

#[tokio::test]
async fn round_is_all_or_nothing() {
    let (t, ids) = tournament_with_players(&["Ada", "Brian", "Chloe", "Dan"]).await;
    let err = t
        .report_round(&[Outcome::new(ids[0], ids[1]), Outcome::new(ids[2], 999)])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnknownPlayer(999)));
    assert!(t.player_standings().await.unwrap().iter().all(|r| r.matches == 0));

    assert!(t.report_round(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_reports_are_all_counted() {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let t = Tournament::new(store.clone());
    let mut ids = Vec::new();
    for i in 0..16 {
        ids.push(t.register_player(&format!("P{}", i)).await.unwrap().id);
    }

    let reports = ids.chunks(2).map(|c| {
        let t = t.clone();
        let (winner, loser) = (c[0], c[1]);
        tokio::spawn(async move { t.report_match(winner, loser).await })
    });
    for res in join_all(reports).await {
        res.unwrap().unwrap();
    }

    let rows = store.standings().await.unwrap();
    assert_eq!(rows.iter().map(|r| r.wins).sum::<i64>(), 8);
    assert_eq!(rows.iter().map(|r| r.matches).sum::<i64>(), 16);

    let pairings = t.swiss_pairings().await.unwrap();
    assert_eq!(pairings.len(), 8);
    // Winners are ranked ahead of losers, so they meet each other first
    let winners = ids.iter().step_by(2).copied().collect::<Vec<_>>();
    assert!(pairings[..4]
        .iter()
        .all(|p| winners.contains(&p.first.id) && winners.contains(&p.second.id)));
}
