//! Integration tests for `MatchRegistry`.
//!
//! These go through the public async API only, the way the hub does.

use std::sync::Arc;

use connectx_match::{
    Column, Dims2, Dims3, MatchError, MatchOptions, MatchRegistry, Slot, Stick, ThreeD,
    TwoD,
};
use connectx_protocol::{MatchId, MoveRequest, PlayerId};

fn pid(id: &str) -> PlayerId {
    PlayerId::from(id)
}

fn standard() -> MatchOptions<Dims2> {
    MatchOptions::new(Dims2 { w: 7, h: 6 }, 4).starts_first(true)
}

#[tokio::test]
async fn test_create_then_get_has_empty_board_and_open_seat() {
    let registry = MatchRegistry::<TwoD>::new();

    let id = registry.create_match(pid("alice"), standard()).await.unwrap();
    let game = registry.get(&id).await.expect("match should exist");

    assert_eq!(game.id(), &id);
    assert_eq!(game.player1().id, pid("alice"));
    assert!(game.player2().is_none());
    assert!(!game.is_started());
    assert!(game.moves().is_empty());
    assert!(game.board().iter().flatten().all(|s| *s == Slot::Empty));
}

#[tokio::test]
async fn test_get_unknown_match_returns_none() {
    let registry = MatchRegistry::<ThreeD>::new();
    assert!(registry.get(&MatchId::from("missing")).await.is_none());
}

#[tokio::test]
async fn test_join_match_first_join_reported_once() {
    let registry = MatchRegistry::<TwoD>::new();
    let id = registry.create_match(pid("alice"), standard()).await.unwrap();

    let first = registry.join_match(pid("bob"), &id).await.unwrap();
    let again = registry.join_match(pid("bob"), &id).await.unwrap();
    let creator = registry.join_match(pid("alice"), &id).await.unwrap();

    assert!(first.first_join);
    assert!(first.snapshot.is_started());
    assert!(!again.first_join);
    assert!(!creator.first_join);
    assert_eq!(again.snapshot.player2().unwrap().id, pid("bob"));
}

#[tokio::test]
async fn test_join_match_full_match_unjoinable() {
    let registry = MatchRegistry::<TwoD>::new();
    let id = registry.create_match(pid("alice"), standard()).await.unwrap();
    registry.join_match(pid("bob"), &id).await.unwrap();

    let result = registry.join_match(pid("carol"), &id).await;

    assert_eq!(result.unwrap_err(), MatchError::Unjoinable(id.clone()));
    let game = registry.get(&id).await.unwrap();
    assert_eq!(game.player2().unwrap().id, pid("bob"));
}

#[tokio::test]
async fn test_join_match_unknown_id_not_found() {
    let registry = MatchRegistry::<TwoD>::new();
    let result = registry.join_match(pid("bob"), &MatchId::from("x")).await;
    assert!(matches!(result, Err(MatchError::NotFound(_))));
}

#[tokio::test]
async fn test_join_match_concurrent_joiners_only_one_seated() {
    let registry = Arc::new(MatchRegistry::<TwoD>::new());
    let id = registry.create_match(pid("alice"), standard()).await.unwrap();

    let mut handles = Vec::new();
    for name in ["bob", "carol", "dave", "erin"] {
        let registry = Arc::clone(&registry);
        let id = id.clone();
        handles.push(tokio::spawn(async move {
            registry.join_match(pid(name), &id).await
        }));
    }

    let mut seated = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(joined) => {
                assert!(joined.first_join);
                seated += 1;
            }
            Err(err) => assert!(matches!(err, MatchError::Unjoinable(_))),
        }
    }
    assert_eq!(seated, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_register_move_duplicate_submissions_apply_once() {
    let registry = Arc::new(MatchRegistry::<TwoD>::new());
    let id = registry.create_match(pid("alice"), standard()).await.unwrap();
    registry.join_match(pid("bob"), &id).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let registry = Arc::clone(&registry);
        let id = id.clone();
        handles.push(tokio::spawn(async move {
            let request = MoveRequest {
                match_id: id,
                target: Column { col: 2 },
            };
            registry.register_move(&pid("alice"), request).await
        }));
    }

    let mut applied = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => applied += 1,
            Err(err) => assert_eq!(err, MatchError::NotYourTurn),
        }
    }

    assert_eq!(applied, 1);
    let game = registry.get(&id).await.unwrap();
    assert_eq!(game.moves().len(), 1);
    assert_eq!(game.board()[5][2], Slot::Player1);
    assert_eq!(game.board()[4][2], Slot::Empty);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_register_move_racing_players_alternate_strictly() {
    let registry = Arc::new(MatchRegistry::<ThreeD>::new());
    let options = MatchOptions::new(Dims3 { r: 5, c: 5, h: 5 }, 5).starts_first(true);
    let id = registry.create_match(pid("alice"), options).await.unwrap();
    registry.join_match(pid("bob"), &id).await.unwrap();

    // Each player hammers their own stick; only legal turns get through.
    // Four pieces per stick stays short of the five needed to win.
    let spawn_player = |name: &'static str, row: usize| {
        let registry = Arc::clone(&registry);
        let id = id.clone();
        tokio::spawn(async move {
            let mut applied = 0;
            while applied < 4 {
                let request = MoveRequest {
                    match_id: id.clone(),
                    target: Stick { row, col: row },
                };
                match registry.register_move(&pid(name), request).await {
                    Ok(_) => applied += 1,
                    Err(MatchError::NotYourTurn) => tokio::task::yield_now().await,
                    Err(other) => panic!("unexpected error: {other}"),
                }
            }
        })
    };
    let alice = spawn_player("alice", 0);
    let bob = spawn_player("bob", 4);
    alice.await.unwrap();
    bob.await.unwrap();

    let game = registry.get(&id).await.unwrap();
    assert_eq!(game.moves().len(), 8);
    for (i, mv) in game.moves().iter().enumerate() {
        let expected = if i % 2 == 0 { 0 } else { 4 };
        assert_eq!(mv.target.row, expected, "move {i} out of turn");
    }
}
