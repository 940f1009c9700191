//! Transition engine tests: intra-lane reorders and cross-lane moves.

use std::sync::Arc;

use super::fixtures::{
    Engine, Lifecycle, MockRepository, Repo, assert_lane_invariant, build_task, engine, lane_ids,
    lane_orders, lifecycle, seed_task,
};
use crate::task::{
    domain::{Status, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
    services::{TransitionEngine, TransitionError},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

struct Board {
    repo: Arc<Repo>,
    lifecycle: Lifecycle,
    engine: Engine,
}

#[fixture]
fn board() -> Board {
    let repo = Arc::new(Repo::new());
    Board {
        lifecycle: lifecycle(&repo),
        engine: engine(&repo),
        repo,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reorder_moves_last_task_to_the_front(board: Board) {
    let first = seed_task(&board.lifecycle, "a", Status::Todo).await;
    let second = seed_task(&board.lifecycle, "b", Status::Todo).await;
    let third = seed_task(&board.lifecycle, "c", Status::Todo).await;
    assert_eq!(lane_orders(&board.repo, Status::Todo).await, vec![1, 2, 3]);

    board
        .engine
        .move_task(third.id(), Status::Todo, 0)
        .await
        .expect("reorder should succeed");

    assert_eq!(
        lane_ids(&board.repo, Status::Todo).await,
        vec![third.id(), first.id(), second.id()]
    );
    assert_eq!(lane_orders(&board.repo, Status::Todo).await, vec![1, 2, 3]);

    // Intra-lane reorders add no activity entries to anyone.
    for id in [first.id(), second.id(), third.id()] {
        let task = board
            .repo
            .find_by_id(id)
            .await
            .expect("lookup should succeed")
            .expect("task should exist");
        assert_eq!(task.activity().len(), 1);
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn move_into_empty_lane_gets_order_one(board: Board) {
    let task = seed_task(&board.lifecycle, "x", Status::Todo).await;

    board
        .engine
        .move_task(task.id(), Status::Completed, 0)
        .await
        .expect("move should succeed");

    let moved = board
        .repo
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(moved.status(), Status::Completed);
    assert_eq!(moved.order(), 1);
    assert_eq!(moved.activity().len(), 2);
    let last = moved.activity().entries().last().expect("transition entry");
    assert_eq!(last.description, "status changed from todo to completed");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn move_to_current_position_is_a_no_op(board: Board) {
    seed_task(&board.lifecycle, "a", Status::Todo).await;
    let second = seed_task(&board.lifecycle, "b", Status::Todo).await;
    let before = board
        .repo
        .list_by_status(Status::Todo)
        .await
        .expect("lane listing should succeed");

    board
        .engine
        .move_task(second.id(), Status::Todo, 1)
        .await
        .expect("no-op move should succeed");

    let after = board
        .repo
        .list_by_status(Status::Todo)
        .await
        .expect("lane listing should succeed");
    assert_eq!(after, before);
}

#[tokio::test(flavor = "multi_thread")]
async fn no_op_move_issues_no_repository_writes() {
    let task = build_task("only", Status::Todo, 1);
    let task_id = task.id();
    let found = task.clone();
    let lane = vec![task];

    let mut repo = MockRepository::new();
    repo.expect_find_by_id()
        .withf(move |id| *id == task_id)
        .returning(move |_| Ok(Some(found.clone())));
    repo.expect_list_by_status()
        .withf(|status| *status == Status::Todo)
        .returning(move |_| Ok(lane.clone()));
    repo.expect_update().never();
    repo.expect_commit().never();

    let mock_engine = TransitionEngine::new(Arc::new(repo), Arc::new(DefaultClock));
    mock_engine
        .move_task(task_id, Status::Todo, 0)
        .await
        .expect("no-op move should succeed");
}

#[tokio::test(flavor = "multi_thread")]
async fn commit_failure_surfaces_as_repository_error() {
    let task = build_task("mover", Status::Todo, 1);
    let task_id = task.id();
    let found = task.clone();
    let source_lane = vec![task];

    let mut repo = MockRepository::new();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(found.clone())));
    repo.expect_list_by_status().returning(move |status| {
        if status == Status::Todo {
            Ok(source_lane.clone())
        } else {
            Ok(Vec::new())
        }
    });
    repo.expect_commit().returning(|_| {
        Err(TaskRepositoryError::persistence(std::io::Error::other(
            "store offline",
        )))
    });

    let mock_engine = TransitionEngine::new(Arc::new(repo), Arc::new(DefaultClock));
    let result = mock_engine.move_task(task_id, Status::Completed, 0).await;

    assert!(matches!(
        result,
        Err(TransitionError::Repository(
            TaskRepositoryError::Persistence(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cross_lane_insert_lands_at_requested_position(board: Board) {
    let mover = seed_task(&board.lifecycle, "mover", Status::Todo).await;
    let dest_first = seed_task(&board.lifecycle, "d1", Status::InProgress).await;
    let dest_second = seed_task(&board.lifecycle, "d2", Status::InProgress).await;

    board
        .engine
        .move_task(mover.id(), Status::InProgress, 1)
        .await
        .expect("move should succeed");

    assert_eq!(
        lane_ids(&board.repo, Status::InProgress).await,
        vec![dest_first.id(), mover.id(), dest_second.id()]
    );
    assert_eq!(
        lane_orders(&board.repo, Status::InProgress).await,
        vec![1, 2, 3]
    );
    assert!(lane_ids(&board.repo, Status::Todo).await.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn destination_index_past_the_end_appends(board: Board) {
    seed_task(&board.lifecycle, "d1", Status::Completed).await;
    let mover = seed_task(&board.lifecycle, "mover", Status::Todo).await;

    board
        .engine
        .move_task(mover.id(), Status::Completed, 42)
        .await
        .expect("move should succeed");

    let lane = lane_ids(&board.repo, Status::Completed).await;
    assert_eq!(lane.last(), Some(&mover.id()));
    assert_lane_invariant(&board.repo, Status::Completed).await;
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn source_lane_stays_consistent_after_departure(board: Board) {
    let first = seed_task(&board.lifecycle, "a", Status::Todo).await;
    let second = seed_task(&board.lifecycle, "b", Status::Todo).await;
    let third = seed_task(&board.lifecycle, "c", Status::Todo).await;

    board
        .engine
        .move_task(second.id(), Status::InProgress, 0)
        .await
        .expect("move should succeed");

    assert_eq!(
        lane_ids(&board.repo, Status::Todo).await,
        vec![first.id(), third.id()]
    );
    assert_eq!(lane_orders(&board.repo, Status::Todo).await, vec![1, 2]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_a_missing_task_reports_not_found(board: Board) {
    let ghost = TaskId::new();
    let result = board.engine.move_task(ghost, Status::Todo, 0).await;

    assert!(matches!(
        result,
        Err(TransitionError::TaskNotFound(id)) if id == ghost
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lanes_stay_strictly_increasing_through_repeated_moves(board: Board) {
    let mut ids = Vec::new();
    for title in ["a", "b", "c", "d", "e"] {
        ids.push(seed_task(&board.lifecycle, title, Status::Todo).await.id());
    }

    let moves: [(usize, Status, usize); 6] = [
        (0, Status::InProgress, 0),
        (1, Status::Completed, 0),
        (2, Status::InProgress, 0),
        (3, Status::Todo, 0),
        (4, Status::InProgress, 1),
        (0, Status::Completed, 5),
    ];
    for (which, status, index) in moves {
        let id = *ids.get(which).expect("seeded id");
        board
            .engine
            .move_task(id, status, index)
            .await
            .expect("move should succeed");
        for lane in Status::ALL {
            assert_lane_invariant(&board.repo, lane).await;
        }
    }
}
