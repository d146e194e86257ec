//! Tracer + player + renderer working together.

use std::sync::atomic::Ordering;
use std::time::Duration;

use bubbleshow::{trace, CellBoard, Command, PlayerState, Renderer, Transcript};
use tokio::time::Instant;

use super::common::recorder::{counting_player, run_to_idle, Call, Recorder};

const D: Duration = Duration::from_millis(100);

fn transcript_of(values: &[i64]) -> String {
    let (mut player, _) = counting_player(D);
    let mut transcript = Transcript::new(Vec::new());
    player
        .start(values, trace(values).trace, &mut transcript, Instant::now())
        .unwrap();
    run_to_idle(&mut player, &mut transcript, Instant::now());
    String::from_utf8(transcript.finish().unwrap()).unwrap()
}

#[test]
fn worked_example_plays_in_order() {
    let values = [3, 1, 2];
    let traced = trace(&values);
    let (mut player, finished) = counting_player(D);
    let mut recorder = Recorder::new();
    let t0 = Instant::now();

    player
        .start(&values, traced.trace, &mut recorder, t0)
        .unwrap();
    run_to_idle(&mut player, &mut recorder, t0);

    assert_eq!(
        recorder.calls,
        vec![
            Call::Initial(vec![3, 1, 2]),
            Call::Compare(1),
            Call::Swap(0, 1),
            Call::Compare(2),
            Call::Swap(1, 2),
            Call::MarkMax(2),
            Call::Compare(1),
            Call::MarkMax(1),
            Call::End,
        ]
    );
    assert_eq!(player.state(), PlayerState::Finished);
    assert_eq!(finished.load(Ordering::SeqCst), 1);
}

#[test]
fn board_ends_sorted_for_many_inputs() {
    let inputs: [&[i64]; 5] = [&[], &[7], &[2, 1], &[5, 5, 1, 5], &[9, 8, 7, 6, 5, 4, 3, 2, 1]];
    for values in inputs {
        let traced = trace(values);
        let (mut player, finished) = counting_player(D);
        let mut board = CellBoard::default();
        player
            .start(values, traced.trace, &mut board, Instant::now())
            .unwrap();
        run_to_idle(&mut player, &mut board, Instant::now());

        assert_eq!(board.values(), traced.sorted, "input {values:?}");
        assert!(board.is_finished());
        assert_eq!(finished.load(Ordering::SeqCst), 1);
    }
}

#[test]
fn transcript_of_worked_example() {
    insta::assert_snapshot!(transcript_of(&[3, 1, 2]), @r"
    cells: 3 1 2
    compare [0]=3 [1]=1
    swap [0] [1] -> 1 3 2
    compare [1]=3 [2]=2
    swap [1] [2] -> 1 2 3
    settled [2]=3
    compare [0]=1 [1]=2
    settled [1]=2
    done: 1 2 3
    ");
}

#[test]
fn pausing_anywhere_yields_the_same_transcript() {
    let values = [4, 3, 2, 1];
    let expected = transcript_of(&values);
    let steps = trace(&values).trace.len();

    for pause_after in 0..steps {
        let (mut player, _) = counting_player(D);
        let mut transcript = Transcript::new(Vec::new());
        let mut now = Instant::now();
        player
            .start(&values, trace(&values).trace, &mut transcript, now)
            .unwrap();

        for _ in 0..pause_after {
            now = player.next_deadline().unwrap();
            player.poll(now, &mut transcript);
        }
        if player.state() == PlayerState::Running {
            player.pause().unwrap();
            // Time passing while paused must not apply anything.
            now += D * 10;
            assert_eq!(player.poll(now, &mut transcript), None);
            player.resume(now).unwrap();
        }
        run_to_idle(&mut player, &mut transcript, now);

        let text = String::from_utf8(transcript.finish().unwrap()).unwrap();
        assert_eq!(text, expected, "paused after {pause_after} step(s)");
    }
}

#[test]
fn reset_mid_show_then_restart_matches_fresh_run() {
    let values = [2, 3, 1];
    let (mut player, finished) = counting_player(D);
    let mut recorder = Recorder::new();
    let t0 = Instant::now();

    player
        .start(&values, trace(&values).trace, &mut recorder, t0)
        .unwrap();
    player.poll(t0 + D, &mut recorder);
    player.poll(t0 + D * 2, &mut recorder);
    player.reset(&mut recorder);
    assert_eq!(recorder.calls.last(), Some(&Call::Clear));
    assert_eq!(player.state(), PlayerState::Idle);
    assert_eq!(player.next_deadline(), None);
    assert_eq!(finished.load(Ordering::SeqCst), 0);

    let t1 = t0 + D * 5;
    player
        .start(&values, trace(&values).trace, &mut recorder, t1)
        .unwrap();
    run_to_idle(&mut player, &mut recorder, t1);
    let restarted = recorder.since_initial().to_vec();

    let mut fresh = Recorder::new();
    let (mut other, _) = counting_player(D);
    other
        .start(&values, trace(&values).trace, &mut fresh, t1)
        .unwrap();
    run_to_idle(&mut other, &mut fresh, t1);

    assert_eq!(restarted, fresh.since_initial());
    assert_eq!(finished.load(Ordering::SeqCst), 1);
}

#[test]
fn one_command_per_interval() {
    let values = [3, 2, 1];
    let traced = trace(&values);
    let total = traced.trace.len();
    let (mut player, _) = counting_player(D);
    let mut recorder = Recorder::new();
    let t0 = Instant::now();
    player.start(&values, traced.trace, &mut recorder, t0).unwrap();

    assert_eq!(player.poll(t0 + D - Duration::from_millis(1), &mut recorder), None);
    // Even far past the deadline only a single command is applied.
    assert!(player.poll(t0 + D * 50, &mut recorder).is_some());
    assert_eq!(player.consumed(), 1);
    assert_eq!(player.next_deadline(), Some(t0 + D * 51));
    assert_eq!(player.remaining().len(), total - 1);
    assert_eq!(player.remaining().last(), Some(&Command::End));
}

#[test]
fn renderer_trait_objects_are_accepted() {
    let values = [1, 0];
    let (mut player, _) = counting_player(D);
    let mut board = CellBoard::default();
    let renderer: &mut dyn Renderer = &mut board;
    player
        .start(&values, trace(&values).trace, renderer, Instant::now())
        .unwrap();
    run_to_idle(&mut player, renderer, Instant::now());
    assert_eq!(board.values(), vec![0, 1]);
}

#[test]
fn board_swap_animation_follows_the_player_clock() {
    let values = [2, 1];
    let (mut player, _) = counting_player(D);
    let mut board = CellBoard::new(D / 2);
    let t0 = Instant::now() + Duration::from_secs(3600);
    player
        .start(&values, trace(&values).trace, &mut board, t0)
        .unwrap();

    player.poll(t0 + D, &mut board);
    let swap_at = t0 + D * 2;
    assert_eq!(
        player.poll(swap_at, &mut board),
        Some(bubbleshow::Tick::Applied(Command::Swap { i: 0, j: 1 }))
    );

    assert!(board.is_animating(swap_at + D / 4));
    assert_eq!(board.cell_x(0, swap_at), bubbleshow::render::board::CELL_WIDTH);
    assert!(!board.is_animating(swap_at + D / 2));
}
