use flipbook_rs::prelude::*;

use crate::{SCREEN, bar_frames, play_to_end};

fn watch_face(
	config: &AnimationConfig,
	options: PlaybackOptions,
) -> (LayerTree, MemoryStore, ManualScheduler, Player) {
	let mut display = LayerTree::new(SCREEN);
	let mut store = MemoryStore::with_frames(config.first_resource_id, bar_frames(12));
	let root = display.root();
	let anim = Animation::new(&mut display, &mut store, root, config).unwrap();
	let player = Player::new(anim, options, 7).unwrap();
	(display, store, ManualScheduler::new(), player)
}

#[test_log::test]
fn test_watch_face_loop_until_stopped() {
	let config = AnimationConfig::new(1, 12).hidden_at_rest(true);
	let (mut display, mut store, mut timers, mut player) =
		watch_face(&config, PlaybackOptions::new(PlaybackMode::Linear, 20, true));
	assert!(display.is_hidden(player.animation().layer()));

	player.play(&mut timers, 100).unwrap();
	let (seen, elapsed) =
		play_to_end(&mut display, &mut store, &mut timers, &mut player, Some(15));

	// the stop waits for the loop boundary: the second loop runs to frame 11, which is
	// hidden in the same tick
	let mut expected: Vec<Option<u32>> = (0..12).chain(0..11).map(Some).collect();
	expected.push(None);
	assert_eq!(seen, expected);
	assert_eq!(elapsed, 100 + 23 * 50);
	assert!(display.is_hidden(player.animation().layer()));

	player.teardown(&mut display, &mut store, &mut timers);
	assert_eq!(store.outstanding(), 0);
	assert_eq!(timers.pending(), 0);
}

#[test_log::test]
fn test_single_alternating_pass_rests_on_first_frame() {
	let config = AnimationConfig::new(50, 4);
	let (mut display, mut store, mut timers, mut player) =
		watch_face(&config, PlaybackOptions::new(PlaybackMode::Alternating, 10, false));

	player.play(&mut timers, 0).unwrap();
	let (seen, _) = play_to_end(&mut display, &mut store, &mut timers, &mut player, None);

	// the tick past frame 0 ends the pass and puts frame 0 back
	assert_eq!(seen, vec![Some(0), Some(1), Some(2), Some(3), Some(2), Some(1), Some(0), Some(0)]);
	assert!(!player.is_playing());
	assert_eq!(player.animation().frame_index(), 0);
	assert_eq!(player.animation().resource_cursor(), 50);

	player.teardown(&mut display, &mut store, &mut timers);
	assert_eq!(store.outstanding(), 0);
}

#[test_log::test]
fn test_replay_after_stop() {
	let config = AnimationConfig::new(1, 3);
	let (mut display, mut store, mut timers, mut player) =
		watch_face(&config, PlaybackOptions::new(PlaybackMode::Linear, 50, false));

	for _ in 0..2 {
		player.play(&mut timers, 0).unwrap();
		let (seen, _) = play_to_end(&mut display, &mut store, &mut timers, &mut player, None);
		assert_eq!(seen, vec![Some(0), Some(1), Some(2), Some(0)]);
	}
	assert_eq!(store.outstanding(), 1);

	player.teardown(&mut display, &mut store, &mut timers);
	assert_eq!(store.outstanding(), 0);
}

#[test_log::test]
fn test_missing_frame_aborts_playback() {
	let config = AnimationConfig::new(1, 12);
	let (mut display, mut store, mut timers, mut player) =
		watch_face(&config, PlaybackOptions::new(PlaybackMode::Linear, 20, true));
	store.remove(4);

	player.play(&mut timers, 0).unwrap();
	let mut error = None;
	while error.is_none() {
		for (_, cookie) in timers.advance_to_next() {
			if let Err(e) = player.handle_timer(&mut display, &mut store, &mut timers, cookie) {
				error = Some(e);
			}
		}
	}

	assert!(matches!(
		error,
		Some(AnimationError::ResourceLoad(ResourceError::NotFound {
			id: 4
		}))
	));
	assert!(!player.is_playing());
	assert_eq!(timers.pending(), 0);
	assert_eq!(store.outstanding(), 0);

	player.teardown(&mut display, &mut store, &mut timers);
}

#[test_log::test]
fn test_two_animations_share_one_scheduler() {
	let mut display = LayerTree::new(SCREEN);
	let mut store = MemoryStore::with_frames(1, bar_frames(6));
	let mut timers = ManualScheduler::new();
	let root = display.root();

	let top = Animation::new(&mut display, &mut store, root, &AnimationConfig::new(1, 6)).unwrap();
	let bottom = Animation::new(
		&mut display,
		&mut store,
		root,
		&AnimationConfig::new(1, 6).at(Point::new(0, 100)),
	)
	.unwrap();
	let mut fast = Player::new(top, PlaybackOptions::new(PlaybackMode::Linear, 20, true), 1).unwrap();
	let mut slow =
		Player::new(bottom, PlaybackOptions::new(PlaybackMode::Alternating, 10, true), 2).unwrap();

	fast.play(&mut timers, 0).unwrap();
	slow.play(&mut timers, 0).unwrap();
	while timers.now_ms() < 500 {
		for (_, cookie) in timers.advance_to_next() {
			fast.handle_timer(&mut display, &mut store, &mut timers, cookie).unwrap();
			slow.handle_timer(&mut display, &mut store, &mut timers, cookie).unwrap();
		}
	}

	// 11 ticks at 50 ms wrap once after 6; 6 ticks at 100 ms run 0..5, then back to 4
	assert_eq!(fast.animation().frame_index(), 5);
	assert_eq!(slow.animation().frame_index(), 6);
	assert_eq!(slow.animation().resource_cursor(), 5);

	fast.teardown(&mut display, &mut store, &mut timers);
	slow.teardown(&mut display, &mut store, &mut timers);
	assert_eq!(store.outstanding(), 0);
	assert_eq!(timers.pending(), 0);
}
