//! FileStateRepository against a real directory.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;
use uno_core::{
    Command, Direction, GameConfig, GameEngine, GameState, PendingDecision, PlayerId, Timestamp,
    TurnContext,
};
use uno_runtime::{
    ConnectionHub, Dispatcher, FileStateRepository, ManualClock, RepositoryError, StateRepository,
};

fn started_game() -> GameState {
    let config = GameConfig::default();
    let mut rng = StdRng::seed_from_u64(9);
    let mut state = GameState::new();
    let mut run = |state: &mut GameState, actor: &str, command: Command| {
        let mut ctx = TurnContext::new(&config, Timestamp(500), &mut rng);
        GameEngine::new(state)
            .execute(&PlayerId::from(actor), &command, &mut ctx)
            .unwrap();
    };

    for id in ["a", "b", "c"] {
        run(&mut state, id, Command::Join { name: id.to_uppercase() });
        run(&mut state, id, Command::Ready);
    }
    run(&mut state, "a", Command::StartGame);
    state
}

#[test]
fn stores_and_reloads_a_running_game() {
    let dir = TempDir::new().unwrap();
    let repo = FileStateRepository::new(dir.path()).unwrap();

    let mut state = started_game();
    state.direction = Direction::CounterClockwise;
    state.players[0].last_card_timestamp = Some(Timestamp(1234));
    state.pending_decision = Some(PendingDecision {
        player_id: PlayerId::from("a"),
        card_id: state.players[0].hand[0].id.clone(),
    });
    repo.put("room-1", &state).unwrap();

    let reloaded = repo.get("room-1").unwrap().unwrap();
    assert_eq!(reloaded, state);
    assert!(reloaded.check_invariants().is_ok());
    assert!(dir.path().join("room-1.bin").exists());
    assert!(!dir.path().join("room-1.bin.tmp").exists());
}

#[test]
fn unknown_room_is_absent() {
    let dir = TempDir::new().unwrap();
    let repo = FileStateRepository::new(dir.path()).unwrap();

    assert!(repo.get("nobody").unwrap().is_none());
    repo.delete("nobody").unwrap();
}

#[test]
fn lists_and_deletes_rooms() {
    let dir = TempDir::new().unwrap();
    let repo = FileStateRepository::new(dir.path()).unwrap();
    repo.put("beta", &GameState::new()).unwrap();
    repo.put("alpha", &GameState::new()).unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

    assert_eq!(repo.list_rooms().unwrap(), vec!["alpha", "beta"]);

    repo.delete("alpha").unwrap();
    assert_eq!(repo.list_rooms().unwrap(), vec!["beta"]);
}

#[test]
fn rejects_keys_that_are_not_plain_names() {
    let dir = TempDir::new().unwrap();
    let repo = FileStateRepository::new(dir.path()).unwrap();

    for key in ["", "../escape", "a/b", "dot.ted"] {
        assert!(
            matches!(
                repo.put(key, &GameState::new()),
                Err(RepositoryError::InvalidRoomKey(_))
            ),
            "{key:?}"
        );
    }
}

#[test]
fn corrupt_file_is_a_serialization_error() {
    let dir = TempDir::new().unwrap();
    let repo = FileStateRepository::new(dir.path()).unwrap();
    std::fs::write(dir.path().join("broken.bin"), [0xff, 0x01]).unwrap();

    assert!(matches!(
        repo.get("broken"),
        Err(RepositoryError::Serialization(_))
    ));
}

#[test]
fn room_survives_a_dispatcher_restart() {
    let dir = TempDir::new().unwrap();
    let repo: Arc<FileStateRepository> = Arc::new(FileStateRepository::new(dir.path()).unwrap());
    let hub = Arc::new(ConnectionHub::new());
    let _inbox = hub.attach(PlayerId::from("p1"));

    let mut first = Dispatcher::new(
        "lounge",
        repo.clone(),
        hub.clone(),
        Arc::new(ManualClock::default()),
        GameConfig::default(),
        StdRng::seed_from_u64(3),
    );
    first.connect(&PlayerId::from("p1")).unwrap();
    first
        .handle_message(&PlayerId::from("p1"), r#"{"type":"join","name":"Ann"}"#)
        .unwrap();
    drop(first);

    let reopened = Arc::new(FileStateRepository::new(dir.path()).unwrap());
    let second = Dispatcher::new(
        "lounge",
        reopened,
        hub,
        Arc::new(ManualClock::default()),
        GameConfig::default(),
        StdRng::seed_from_u64(3),
    );
    let state = second.state().unwrap();
    assert_eq!(state.players.len(), 1);
    assert_eq!(state.players[0].name, "Ann");
}

#[test]
fn fresh_connection_after_restart_takes_no_stored_seat() {
    let dir = TempDir::new().unwrap();
    let old_ids = [PlayerId::from("boot-a-1"), PlayerId::from("boot-a-2")];

    let hub = Arc::new(ConnectionHub::new());
    let mut first = Dispatcher::new(
        "lounge",
        Arc::new(FileStateRepository::new(dir.path()).unwrap()),
        hub.clone(),
        Arc::new(ManualClock::default()),
        GameConfig::default(),
        StdRng::seed_from_u64(3),
    );
    let _inboxes: Vec<_> = old_ids.iter().map(|id| hub.attach(id.clone())).collect();
    for (id, name) in old_ids.iter().zip(["Ann", "Bob"]) {
        first.connect(id).unwrap();
        first
            .handle_message(id, &format!(r#"{{"type":"join","name":"{name}"}}"#))
            .unwrap();
        first.handle_message(id, r#"{"type":"ready"}"#).unwrap();
    }
    first
        .handle_message(&old_ids[0], r#"{"type":"startGame"}"#)
        .unwrap();
    assert!(first.state().unwrap().started);
    drop(first);

    // New process: new hub, ids from a different boot.
    let hub = Arc::new(ConnectionHub::new());
    let mut second = Dispatcher::new(
        "lounge",
        Arc::new(FileStateRepository::new(dir.path()).unwrap()),
        hub.clone(),
        Arc::new(ManualClock::default()),
        GameConfig::default(),
        StdRng::seed_from_u64(3),
    );
    let stranger = PlayerId::from("boot-b-1");
    let _inbox = hub.attach(stranger.clone());
    second.connect(&stranger).unwrap();

    let state = second.state().unwrap();
    assert!(state.players.is_empty());
    assert!(!state.started);
    assert!(!state.is_host(&stranger));
    assert!(state.check_invariants().is_ok());
}
