use domination_library::{presets, setup_library};
use domination_sim::checkpoint::Checkpoint;
use domination_sim::client::Table;
use domination_sim::config::GameConfig;
use domination_sim::gameplay::{GameOverReason, Phase};
use domination_sim::tests::*;
use pretty_assertions::assert_eq;

fn preset_config(name: &str, kingdom: Vec<String>) -> GameConfig {
    GameConfig {
        name: name.into(),
        kingdom,
        seed: Some(11),
        auto_treasures: true,
        ..Default::default()
    }
}

#[tokio::test]
async fn every_preset_plays_to_the_end() {
    let _guard = setup_test_logs();
    for preset in presets() {
        let library = setup_library().unwrap();
        let (mut game, _) = setup_game_with_config(
            library,
            preset_config(preset.name, preset.kingdom()),
            vec![bot(), bot(), bot()],
        );

        let outcome = game.play_game().await;
        assert!(
            matches!(
                outcome.reason,
                GameOverReason::ScarcePileEmpty(_) | GameOverReason::PilesEmpty(_)
            ),
            "{}: {}",
            preset.name,
            outcome.reason
        );
        assert_eq!(game.state.phase, Phase::GameOver);
        assert_cards_conserved(&game.state);

        let report = game.report().unwrap();
        assert_eq!(report.scores.len(), 3);
    }
}

#[tokio::test]
async fn restored_library_game_ends_the_same() {
    let preset = &presets()[4];
    let (mut game, _) = setup_game_with_config(
        setup_library().unwrap(),
        preset_config(preset.name, preset.kingdom()),
        vec![bot(), bot()],
    );
    game.start_game().await.unwrap();
    for _ in 0..3 {
        game.play_round().await.unwrap();
    }
    let checkpoint = Checkpoint::capture(&game).unwrap();
    let blob = checkpoint.encode().unwrap();

    let table = Table::new();
    for (actor, name) in checkpoint.players() {
        table.attach_player(actor, name, bot());
    }
    let mut restored = Checkpoint::decode(&blob)
        .unwrap()
        .restore((*game.library).clone(), table)
        .unwrap();

    let outcome = game.play_game().await;
    let restored_outcome = restored.play_game().await;
    assert_eq!(outcome, restored_outcome);
    assert_eq!(game.scores(), restored.scores());
}
