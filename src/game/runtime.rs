//! Game Runtime
//!
//! The game loop owns the state and is the single place it changes.
//! Inputs and commands are queued with [`GameLoop::send`]; each call to
//! [`GameLoop::update`] handles the queued events one at a time, in order,
//! and runs the movement ticks due for the elapsed time (boundary crossings
//! switch level there). The ticks run just before the first interact pulse
//! of the update, or after the last event if there is none, so an interact
//! always sees the post-tick state and later events see its effect.
//!
//! Movement ticks only run while there is a movement vector and no
//! dialogue. Transitions are reported through [`Events`].

use std::time::Duration;

use super::dialogue::{self, DialogueStep};
use super::event::*;
use super::movement::{self, Bounds};
use super::progression::{self, AdvanceOutcome};
use super::proximity;
use super::snapshot::GameSnapshot;
use super::state::GameState;
use super::ticker::FixedTicker;
use crate::config::GameConfig;
use crate::input::InputAggregator;
use crate::world::LevelCatalog;

pub struct GameLoop {
    catalog: LevelCatalog,
    config: GameConfig,
    state: GameState,
    input: InputAggregator,
    ticker: FixedTicker,
    queue: EventQueue<GameEvent>,

    /// Notifications produced by the last updates. The caller clears them.
    pub events: Events,
}

impl GameLoop {
    pub fn new(catalog: LevelCatalog, config: GameConfig) -> Self {
        let state = GameState::new(&catalog, &config);
        let ticker = FixedTicker::new(config.tick(), config.max_ticks_per_update);
        Self {
            catalog,
            config,
            state,
            input: InputAggregator::new(),
            ticker,
            queue: EventQueue::new(),
            events: Events::new(),
        }
    }

    /// Queue an event for the next update
    pub fn send(&mut self, event: impl Into<GameEvent>) {
        self.queue.send(event.into());
    }

    /// Process queued events in order and let `elapsed` time pass
    pub fn update(&mut self, elapsed: Duration) {
        let mut unspent = Some(elapsed);
        for event in self.queue.take() {
            self.dispatch(event);
            while self.input.take_interact() {
                self.run_ticks(&mut unspent);
                self.interact();
            }
        }
        self.run_ticks(&mut unspent);
    }

    /// Spend the update's elapsed time on due ticks, at most once
    fn run_ticks(&mut self, unspent: &mut Option<Duration>) {
        let Some(elapsed) = unspent.take() else {
            return;
        };
        for _ in 0..self.ticker.advance(elapsed) {
            self.tick();
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.state, &self.catalog, &self.config)
    }

    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::Start => self.start(),
            GameEvent::Restart => self.restart(),
            GameEvent::Input(input) => {
                self.input.apply(input);
                self.sync_ticker();
            }
            GameEvent::Advance => self.advance_dialogue(),
            GameEvent::TalkTo(id) => self.talk_to(&id),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    fn start(&mut self) {
        if self.state.started {
            return;
        }
        self.state.started = true;
        tracing::info!(levels = self.catalog.len(), "journey started");
        self.on_level_entered();
        self.sync_ticker();
    }

    /// Full reinitialization from the static catalog
    fn restart(&mut self) {
        self.state = GameState::new(&self.catalog, &self.config);
        self.input.reset();
        self.ticker.stop();
        tracing::info!("game restarted");
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Run the ticker only while there is somewhere to go
    fn sync_ticker(&mut self) {
        let wants_motion = self.state.started
            && !self.state.dialogue_active()
            && self.input.movement(false).is_moving();

        if wants_motion {
            self.ticker.start();
        } else {
            self.ticker.stop();
            self.state.player = movement::halt(self.state.player);
        }
    }

    fn tick(&mut self) {
        let vector = self.input.movement(self.state.dialogue_active());
        let Some(level) = self.catalog.get(self.state.level_index()) else {
            return;
        };
        let bounds = Bounds::for_level(level.width, self.config.lower_bound);
        let can_exit = progression::can_advance(&self.state, &self.catalog, &self.config);

        let result = movement::step(self.state.player, vector, bounds, self.config.speed, can_exit);
        self.state.player = result.player;

        if result.exit_right {
            match progression::request_advance(&mut self.state, &self.catalog, &self.config) {
                AdvanceOutcome::Entered { from, to } => {
                    tracing::debug!(from, to, "crossed level boundary");
                    self.on_level_entered();
                }
                AdvanceOutcome::FinalLevel | AdvanceOutcome::Locked => {
                    self.state.player.position = bounds.clamp(self.state.player.position);
                }
            }
        }
    }

    fn on_level_entered(&mut self) {
        let index = self.state.level_index();
        if let Some(level) = self.catalog.get(index) {
            tracing::info!(level = index, id = %level.id, title = %level.title, "entered level");
            self.events.level_entered.send(LevelEnteredEvent {
                level_index: index,
                level_id: level.id.clone(),
            });
        }
        self.check_completion();
    }

    // =========================================================================
    // Dialogue
    // =========================================================================

    /// Interact pulse: start the game, advance a running dialogue, or talk
    /// to whoever is nearest
    fn interact(&mut self) {
        if !self.state.started {
            self.start();
            return;
        }
        if self.state.dialogue_active() {
            self.advance_dialogue();
            return;
        }

        let index = self.state.level_index();
        let Some(level) = self.catalog.get(index) else {
            return;
        };
        let candidate = proximity::nearest_unmet(
            self.state.player.position,
            &level.characters,
            self.state.met.level(index),
            self.config.interaction_radius,
        );
        match candidate {
            Some(character) => self.begin_dialogue(character),
            None => tracing::debug!(position = self.state.player.position, "nobody to talk to"),
        }
    }

    /// Talk to a named character; same range and met rules as interact
    fn talk_to(&mut self, id: &str) {
        if !self.state.started || self.state.dialogue_active() {
            return;
        }
        let index = self.state.level_index();
        let Some(level) = self.catalog.get(index) else {
            return;
        };
        let Some(character) = level.character_index(id) else {
            tracing::debug!(id, "no such character in this level");
            return;
        };
        let reachable = !self.state.met.is_met(index, character)
            && proximity::in_range(
                self.state.player.position,
                &level.characters[character],
                self.config.interaction_radius,
            );
        if reachable {
            self.begin_dialogue(character);
        }
    }

    fn begin_dialogue(&mut self, character: usize) {
        if dialogue::begin(&mut self.state.dialogue, Some(character)).is_none() {
            return;
        }
        // Freeze movement for the whole conversation
        self.ticker.stop();
        self.state.player = movement::halt(self.state.player);

        let index = self.state.level_index();
        if let Some(c) = self.catalog.get(index).and_then(|l| l.character(character)) {
            tracing::info!(level = index, character = %c.id, "dialogue started");
            self.events.dialogue_started.send(DialogueStartedEvent {
                level_index: index,
                character_id: c.id.clone(),
            });
        }
    }

    fn advance_dialogue(&mut self) {
        let index = self.state.level_index();
        let Some(level) = self.catalog.get(index) else {
            return;
        };

        match dialogue::advance(&mut self.state.dialogue, index, level, &mut self.state.met) {
            DialogueStep::Ignored => {}
            DialogueStep::Advanced { character, line } => {
                self.events.dialogue_advanced.send(DialogueAdvancedEvent { character_index: character, line });
            }
            DialogueStep::Finished { character, newly_met } => {
                if newly_met {
                    let id = level.characters[character].id.clone();
                    tracing::info!(level = index, character = %id, "character met");
                    self.events.character_met.send(CharacterMetEvent { level_index: index, character_id: id });
                }
                self.check_completion();
                // Keys held through the conversation walk on
                self.sync_ticker();
            }
        }
    }

    fn check_completion(&mut self) {
        if progression::check_completion(&mut self.state, &self.catalog) {
            let final_level = self.state.level_index();
            tracing::info!(final_level, "journey complete");
            self.events.game_completed.send(GameCompletedEvent { final_level });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputEvent;
    use crate::world::{CharacterDef, LevelDef};

    const TICK: Duration = Duration::from_millis(16);

    fn npc(id: &str, position: f32, lines: usize) -> CharacterDef {
        CharacterDef {
            id: id.to_string(),
            name: id.to_string(),
            position,
            lines: (0..lines).map(|i| format!("{} says {}", id, i)).collect(),
        }
    }

    fn level(id: &str, characters: Vec<CharacterDef>) -> LevelDef {
        LevelDef {
            id: id.to_string(),
            title: id.to_string(),
            location: String::new(),
            description: String::new(),
            width: 2000.0,
            characters,
        }
    }

    /// Two levels: a four-line npc at 800, then a final level with one npc at 300
    fn two_level_game(config: GameConfig) -> GameLoop {
        let catalog = LevelCatalog::new(
            vec![level("first", vec![npc("guide", 800.0, 4)]), level("last", vec![npc("friend", 300.0, 2)])],
            config.lower_bound,
        )
        .unwrap();
        let mut game = GameLoop::new(catalog, config);
        game.send(GameEvent::Start);
        game.update(Duration::ZERO);
        game.events.clear_all();
        game
    }

    fn run_ticks(game: &mut GameLoop, n: usize) {
        for _ in 0..n {
            game.update(TICK);
        }
    }

    fn interact(game: &mut GameLoop) {
        game.send(InputEvent::Interact);
        game.update(Duration::ZERO);
    }

    #[test]
    fn test_walk_right_150_ticks() {
        let mut game = two_level_game(GameConfig::default());
        game.send(InputEvent::MoveRightStart);
        run_ticks(&mut game, 150);

        let snap = game.snapshot();
        assert_eq!(snap.player.position, 800.0);
        assert!(snap.player.moving);
    }

    #[test]
    fn test_releasing_key_stops_ticker() {
        let mut game = two_level_game(GameConfig::default());
        game.send(InputEvent::MoveRightStart);
        run_ticks(&mut game, 10);
        assert!(game.ticker.is_running());

        game.send(InputEvent::MoveRightStop);
        run_ticks(&mut game, 10);
        assert!(!game.ticker.is_running());
        assert_eq!(game.state.player.position, 100.0);
        assert!(!game.state.player.moving);
    }

    #[test]
    fn test_nothing_moves_before_start() {
        let catalog = LevelCatalog::new(vec![level("only", Vec::new())], 50.0).unwrap();
        let mut game = GameLoop::new(catalog, GameConfig::default());
        game.send(InputEvent::MoveRightStart);
        run_ticks(&mut game, 20);
        assert!(!game.ticker.is_running());
        assert_eq!(game.state.player.position, 50.0);
    }

    #[test]
    fn test_interact_on_title_starts_game() {
        let catalog = LevelCatalog::new(vec![level("only", vec![npc("a", 60.0, 1)])], 50.0).unwrap();
        let mut game = GameLoop::new(catalog, GameConfig::default());
        interact(&mut game);

        assert!(game.state.started);
        assert!(!game.state.dialogue_active());
        assert_eq!(game.events.level_entered.len(), 1);
    }

    #[test]
    fn test_full_conversation() {
        let mut game = two_level_game(GameConfig::default());
        game.state.player.position = 750.0;

        interact(&mut game);
        let talk = game.snapshot().active_dialogue.unwrap();
        assert_eq!(talk.character_id, "guide");
        assert_eq!(talk.current_line_index, 0);
        assert_eq!(game.events.dialogue_started.len(), 1);

        for expected in 1..=3 {
            game.send(GameEvent::Advance);
            game.update(Duration::ZERO);
            assert_eq!(game.snapshot().active_dialogue.unwrap().current_line_index, expected);
        }
        assert!(game.snapshot().active_dialogue.unwrap().is_last_line);

        game.send(GameEvent::Advance);
        game.update(Duration::ZERO);
        let snap = game.snapshot();
        assert!(snap.active_dialogue.is_none());
        assert!(snap.characters[0].met);
        assert_eq!(game.events.character_met.len(), 1);
        assert_eq!(game.events.dialogue_advanced.len(), 3);
    }

    #[test]
    fn test_interact_advances_running_dialogue() {
        let mut game = two_level_game(GameConfig::default());
        game.state.player.position = 800.0;

        interact(&mut game);
        interact(&mut game);
        assert_eq!(game.snapshot().active_dialogue.unwrap().current_line_index, 1);
    }

    #[test]
    fn test_interact_out_of_range_is_noop() {
        let mut game = two_level_game(GameConfig::default());
        game.state.player.position = 600.0;
        interact(&mut game);
        assert!(game.snapshot().active_dialogue.is_none());
    }

    #[test]
    fn test_met_character_cannot_be_talked_to_again() {
        let mut game = two_level_game(GameConfig::default());
        game.state.player.position = 800.0;
        interact(&mut game);
        for _ in 0..4 {
            game.send(GameEvent::Advance);
        }
        game.update(Duration::ZERO);
        assert!(game.state.met.is_met(0, 0));

        interact(&mut game);
        assert!(game.snapshot().active_dialogue.is_none());
    }

    #[test]
    fn test_movement_frozen_during_dialogue() {
        let mut game = two_level_game(GameConfig::default());
        game.state.player.position = 790.0;
        interact(&mut game);
        assert!(game.state.dialogue_active());

        game.send(InputEvent::MoveRightStart);
        game.send(InputEvent::Pointer { x: 1.0, y: 0.0 });
        for _ in 0..30 {
            game.update(TICK);
            assert_eq!(game.state.player.position, 790.0);
            assert!(!game.ticker.is_running());
        }
    }

    #[test]
    fn test_held_key_walks_on_after_dialogue() {
        let mut game = two_level_game(GameConfig::default());
        game.state.player.position = 800.0;
        game.send(InputEvent::MoveRightStart);
        game.send(InputEvent::Interact);
        game.update(Duration::ZERO);
        assert!(game.state.dialogue_active());
        assert!(!game.ticker.is_running());

        // Closing the dialogue with the key still held resumes the walk
        for _ in 0..4 {
            game.send(GameEvent::Advance);
        }
        game.update(TICK);
        assert!(!game.state.dialogue_active());
        assert_eq!(game.state.player.position, 805.0);

        run_ticks(&mut game, 1);
        assert_eq!(game.state.player.position, 810.0);
    }

    #[test]
    fn test_released_key_stays_put_after_dialogue() {
        let mut game = two_level_game(GameConfig::default());
        game.state.player.position = 800.0;
        interact(&mut game);
        for _ in 0..4 {
            game.send(GameEvent::Advance);
        }
        run_ticks(&mut game, 3);
        assert!(!game.ticker.is_running());
        assert_eq!(game.state.player.position, 800.0);
    }

    #[test]
    fn test_interact_then_advance_in_one_update() {
        let mut game = two_level_game(GameConfig::default());
        game.state.player.position = 800.0;
        game.send(InputEvent::Interact);
        game.send(GameEvent::Advance);
        game.update(Duration::ZERO);
        assert_eq!(game.state.dialogue.map(|s| s.line()), Some(1));
    }

    #[test]
    fn test_every_interact_in_an_update_counts() {
        let mut game = two_level_game(GameConfig::default());
        game.state.player.position = 800.0;
        interact(&mut game);
        assert_eq!(game.state.dialogue.map(|s| s.line()), Some(0));

        game.send(InputEvent::Interact);
        game.send(InputEvent::Interact);
        game.update(Duration::ZERO);
        assert_eq!(game.state.dialogue.map(|s| s.line()), Some(2));
        assert_eq!(game.events.dialogue_advanced.len(), 2);
    }

    #[test]
    fn test_talk_to_after_interact_sees_started_game() {
        let catalog = LevelCatalog::new(vec![level("only", vec![npc("a", 60.0, 2)])], 50.0).unwrap();
        let mut game = GameLoop::new(catalog, GameConfig::default());
        game.send(InputEvent::Interact);
        game.send(GameEvent::TalkTo("a".to_string()));
        game.update(Duration::ZERO);

        assert!(game.state.started);
        assert_eq!(game.snapshot().active_dialogue.unwrap().character_id, "a");
    }

    #[test]
    fn test_empty_final_level_completes_on_start() {
        let catalog = LevelCatalog::new(vec![level("only", Vec::new())], 50.0).unwrap();
        let mut game = GameLoop::new(catalog, GameConfig::default());
        game.send(GameEvent::Start);
        game.update(Duration::ZERO);

        assert!(game.snapshot().completed);
        assert_eq!(game.events.game_completed.len(), 1);
    }

    #[test]
    fn test_walking_into_empty_final_level_completes() {
        let catalog =
            LevelCatalog::new(vec![level("first", Vec::new()), level("last", Vec::new())], 50.0).unwrap();
        let mut game = GameLoop::new(catalog, GameConfig::default());
        game.send(GameEvent::Start);
        game.update(Duration::ZERO);
        assert!(!game.snapshot().completed);

        game.state.player.position = 1950.0;
        game.send(InputEvent::MoveRightStart);
        game.update(TICK);

        let snap = game.snapshot();
        assert_eq!(snap.level_index, 1);
        assert!(snap.completed);
        assert_eq!(game.events.game_completed.len(), 1);
    }

    #[test]
    fn test_boundary_enters_next_level() {
        let mut game = two_level_game(GameConfig::default());
        game.state.player.position = 1960.0;
        game.send(InputEvent::MoveRightStart);
        run_ticks(&mut game, 1);

        let snap = game.snapshot();
        assert_eq!(snap.level_index, 1);
        assert_eq!(snap.player.position, 50.0);
        assert_eq!(snap.characters[0].id, "friend");
        assert_eq!(game.events.level_entered.len(), 1);
    }

    #[test]
    fn test_final_level_boundary_clamps() {
        let mut game = two_level_game(GameConfig::default());
        game.state.player.position = 1950.0;
        game.send(InputEvent::MoveRightStart);
        run_ticks(&mut game, 1);
        assert_eq!(game.state.level_index(), 1);

        game.state.player.position = 1945.0;
        run_ticks(&mut game, 10);
        assert_eq!(game.state.level_index(), 1);
        assert_eq!(game.state.player.position, 1950.0);
    }

    #[test]
    fn test_locked_level_clamps_until_everyone_met() {
        let config = GameConfig { require_all_met: true, ..GameConfig::default() };
        let mut game = two_level_game(config);
        game.state.player.position = 1945.0;
        game.send(InputEvent::MoveRightStart);
        run_ticks(&mut game, 5);
        assert_eq!(game.state.level_index(), 0);
        assert_eq!(game.state.player.position, 1950.0);
    }

    #[test]
    fn test_interact_evaluated_after_level_transition() {
        // Friend stands at 100 in the second level; the player arrives at 50
        let catalog = LevelCatalog::new(
            vec![level("first", Vec::new()), level("last", vec![npc("friend", 100.0, 1)])],
            50.0,
        )
        .unwrap();
        let mut game = GameLoop::new(catalog, GameConfig::default());
        game.send(GameEvent::Start);
        game.update(Duration::ZERO);

        game.state.player.position = 1950.0;
        game.send(InputEvent::MoveRightStart);
        game.send(InputEvent::Interact);
        game.update(TICK);

        assert_eq!(game.state.level_index(), 1);
        assert_eq!(game.snapshot().active_dialogue.unwrap().character_id, "friend");
    }

    #[test]
    fn test_completion_on_final_level() {
        let mut game = two_level_game(GameConfig::default());
        game.state.player.position = 1960.0;
        game.send(InputEvent::MoveRightStart);
        run_ticks(&mut game, 1);
        game.send(InputEvent::MoveRightStop);
        game.update(Duration::ZERO);

        game.state.player.position = 300.0;
        interact(&mut game);
        game.send(GameEvent::Advance);
        game.send(GameEvent::Advance);
        game.update(Duration::ZERO);

        assert!(game.snapshot().completed);
        assert_eq!(game.events.game_completed.len(), 1);

        // Walking around afterwards changes nothing
        game.send(InputEvent::MoveLeftStart);
        run_ticks(&mut game, 40);
        assert!(game.state.player.position < 300.0);
        assert!(game.snapshot().completed);
        assert_eq!(game.events.game_completed.len(), 1);
    }

    #[test]
    fn test_talk_to_by_id() {
        let mut game = two_level_game(GameConfig::default());

        // Unknown id: silent no-op
        game.send(GameEvent::TalkTo("nobody".to_string()));
        game.update(Duration::ZERO);
        assert!(game.snapshot().active_dialogue.is_none());

        // Known but out of range
        game.send(GameEvent::TalkTo("guide".to_string()));
        game.update(Duration::ZERO);
        assert!(game.snapshot().active_dialogue.is_none());

        game.state.player.position = 760.0;
        game.send(GameEvent::TalkTo("guide".to_string()));
        game.update(Duration::ZERO);
        assert_eq!(game.snapshot().active_dialogue.unwrap().character_id, "guide");
    }

    #[test]
    fn test_advance_without_dialogue_is_noop() {
        let mut game = two_level_game(GameConfig::default());
        let before = game.snapshot();
        game.send(GameEvent::Advance);
        game.update(Duration::ZERO);
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_restart_rebuilds_everything() {
        let mut game = two_level_game(GameConfig::default());
        game.state.player.position = 800.0;
        interact(&mut game);
        for _ in 0..4 {
            game.send(GameEvent::Advance);
        }
        game.send(InputEvent::MoveRightStart);
        game.update(Duration::ZERO);
        assert!(game.state.met.is_met(0, 0));

        game.send(GameEvent::Restart);
        game.update(TICK);
        let snap = game.snapshot();
        assert!(!snap.started);
        assert_eq!(snap.level_index, 0);
        assert_eq!(snap.player.position, 50.0);
        assert!(!snap.characters[0].met);
        assert!(!game.ticker.is_running());
    }

    #[test]
    fn test_invariants_over_long_session() {
        let mut game = two_level_game(GameConfig::default());
        let mut last_level = 0;
        let mut last_met = vec![false; 2];
        let mut was_completed = false;

        let script = [
            InputEvent::MoveRightStart,
            InputEvent::Interact,
            InputEvent::MoveRightStop,
            InputEvent::Interact,
            InputEvent::MoveLeftStart,
            InputEvent::Pointer { x: 0.8, y: 0.0 },
            InputEvent::Interact,
            InputEvent::Pointer { x: 0.0, y: 0.0 },
            InputEvent::MoveLeftStop,
        ];

        for frame in 0..3000 {
            if frame % 23 == 0 {
                game.send(script[(frame / 23) % script.len()]);
            }
            if frame % 41 == 0 {
                game.send(GameEvent::Advance);
            }
            let position_before = game.state.player.position;
            let in_dialogue_before = game.state.dialogue_active();
            let line_before = game.state.dialogue.map(|s| s.line());

            game.update(TICK);
            let state = &game.state;

            let width = game.catalog.get(state.level_index()).unwrap().width;
            assert!(state.player.position >= 50.0 && state.player.position <= width - 50.0);

            assert!(state.level_index() == last_level || state.level_index() == last_level + 1);
            if state.level_index() != last_level {
                last_met = vec![false; 2];
            }
            last_level = state.level_index();

            let met = state.met.level(last_level);
            for (i, &m) in met.iter().enumerate() {
                assert!(m || !last_met[i], "met flag reverted");
                last_met[i] = m;
            }

            if in_dialogue_before && state.dialogue_active() {
                assert_eq!(state.player.position, position_before);
                assert!(state.dialogue.map(|s| s.line()) >= line_before);
            }

            assert!(state.completed() || !was_completed);
            was_completed = state.completed();
        }
    }
}
