use glam::Vec2;

use crate::api::config::GameConfig;
use crate::api::error::LoadError;
use crate::api::types::{GameEvent, SoundEvent};
use crate::components::body::{Body, LifeState};
use crate::components::pickup::PickupKind;
use crate::components::tilemap::{LevelSet, TileGrid};
use crate::core::collision::CollisionResolver;
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::input::queue::InputIntents;
use crate::systems::encounter::{Encounter, EncounterRules};

/// What a tick left the session in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    /// Paused: nothing moved.
    Paused,
    /// The player is dead. The owner decides when to restart.
    GameOver,
    /// The goal of the last level was collected. Gameplay is frozen.
    Finished,
}

/// A game session: the active level, everything in it, and the score.
pub struct World {
    config: GameConfig,
    levels: LevelSet,
    scene: Scene,
    resolver: CollisionResolver,
    rules: EncounterRules,
    rng: Rng,
    score: u64,
    paused: bool,
    finished: bool,
    sounds: Vec<SoundEvent>,
    events: Vec<GameEvent>,
}

impl World {
    /// Start a session on the first of `grids`.
    pub fn new(config: GameConfig, grids: Vec<TileGrid>) -> Result<Self, LoadError> {
        let config = config.validated();
        let levels = LevelSet::new(grids).ok_or(LoadError::NoLevels)?;
        let mut world = Self {
            scene: Scene::new(config.player_spawn(), config.player_size()),
            resolver: CollisionResolver::new(config.step_size),
            rules: EncounterRules::from_config(&config),
            rng: Rng::new(config.seed),
            levels,
            config,
            score: 0,
            paused: false,
            finished: false,
            sounds: Vec::with_capacity(8),
            events: Vec::with_capacity(8),
        };
        log::info!("session started with {} level(s)", world.levels.len());
        world.restart(false);
        world.sounds.push(SoundEvent::MUSIC);
        Ok(world)
    }

    /// Parse every level text, then start a session.
    pub fn from_text(
        config: GameConfig,
        levels: &[&str],
        tile_width: f32,
        tile_height: f32,
    ) -> Result<Self, LoadError> {
        let grids = levels
            .iter()
            .enumerate()
            .map(|(index, text)| {
                TileGrid::parse(text, tile_width, tile_height)
                    .map_err(|source| LoadError::Level { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(config, grids)
    }

    /// Advance the simulation by `dt_ms` with this tick's input.
    pub fn tick(&mut self, dt_ms: f32, intents: &InputIntents) -> TickOutcome {
        if intents.pause {
            self.set_paused(!self.paused);
        }
        if intents.restart {
            log::info!("restart requested");
            self.restart(false);
        }
        if self.paused {
            return TickOutcome::Paused;
        }
        if self.finished {
            return TickOutcome::Finished;
        }

        if self.scene.player.life() == LifeState::Dead {
            log::info!("game over on level {} with score {}", self.levels.index(), self.score);
            self.events.push(GameEvent::game_over(self.levels.index(), self.score));
            return TickOutcome::GameOver;
        }

        let dt = dt_ms.max(0.0);
        let gravity = self.config.gravity * dt;
        if self.scene.player.is_alive() {
            apply_gravity(&mut self.scene.player, gravity);
        }
        for enemy in self.scene.enemies_mut() {
            if enemy.is_alive() {
                apply_gravity(enemy, gravity);
            }
        }

        self.scene.remove_fallen_enemies();
        let grid = self.levels.current();
        for enemy in self.scene.enemies_mut() {
            let contact = self.resolver.resolve(enemy, grid, dt);
            if contact.hazard {
                enemy.kill();
            }
            enemy.update(dt);
        }

        self.scene.remove_collected();

        let player = &mut self.scene.player;
        if player.is_alive() {
            player.set_velocity_x(intents.horizontal() * self.config.run_speed);
            if intents.jump {
                player.jump(false);
            }
            player.attacking = intents.attack;
        }

        let prev_y = player.pos().y;
        let contact = self.resolver.resolve(player, grid, dt);
        if contact.hazard && player.kill() {
            log::info!("player fell into a hazard");
            self.sounds.push(SoundEvent::GAME_OVER);
        }
        player.update(dt);

        match self.rules.run(&mut self.scene, prev_y) {
            Some(encounter) => self.apply_encounter(encounter),
            None => TickOutcome::Running,
        }
    }

    fn apply_encounter(&mut self, encounter: Encounter) -> TickOutcome {
        self.sounds.push(encounter.sound());
        self.award(encounter.points());

        if let Encounter::GoalReached { .. } = encounter {
            if self.levels.advance() {
                log::info!("level {} reached, score {}", self.levels.index(), self.score);
                self.events
                    .push(GameEvent::level_advanced(self.levels.index(), self.score));
                self.restart(true);
            } else {
                log::info!("final goal reached, score {}", self.score);
                self.finished = true;
                self.events.push(GameEvent::game_complete(self.score));
                return TickOutcome::Finished;
            }
        }
        TickOutcome::Running
    }

    fn award(&mut self, points: u64) {
        if points > 0 {
            self.score += points;
            self.events.push(GameEvent::score(self.score, points));
        }
    }

    /// Rebuild the active level: player at spawn, fresh enemies, crystals and
    /// goal. The level index is kept; the score only when `keep_score` is set.
    pub fn restart(&mut self, keep_score: bool) {
        if !keep_score {
            self.score = 0;
        }
        self.paused = false;
        self.finished = false;

        let config = &self.config;
        let grid = self.levels.current();
        let (tw, th) = (grid.tile_width(), grid.tile_height());

        self.scene.clear();
        self.scene.player.respawn(config.player_spawn());

        let enemy_size = config.enemy_size();
        let max_x = (grid.pixel_width() - enemy_size.x).max(0.0);
        let y = (grid.pixel_height() - 2.0 * th).min(grid.floor_y() - enemy_size.y);
        for _ in 0..config.enemy_count {
            let x = config.enemy_spawn_x + self.rng.next_f32() * config.enemy_spawn_spread;
            let pos = Vec2::new(x.min(max_x), y.max(0.0));
            self.scene
                .spawn_enemy(pos, enemy_size, Vec2::new(-config.enemy_speed, 0.0));
        }

        let pickup_size = config.pickup_size();
        for i in 0..config.crystal_count {
            let col = config.crystal_start_col as f32 + i as f32;
            let pos = Vec2::new(col * tw, config.crystal_row as f32 * th);
            self.scene.spawn_pickup(PickupKind::Crystal, pos, pickup_size);
        }

        let goal = Vec2::new(
            grid.pixel_width() - config.goal_inset_cols as f32 * tw,
            grid.pixel_height() - 2.0 * th,
        );
        self.scene.spawn_pickup(PickupKind::Goal, goal, pickup_size);

        log::info!(
            "level {} (re)started: {} enemies, {} crystals, score {}",
            self.levels.index(),
            self.scene.enemies().len(),
            self.scene.count_pickups(PickupKind::Crystal),
            self.score
        );
    }

    // -- Host-facing state --

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            log::info!("{}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level_index(&self) -> usize {
        self.levels.index()
    }

    pub fn levels(&self) -> &LevelSet {
        &self.levels
    }

    pub fn grid(&self) -> &TileGrid {
        self.levels.current()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn player(&self) -> &Body {
        &self.scene.player
    }

    /// Sounds requested since the last `clear_frame_data`.
    pub fn sounds(&self) -> &[SoundEvent] {
        &self.sounds
    }

    /// Game events raised since the last `clear_frame_data`.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Clear per-frame output. The host calls this once it has read it.
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

fn apply_gravity(body: &mut Body, amount: f32) {
    let vy = body.velocity().y;
    body.set_velocity_y(vy + amount);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::event_kind;
    use crate::components::body::{JUMP_SPEED, MAX_FALLING_SPEED};
    use crate::components::tilemap::MapError;

    const DT: f32 = 16.0;

    /// 40x8 tiles of 32px: open air, a hazard cell at (20, 6), solid bottom row.
    fn level() -> String {
        let mut rows = vec![".".repeat(40); 7];
        rows[6].replace_range(20..21, "?");
        rows.push("b".repeat(40));
        rows.join("\n")
    }

    fn world_with(config: GameConfig, count: usize) -> World {
        let text = level();
        let levels = vec![text.as_str(); count];
        World::from_text(config, &levels, 32.0, 32.0).unwrap()
    }

    fn world() -> World {
        world_with(GameConfig::default(), 2)
    }

    fn quiet() -> GameConfig {
        GameConfig {
            enemy_count: 0,
            ..Default::default()
        }
    }

    fn idle() -> InputIntents {
        InputIntents::default()
    }

    /// Player standing on the floor row at `x`.
    fn stand_player(world: &mut World, x: f32) {
        let player = &mut world.scene_mut().player;
        let h = player.size().y;
        player.set_pos(Vec2::new(x, 224.0 - h));
        player.land();
    }

    #[test]
    fn restart_lays_out_the_level() {
        let w = world();
        let scene = w.scene();
        assert_eq!(scene.enemies().len(), 5);
        assert_eq!(scene.count_pickups(PickupKind::Crystal), 10);
        assert_eq!(scene.count_pickups(PickupKind::Goal), 1);
        assert_eq!(w.player().pos(), Vec2::new(20.0, 0.0));

        for enemy in scene.enemies() {
            assert!(enemy.pos().x >= 900.0 && enemy.pos().x <= 1280.0 - 48.0);
            // Two tiles up would sink a 48px enemy into the floor row.
            assert_eq!(enemy.pos().y, 224.0 - 48.0);
            assert_eq!(enemy.velocity(), Vec2::new(-0.02, 0.0));
        }
        let crystals: Vec<_> = scene
            .pickups()
            .iter()
            .filter(|p| p.kind == PickupKind::Crystal)
            .collect();
        assert_eq!(crystals[0].footprint.pos, Vec2::new(224.0, 96.0));
        assert_eq!(crystals[9].footprint.pos, Vec2::new(512.0, 96.0));
        let goal = scene.pickups().iter().find(|p| p.kind == PickupKind::Goal).unwrap();
        assert_eq!(goal.footprint.pos, Vec2::new(1280.0 - 128.0, 192.0));
        assert_eq!(w.sounds(), &[SoundEvent::MUSIC]);
    }

    #[test]
    fn loading_errors_are_reported() {
        assert!(matches!(
            World::new(GameConfig::default(), Vec::new()),
            Err(LoadError::NoLevels)
        ));
        let good = level();
        let result = World::from_text(GameConfig::default(), &[good.as_str(), "..\n."], 32.0, 32.0);
        assert!(matches!(
            result,
            Err(LoadError::Level {
                index: 1,
                source: MapError::RaggedRow { row: 1, .. }
            })
        ));
    }

    #[test]
    fn bodies_never_sink_below_the_map_and_fall_speed_is_capped() {
        let mut w = world();
        for _ in 0..3000 {
            if w.tick(DT, &idle()) == TickOutcome::GameOver {
                w.restart(false);
            }
            let scene = w.scene();
            for body in std::iter::once(&scene.player).chain(scene.enemies()) {
                assert!(body.footprint.bottom() <= w.grid().pixel_height());
                assert!(body.velocity().y <= MAX_FALLING_SPEED);
            }
        }
        assert!(w.player().on_ground);
    }

    #[test]
    fn movement_intents_are_exclusive() {
        let mut w = world_with(quiet(), 1);
        stand_player(&mut w, 100.0);
        let both = InputIntents {
            move_left: true,
            move_right: true,
            ..Default::default()
        };
        w.tick(DT, &both);
        assert_eq!(w.player().velocity().x, 0.0);
        assert_eq!(w.player().pos().x, 100.0);

        let right = InputIntents {
            move_right: true,
            ..Default::default()
        };
        w.tick(DT, &right);
        assert_eq!(w.player().velocity().x, 0.1);
        assert!(w.player().pos().x > 100.0);
    }

    #[test]
    fn jump_leaves_the_ground() {
        let mut w = world_with(quiet(), 1);
        stand_player(&mut w, 100.0);
        let jump = InputIntents {
            jump: true,
            ..Default::default()
        };
        w.tick(DT, &jump);
        assert!(!w.player().on_ground);
        assert!(w.player().pos().y < 164.0);
        assert_eq!(w.player().jump_count(), 1);
    }

    #[test]
    fn short_ticks_keep_the_player_grounded_and_able_to_jump() {
        let mut w = world_with(quiet(), 1);
        stand_player(&mut w, 100.0);
        let rest_y = w.player().pos().y;
        for _ in 0..50 {
            w.tick(8.0, &idle());
            assert!(w.player().on_ground);
            assert_eq!(w.player().pos().y, rest_y);
        }

        let jump = InputIntents {
            jump: true,
            ..Default::default()
        };
        w.tick(8.0, &jump);
        assert!(!w.player().on_ground);
        assert_eq!(w.player().jump_count(), 1);
    }

    #[test]
    fn stomping_an_enemy_bounces_and_scores() {
        let mut w = world();
        w.scene_mut().clear();
        let enemy = w
            .scene_mut()
            .spawn_enemy(Vec2::new(400.0, 176.0), Vec2::splat(48.0), Vec2::new(-0.02, 0.0));
        let player = &mut w.scene_mut().player;
        player.set_pos(Vec2::new(400.0, 126.0));
        player.set_velocity(Vec2::new(0.0, 0.2));
        w.clear_frame_data();

        assert_eq!(w.tick(DT, &idle()), TickOutcome::Running);
        assert_eq!(w.scene().enemy(enemy).unwrap().life(), LifeState::Dying);
        assert_eq!(w.score(), 1000);
        assert_eq!(w.player().velocity().y, JUMP_SPEED);
        assert_eq!(w.player().pos().y, 176.0 - 60.0);
        assert!(w.sounds().contains(&SoundEvent::ENEMY_HURT));
        assert_eq!(w.events(), &[GameEvent::score(1000, 1000)]);

        // Dying enemies leave on the next tick.
        w.tick(DT, &idle());
        assert!(w.scene().enemy(enemy).is_none());
    }

    #[test]
    fn touching_an_enemy_kills_then_game_over() {
        let mut w = world();
        w.scene_mut().clear();
        stand_player(&mut w, 300.0);
        w.scene_mut()
            .spawn_enemy(Vec2::new(310.0, 176.0), Vec2::splat(48.0), Vec2::ZERO);

        let run = InputIntents {
            move_right: true,
            ..Default::default()
        };
        assert_eq!(w.tick(DT, &run), TickOutcome::Running);
        assert_eq!(w.player().life(), LifeState::Dying);
        assert!(w.sounds().contains(&SoundEvent::GAME_OVER));

        let mut elapsed = 0.0;
        let outcome = loop {
            let outcome = w.tick(DT, &run);
            if outcome != TickOutcome::Running {
                break outcome;
            }
            elapsed += DT;
            assert_eq!(w.player().velocity(), Vec2::ZERO);
            assert!(elapsed <= 1100.0, "player never finished dying");
        };
        assert_eq!(outcome, TickOutcome::GameOver);
        assert!(elapsed >= 1000.0 - DT);
        assert_eq!(w.player().life(), LifeState::Dead);
        assert_eq!(w.events().last().unwrap().kind, event_kind::GAME_OVER);

        w.restart(false);
        assert!(w.player().is_alive());
        assert_eq!(w.level_index(), 0);
    }

    #[test]
    fn hazard_tiles_kill_the_player() {
        let mut w = world_with(quiet(), 1);
        stand_player(&mut w, 630.0);
        w.tick(DT, &idle());
        assert_eq!(w.player().life(), LifeState::Dying);
    }

    #[test]
    fn goal_advances_the_level_and_keeps_score() {
        let first = level();
        let mut rows = vec![".".repeat(50); 9];
        rows.push("b".repeat(50));
        let second = rows.join("\n");
        let mut w = World::from_text(quiet(), &[first.as_str(), second.as_str()], 32.0, 32.0)
            .unwrap();
        assert_eq!(w.grid().pixel_width(), 1280.0);
        stand_player(&mut w, 1152.0);
        w.clear_frame_data();

        assert_eq!(w.tick(DT, &idle()), TickOutcome::Running);
        assert_eq!(w.level_index(), 1);
        assert_eq!(w.score(), 5000);
        assert!(w.sounds().contains(&SoundEvent::GOAL));
        assert!(w
            .events()
            .contains(&GameEvent::level_advanced(1, 5000)));

        // The second level's grid is active and freshly laid out.
        assert_eq!(w.grid().width(), 50);
        assert_eq!(w.grid().pixel_width(), 1600.0);
        assert_eq!(w.grid().pixel_height(), 320.0);
        assert_eq!(w.player().pos(), Vec2::new(20.0, 0.0));
        assert_eq!(w.scene().count_pickups(PickupKind::Goal), 1);
        assert!(w.scene().pickups().iter().all(|p| !p.is_collected()));
        let goal = w
            .scene()
            .pickups()
            .iter()
            .find(|p| p.kind == PickupKind::Goal)
            .unwrap();
        assert_eq!(goal.footprint.pos, Vec2::new(1600.0 - 128.0, 256.0));

        // Ticks now collide against the taller map.
        for _ in 0..120 {
            w.tick(DT, &idle());
        }
        assert_eq!(w.player().pos().y, 288.0 - w.player().size().y);
    }

    #[test]
    fn final_goal_freezes_the_game() {
        let mut w = world_with(quiet(), 1);
        stand_player(&mut w, 1150.0);
        assert_eq!(w.tick(DT, &idle()), TickOutcome::Finished);
        assert!(w.is_finished());
        assert_eq!(w.level_index(), 0);
        assert_eq!(w.events().last(), Some(&GameEvent::game_complete(5000)));

        let pos = w.player().pos();
        assert_eq!(w.tick(DT, &idle()), TickOutcome::Finished);
        assert_eq!(w.player().pos(), pos);
    }

    #[test]
    fn collected_crystals_respawn_on_restart() {
        let mut w = world_with(quiet(), 1);
        for i in 0..10 {
            let x = 224.0 + 32.0 * i as f32;
            w.scene_mut().player.set_pos(Vec2::new(x - 8.0, 90.0));
            w.tick(DT, &idle());
        }
        assert_eq!(w.score(), 20_000);
        w.tick(DT, &idle());
        assert_eq!(w.scene().count_pickups(PickupKind::Crystal), 0);

        w.restart(true);
        assert_eq!(w.scene().count_pickups(PickupKind::Crystal), 10);
        assert!(w.scene().pickups().iter().all(|p| !p.is_collected()));
        assert_eq!(w.score(), 20_000);
    }

    #[test]
    fn pause_halts_ticks() {
        let mut w = world();
        let pause = InputIntents {
            pause: true,
            ..Default::default()
        };
        let pos = w.player().pos();
        assert_eq!(w.tick(DT, &pause), TickOutcome::Paused);
        assert_eq!(w.tick(DT, &idle()), TickOutcome::Paused);
        assert_eq!(w.player().pos(), pos);
        assert_eq!(w.tick(DT, &pause), TickOutcome::Running);
        assert!(w.player().pos().y > pos.y);
    }

    #[test]
    fn restart_intent_clears_score() {
        let mut w = world_with(quiet(), 1);
        w.scene_mut().player.set_pos(Vec2::new(216.0, 90.0));
        w.tick(DT, &idle());
        assert_eq!(w.score(), 2000);
        let restart = InputIntents {
            restart: true,
            ..Default::default()
        };
        w.tick(DT, &restart);
        assert_eq!(w.score(), 0);
        assert_eq!(w.scene().count_pickups(PickupKind::Crystal), 10);
    }
}
