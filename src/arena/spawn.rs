//! Arena domain: builds the level, the player and the AI roster from `ArenaDef`.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::arena::components::Wall;
use crate::behaviour::{
    agent_machine, boss_machine, AgentRng, AiController, BehaviourTuning, BossBrain, BossHead,
    PatrolRoute,
};
use crate::combat::{Boss, Combatant, Enemy, Health, PoolHome, Team, WeakSpot, WeaponMount};
use crate::content::{to_vec2, ArenaDef, BossDef, EnemyDef, PlayerDef, WallDef};
use crate::core::RunConfig;
use crate::movement::{GameLayer, LatchHook, MechBodyBundle, MovementTuning, Player, Turret};
use crate::navigation::{GridPathfinder, NavGrid, PathFollower};

/// Paths solved per frame.
const PATHS_PER_FRAME: usize = 8;
/// Waypoint reach distance for path following.
const ARRIVAL_TOLERANCE: f32 = 12.0;
/// How far a move goal has to drift before a new path is requested.
const REPATH_DISTANCE: f32 = 48.0;
/// Boss sight is not limited by range.
const BOSS_SIGHT_RANGE: f32 = 4096.0;

/// Walkability grid for the arena. Walls are grown by `clearance` so paths
/// keep a mech's body off them.
pub fn build_nav_grid(arena: &ArenaDef, clearance: f32) -> NavGrid {
    let mut grid = NavGrid::new(
        to_vec2(arena.bounds_min),
        to_vec2(arena.bounds_max),
        arena.nav_cell_size,
    );
    for wall in &arena.walls {
        grid.block_rect(to_vec2(wall.min), to_vec2(wall.max), clearance);
    }
    grid
}

/// Centre and full size of a wall box.
pub fn wall_rect(wall: &WallDef) -> (Vec2, Vec2) {
    let min = to_vec2(wall.min);
    let max = to_vec2(wall.max);
    ((min + max) * 0.5, (max - min).abs())
}

pub(crate) fn spawn_arena(
    mut commands: Commands,
    arena: Res<ArenaDef>,
    movement: Res<MovementTuning>,
    behaviour: Res<BehaviourTuning>,
    run: Res<RunConfig>,
    mut pathfinder: ResMut<GridPathfinder>,
) {
    let clearance = arena
        .enemies
        .iter()
        .map(|enemy| enemy.half_extents.0.max(enemy.half_extents.1))
        .fold(arena.player.half_extents.0, f32::max);
    *pathfinder = GridPathfinder::new(build_nav_grid(&arena, clearance), PATHS_PER_FRAME);

    for wall in &arena.walls {
        spawn_wall(&mut commands, wall);
    }

    let player = spawn_player(&mut commands, &arena.player, &movement);

    for (index, enemy) in arena.enemies.iter().enumerate() {
        let rng = AgentRng::from_seed(run.agent_seed(index as u64));
        spawn_enemy(&mut commands, enemy, player, rng, &movement, *behaviour);
    }

    if let Some(boss) = &arena.boss {
        let rng = AgentRng::from_seed(run.agent_seed(arena.enemies.len() as u64));
        spawn_boss(&mut commands, boss, player, rng, &movement, *behaviour);
    }

    info!(
        "Arena spawned: {} walls, {} enemies, boss: {}, seed {}",
        arena.walls.len(),
        arena.enemies.len(),
        arena.boss.is_some(),
        run.seed
    );
}

fn spawn_wall(commands: &mut Commands, wall: &WallDef) {
    let (center, size) = wall_rect(wall);
    commands.spawn((
        Wall,
        Sprite {
            color: Color::srgb(0.3, 0.3, 0.35),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(center.x, center.y, 0.0),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        CollisionLayers::new(GameLayer::Wall, [GameLayer::Mech, GameLayer::Projectile]),
    ));
}

fn turret_sprite(length: f32) -> impl Bundle {
    (
        Turret,
        Sprite {
            color: Color::srgb(0.15, 0.15, 0.15),
            custom_size: Some(Vec2::new(length, 6.0)),
            ..default()
        },
        Transform::from_xyz(length * 0.5, 0.0, 1.0),
    )
}

fn spawn_player(commands: &mut Commands, def: &PlayerDef, movement: &MovementTuning) -> Entity {
    let spawn = to_vec2(def.spawn);
    let half_extents = to_vec2(def.half_extents);

    let player = commands
        .spawn((
            (
                Player,
                Combatant,
                Team::Player,
                Health::new(def.health),
                WeaponMount::new(def.weapon),
                LatchHook::new(movement.latch_range, movement.latch_boost_force),
                PoolHome(spawn),
            ),
            MechBodyBundle::new(movement.mover(half_extents), movement.impulse(1.0)),
            Sprite {
                color: Color::srgb(0.3, 0.75, 0.95),
                custom_size: Some(half_extents * 2.0),
                ..default()
            },
            Transform::from_xyz(spawn.x, spawn.y, 2.0),
        ))
        .with_children(|parent| {
            parent.spawn(turret_sprite(half_extents.x * 1.6));
        })
        .id();

    info!("Spawned player {:?} at {:?}", player, spawn);
    player
}

fn spawn_enemy(
    commands: &mut Commands,
    def: &EnemyDef,
    player: Entity,
    rng: AgentRng,
    movement: &MovementTuning,
    tuning: BehaviourTuning,
) {
    let spawn = to_vec2(def.spawn);
    let half_extents = to_vec2(def.half_extents);

    let mut enemy = commands.spawn((
        (
            Enemy,
            Combatant,
            Team::Enemy,
            Health::new(def.health),
            WeaponMount::new(def.weapon),
            PoolHome(spawn),
        ),
        (
            agent_machine(tuning),
            AiController::new(Some(player), def.move_speed, def.sight_range, spawn),
            rng,
            PathFollower::new(ARRIVAL_TOLERANCE, REPATH_DISTANCE),
        ),
        MechBodyBundle::new(
            movement.mover(half_extents),
            movement.impulse(def.mass_scale),
        ),
        Sprite {
            color: Color::srgb(0.85, 0.45, 0.2),
            custom_size: Some(half_extents * 2.0),
            ..default()
        },
        Transform::from_xyz(spawn.x, spawn.y, 2.0),
    ));
    if !def.patrol.is_empty() {
        enemy.insert(PatrolRoute(def.patrol.iter().copied().map(to_vec2).collect()));
    }
    enemy.with_children(|parent| {
        parent.spawn(turret_sprite(half_extents.x * 1.6));
    });

    debug!("Spawned enemy {:?} at {:?}", enemy.id(), spawn);
}

fn spawn_boss(
    commands: &mut Commands,
    def: &BossDef,
    player: Entity,
    rng: AgentRng,
    movement: &MovementTuning,
    tuning: BehaviourTuning,
) {
    let spawn = to_vec2(def.spawn);
    let half_extents = to_vec2(def.half_extents);

    let boss = commands
        .spawn((
            (
                Boss,
                Enemy,
                Combatant,
                Team::Enemy,
                Health::new(def.health),
                WeakSpot::default(),
                WeaponMount::new(def.weapon),
            ),
            (
                boss_machine(tuning.boss),
                BossBrain::default(),
                AiController::new(Some(player), def.move_speed, BOSS_SIGHT_RANGE, spawn),
                rng,
                PathFollower::new(ARRIVAL_TOLERANCE, REPATH_DISTANCE),
            ),
            MechBodyBundle::new(
                movement.mover(half_extents),
                movement.impulse(def.mass_scale),
            ),
            Sprite {
                color: Color::srgb(0.45, 0.12, 0.12),
                custom_size: Some(half_extents * 2.0),
                ..default()
            },
            Transform::from_xyz(spawn.x, spawn.y, 2.0),
        ))
        .with_children(|parent| {
            parent.spawn((
                BossHead,
                Sprite {
                    color: Color::srgb(0.55, 0.1, 0.1),
                    custom_size: Some(half_extents * 0.8),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, 1.0),
            ));
        })
        .id();

    info!("Spawned boss {:?} at {:?}", boss, spawn);
}
