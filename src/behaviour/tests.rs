//! Behaviour domain: tests for the state machine and the states it runs.

use std::collections::{HashMap, VecDeque};
use std::f32::consts::FRAC_PI_2;
use std::sync::{Arc, Mutex};

use avian2d::prelude::LayerMask;
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::testing::{FakeAgent, FakeBoss};
use super::{
    agent_machine, boss_machine, line_of_sight, turn_towards, Agent, AgentNotice, Attack,
    AttackTuning, BehaviourState, BehaviourStateMachine, BehaviourTuning, Berserk, BossAttack,
    BossBrain, BossCharge, BossSpinShoot, BossStunned, BossTuning, BurstController, Idle,
    StateContext, StateResponse, TransitionMode,
};
use crate::core::{GameplayPaused, SimClock};
use crate::movement::testing::BoxWorld;

const EPSILON: f32 = 1e-4;

// -----------------------------------------------------------------------------
// Recording states
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    Stay,
    Pop,
    Push,
    PushNothing,
    Abandon,
    AbandonNothing,
}

#[derive(Default)]
struct Ledger {
    next_id: usize,
    enters: HashMap<usize, u32>,
    exits: HashMap<usize, u32>,
    updates: Vec<usize>,
    script: VecDeque<Directive>,
}

impl Ledger {
    fn enters(&self, id: usize) -> u32 {
        self.enters.get(&id).copied().unwrap_or(0)
    }

    fn exits(&self, id: usize) -> u32 {
        self.exits.get(&id).copied().unwrap_or(0)
    }

    fn live(&self) -> u32 {
        self.enters.values().sum::<u32>() - self.exits.values().sum::<u32>()
    }
}

type SharedLedger = Arc<Mutex<Ledger>>;

/// Follows a shared script and records every hook it sees.
struct Recorder {
    id: usize,
    ledger: SharedLedger,
}

impl Recorder {
    fn spawn(ledger: &SharedLedger) -> Self {
        let mut guard = ledger.lock().unwrap();
        let id = guard.next_id;
        guard.next_id += 1;
        Self {
            id,
            ledger: Arc::clone(ledger),
        }
    }
}

impl BehaviourState for Recorder {
    fn name(&self) -> &'static str {
        "Recorder"
    }

    fn on_enter(&mut self, _ctx: &mut StateContext) {
        *self.ledger.lock().unwrap().enters.entry(self.id).or_default() += 1;
    }

    fn update(&mut self, _ctx: &mut StateContext) -> StateResponse {
        let directive = {
            let mut guard = self.ledger.lock().unwrap();
            assert_eq!(guard.enters(self.id), 1, "updated state must be entered");
            assert_eq!(guard.exits(self.id), 0, "updated state must not be exited");
            guard.updates.push(self.id);
            guard.script.pop_front().unwrap_or(Directive::Stay)
        };

        match directive {
            Directive::Stay => StateResponse::no_change(),
            Directive::Pop => StateResponse::pop_previous(),
            Directive::Push => StateResponse::push(Recorder::spawn(&self.ledger)),
            Directive::PushNothing => StateResponse::new(TransitionMode::PushCurrent, None),
            Directive::Abandon => StateResponse::abandon(Recorder::spawn(&self.ledger)),
            Directive::AbandonNothing => StateResponse::new(TransitionMode::AbandonCurrent, None),
        }
    }

    fn on_exit(&mut self, _ctx: &mut StateContext) {
        *self.ledger.lock().unwrap().exits.entry(self.id).or_default() += 1;
    }
}

fn recording_machine(ledger: &SharedLedger) -> BehaviourStateMachine {
    let ledger = Arc::clone(ledger);
    BehaviourStateMachine::new(move || Box::new(Recorder::spawn(&ledger)) as Box<dyn BehaviourState>)
}

fn scripted(directives: &[Directive]) -> SharedLedger {
    Arc::new(Mutex::new(Ledger {
        script: directives.iter().copied().collect(),
        ..Default::default()
    }))
}

fn tick(machine: &mut BehaviourStateMachine, agent: &mut FakeAgent) -> TransitionMode {
    let mut ctx = StateContext::new(agent);
    machine.tick(&mut ctx)
}

fn tick_boss(
    machine: &mut BehaviourStateMachine,
    agent: &mut FakeAgent,
    boss: &mut FakeBoss,
) -> TransitionMode {
    let mut ctx = StateContext::with_boss(agent, boss);
    machine.tick(&mut ctx)
}

// -----------------------------------------------------------------------------
// State machine tests
// -----------------------------------------------------------------------------

#[test]
fn test_initial_state_entered_on_first_tick() {
    let ledger = scripted(&[]);
    let mut machine = recording_machine(&ledger);
    let mut agent = FakeAgent::new(Vec2::ZERO);

    assert_eq!(ledger.lock().unwrap().enters(0), 0);

    tick(&mut machine, &mut agent);
    tick(&mut machine, &mut agent);

    let guard = ledger.lock().unwrap();
    assert_eq!(guard.enters(0), 1);
    assert_eq!(guard.updates, vec![0, 0]);
}

#[test]
fn test_random_directives_keep_hooks_balanced() {
    let choices = [
        Directive::Stay,
        Directive::Pop,
        Directive::Push,
        Directive::PushNothing,
        Directive::Abandon,
        Directive::AbandonNothing,
    ];
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let script: Vec<Directive> = (0..300)
        .map(|_| choices[rng.random_range(0..choices.len())])
        .collect();

    let ledger = scripted(&script);
    let mut machine = recording_machine(&ledger);
    let mut agent = FakeAgent::new(Vec2::ZERO);

    for _ in 0..script.len() {
        tick(&mut machine, &mut agent);

        // Exactly the current state plus every suspended one are live
        let guard = ledger.lock().unwrap();
        assert_eq!(guard.live() as usize, machine.depth() + 1);
    }

    {
        let mut ctx = StateContext::new(&mut agent);
        machine.reset_default(&mut ctx);
    }
    assert_eq!(machine.depth(), 0);

    let guard = ledger.lock().unwrap();
    let fresh = guard.next_id - 1;
    for id in 0..guard.next_id {
        assert_eq!(guard.enters(id), 1, "state {id} entered once");
        let expected_exits = if id == fresh { 0 } else { 1 };
        assert_eq!(guard.exits(id), expected_exits, "state {id} exits");
    }
}

#[test]
fn test_pop_on_empty_stack_installs_default() {
    let ledger = scripted(&[Directive::Pop]);
    let mut machine = recording_machine(&ledger);
    let mut agent = FakeAgent::new(Vec2::ZERO);

    assert_eq!(tick(&mut machine, &mut agent), TransitionMode::PopPrevious);

    let guard = ledger.lock().unwrap();
    assert_eq!(machine.depth(), 0);
    assert_eq!(guard.exits(0), 1);
    assert_eq!(guard.enters(1), 1);
    assert_eq!(guard.exits(1), 0);
}

#[test]
fn test_pop_on_empty_stack_returns_to_idle() {
    let mut machine = agent_machine(BehaviourTuning::default());
    let mut agent = FakeAgent::new(Vec2::ZERO);
    let mut ctx = StateContext::new(&mut agent);

    machine.apply(StateResponse::pop_previous(), &mut ctx);

    assert_eq!(machine.current_name(), "Idle");
    assert_eq!(machine.depth(), 0);
}

#[test]
fn test_boss_machine_defaults_to_telegraph() {
    let tuning = BossTuning::default();
    let mut machine = boss_machine(tuning);
    let mut agent = boss_agent();
    let mut boss = FakeBoss::new(tuning);

    tick_boss(&mut machine, &mut agent, &mut boss);
    machine.queue_reset();
    tick_boss(&mut machine, &mut agent, &mut boss);

    assert_eq!(machine.current_name(), "BossTelegraphCharge");
    assert_eq!(machine.depth(), 0);
}

#[test]
fn test_push_and_abandon_without_state_are_ignored() {
    let ledger = scripted(&[Directive::PushNothing, Directive::AbandonNothing]);
    let mut machine = recording_machine(&ledger);
    let mut agent = FakeAgent::new(Vec2::ZERO);

    tick(&mut machine, &mut agent);
    tick(&mut machine, &mut agent);

    let guard = ledger.lock().unwrap();
    assert_eq!(machine.depth(), 0);
    assert_eq!(guard.next_id, 1);
    assert_eq!(guard.exits(0), 0);
    assert_eq!(guard.updates, vec![0, 0]);
}

#[test]
fn test_resumed_state_is_not_reentered() {
    let ledger = scripted(&[Directive::Push, Directive::Stay, Directive::Pop]);
    let mut machine = recording_machine(&ledger);
    let mut agent = FakeAgent::new(Vec2::ZERO);

    for _ in 0..4 {
        tick(&mut machine, &mut agent);
    }

    let guard = ledger.lock().unwrap();
    assert_eq!(guard.updates, vec![0, 1, 1, 0]);
    assert_eq!(guard.enters(0), 1);
    assert_eq!(guard.exits(0), 0);
    assert_eq!(guard.enters(1), 1);
    assert_eq!(guard.exits(1), 1);
}

#[test]
fn test_reset_exits_whole_stack() {
    let ledger = scripted(&[Directive::Push, Directive::Push]);
    let mut machine = recording_machine(&ledger);
    let mut agent = FakeAgent::new(Vec2::ZERO);

    tick(&mut machine, &mut agent);
    tick(&mut machine, &mut agent);
    assert_eq!(machine.depth(), 2);

    machine.queue_reset();
    assert!(machine.has_pending());
    tick(&mut machine, &mut agent);

    let guard = ledger.lock().unwrap();
    assert!(!machine.has_pending());
    assert_eq!(machine.depth(), 0);
    for id in 0..3 {
        assert_eq!(guard.exits(id), 1);
    }
    assert_eq!(guard.enters(3), 1);
    assert_eq!(guard.updates.last(), Some(&3));
}

#[test]
fn test_queued_transition_applies_before_update() {
    let tuning = BehaviourTuning::default();
    let mut machine = agent_machine(tuning);
    let mut agent = FakeAgent::new(Vec2::ZERO).with_target(Vec2::new(300.0, 0.0), false);

    tick(&mut machine, &mut agent);
    machine.queue_transition(Box::new(Berserk::new(tuning.berserk)));
    assert_eq!(machine.current_name(), "Idle");

    agent.at_tick(1);
    agent.line_of_sight = true;
    tick(&mut machine, &mut agent);

    assert_eq!(machine.current_name(), "Berserk");
    assert_eq!(machine.depth(), 0);
    assert_eq!(agent.move_goal, Vec2::new(300.0, 0.0));
    assert!(agent.notices.is_empty());
}

#[test]
fn test_queued_changes_apply_in_request_order() {
    let tuning = BehaviourTuning::default();
    let mut machine = agent_machine(tuning);
    let mut agent = FakeAgent::new(Vec2::ZERO).with_target(Vec2::new(300.0, 0.0), true);

    tick(&mut machine, &mut agent);
    assert_eq!(machine.current_name(), "Attack");
    assert_eq!(machine.depth(), 1);

    // Recycled and disarmed in the same frame
    machine.queue_reset();
    machine.queue_transition(Box::new(Berserk::new(tuning.berserk)));
    agent.at_tick(1);
    tick(&mut machine, &mut agent);

    assert!(!machine.has_pending());
    assert_eq!(machine.current_name(), "Berserk");
    assert_eq!(machine.depth(), 0);
}

#[test]
fn test_transition_then_reset_ends_in_default() {
    let tuning = BehaviourTuning::default();
    let mut machine = agent_machine(tuning);
    let mut agent = FakeAgent::new(Vec2::ZERO);

    tick(&mut machine, &mut agent);
    machine.queue_transition(Box::new(Berserk::new(tuning.berserk)));
    machine.queue_reset();
    agent.at_tick(1);
    tick(&mut machine, &mut agent);

    assert_eq!(machine.current_name(), "Idle");
    assert_eq!(machine.depth(), 0);
}

// -----------------------------------------------------------------------------
// Idle and Attack tests
// -----------------------------------------------------------------------------

#[test]
fn test_idle_without_route_holds_position() {
    let mut machine = agent_machine(BehaviourTuning::default());
    let position = Vec2::new(5.0, 5.0);
    let mut agent = FakeAgent::new(position);

    for step in 0..20 {
        agent.at_tick(step);
        assert_eq!(tick(&mut machine, &mut agent), TransitionMode::NoChange);
        assert_eq!(agent.move_goal, position);
        assert_eq!(machine.current_name(), "Idle");
    }
    assert!(!agent.firing);
}

#[test]
fn test_idle_pushes_attack_when_target_sighted() {
    const SIGHTED_AT: u32 = 6;
    let mut machine = agent_machine(BehaviourTuning::default());
    let mut agent = FakeAgent::new(Vec2::ZERO).with_target(Vec2::new(100.0, 0.0), false);

    for step in 0..SIGHTED_AT {
        agent.at_tick(step);
        assert_eq!(tick(&mut machine, &mut agent), TransitionMode::NoChange);
    }

    agent.at_tick(SIGHTED_AT);
    agent.line_of_sight = true;
    assert_eq!(tick(&mut machine, &mut agent), TransitionMode::PushCurrent);

    assert_eq!(machine.current_name(), "Attack");
    assert_eq!(machine.stack_names(), vec!["Idle"]);
    assert_eq!(agent.notices, vec![AgentNotice::TargetAcquired]);
}

#[test]
fn test_attack_gives_up_after_attention_span() {
    let mut machine = agent_machine(BehaviourTuning::default());
    let mut agent = FakeAgent::new(Vec2::ZERO).with_target(Vec2::new(100.0, 0.0), true);

    // Pushed at t=0, sighted through t=0.5
    for step in 0..=2 {
        agent.at_tick(step);
        tick(&mut machine, &mut agent);
    }
    assert_eq!(machine.current_name(), "Attack");

    agent.line_of_sight = false;
    for step in 3..=14 {
        agent.at_tick(step);
        assert_eq!(tick(&mut machine, &mut agent), TransitionMode::NoChange);
        assert_eq!(agent.move_goal, Vec2::new(100.0, 0.0));
    }

    agent.at_tick(15);
    assert_eq!(tick(&mut machine, &mut agent), TransitionMode::PopPrevious);
    assert_eq!(machine.current_name(), "Idle");
    assert_eq!(
        agent.notices,
        vec![AgentNotice::TargetAcquired, AgentNotice::TargetLost]
    );
}

/// Advances one frame of simulated time unless gameplay is paused.
fn sim_frame(
    machine: &mut BehaviourStateMachine,
    agent: &mut FakeAgent,
    clock: &mut SimClock,
    paused: &GameplayPaused,
) -> Option<TransitionMode> {
    if paused.is_paused() {
        return None;
    }
    clock.advance(0.25);
    agent.now = clock.elapsed;
    agent.delta = clock.delta;
    Some(tick(machine, agent))
}

#[test]
fn test_pause_does_not_count_against_attention_span() {
    let mut machine = agent_machine(BehaviourTuning::default());
    let mut agent = FakeAgent::new(Vec2::ZERO).with_target(Vec2::new(100.0, 0.0), true);
    let mut clock = SimClock::default();
    let mut paused = GameplayPaused::default();

    // Last sighted at t=0.75
    for _ in 0..3 {
        sim_frame(&mut machine, &mut agent, &mut clock, &paused);
    }
    assert_eq!(machine.current_name(), "Attack");

    agent.line_of_sight = false;
    for _ in 0..3 {
        let mode = sim_frame(&mut machine, &mut agent, &mut clock, &paused);
        assert_eq!(mode, Some(TransitionMode::NoChange));
    }

    // Ten seconds of wall time in the pause menu
    paused.toggle("menu");
    for _ in 0..40 {
        assert_eq!(sim_frame(&mut machine, &mut agent, &mut clock, &paused), None);
    }
    assert_eq!(clock.elapsed, 1.5);
    paused.toggle("menu");

    // Resumes at t=1.75; the span runs out only after t=3.75
    for _ in 0..9 {
        let mode = sim_frame(&mut machine, &mut agent, &mut clock, &paused);
        assert_eq!(mode, Some(TransitionMode::NoChange));
        assert_eq!(machine.current_name(), "Attack");
    }
    let mode = sim_frame(&mut machine, &mut agent, &mut clock, &paused);
    assert_eq!(mode, Some(TransitionMode::PopPrevious));
    assert_eq!(machine.current_name(), "Idle");
}

#[test]
fn test_idle_walks_patrol_route() {
    let mut agent = FakeAgent::new(Vec2::ZERO);
    agent.patrol = Some(vec![
        Vec2::ZERO,
        Vec2::new(50.0, 0.0),
        Vec2::new(50.0, 50.0),
    ]);
    let mut idle = Idle::new(BehaviourTuning::default());
    let mut ctx = StateContext::new(&mut agent);
    idle.on_enter(&mut ctx);

    idle.update(&mut ctx);
    assert_eq!(idle.patrol_index(), 1);
    idle.update(&mut ctx);
    assert_eq!(idle.patrol_index(), 1);
    assert_eq!(ctx.agent.move_goal(), Vec2::new(50.0, 0.0));

    drop(ctx);
    agent.position = Vec2::new(45.0, 0.0);
    let mut ctx = StateContext::new(&mut agent);
    idle.update(&mut ctx);
    assert_eq!(ctx.agent.move_goal(), Vec2::new(50.0, 50.0));
    drop(ctx);

    agent.position = Vec2::new(50.0, 45.0);
    let mut ctx = StateContext::new(&mut agent);
    idle.update(&mut ctx);
    assert_eq!(idle.patrol_index(), 0);
    assert_eq!(ctx.agent.move_goal(), Vec2::ZERO);
}

#[test]
fn test_idle_look_turns_at_limited_rate() {
    let tuning = BehaviourTuning::default();
    let max_step = tuning.idle.turn_speed * 0.25 + EPSILON;
    let mut machine = agent_machine(tuning);
    let mut agent = FakeAgent::new(Vec2::ZERO);
    let start = agent.facing;

    for step in 0..40 {
        agent.at_tick(step);
        let before = agent.facing;
        tick(&mut machine, &mut agent);
        assert!(before.angle_to(agent.facing).abs() <= max_step);
    }
    assert!(agent.facing.distance(start) > EPSILON);
}

#[test]
fn test_attack_turns_towards_target_at_limited_rate() {
    let tuning = AttackTuning::default();
    let mut agent = FakeAgent::new(Vec2::ZERO).with_target(Vec2::new(0.0, 100.0), true);
    let mut attack = Attack::new(tuning);
    let mut ctx = StateContext::new(&mut agent);

    attack.on_enter(&mut ctx);
    attack.update(&mut ctx);

    let turned = ctx.agent.facing().to_angle();
    assert!((turned - tuning.turn_speed * 0.25).abs() < EPSILON);
    assert!(turned < FRAC_PI_2);
}

#[test]
fn test_attack_without_target_keeps_facing_and_pops() {
    let mut agent = FakeAgent::new(Vec2::ZERO);
    agent.facing = Vec2::Y;
    let mut attack = Attack::new(AttackTuning::default());
    let mut ctx = StateContext::new(&mut agent);

    attack.on_enter(&mut ctx);
    let response = attack.update(&mut ctx);
    drop(ctx);

    assert_eq!(response.mode, TransitionMode::PopPrevious);
    assert!(agent.facing.distance(Vec2::Y) < EPSILON);
    assert_eq!(agent.notices, vec![AgentNotice::TargetLost]);
}

#[test]
fn test_attack_picks_firing_position_and_shoots() {
    let tuning = AttackTuning::default();
    let target = Vec2::new(400.0, 0.0);
    let mut agent = FakeAgent::new(Vec2::ZERO).with_target(target, true);
    agent.can_shoot = true;
    let mut attack = Attack::new(tuning);
    let mut ctx = StateContext::new(&mut agent);

    attack.on_enter(&mut ctx);
    attack.update(&mut ctx);
    let goal = ctx.agent.move_goal();
    attack.on_exit(&mut ctx);
    drop(ctx);

    let range = goal.distance(target);
    let widest = (tuning.engagement_range.powi(2) + tuning.lateral_jitter.powi(2)).sqrt();
    assert!(range >= tuning.engagement_range - EPSILON);
    assert!(range <= widest + EPSILON);
    assert!(goal.x < target.x);
    assert!(attack.burst().is_bursting());
    assert!(!agent.firing);
}

#[test]
fn test_attack_holds_fire_without_clear_shot() {
    let mut agent = FakeAgent::new(Vec2::ZERO).with_target(Vec2::new(400.0, 0.0), true);
    agent.can_shoot = false;
    let mut attack = Attack::new(AttackTuning::default());
    let mut ctx = StateContext::new(&mut agent);

    attack.on_enter(&mut ctx);
    attack.update(&mut ctx);
    drop(ctx);

    assert!(!agent.firing);
}

// -----------------------------------------------------------------------------
// Burst timing tests
// -----------------------------------------------------------------------------

fn fixed_burst(length: f32, delay: f32) -> AttackTuning {
    AttackTuning {
        burst_length_min: length,
        burst_length_max: length,
        burst_delay_min: delay,
        burst_delay_max: delay,
        ..Default::default()
    }
}

#[test]
fn test_burst_alternates_length_and_delay() {
    let tuning = fixed_burst(1.0, 0.5);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut burst = BurstController::default();

    let pattern: Vec<bool> = (0..12)
        .map(|step| burst.update(step as f32 * 0.25, true, &tuning, &mut rng))
        .collect();

    assert_eq!(
        pattern,
        vec![true, true, true, true, false, false, true, true, true, true, false, false]
    );
}

#[test]
fn test_burst_stops_when_eligibility_drops() {
    let tuning = fixed_burst(1.0, 0.5);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut burst = BurstController::default();

    assert!(burst.update(0.0, true, &tuning, &mut rng));
    assert!(!burst.update(0.25, false, &tuning, &mut rng));
    assert!((burst.ready_at() - 0.75).abs() < EPSILON);
    assert!(!burst.update(0.5, true, &tuning, &mut rng));
    assert!(burst.update(0.75, true, &tuning, &mut rng));
}

#[test]
fn test_burst_rerolls_each_burst() {
    let tuning = AttackTuning::default();
    let dt = 0.05;
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut burst = BurstController::default();

    let mut lengths = Vec::new();
    let mut started = None;
    for step in 0..600 {
        let now = step as f32 * dt;
        let firing = burst.update(now, true, &tuning, &mut rng);
        match (firing, started) {
            (true, None) => started = Some(now),
            (false, Some(at)) => {
                lengths.push(now - at);
                started = None;
            }
            _ => {}
        }
    }

    assert!(lengths.len() >= 5);
    for length in &lengths {
        assert!(*length >= tuning.burst_length_min - EPSILON);
        assert!(*length <= tuning.burst_length_max + dt + EPSILON);
    }
    assert!(lengths.iter().any(|length| (length - lengths[0]).abs() > EPSILON));
}

// -----------------------------------------------------------------------------
// Berserk tests
// -----------------------------------------------------------------------------

#[test]
fn test_berserk_chases_then_detonates_once() {
    let tuning = BehaviourTuning::default().berserk;
    let target = Vec2::new(200.0, 0.0);
    let mut agent = FakeAgent::new(Vec2::ZERO).with_target(target, true);
    let mut berserk = Berserk::new(tuning);

    {
        let mut ctx = StateContext::new(&mut agent);
        berserk.on_enter(&mut ctx);
        let response = berserk.update(&mut ctx);
        assert_eq!(response.mode, TransitionMode::NoChange);
    }
    assert_eq!(agent.move_goal, target);
    assert_eq!(agent.self_destructs, 0);

    agent.position = Vec2::new(170.0, 0.0);
    for _ in 0..3 {
        let mut ctx = StateContext::new(&mut agent);
        let response = berserk.update(&mut ctx);
        assert_eq!(response.mode, TransitionMode::NoChange);
    }
    assert!(berserk.detonated());
    assert_eq!(agent.self_destructs, 1);
}

// -----------------------------------------------------------------------------
// Boss tests
// -----------------------------------------------------------------------------

fn boss_agent() -> FakeAgent {
    FakeAgent::new(Vec2::ZERO).with_target(Vec2::new(300.0, 0.0), true)
}

#[test]
fn test_boss_attacks_alternate_from_charge() {
    let mut brain = BossBrain::default();
    let attacks: Vec<BossAttack> = (0..4).map(|_| brain.advance_attack()).collect();
    assert_eq!(
        attacks,
        vec![
            BossAttack::Charge,
            BossAttack::SpinShoot,
            BossAttack::Charge,
            BossAttack::SpinShoot
        ]
    );
}

#[test]
fn test_telegraph_leads_into_charge() {
    let tuning = BossTuning::default();
    let mut machine = boss_machine(tuning);
    let mut agent = boss_agent();
    let mut boss = FakeBoss::new(tuning);

    for step in 0..5 {
        agent.at_tick(step);
        assert_eq!(
            tick_boss(&mut machine, &mut agent, &mut boss),
            TransitionMode::NoChange
        );
        assert!(!agent.pathing_enabled);
        assert!(boss.brain.head_offset.abs().max_element() <= tuning.head_jitter);
    }
    assert_eq!(boss.telegraphs, 1);

    agent.at_tick(5);
    assert_eq!(
        tick_boss(&mut machine, &mut agent, &mut boss),
        TransitionMode::AbandonCurrent
    );
    assert_eq!(machine.current_name(), "BossCharge");
    assert_eq!(boss.brain.head_offset, Vec2::ZERO);
    assert!(!agent.pathing_enabled);
}

#[test]
fn test_charge_ignores_contact_before_moving() {
    let tuning = BossTuning::default();
    let mut agent = boss_agent();
    agent.collisions.right = true;
    let mut boss = FakeBoss::new(tuning);
    let mut charge = BossCharge::new(tuning);
    let mut ctx = StateContext::with_boss(&mut agent, &mut boss);

    charge.on_enter(&mut ctx);
    let first = charge.update(&mut ctx);
    assert_eq!(first.mode, TransitionMode::NoChange);
    let second = charge.update(&mut ctx);
    drop(ctx);

    assert_eq!(second.mode, TransitionMode::AbandonCurrent);
    assert_eq!(second.new_state_name(), Some("BossStunned"));
    assert!(boss.weak_spot_open);
    assert_eq!(boss.shakes, vec![tuning.light_shake]);
    assert!(boss.strikes.is_empty());
}

#[test]
fn test_charge_moves_along_facing() {
    let tuning = BossTuning::default();
    let mut agent = boss_agent();
    let mut boss = FakeBoss::new(tuning);
    let mut charge = BossCharge::new(tuning);
    let mut ctx = StateContext::with_boss(&mut agent, &mut boss);

    charge.on_enter(&mut ctx);
    charge.update(&mut ctx);
    drop(ctx);

    let velocity = agent.direct_move.unwrap_or_default();
    let expected = agent.move_speed * tuning.charge_speed_multiplier;
    assert!((velocity.length() - expected).abs() < EPSILON);
    assert!(velocity.normalize().distance(agent.facing) < EPSILON);
}

#[test]
fn test_charge_strikes_target_in_range() {
    let tuning = BossTuning::default();
    let mut agent = FakeAgent::new(Vec2::ZERO).with_target(Vec2::new(40.0, 0.0), true);
    let mut boss = FakeBoss::new(tuning);
    let mut charge = BossCharge::new(tuning);
    let mut ctx = StateContext::with_boss(&mut agent, &mut boss);

    charge.on_enter(&mut ctx);
    let response = charge.update(&mut ctx);
    drop(ctx);

    assert_eq!(response.new_state_name(), Some("BossStunned"));
    assert_eq!(boss.strikes, vec![(tuning.charge_damage, tuning.charge_knockback)]);
    assert_eq!(boss.shakes, vec![tuning.heavy_shake]);
    assert!(!boss.weak_spot_open);
}

#[test]
fn test_charge_turn_rate_falls_off_with_distance() {
    let tuning = BossTuning::default();
    let charge = BossCharge::new(tuning);
    let falloff = tuning.charge_falloff_distance;

    assert_eq!(charge.turn_scale(0.0), 1.0);
    assert_eq!(charge.turn_scale(falloff * 0.5), 1.0);
    assert!((charge.turn_scale(falloff * 2.0) - 0.5).abs() < EPSILON);
}

#[test]
fn test_stun_ends_in_telegraph_and_closes_weak_spot() {
    let tuning = BossTuning::default();
    let mut agent = boss_agent();
    let mut boss = FakeBoss::new(tuning);
    boss.weak_spot_open = true;
    let mut stunned = BossStunned::new(tuning);
    let mut ctx = StateContext::with_boss(&mut agent, &mut boss);

    stunned.on_enter(&mut ctx);
    assert_eq!(stunned.update(&mut ctx).mode, TransitionMode::NoChange);
    assert!(!ctx.agent.pathing_enabled());
    drop(ctx);

    agent.now = tuning.stun_duration;
    let mut ctx = StateContext::with_boss(&mut agent, &mut boss);
    let response = stunned.update(&mut ctx);
    stunned.on_exit(&mut ctx);
    drop(ctx);

    assert_eq!(response.new_state_name(), Some("BossTelegraphCharge"));
    assert!(!boss.weak_spot_open);
    assert!(agent.pathing_enabled);
}

#[test]
fn test_spin_shoot_spins_and_fires() {
    let tuning = BossTuning::default();
    let mut agent = boss_agent();
    let mut boss = FakeBoss::new(tuning);
    let mut spin = BossSpinShoot::new(tuning);
    let mut ctx = StateContext::with_boss(&mut agent, &mut boss);

    spin.on_enter(&mut ctx);
    let before = ctx.agent.facing();
    spin.update(&mut ctx);
    let after = ctx.agent.facing();
    drop(ctx);
    let chase = agent.direct_move.unwrap_or_default();

    assert!((before.angle_to(after) - tuning.spin_rate * 0.25).abs() < EPSILON);
    assert_eq!(boss.projectiles.len(), 1);
    assert!(chase.x > 0.0);
}

#[test]
fn test_boss_cycles_through_attacks() {
    let tuning = BossTuning::default();
    let mut machine = boss_machine(tuning);
    let mut agent = boss_agent();
    // Every charge ends against a wall
    agent.collisions.right = true;
    let mut boss = FakeBoss::new(tuning);

    let mut visited = vec![machine.current_name()];
    for step in 0..200 {
        agent.at_tick(step);
        tick_boss(&mut machine, &mut agent, &mut boss);
        assert!(!agent.pathing_enabled);

        let name = machine.current_name();
        if visited.last() != Some(&name) {
            visited.push(name);
        }
        if name == "BossTelegraphCharge" {
            assert!(!boss.weak_spot_open);
        }
    }

    assert_eq!(
        &visited[..6],
        &[
            "BossTelegraphCharge",
            "BossCharge",
            "BossStunned",
            "BossTelegraphCharge",
            "BossSpinShoot",
            "BossTelegraphCharge",
        ]
    );
    assert!(!boss.projectiles.is_empty());
    assert_eq!(machine.depth(), 0);
}

// -----------------------------------------------------------------------------
// Perception and steering tests
// -----------------------------------------------------------------------------

fn entity(bits: u64) -> Entity {
    Entity::from_bits(bits)
}

#[test]
fn test_line_of_sight_blocked_by_wall() {
    let viewer = entity(1);
    let world = BoxWorld::new().with_box(entity(2), Vec2::new(4.0, -1.0), Vec2::new(5.0, 1.0));

    let visible = line_of_sight(
        &world,
        Vec2::ZERO,
        Vec2::new(10.0, 0.0),
        LayerMask::ALL,
        viewer,
        None,
    );
    assert!(!visible);
}

#[test]
fn test_line_of_sight_skips_viewer_and_accepts_target() {
    let viewer = entity(1);
    let target = entity(3);
    let world = BoxWorld::new()
        .with_box(viewer, Vec2::splat(-0.5), Vec2::splat(0.5))
        .with_box(target, Vec2::new(9.5, -0.5), Vec2::new(10.5, 0.5))
        .with_box(entity(2), Vec2::new(12.0, -1.0), Vec2::new(13.0, 1.0));

    let visible = line_of_sight(
        &world,
        Vec2::ZERO,
        Vec2::new(10.0, 0.0),
        LayerMask::ALL,
        viewer,
        Some(target),
    );
    assert!(visible);
}

#[test]
fn test_turn_towards_clamps_step() {
    let turned = turn_towards(Vec2::X, Vec2::Y, 0.5);
    assert!((turned.to_angle() - 0.5).abs() < EPSILON);

    let reached = turn_towards(Vec2::X, Vec2::Y, 4.0);
    assert!(reached.distance(Vec2::Y) < EPSILON);

    let held = turn_towards(Vec2::Y, Vec2::ZERO, 1.0);
    assert_eq!(held, Vec2::Y);
}
