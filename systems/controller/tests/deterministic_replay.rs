use cgx_core::{
    AgentConfig, CollisionObserver, Contact, ControllerEvent, MovementConfig, MovementPhase, Vec2,
};
use cgx_system_controller::{Collaborators, PlatformerController};
use cgx_system_status::StatusAgent;
use cgx_world::{AnimationLog, ScriptedInput, Stage, TriggerZone};

const DT: f32 = 1.0 / 60.0;
const TICKS: usize = 180;
const ABILITY_FRAMES: usize = 8;

#[test]
fn replaying_the_same_script_is_identical() {
    let first = replay();
    let second = replay();

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.final_phase, MovementPhase::Grounded);
    assert!(first.contacts.iter().any(|contact| matches!(
        contact,
        Contact::TriggerEnter(collider) if collider.name == "spikes"
    )));
    assert!(first
        .contacts
        .iter()
        .any(|contact| matches!(contact, Contact::Hit(hit) if hit.normal == Vec2::NEG_X)));
}

#[test]
fn contacts_do_not_disturb_status() {
    let outcome = replay();
    let mut agent = StatusAgent::new("player", AgentConfig::default()).expect("valid config");
    let before = agent.clone();

    for contact in &outcome.contacts {
        agent.observe(contact);
    }

    assert_eq!(agent, before);
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    events: Vec<ControllerEvent>,
    contacts: Vec<Contact>,
    final_position: Vec2,
    final_phase: MovementPhase,
}

fn replay() -> ReplayOutcome {
    let stage = Stage::new(Vec2::ZERO)
        .with_walls(-10.0, 12.0)
        .with_ceiling(20.0)
        .with_trigger(TriggerZone::new(
            "spikes",
            Vec2::new(4.0, 0.0),
            Vec2::new(5.0, 10.0),
        ));
    let mut controller = PlatformerController::new(
        MovementConfig {
            jump_start_gravity: -15.0,
            jump_end_gravity: -35.0,
            ..MovementConfig::default()
        },
        Collaborators {
            mover: stage,
            input: ScriptedInput::from_presses(&[20, 40, 90], 10),
            animations: AnimationLog::new(),
        },
    )
    .expect("valid config");

    let mut events = Vec::new();
    let mut contacts = Vec::new();

    for _ in 0..TICKS {
        controller.tick(DT, &mut events);
        controller.input_mut().advance();

        if controller
            .animations_mut()
            .advance_frame(ABILITY_FRAMES)
            .is_some()
        {
            controller.animation_end();
        }

        for contact in controller.mover_mut().drain_contacts() {
            controller.observe(&contact);
            contacts.push(contact);
        }
    }

    ReplayOutcome {
        events,
        contacts,
        final_position: controller.mover().position(),
        final_phase: controller.phase(),
    }
}
