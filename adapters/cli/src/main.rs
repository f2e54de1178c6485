#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line driver that runs a scripted session on the headless stage.

mod profile;
mod trace;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use cgx_core::{CollisionObserver, Contact, ControllerEvent, Mover, Vec2};
use cgx_system_controller::{Collaborators, PlatformerController};
use cgx_system_status::StatusAgent;
use cgx_world::{AnimationLog, ScriptedInput, Stage, TriggerZone};
use clap::Parser;

use crate::{
    profile::Profile,
    trace::{Format, SummaryRecord, TickRecord},
};

const PLAYER_NAME: &str = "player";
const HAZARD_NAME: &str = "hazard";
const LEFT_WALL: f32 = -1.0;
const RIGHT_WALL: f32 = 40.0;

/// Runs a scripted action-key timeline through the platformer controller.
#[derive(Debug, Parser)]
#[command(name = "cgx", version)]
struct Cli {
    /// TOML character profile; built-in tuning when omitted.
    #[arg(long)]
    profile: Option<PathBuf>,
    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 180)]
    ticks: usize,
    /// Tick length in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
    /// Ticks on which the action key goes down. Pass the flag bare for none.
    #[arg(long, value_delimiter = ',', num_args = 0.., default_values_t = [10_usize, 45])]
    press: Vec<usize>,
    /// Ticks the action key stays down after each press.
    #[arg(long, default_value_t = 12)]
    hold: usize,
    /// Ticks an ability animation plays before reporting completion.
    #[arg(long, default_value_t = 12)]
    ability_frames: usize,
    /// Damage dealt whenever the player walks into the hazard.
    #[arg(long, default_value_t = 4.0)]
    hazard_damage: f32,
    /// Trace encoding.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

/// Entry point for the CGX command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let profile = match &cli.profile {
        Some(path) => Profile::load(path)?,
        None => Profile::default(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&cli, profile, &mut out)?;
    out.flush().context("failed to flush trace output")
}

fn run(cli: &Cli, profile: Profile, out: &mut impl Write) -> Result<()> {
    let stage = Stage::new(Vec2::ZERO)
        .with_walls(LEFT_WALL, RIGHT_WALL)
        .with_trigger(TriggerZone::new(
            HAZARD_NAME,
            Vec2::new(6.0, 0.0),
            Vec2::new(7.0, 0.5),
        ));
    let mut controller = PlatformerController::new(
        profile.movement,
        Collaborators {
            mover: stage,
            input: ScriptedInput::from_presses(&cli.press, cli.hold),
            animations: AnimationLog::new(),
        },
    )
    .context("invalid movement configuration")?;
    let mut agent =
        StatusAgent::new(PLAYER_NAME, profile.agent).context("invalid agent configuration")?;

    if let Some(late) = cli.press.iter().find(|&&press| press >= cli.ticks) {
        log::warn!("press at tick {late} is past the end of a {}-tick run", cli.ticks);
    }
    log::info!(
        "running {} ticks of {}s with presses at {:?}",
        cli.ticks,
        cli.dt,
        cli.press
    );

    let mut events = Vec::new();

    for tick in 0..cli.ticks {
        events.clear();
        controller.tick(cli.dt, &mut events);
        controller.input_mut().advance();

        if let Some(clip) = controller.animations_mut().advance_frame(cli.ability_frames) {
            log::debug!("animation {clip:?} finished");
            controller.animation_end();
        }

        let contacts = controller.mover_mut().drain_contacts();
        for contact in &contacts {
            controller.observe(contact);
            agent.observe(contact);
            if matches!(contact, Contact::TriggerEnter(collider) if collider.name == HAZARD_NAME) {
                agent.damage(cli.hazard_damage);
            }
        }

        let record = TickRecord {
            tick,
            position: controller.mover().position(),
            velocity: controller.velocity(),
            phase: controller.phase(),
            gravity_tier: controller.gravity_tier(),
            animations: events
                .iter()
                .filter_map(|event| match event {
                    ControllerEvent::AnimationSelected { clip, .. } => Some(*clip),
                    _ => None,
                })
                .collect(),
            contacts,
        };
        trace::write_tick(out, cli.format, &record)?;
    }

    let summary = SummaryRecord {
        ticks: cli.ticks,
        position: controller.mover().position(),
        health: agent.health(),
    };
    log::debug!("grounded at exit: {}", controller.mover().is_grounded());
    trace::write_summary(out, cli.format, &summary)
}
