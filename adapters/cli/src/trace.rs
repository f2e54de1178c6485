use std::io::Write;

use anyhow::Result;
use cgx_core::{AnimationClip, Contact, GravityTier, MovementPhase, Vec2};
use clap::ValueEnum;
use serde::Serialize;

/// Output encoding for the per-tick trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// One human readable line per tick.
    Text,
    /// One JSON object per line.
    Json,
}

/// State observed after a single tick.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct TickRecord {
    pub(crate) tick: usize,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) phase: MovementPhase,
    pub(crate) gravity_tier: GravityTier,
    pub(crate) animations: Vec<AnimationClip>,
    pub(crate) contacts: Vec<Contact>,
}

/// Final state once the script has run out.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct SummaryRecord {
    pub(crate) ticks: usize,
    pub(crate) position: Vec2,
    pub(crate) health: f32,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum TraceLine<'a> {
    Tick(&'a TickRecord),
    Summary(&'a SummaryRecord),
}

pub(crate) fn write_tick(out: &mut impl Write, format: Format, record: &TickRecord) -> Result<()> {
    match format {
        Format::Json => write_json(out, &TraceLine::Tick(record)),
        Format::Text => {
            let animations = record
                .animations
                .iter()
                .map(|clip| clip.name())
                .collect::<Vec<_>>()
                .join(",");
            write!(
                out,
                "tick {:>4}  pos ({:>7.3}, {:>7.3})  vel ({:>7.3}, {:>7.3})  {:<13}  {:<9}  [{}]",
                record.tick,
                record.position.x,
                record.position.y,
                record.velocity.x,
                record.velocity.y,
                format!("{:?}", record.phase),
                format!("{:?}", record.gravity_tier),
                animations,
            )?;
            for contact in &record.contacts {
                write!(out, "  {}", describe(contact))?;
            }
            writeln!(out)?;
            Ok(())
        }
    }
}

pub(crate) fn write_summary(
    out: &mut impl Write,
    format: Format,
    record: &SummaryRecord,
) -> Result<()> {
    match format {
        Format::Json => write_json(out, &TraceLine::Summary(record)),
        Format::Text => {
            writeln!(
                out,
                "after {} ticks: pos ({:.3}, {:.3}), health {}",
                record.ticks, record.position.x, record.position.y, record.health
            )?;
            Ok(())
        }
    }
}

fn write_json(out: &mut impl Write, line: &TraceLine<'_>) -> Result<()> {
    serde_json::to_writer(&mut *out, line)?;
    writeln!(out)?;
    Ok(())
}

fn describe(contact: &Contact) -> String {
    match contact {
        Contact::Hit(hit) => format!("hit {}", hit.collider),
        Contact::TriggerEnter(collider) => format!("enter {}", collider.name),
        Contact::TriggerExit(collider) => format!("exit {}", collider.name),
    }
}
