// Motion Document Verification Tool
// Validates a document and sweeps its curves, checking the resolved
// outputs stay finite and clamped.

use anyhow::{Context, Result};
use choreo_engine::registry;
use clap::Parser;
use motion_core::{sample_curve, validate, Directive, MotionPreferences, RevealState, RevealTween};
use motion_data::model::{CurveValue, MotionDoc, Region};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "verify_motion", about = "Validate and sweep a motion document")]
struct Args {
    /// Path to the motion document JSON.
    doc: PathBuf,

    /// Number of progress samples per track channel.
    #[arg(long, default_value_t = 20)]
    steps: usize,

    /// Treat the sweep as a reduced-motion host.
    #[arg(long)]
    reduced_motion: bool,
}

#[derive(Debug, Default)]
struct Report {
    regions: usize,
    reveals: usize,
    tracks: usize,
    channels: usize,
    toggles: usize,
    idles: usize,
    violations: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("╔════════════════════════════════════════════════════════════════╗");
    println!("║                 Motion Document Verification                   ║");
    println!("╚════════════════════════════════════════════════════════════════╝");
    println!();

    let json_str = fs::read_to_string(&args.doc)
        .with_context(|| format!("reading {}", args.doc.display()))?;
    let doc: MotionDoc = serde_json::from_str(&json_str)
        .with_context(|| format!("parsing {}", args.doc.display()))?;

    println!(
        "📄 Document: {} ({} regions)",
        doc.name.as_deref().unwrap_or("unnamed"),
        doc.regions.len()
    );

    validate(&doc).context("document failed validation")?;
    println!("✅ Structure valid");

    let channels: Vec<_> = registry::list_channels()
        .into_iter()
        .map(|c| c.name)
        .collect();
    println!("🎛  Engine channels: {}", channels.join(", "));
    println!();

    let prefs = MotionPreferences {
        reduced_motion: args.reduced_motion,
    };

    let mut report = Report {
        regions: doc.regions.len(),
        ..Report::default()
    };

    for region in &doc.regions {
        verify_region(region, args.steps, prefs, &mut report);
    }

    print_summary(&report);

    if report.violations.is_empty() {
        println!("  ✅ OVERALL: PASS");
        Ok(())
    } else {
        println!("  ❌ OVERALL: FAIL ({} violations)", report.violations.len());
        anyhow::bail!("document sweep found {} violations", report.violations.len());
    }
}

fn verify_region(region: &Region, steps: usize, prefs: MotionPreferences, report: &mut Report) {
    println!("── {} ──", region.name);

    if let Some(reveal) = &region.reveal {
        report.reveals += 1;
        verify_reveal(&region.name, reveal, prefs, report);
    }

    if let Some(track) = &region.track {
        report.tracks += 1;
        for chan in &track.channels {
            report.channels += 1;
            verify_channel(&region.name, &chan.channel.to_string(), &chan.keys, steps, report);
        }
    }

    if let Some(toggle) = &region.toggle {
        report.toggles += 1;
        println!(
            "  toggle: {:.2}s{}",
            toggle.duration,
            toggle
                .scroll_past
                .map(|px| format!(", auto-flips past {px} px"))
                .unwrap_or_default()
        );
    }

    if let Some(idle) = &region.idle {
        report.idles += 1;
        println!(
            "  idle: {} over {:.2}s ({} values)",
            idle.channel,
            idle.duration,
            idle.values.len()
        );
    }

    println!();
}

fn verify_reveal(
    name: &str,
    reveal: &motion_data::model::RevealSpec,
    prefs: MotionPreferences,
    report: &mut Report,
) {
    let tween = RevealTween::new(reveal, prefs);
    let mut state = RevealState::new(reveal);

    // The latch must flip exactly once across an enter/leave/enter run
    // (twice in re-armable mode).
    let mut flips = 0;
    for ratio in [0.0, 1.0, 1.0, 0.0, 1.0] {
        if state.update(ratio) {
            flips += 1;
        }
    }
    let expected = if reveal.once { 1 } else { 2 };
    if flips != expected {
        report.violations.push(format!(
            "{name}: reveal latch flipped {flips} times, expected {expected}"
        ));
    }

    // The tween must start at its hidden pose and land on identity.
    let initial = tween.initial();
    let total = reveal.delay + reveal.duration + 1.0;
    let landed = tween.pose_at(total);
    if landed != Directive::IDENTITY {
        report
            .violations
            .push(format!("{name}: reveal does not settle on identity"));
    }

    println!(
        "  reveal: {:?} from (x {:+.0}, y {:+.0}, blur {:.0}) over {:.2}s + {:.2}s delay",
        reveal.direction,
        initial.translate.x,
        initial.translate.y,
        initial.blur,
        reveal.duration,
        reveal.delay
    );
}

fn verify_channel(
    name: &str,
    channel: &str,
    keys: &CurveValue,
    steps: usize,
    report: &mut Report,
) {
    let (lo, hi) = match keys {
        CurveValue::Keyed(ks) => {
            let lo = ks.iter().map(|k| k.value).fold(f32::INFINITY, f32::min);
            let hi = ks.iter().map(|k| k.value).fold(f32::NEG_INFINITY, f32::max);
            (lo, hi)
        }
        CurveValue::Static(v) => (*v, *v),
        CurveValue::Default => (0.0, 0.0),
    };

    let mut min_seen = f32::INFINITY;
    let mut max_seen = f32::NEG_INFINITY;

    // Sweep past both ends to exercise the clamping.
    for i in 0..=steps {
        let progress = -0.25 + 1.5 * (i as f32 / steps as f32);
        let value = sample_curve(keys, progress, 0.0);

        if !value.is_finite() {
            report
                .violations
                .push(format!("{name}: {channel} produced {value} at {progress}"));
        }
        min_seen = min_seen.min(value);
        max_seen = max_seen.max(value);

        // Replaying the same input must be bit-identical.
        if sample_curve(keys, progress, 0.0).to_bits() != value.to_bits() {
            report
                .violations
                .push(format!("{name}: {channel} not deterministic at {progress}"));
        }
    }

    if let CurveValue::Keyed(_) = keys {
        if min_seen < lo || max_seen > hi {
            report.violations.push(format!(
                "{name}: {channel} escaped its key range [{lo}, {hi}]"
            ));
        }
    }

    println!("  track {channel}: [{min_seen:.2} .. {max_seen:.2}]");
}

fn print_summary(report: &Report) {
    println!("╔════════════════════════════════════════════════════════════════╗");
    println!("║                          SUMMARY                               ║");
    println!("╚════════════════════════════════════════════════════════════════╝");
    println!(
        "  Regions: {} | Reveals: {} | Tracks: {} ({} channels) | Toggles: {} | Idles: {}",
        report.regions,
        report.reveals,
        report.tracks,
        report.channels,
        report.toggles,
        report.idles
    );
    for violation in &report.violations {
        println!("  ❌ {violation}");
    }
    println!();
}
