use std::env;

use formats::SectionBundle;
use foundation::progress::Progress;
use profile::Statistics;
use serde_json::json;
use timeline::Phase;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let cmd = args[1].clone();
    args.drain(0..2);

    match cmd.as_str() {
        "inspect" => cmd_inspect(args),
        "frame" => cmd_frame(args),
        "schedule" => cmd_schedule(args),
        _ => Err(usage()),
    }
}

fn load_bundle(dir: &str) -> Result<SectionBundle, String> {
    formats::load_section_from_package_dir(dir).map_err(|e| format!("load {dir}: {e}"))
}

fn cmd_inspect(args: Vec<String>) -> Result<(), String> {
    // cryosect inspect <package_dir>
    if args.len() != 1 {
        return Err(usage());
    }

    let bundle = load_bundle(&args[0])?;
    let director = &bundle.director;
    let manifest = bundle.package.manifest();

    println!(
        "section: {}",
        manifest.name.as_deref().unwrap_or("(unnamed)")
    );
    println!("package: {}", bundle.package.root().display());

    let dataset_path = bundle.package.root().join(&manifest.dataset.path);
    let fingerprint =
        formats::fingerprint(&dataset_path).map_err(|e| format!("fingerprint: {e}"))?;
    println!("dataset: {} (blake3 {fingerprint})", manifest.dataset.path);
    println!(
        "rows: {} read, {} dropped",
        bundle.dataset_report.rows_read, bundle.dataset_report.rows_dropped
    );

    let records = director.records();
    match (records.first(), records.last()) {
        (Some(first), Some(last)) => println!(
            "playback records: {} ({} .. {})",
            records.len(),
            first.date,
            last.date
        ),
        _ => println!("playback records: 0 (everything past the cutoff)"),
    }

    let frost_depths: Vec<Option<f64>> = records.iter().map(|r| r.frost_depth_m).collect();
    if let (Some(mean), Some((min, max))) = (
        Statistics::mean(&frost_depths),
        Statistics::min_max(&frost_depths),
    ) {
        println!(
            "frost depth: mean {mean:.2} m, range {min:.2} .. {max:.2} m ({} of {} records)",
            Statistics::defined_count(&frost_depths),
            records.len()
        );
    }

    let maxima = director.annual_maxima();
    println!("annual maxima: {}", maxima.len());
    for maximum in maxima {
        println!(
            "  {}  {:.2} m  {}",
            maximum.year, maximum.max_frost_depth_m, maximum.date
        );
    }

    println!(
        "timeline: {} units ({} px of scroll)",
        director.total_duration(),
        director.scroll_extent_px()
    );
    let contour = match bundle.contour.source {
        formats::ContourSource::File => "traced file",
        formats::ContourSource::Fallback => "fallback rectangle",
    };
    println!("contour: {contour}");
    Ok(())
}

fn cmd_frame(args: Vec<String>) -> Result<(), String> {
    // cryosect frame <package_dir> (--at UNITS | --scroll PIXELS)
    if args.is_empty() {
        return Err(usage());
    }
    let dir = args[0].clone();

    let mut at: Option<f64> = None;
    let mut scroll: Option<f64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--at" => {
                i += 1;
                if i >= args.len() {
                    return Err("--at requires a value".to_string());
                }
                at = Some(
                    args[i]
                        .parse()
                        .map_err(|_| "--at must be a number".to_string())?,
                );
            }
            "--scroll" => {
                i += 1;
                if i >= args.len() {
                    return Err("--scroll requires a value".to_string());
                }
                scroll = Some(
                    args[i]
                        .parse()
                        .map_err(|_| "--scroll must be a number".to_string())?,
                );
            }
            s => {
                return Err(format!("unknown arg: {s}\n\n{}", usage()));
            }
        }
        i += 1;
    }

    let bundle = load_bundle(&dir)?;
    let frame = match (at, scroll) {
        (Some(t), None) => bundle.director.sample(Progress(t)),
        (None, Some(px)) => bundle.director.sample_scroll(px),
        _ => return Err("frame requires exactly one of --at or --scroll".to_string()),
    };

    let labels: Vec<serde_json::Value> = frame
        .annual_labels
        .as_ref()
        .map(|snapshot| {
            snapshot
                .labels
                .iter()
                .map(|label| json!({ "year": label.year, "visible": label.visible }))
                .collect()
        })
        .unwrap_or_default();

    let payload = json!({
        "progress": frame.progress.0,
        "phase": phase_name(frame.phase),
        "record_index": frame.record_index,
        "record_date": frame.record_date,
        "date_text": frame.date_text,
        "date_display_value": frame.date_display_value,
        "background_frame": frame.background_frame,
        "overlay_opacity": frame.overlay_opacity,
        "frost_line_opacity": frame.frost_line_opacity,
        "cues": frame.cue_values,
        "regions": frame.section.as_ref().map(|s| s.regions.len()),
        "frost_line_visible": frame.section.as_ref().is_some_and(|s| s.frost_line.is_some()),
        "depth_ticks": frame.depth_scale.ticks.len(),
        "labels": labels,
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&payload).map_err(|e| format!("json: {e}"))?
    );
    Ok(())
}

fn cmd_schedule(args: Vec<String>) -> Result<(), String> {
    // cryosect schedule <package_dir>
    if args.len() != 1 {
        return Err(usage());
    }

    let bundle = load_bundle(&args[0])?;
    let director = &bundle.director;
    let schedule = director.schedule();

    println!(
        "{:<22} {:>8} {:>8} {:>11}",
        "cue", "reveal", "hide", "transition"
    );
    for (name, cue) in schedule.cues() {
        let hide = cue
            .hide_at
            .map_or_else(|| "-".to_string(), |h| format!("{h}"));
        println!(
            "{name:<22} {:>8} {hide:>8} {:>11}",
            cue.reveal_at, cue.transition
        );
    }

    let hold = schedule.hold();
    let playback = schedule.playback();
    println!();
    println!(
        "hold: starts {} for {} units (fade out {})",
        hold.start_at, hold.duration, hold.fade_out
    );
    println!(
        "playback: starts {}, {} per record, {} records",
        playback.start_at,
        playback.per_record,
        director.records().len()
    );
    println!(
        "total: {} units ({} px of scroll)",
        director.total_duration(),
        director.scroll_extent_px()
    );
    Ok(())
}

fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Intro => "intro",
        Phase::Hold => "hold",
        Phase::Playback => "playback",
    }
}

fn usage() -> String {
    let exe = env::args().next().unwrap_or_else(|| "cryosect".to_string());
    format!(
        "Usage:\n  {exe} inspect <package_dir>\n  {exe} frame <package_dir> (--at UNITS | --scroll PIXELS)\n  {exe} schedule <package_dir>\n\nNotes:\n- A package directory holds section.manifest.json plus the dataset it names.\n- Scroll pixels are divided by the manifest's pixels-per-unit before sampling.\n- Set RUST_LOG to surface load diagnostics (dropped rows, fingerprint mismatches).\n"
    )
}
