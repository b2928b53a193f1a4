//! Colorful console output for pipeline runs.
//!
//! Provides a custom `tracing` layer that formats run events with colors.
//! Enabled with the `console` feature.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Installs the console layer.
///
/// Safe to call multiple times; only the first call has effect. `RUST_LOG`
/// adds to the default of INFO for the engine and the store.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::from_default_env()
            .add_directive("toposcan_engine=info".parse().expect("valid directive"))
            .add_directive("toposcan_store=info".parse().expect("valid directive"));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(RunConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats pipeline events with colors.
pub struct RunConsoleLayer;

impl<S: Subscriber> Layer<S> for RunConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("toposcan") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(*metadata.level(), &visitor);
        if output.is_empty() {
            return;
        }
        if *metadata.level() <= Level::WARN {
            let _ = writeln!(io::stderr(), "{}", output);
        } else {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    job: Option<String>,
    input: Option<String>,
    out_dir: Option<String>,
    origin: Option<String>,
    path: Option<String>,
    error: Option<String>,
    counts: Vec<(String, u64)>,
}

impl EventVisitor {
    fn count(&self, name: &str) -> u64 {
        self.counts
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
            .unwrap_or(0)
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_str(field, s.trim_matches('"'));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.counts.push((field.name().to_string(), value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let slot = match field.name() {
            "event" => &mut self.event,
            "job" => &mut self.job,
            "input" => &mut self.input,
            "out_dir" => &mut self.out_dir,
            "origin" => &mut self.origin,
            "path" => &mut self.path,
            "error" => &mut self.error,
            _ => return,
        };
        *slot = Some(value.to_string());
    }
}

fn format_event(level: Level, v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "run_started" => format_run_started(v),
        "progress" => format_progress(v),
        "run_finished" => format_run_finished(v),
        _ if level <= Level::WARN => format_warning(level, v),
        _ => String::new(),
    }
}

fn format_run_started(v: &EventVisitor) -> String {
    format!(
        "{} {} {} {} -> {} ({} threads, batches of {})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", v.job.as_deref().unwrap_or("run")).bright_cyan(),
        v.input.as_deref().unwrap_or("?").white().bold(),
        v.out_dir.as_deref().unwrap_or("?").white(),
        v.count("threads").to_string().yellow(),
        v.count("batch_size").to_formatted_string(&Locale::en).yellow()
    )
}

fn format_progress(v: &EventVisitor) -> String {
    format!(
        "    {} read {:>12} | processed {:>12}",
        "->".bright_blue(),
        v.count("read").to_formatted_string(&Locale::en).white(),
        v.count("processed").to_formatted_string(&Locale::en).white()
    )
}

fn format_run_finished(v: &EventVisitor) -> String {
    let job = v.job.as_deref().unwrap_or("run");
    let mut output = format!(
        "{} {} {} {} finished in {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", job).bright_cyan(),
        job.white().bold(),
        format_duration_ms(v.count("elapsed_ms")).yellow()
    );

    let rows = [
        ("Input:", v.count("inputs")),
        ("Processed:", v.count("processed")),
        ("Derived:", v.count("derived")),
        ("Duplicates:", v.count("duplicates")),
        ("Failures:", v.count("failures")),
        ("Saved SCFT:", v.count("saved_scft")),
        ("Saved LST:", v.count("saved_lst")),
    ];

    output.push_str("\n\n");
    output.push_str(&"╔══════════════════════════════════════════════════════════╗".bright_cyan().to_string());
    output.push('\n');
    for (label, value) in rows {
        output.push_str(&format!(
            "{}  {:<18}{:>36}  {}",
            "║".bright_cyan(),
            label,
            value.to_formatted_string(&Locale::en),
            "║".bright_cyan()
        ));
        output.push('\n');
    }
    output.push_str(&"╚══════════════════════════════════════════════════════════╝".bright_cyan().to_string());
    output.push('\n');
    output
}

fn format_warning(level: Level, v: &EventVisitor) -> String {
    let label = if level == Level::ERROR {
        "ERROR".bright_red().bold().to_string()
    } else {
        "WARN".yellow().to_string()
    };
    let subject = v
        .origin
        .as_deref()
        .or(v.path.as_deref())
        .unwrap_or("");
    format!(
        "{} {} {} {} {}",
        timestamp().bright_black(),
        label,
        v.event.as_deref().unwrap_or("warning").bright_cyan(),
        subject.white(),
        v.error.as_deref().unwrap_or("").bright_black()
    )
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_formatting() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_info_events_are_silent() {
        let visitor = EventVisitor {
            event: Some("input_file".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(Level::INFO, &visitor).is_empty());
        assert!(!format_event(Level::WARN, &visitor).is_empty());
    }

    #[test]
    fn test_summary_lists_counts() {
        let visitor = EventVisitor {
            event: Some("run_finished".to_string()),
            job: Some("extend".to_string()),
            counts: vec![("saved_scft".to_string(), 12_345)],
            ..EventVisitor::default()
        };
        let text = format_event(Level::INFO, &visitor);
        assert!(text.contains("Saved SCFT:"));
        assert!(text.contains("12,345"));
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
