//! Colorful console output for optimizer events.
//!
//! Provides a custom `tracing` layer that formats optimizer events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (optimize start/end, per-try results)
//! - **WARN**: Step limits, sampling budgets, suspicious estimates
//! - **DEBUG**: Individual steps, only when an optimizer runs with `debug`

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static OPTIMIZE_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "submodmax_solver=info";

/// Filter used when `RUST_LOG` is unset and step tracing is requested.
pub const DEBUG_FILTER: &str = "submodmax_solver=debug";

/// Returns the filter directive used when `RUST_LOG` is unset.
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        DEBUG_FILTER
    } else {
        DEFAULT_FILTER
    }
}

/// Initializes console output without step tracing.
///
/// Safe to call multiple times; only the first call has effect. Honors
/// `RUST_LOG` and falls back to [`DEFAULT_FILTER`].
pub fn init() {
    init_with(false);
}

/// Initializes console output, showing optimizer steps when `debug` is set.
///
/// Only the first call of [`init`] or `init_with` has effect. `RUST_LOG`
/// still takes precedence over [`default_filter`].
pub fn init_with(debug: bool) {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(OptimizerConsoleLayer)
            .try_init();
    });
}

fn mark_optimize_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    OPTIMIZE_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = OPTIMIZE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

/// A tracing layer that formats optimizer events with colors.
pub struct OptimizerConsoleLayer;

impl<S: Subscriber> Layer<S> for OptimizerConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("submodmax") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    algorithm: Option<String>,
    message: Option<String>,
    kind: Option<String>,
    element: Option<String>,
    ground_set_size: Option<u64>,
    set_size: Option<u64>,
    evaluations: Option<u64>,
    duration_ms: Option<u64>,
    try_index: Option<u64>,
    step: Option<u64>,
    step_limit: Option<u64>,
    estimates: Option<u64>,
    value: Option<f64>,
    opt: Option<f64>,
    a: Option<f64>,
    b: Option<f64>,
    improved: Option<bool>,
    update_x: Option<bool>,
}

impl EventVisitor {
    fn set_str(&mut self, name: &str, value: String) {
        match name {
            "event" => self.event = Some(value),
            "algorithm" => self.algorithm = Some(value),
            "message" => self.message = Some(value),
            "kind" => self.kind = Some(value),
            "element" => self.element = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_str(field.name(), s.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_str(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "ground_set_size" => self.ground_set_size = Some(value),
            "set_size" => self.set_size = Some(value),
            "evaluations" => self.evaluations = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "try_index" => self.try_index = Some(value),
            "step" => self.step = Some(value),
            "step_limit" => self.step_limit = Some(value),
            "estimates" => self.estimates = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "value" => self.value = Some(value),
            "opt" => self.opt = Some(value),
            "a" => self.a = Some(value),
            "b" => self.b = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "improved" => self.improved = Some(value),
            "update_x" => self.update_x = Some(value),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "optimize_start" => format_optimize_start(v),
        "optimize_end" => format_optimize_end(v),
        "try_end" => format_try_end(v),
        "step" => format_step(v, level),
        _ if level == Level::WARN => format_warning(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn algorithm(v: &EventVisitor) -> &str {
    v.algorithm.as_deref().unwrap_or("optimizer")
}

fn format_optimize_start(v: &EventVisitor) -> String {
    mark_optimize_start();
    let n = v.ground_set_size.unwrap_or(0);

    format!(
        "{} {} {} │ {} elements",
        format_elapsed(),
        "▶".bright_green().bold(),
        algorithm(v).white().bold(),
        n.to_formatted_string(&Locale::en).bright_yellow(),
    )
}

fn format_optimize_end(v: &EventVisitor) -> String {
    let evaluations = v.evaluations.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);
    let set_size = v.set_size.unwrap_or(0);

    format!(
        "{} {} {} done │ {} │ {} evaluations │ {} selected │ value {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        algorithm(v).white().bold(),
        format_duration_ms(duration).yellow(),
        evaluations
            .to_formatted_string(&Locale::en)
            .bright_magenta()
            .bold(),
        set_size.to_formatted_string(&Locale::en).white(),
        format_value(v.value),
    )
}

fn format_try_end(v: &EventVisitor) -> String {
    let icon = if v.improved.unwrap_or(false) {
        "↑".bright_green().to_string()
    } else {
        "·".bright_black().to_string()
    };

    format!(
        "{} {} Try {:>4} │ {} selected │ value {}",
        format_elapsed(),
        icon,
        v.try_index.unwrap_or(0),
        v.set_size.unwrap_or(0).to_formatted_string(&Locale::en),
        format_value(v.value),
    )
}

fn format_step(v: &EventVisitor, level: Level) -> String {
    if level != Level::DEBUG {
        return String::new();
    }

    let mut output = format!("{} {}", format_elapsed(), "·".bright_black());
    if let Some(step) = v.step {
        output.push_str(&format!(" Step {:>6}", step));
    }
    if let Some(ref kind) = v.kind {
        output.push_str(&format!(" │ {}", kind));
    }
    if let Some(ref element) = v.element {
        output.push_str(&format!(" │ element {}", element));
    }
    if let (Some(a), Some(b)) = (v.a, v.b) {
        output.push_str(&format!(" │ a {:.4} b {:.4}", a, b));
    }
    if let Some(update_x) = v.update_x {
        output.push_str(if update_x { " │ X += e" } else { " │ Y -= e" });
    }
    if let Some(ref message) = v.message {
        output.push_str(&format!(" │ {}", message));
    }
    output.bright_black().to_string()
}

fn format_warning(v: &EventVisitor) -> String {
    let event = v.event.as_deref().unwrap_or("warning");
    let mut output = format!(
        "{} {} {} │ {}",
        format_elapsed(),
        "!".bright_yellow().bold(),
        algorithm(v),
        event.yellow(),
    );
    if let Some(limit) = v.step_limit {
        output.push_str(&format!(" │ limit {}", limit.to_formatted_string(&Locale::en)));
    }
    if let Some(estimates) = v.estimates {
        output.push_str(&format!(
            " │ {} estimates",
            estimates.to_formatted_string(&Locale::en)
        ));
    }
    if let Some(opt) = v.opt {
        output.push_str(&format!(" │ opt {}", format_value(Some(opt))));
    }
    if let Some(ref message) = v.message {
        output.push_str(&format!(" │ {}", message));
    }
    output
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

fn format_value(value: Option<f64>) -> String {
    match value {
        None => "N/A".white().to_string(),
        Some(v) if v.is_nan() => "NaN".bright_red().to_string(),
        Some(v) if v < 0.0 => format!("{}", v).bright_red().to_string(),
        Some(v) if v > 0.0 => format!("{}", v).bright_green().to_string(),
        Some(v) => format!("{}", v).white().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "submodmax_solver=info");
        assert_eq!(default_filter(true), "submodmax_solver=debug");
    }

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(15), "15ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_info_event_is_silent() {
        let visitor = EventVisitor {
            event: Some("omega_batch".to_string()),
            ..Default::default()
        };
        assert!(format_event(&visitor, Level::INFO).is_empty());
        assert!(format_event(&visitor, Level::TRACE).is_empty());
    }

    #[test]
    fn test_warning_mentions_event() {
        let visitor = EventVisitor {
            event: Some("step_limit_reached".to_string()),
            algorithm: Some("deterministic_local_search".to_string()),
            step_limit: Some(1000),
            ..Default::default()
        };
        let output = format_event(&visitor, Level::WARN);
        assert!(output.contains("step_limit_reached"));
        assert!(output.contains("1,000"));
    }

    #[test]
    fn test_steps_need_debug_level() {
        let visitor = EventVisitor {
            event: Some("step".to_string()),
            step: Some(3),
            ..Default::default()
        };
        assert!(format_event(&visitor, Level::INFO).is_empty());
        assert!(format_event(&visitor, Level::DEBUG).contains("Step"));
    }
}
