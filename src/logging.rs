//! Diagnostic logging for the `ltk` binary.
//!
//! Logs always go to stderr so stdout stays reserved for command output,
//! which robot mode relies on.

use std::io::{self, IsTerminal};

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Filter used when `RUST_LOG` is unset.
///
/// Plain runs only surface warnings; each `-v` opens one more level.
pub(crate) const fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "ltk=error";
    }
    match verbose {
        0 => "ltk=warn",
        1 => "ltk=info",
        2 => "ltk=debug",
        _ => "ltk=trace",
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `verbose` and `quiet`.
///
/// | Mode | stderr | Format |
/// |------|--------|--------|
/// | Robot | any | JSON lines |
/// | Human | terminal | colored, one event per line |
/// | Human | pipe or file | compact, no ANSI |
///
/// Calling it twice is harmless; the second call is ignored.
pub fn init_logging(robot_mode: bool, verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let _ = tracing_subscriber::registry()
        .with(stderr_layer(robot_mode).with_filter(filter))
        .try_init();
}

fn stderr_layer(robot_mode: bool) -> BoxedLayer {
    let base = fmt::layer()
        .with_writer(io::stderr)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE);

    if robot_mode {
        base.json().with_target(true).boxed()
    } else if io::stderr().is_terminal() {
        base.with_target(false).boxed()
    } else {
        base.with_ansi(false).with_target(false).compact().boxed()
    }
}
