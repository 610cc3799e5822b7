// server/src/telemetry.rs

use tracing_subscriber::{filter::LevelFilter, fmt::format::FmtSpan, EnvFilter};

/// `RUST_LOG` directives on top of an INFO default.
pub fn env_filter() -> EnvFilter {
  EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy()
}

/// Installs the global subscriber. `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing() {
  let builder = tracing_subscriber::fmt()
    .with_env_filter(env_filter())
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration

  if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
    builder.json().init();
  } else {
    builder.init();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;
  use std::env;

  #[test]
  #[serial]
  fn defaults_to_info_without_rust_log() {
    env::remove_var("RUST_LOG");
    assert_eq!(env_filter().max_level_hint(), Some(LevelFilter::INFO));
  }

  #[test]
  #[serial]
  fn rust_log_overrides_the_default() {
    env::set_var("RUST_LOG", "debug");
    let hint = env_filter().max_level_hint();
    env::remove_var("RUST_LOG");
    assert_eq!(hint, Some(LevelFilter::DEBUG));
  }
}
