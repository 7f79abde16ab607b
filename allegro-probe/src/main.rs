//! Liveness probe for Allegro applications.
//!
//! Checks how recently the application's heartbeat marker was touched.
//! Useful as a Kubernetes liveness probe command.
//!
//! Prints one classification to stdout and exits with a matching code
//! so orchestration layers can distinguish causes:
//!
//! | Output              | Exit | Meaning                              |
//! |---------------------|------|--------------------------------------|
//! | `OK`                | 0    | marker fresh enough                  |
//! | `MISSING`           | 1    | marker file absent                   |
//! | `FAILURE TIMESTAMP` | 2    | marker present, mtime unreadable     |
//! | `EXPIRED`           | 3    | marker older than the timeout        |

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, SystemTime};

use clap::Parser;

use allegro::heartbeat::DEFAULT_PING_FILE;

/// Liveness probe for Allegro applications.
#[derive(Debug, Parser)]
#[command(name = "allegro-probe", version)]
#[command(about = "Checks how recently the Allegro heartbeat marker was touched")]
struct Cli {
    /// Maximum marker age in seconds before the process counts as dead
    #[arg(default_value_t = 60)]
    timeout: u64,

    /// Heartbeat marker file to inspect
    #[arg(long, default_value = DEFAULT_PING_FILE)]
    file: PathBuf,
}

/// Probe classification, ordered by exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Liveness {
    Ok,
    Missing,
    FailureTimestamp,
    Expired,
}

impl Liveness {
    fn label(self) -> &'static str {
        match self {
            Liveness::Ok => "OK",
            Liveness::Missing => "MISSING",
            Liveness::FailureTimestamp => "FAILURE TIMESTAMP",
            Liveness::Expired => "EXPIRED",
        }
    }

    fn exit_code(self) -> u8 {
        match self {
            Liveness::Ok => 0,
            Liveness::Missing => 1,
            Liveness::FailureTimestamp => 2,
            Liveness::Expired => 3,
        }
    }
}

fn classify(marker: &Path, timeout: Duration) -> Liveness {
    if !marker.exists() {
        return Liveness::Missing;
    }
    let mtime = match std::fs::metadata(marker).and_then(|m| m.modified()) {
        Ok(mtime) => mtime,
        Err(_) => return Liveness::FailureTimestamp,
    };
    match SystemTime::now().duration_since(mtime) {
        Ok(age) if age > timeout => Liveness::Expired,
        // A marker dated in the future counts as fresh.
        _ => Liveness::Ok,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let status = classify(&cli.file, Duration::from_secs(cli.timeout));
    println!("{}", status.label());
    ExitCode::from(status.exit_code())
}
