//! Locating the `tla2tools.jar` checker artifact.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Environment override for the jar location.
pub const JAR_ENV_VAR: &str = "TLA2TOOLS_JAR";

/// Remediation text shown when no jar can be found.
pub const JAR_NOT_FOUND_HELP: &str = "tla2tools.jar not found. Set $TLA2TOOLS_JAR or pass --jar.\n\
If you're in the tlaplus/tlaplus repo, build it with:\n\
  ant -f tlatools/org.lamport.tlatools/customBuild.xml default-maven\n\
and then use:\n\
  tlatools/org.lamport.tlatools/dist/tla2tools.jar";

/// Resolve the checker jar.
///
/// Search order: explicit override, then `$TLA2TOOLS_JAR`, then convenience
/// guesses near the spec and the working directory. An explicit override that
/// is not a file yields `None` rather than falling through, so a wrong `--jar`
/// never silently picks up some other jar.
pub fn find_tla2tools_jar(spec_dir: &Path, explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return path.is_file().then(|| path.to_path_buf());
    }

    if let Ok(value) = env::var(JAR_ENV_VAR) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            let path = PathBuf::from(trimmed);
            if path.is_file() {
                debug!(jar = %path.display(), "jar found via env var");
                return Some(path);
            }
        }
    }

    // Convenience guesses (non-authoritative).
    let mut guesses = vec![
        spec_dir.join("tla2tools.jar"),
        spec_dir.join("dist").join("tla2tools.jar"),
        PathBuf::from("tla2tools.jar"),
    ];

    // Usual build output when running somewhere inside the tlaplus/tlaplus repo.
    for dir in spec_dir.ancestors() {
        guesses.push(
            dir.join("tlatools")
                .join("org.lamport.tlatools")
                .join("dist")
                .join("tla2tools.jar"),
        );
    }

    guesses.into_iter().find(|guess| guess.is_file())
}
