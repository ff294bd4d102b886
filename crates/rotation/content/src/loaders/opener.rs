//! Opener script loader.

use std::path::Path;

use rotation_core::{OpenerScript, OpenerStep};

use crate::bard::BardAction;
use crate::loaders::{Format, LoadResult, parse_file};

/// One step as written in a script file.
///
/// ```ron
/// [Main(Stormbite), OffGcd(WanderersMinuet), Main(CausticBite)]
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ScriptedStep {
    Main(BardAction),
    OffGcd(BardAction),
}

impl From<ScriptedStep> for OpenerStep {
    fn from(step: ScriptedStep) -> Self {
        match step {
            ScriptedStep::Main(action) => OpenerStep::main(action.id()),
            ScriptedStep::OffGcd(action) => OpenerStep::off_gcd(action.id()),
        }
    }
}

/// Loader for opener scripts.
pub struct OpenerLoader;

impl OpenerLoader {
    /// Load a script from a RON or TOML file.
    ///
    /// TOML files hold the list under a `steps` key.
    pub fn load(path: &Path) -> LoadResult<OpenerScript> {
        let steps: Vec<ScriptedStep> = match Format::from_path(path)? {
            Format::Ron => parse_file(path)?,
            Format::Toml => parse_file::<TomlScript>(path)?.steps,
        };
        if steps.is_empty() {
            anyhow::bail!("opener script {} has no steps", path.display());
        }
        Ok(steps.into_iter().map(OpenerStep::from).collect())
    }
}

#[derive(serde::Deserialize)]
struct TomlScript {
    steps: Vec<ScriptedStep>,
}
