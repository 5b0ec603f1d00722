use crate::commands::{CmdMessage, CmdResult};
use crate::config::DeskConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = DeskConfig::load(config_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {
            return Ok(result.with_config(config.entries()));
        }
        ConfigAction::ShowKey(key) => {
            let value = config.get(&key)?;
            return Ok(result.with_config(vec![(key, value)]));
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(config_dir)?;
            let stored = config.get(&key)?;
            result.add_message(CmdMessage::success(format!("{} set to {}", key, stored)));
        }
    }

    Ok(result.with_config(config.entries()))
}
