use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Controller {
    Human,
    Computer,
}

/// Who occupies a seat. The engine itself never branches on the controller;
/// callers use it to decide whether to prompt a human or run the bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub controller: Controller,
}

impl Player {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            controller: Controller::Human,
        }
    }

    pub fn computer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            controller: Controller::Computer,
        }
    }

    pub fn is_computer(&self) -> bool {
        self.controller == Controller::Computer
    }
}
