// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scripted guest sessions.

use serde::{Deserialize, Serialize};
use tablehold::Command;
use tablehold_domain::{
    AddonUid, AreaChoice, CoversStep, DecimalTime, DomainError, ShiftUid, parse_date,
};

/// One guest action in a script file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    SetDate { date: String },
    SetCovers { covers: u32 },
    StepCovers { step: CoversStep },
    EnterCovers { text: String },
    SelectArea { area: AreaChoice },
    SelectTime { shift: ShiftUid, time: DecimalTime },
    ToggleSingleAddon { addon: AddonUid },
    IncrementAddon { addon: AddonUid },
    DecrementAddon { addon: AddonUid },
    ToggleMultiAddon { addon: AddonUid },
    /// Places the hold.
    Submit,
}

impl ScriptStep {
    /// The command this step dispatches; `None` for [`ScriptStep::Submit`].
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DateParseError`] for a malformed date.
    pub fn command(&self) -> Result<Option<Command>, DomainError> {
        let command: Command = match self {
            Self::SetDate { date } => Command::SetDate {
                date: parse_date(date)?,
            },
            Self::SetCovers { covers } => Command::SetCovers { covers: *covers },
            Self::StepCovers { step } => Command::StepCovers { step: *step },
            Self::EnterCovers { text } => Command::EnterCovers { text: text.clone() },
            Self::SelectArea { area } => Command::SelectArea {
                choice: area.clone(),
            },
            Self::SelectTime { shift, time } => Command::SelectTime {
                shift: shift.clone(),
                time: *time,
            },
            Self::ToggleSingleAddon { addon } => Command::ToggleSingleAddon {
                addon: addon.clone(),
            },
            Self::IncrementAddon { addon } => Command::IncrementAddon {
                addon: addon.clone(),
            },
            Self::DecrementAddon { addon } => Command::DecrementAddon {
                addon: addon.clone(),
            },
            Self::ToggleMultiAddon { addon } => Command::ToggleMultiAddon {
                addon: addon.clone(),
            },
            Self::Submit => return Ok(None),
        };
        Ok(Some(command))
    }
}

/// Decodes a script file: a JSON array of steps.
///
/// # Errors
///
/// Returns the decoder error for malformed input.
pub fn parse_script(body: &str) -> Result<Vec<ScriptStep>, serde_json::Error> {
    serde_json::from_str(body)
}
