//! Command-line argument types.

use std::path::PathBuf;

use blinds_core::{ButtonKind, PressMode};
use clap::{Parser, Subcommand, ValueEnum};

/// Time-based venetian blind controller.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the TOML configuration (defaults apply when omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to the persisted-state TOML file
    #[arg(long, default_value = "blinds_state.toml")]
    pub state_file: PathBuf,

    /// Emit a JSON summary line on completion
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Drive to an absolute position and/or tilt, then settle
    Move {
        /// Target position fraction in [0, 1]; 0 = fully open
        #[arg(long)]
        position: Option<f32>,
        /// Target tilt fraction in [0, 1]; 0 = flat
        #[arg(long)]
        tilt: Option<f32>,
    },
    /// Stop the motor and publish the current estimate
    Stop,
    /// Feed one button gesture and settle
    Button {
        #[arg(long, value_enum)]
        kind: ButtonKindArg,
        #[arg(long, value_enum)]
        press: PressModeArg,
    },
    /// Re-anchor the estimate against a mechanical extreme
    Calibrate,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ButtonKindArg {
    Up,
    Down,
}

impl From<ButtonKindArg> for ButtonKind {
    fn from(arg: ButtonKindArg) -> Self {
        match arg {
            ButtonKindArg::Up => Self::Up,
            ButtonKindArg::Down => Self::Down,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum PressModeArg {
    Single,
    Double,
    Hold,
    Release,
}

impl From<PressModeArg> for PressMode {
    fn from(arg: PressModeArg) -> Self {
        match arg {
            PressModeArg::Single => Self::Single,
            PressModeArg::Double => Self::Double,
            PressModeArg::Hold => Self::Hold,
            PressModeArg::Release => Self::Release,
        }
    }
}
