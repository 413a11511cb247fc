//! Command-line interface

use std::path::PathBuf;

use aircanvas::domain::Tool;
use clap::{Parser, Subcommand, ValueEnum};

/// Air Canvas - replay hand-landmark recordings into drawings
#[derive(Parser, Debug)]
#[command(name = "aircanvas")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw a recorded landmark stream and save the result as PNG
    Replay {
        /// Recording in JSON Lines format
        file: PathBuf,

        /// Output PNG (defaults to the download folder)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also store the drawing in the gallery
        #[arg(long)]
        save_to_gallery: bool,

        /// Canvas width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Canvas height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Initial tool
        #[arg(long, value_enum)]
        tool: Option<ToolArg>,

        /// Initial color as #rrggbb (must be a palette color)
        #[arg(long)]
        color: Option<String>,

        /// Initial brush width (2-20)
        #[arg(long)]
        brush_width: Option<u32>,
    },

    /// Print the gesture recognized in each frame of a recording
    Classify {
        /// Recording in JSON Lines format
        file: PathBuf,
    },

    /// Manage saved drawings
    Gallery {
        #[command(subcommand)]
        action: GalleryAction,
    },

    /// View or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum GalleryAction {
    /// List saved drawings, newest first
    List,

    /// Delete a saved drawing
    Delete {
        /// Drawing id
        id: String,
    },

    /// Copy a saved drawing out of the gallery
    Export {
        /// Drawing id
        id: String,

        /// Destination file (defaults to the download folder)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the current configuration to the config file
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolArg {
    Brush,
    Eraser,
}

impl From<ToolArg> for Tool {
    fn from(arg: ToolArg) -> Self {
        match arg {
            ToolArg::Brush => Tool::Brush,
            ToolArg::Eraser => Tool::Eraser,
        }
    }
}
