pub mod command;
pub mod render;

use std::fmt::Display;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::level_filters::LevelFilter;

use crate::{
    session::start_session,
    utils::{dir::create_application_default_path, logging::enable_logging},
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "Deskmate", version, long_about = None)]
#[command(about = "In-memory productivity dashboard for the terminal", long_about = None)]
struct Args {
    #[arg(long, help = "Enable logging")]
    log: bool,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used by the date command. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(&create_application_default_path()?, logging_level, args.log)?;

    start_session(args.date_style.into()).await
}
