//! 命令行入口定义

use clap::Parser;

#[derive(Parser)]
#[command(name = "tick")]
#[command(version)]
#[command(about = "A tiny to-do list for the terminal")]
pub struct Cli {}
