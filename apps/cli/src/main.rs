//! # Sumo CLI
//!
//! 相扑机器人控制器的命令行工具：在 Mock 硬件上运行完整控制线程，
//! 通过交互式 Shell 下发比赛命令并注入模拟传感器读数。
//!
//! ```bash
//! # 生成默认配置
//! sumo-cli config init
//!
//! # 启动模拟机器人
//! $ sumo-cli run --bias right
//! sumo> sumo start
//! sumo> sim opponent left
//! sumo> sim line right
//! sumo> status
//! sumo> exit
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod modes;
mod sim;

use commands::{ConfigCommand, RunCommand};

/// Sumo CLI - 相扑机器人命令行工具
#[derive(Parser, Debug)]
#[command(name = "sumo-cli")]
#[command(about = "Command-line simulator and console for the sumo robot controller", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 在模拟硬件上运行控制器（交互式 Shell）
    Run {
        #[command(flatten)]
        args: RunCommand,
    },

    /// 配置管理
    #[command(subcommand)]
    Config(ConfigCommand),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("sumo_cli=info".parse()?)
                .add_directive("sumo_driver=info".parse()?),
        )
        .with_thread_names(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { args } => args.execute(),
        Commands::Config(cmd) => cmd.execute(),
    }
}
