//! run 命令
//!
//! 在 Mock 硬件上启动控制线程并进入交互式 Shell。

use crate::commands::config::load_config;
use crate::modes::repl::run_repl;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use sumo_sdk::hal::mock::MockHardware;
use sumo_sdk::{DEFAULT_LINE_SENSOR_COUNT, Strategy, SumoBuilder, SumoConfig, SweepDirection};

/// 模拟运行参数
#[derive(Args, Debug, Default)]
pub struct RunCommand {
    /// 配置文件路径（默认 ~/.config/sumo/config.toml）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 关闭边线处理
    #[arg(long)]
    pub no_line: bool,

    /// 初始扫描方向（left | right | center）
    #[arg(long)]
    pub bias: Option<SweepDirection>,

    /// 比赛策略（attack | brick）
    #[arg(long)]
    pub strategy: Option<Strategy>,

    /// 开赛倒计时蜂鸣次数
    #[arg(long)]
    pub countdown: Option<u8>,

    /// 启动后立即开赛
    #[arg(long)]
    pub start: bool,
}

impl RunCommand {
    /// 命令行参数覆盖配置文件
    fn apply(&self, mut config: SumoConfig) -> SumoConfig {
        if self.no_line {
            config.line.enabled = false;
        }
        if let Some(bias) = self.bias {
            config.search.bias = bias;
        }
        if let Some(strategy) = self.strategy {
            config.control.strategy = strategy;
        }
        if let Some(beeps) = self.countdown {
            config.countdown.beeps = beeps;
        }
        config
    }

    pub fn execute(&self) -> Result<()> {
        let config = self.apply(load_config(self.config.as_deref())?);

        let hw = MockHardware::<DEFAULT_LINE_SENSOR_COUNT>::new();
        let robot = SumoBuilder::new()
            .config(config)
            .build::<_, _, DEFAULT_LINE_SENSOR_COUNT>(hw.sensors(), hw.actuators())
            .context("启动控制线程失败")?;

        // REPL 之外（例如输出阻塞时）的 Ctrl+C 同样停车
        let handle = robot.handle();
        ctrlc::set_handler(move || {
            eprintln!("\n🛑 收到 Ctrl+C，停车");
            handle.request_stop();
        })
        .context("安装 Ctrl+C 处理器失败")?;

        if self.start {
            robot.request_start();
        }

        run_repl(&robot.handle(), &hw)?;

        robot.shutdown()?;
        Ok(())
    }
}
