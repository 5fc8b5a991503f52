//! 配置管理命令
//!
//! 默认配置文件位于 `~/.config/sumo/config.toml`（按平台的配置目录）。

use anyhow::{Context, Result};
use clap::Subcommand;
use std::fs;
use std::path::{Path, PathBuf};
use sumo_sdk::SumoConfig;

/// 默认配置文件路径
pub fn default_config_path() -> Result<PathBuf> {
    let mut path = dirs::config_dir().ok_or_else(|| anyhow::anyhow!("无法确定配置目录"))?;
    path.push("sumo");
    path.push("config.toml");
    Ok(path)
}

/// 加载配置
///
/// 指定了路径时文件必须存在；否则读取默认路径，文件不存在时使用默认配置。
pub fn load_config(explicit: Option<&Path>) -> Result<SumoConfig> {
    if let Some(path) = explicit {
        return SumoConfig::load(path).with_context(|| format!("加载配置失败: {}", path.display()));
    }

    let path = default_config_path()?;
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(SumoConfig::default());
    }
    SumoConfig::load(&path).with_context(|| format!("加载配置失败: {}", path.display()))
}

/// 写入默认配置
fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("配置文件已存在: {}（使用 --force 覆盖）", path.display());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("创建配置目录失败")?;
    }

    let text = SumoConfig::default().to_toml_string()?;
    fs::write(path, format!("# Sumo robot controller configuration\n\n{}", text))
        .context("写入配置文件失败")?;
    Ok(())
}

/// 配置命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// 显示生效的配置（TOML）
    Show {
        /// 配置文件路径（默认 ~/.config/sumo/config.toml）
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// 生成默认配置文件
    Init {
        /// 目标路径（默认 ~/.config/sumo/config.toml）
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// 覆盖已有文件
        #[arg(long)]
        force: bool,
    },

    /// 打印默认配置文件路径
    Path,
}

impl ConfigCommand {
    pub fn execute(self) -> Result<()> {
        match self {
            ConfigCommand::Show { config } => {
                let config = load_config(config.as_deref())?;
                print!("{}", config.to_toml_string()?);
                Ok(())
            },

            ConfigCommand::Init { path, force } => {
                let path = match path {
                    Some(path) => path,
                    None => default_config_path()?,
                };
                init_config(&path, force)?;
                println!("✅ 已写入默认配置: {}", path.display());
                Ok(())
            },

            ConfigCommand::Path => {
                println!("{}", default_config_path()?.display());
                Ok(())
            },
        }
    }
}
