//! REPL 模式（交互式 Shell）
//!
//! 专用输入线程持有 rustyline `Editor`（保留历史记录），输入经 crossbeam 通道交给
//! 主线程分发。控制线程独立运行，不受输入阻塞影响。

use crate::sim::{SIM_HELP, SimCommand};
use anyhow::Result;
use crossbeam_channel::{Receiver, bounded};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use std::thread;
use sumo_sdk::driver::MetricsSnapshot;
use sumo_sdk::hal::mock::MockHardware;
use sumo_sdk::{HELP_TEXT, SumoHandle};

const PROMPT: &str = "sumo> ";

/// 输入线程发给主线程的事件
#[derive(Debug, Clone, PartialEq, Eq)]
enum InputEvent {
    Line(String),
    /// Ctrl+C
    Interrupt,
    /// Ctrl+D 或输入线程出错
    Eof,
}

/// 单行命令的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplAction {
    Reply(String),
    Error(String),
    Exit,
    Nothing,
}

fn history_path() -> Option<PathBuf> {
    let mut path = dirs::data_local_dir()?;
    path.push("sumo");
    path.push("history.txt");
    Some(path)
}

/// REPL 输入（专用输入线程）
pub struct ReplInput {
    event_rx: Receiver<InputEvent>,
    _input_thread: thread::JoinHandle<()>,
}

impl ReplInput {
    /// 创建输入线程（Editor 的生命周期 = REPL 会话）
    pub fn new() -> Result<Self> {
        let (event_tx, event_rx) = bounded::<InputEvent>(10);

        let input_thread = thread::Builder::new()
            .name("sumo-repl-input".to_string())
            .spawn(move || {
                // Editor 在输入线程内创建
                let mut editor = match DefaultEditor::new() {
                    Ok(editor) => editor,
                    Err(err) => {
                        eprintln!("Failed to initialize readline: {}", err);
                        let _ = event_tx.send(InputEvent::Eof);
                        return;
                    },
                };

                let history = history_path();
                if let Some(path) = &history {
                    editor.load_history(path).ok(); // 首次运行没有历史
                }

                loop {
                    let event = match editor.readline(PROMPT) {
                        Ok(line) => {
                            let line = line.trim().to_string();
                            if line.is_empty() {
                                continue;
                            }
                            let _ = editor.add_history_entry(line.as_str());
                            InputEvent::Line(line)
                        },
                        Err(ReadlineError::Interrupted) => InputEvent::Interrupt,
                        Err(ReadlineError::Eof) => InputEvent::Eof,
                        Err(err) => {
                            eprintln!("Error: {:?}", err);
                            InputEvent::Eof
                        },
                    };

                    let done = matches!(&event, InputEvent::Eof)
                        || matches!(&event, InputEvent::Line(l) if is_exit(&l.to_ascii_lowercase()));
                    if event_tx.send(event).is_err() || done {
                        break;
                    }
                }

                if let Some(path) = &history {
                    if let Some(dir) = path.parent() {
                        let _ = std::fs::create_dir_all(dir);
                    }
                    editor.save_history(path).ok();
                }
            })?;

        Ok(Self {
            event_rx,
            _input_thread: input_thread,
        })
    }

    /// 阻塞等待输入
    fn recv(&self) -> InputEvent {
        self.event_rx.recv().unwrap_or(InputEvent::Eof)
    }
}

fn is_exit(line: &str) -> bool {
    matches!(line, "exit" | "quit")
}

fn format_metrics(metrics: &MetricsSnapshot) -> String {
    format!(
        "ticks: {}\noverruns: {} ({:.2}%)\nescapes started: {}\nstart requests: {}\n\
         stop requests: {}\ncoalesced signals: {}\ninconsistent states: {}",
        metrics.ticks,
        metrics.overruns,
        metrics.overrun_rate(),
        metrics.escapes,
        metrics.start_requests,
        metrics.stop_requests,
        metrics.coalesced_signals,
        metrics.inconsistent_states,
    )
}

fn help_text() -> String {
    format!(
        "{}\n{}\nshell\n  metrics                       ; Show control loop counters\n  \
         exit|quit                     ; Stop the robot and leave\n\n\
         Ctrl+C stops the robot, Ctrl+D leaves.",
        HELP_TEXT, SIM_HELP
    )
}

/// 处理一行输入
pub fn handle_line<const N: usize>(
    line: &str,
    handle: &SumoHandle,
    hw: &MockHardware<N>,
) -> ReplAction {
    let line = line.trim();
    if line.is_empty() {
        return ReplAction::Nothing;
    }

    let lowered = line.to_ascii_lowercase();
    let first = lowered.split_whitespace().next().unwrap_or_default();

    match first {
        _ if is_exit(&lowered) => ReplAction::Exit,
        "help" | "?" if lowered.split_whitespace().count() == 1 => ReplAction::Reply(help_text()),
        "metrics" => ReplAction::Reply(format_metrics(&handle.metrics())),
        "sim" => match lowered.parse::<SimCommand>() {
            Ok(command) => ReplAction::Reply(command.apply(hw)),
            Err(err) => ReplAction::Error(err.to_string()),
        },
        _ => match handle.execute_line(line) {
            Ok(reply) => ReplAction::Reply(reply),
            Err(err) => ReplAction::Error(err.to_string()),
        },
    }
}

/// 运行 REPL 模式
///
/// 退出时请求停车；控制线程由调用方关闭。
pub fn run_repl<const N: usize>(handle: &SumoHandle, hw: &MockHardware<N>) -> Result<()> {
    let input = ReplInput::new()?;

    println!("Sumo CLI v{} - 模拟机器人 Shell", env!("CARGO_PKG_VERSION"));
    println!("输入 'help' 查看帮助，'exit' 退出");
    println!();

    loop {
        match input.recv() {
            InputEvent::Line(line) => match handle_line(&line, handle, hw) {
                ReplAction::Reply(reply) => println!("{}", reply),
                ReplAction::Error(err) => {
                    eprintln!("❌ Error: {}", err);
                    eprintln!("💡 提示: 输入 'help' 查看所有命令");
                },
                ReplAction::Exit => break,
                ReplAction::Nothing => {},
            },
            InputEvent::Interrupt => {
                eprintln!("^C 🛑 停车");
                handle.request_stop();
            },
            InputEvent::Eof => break,
        }
    }

    handle.request_stop();
    println!("👋 再见！");
    Ok(())
}
