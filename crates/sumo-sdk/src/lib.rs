//! Sumo SDK - 相扑机器人控制器
//!
//! # 架构设计
//!
//! 从底层到高层：
//!
//! - **协议层** (`protocol`): 状态、信号位域、传感器分类、驱动指令等纯数据类型
//! - **硬件抽象层** (`hal`): 传感器 / 执行器接口与 Mock 后端
//! - **控制层** (`control`): 边线守卫、对手搜索、冲撞与状态机
//! - **驱动层** (`driver`): 控制线程、状态发布、命令与配置
//!
//! # 快速开始
//!
//! ```rust,ignore
//! use sumo_sdk::prelude::*;
//!
//! sumo_sdk::init_logger();
//! let robot = SumoBuilder::new().build::<_, _, 6>(sensors, actuators)?;
//! robot.request_start();
//! println!("{}", robot.status());
//! ```

pub use sumo_control as control;
pub use sumo_driver as driver;
pub use sumo_hal as hal;
pub use sumo_protocol as protocol;

pub mod prelude;

mod logging;

pub use logging::{init_logger, init_logger_with_filter};

// 常用类型
pub use sumo_driver::{
    ConfigError, DriverError, HELP_TEXT, MetricsSnapshot, RemoteLink, SumoBuilder, SumoCommand,
    SumoConfig, SumoHandle, SumoRobot, SumoStatus, spawn_remote_link,
};
pub use sumo_hal::{ActuatorAdapter, SensorAdapter};
pub use sumo_protocol::{
    DEFAULT_LINE_SENSOR_COUNT, DriveCommand, DriveMode, LineClass, OpponentPosition, ParseError,
    RobotState, Strategy, SweepDirection,
};
