//! Prelude - 常用类型的便捷导入
//!
//! ```rust
//! use sumo_sdk::prelude::*;
//! ```

pub use sumo_driver::{SumoBuilder, SumoCommand, SumoConfig, SumoHandle, SumoRobot, SumoStatus};
pub use sumo_hal::{ActuatorAdapter, SensorAdapter};
pub use sumo_protocol::{
    DriveMode, Lamp, LineClass, OpponentPosition, RobotState, Side, Strategy, SweepDirection,
};

// 错误类型
pub use sumo_driver::{ConfigError, DriverError};
pub use sumo_protocol::ParseError;
