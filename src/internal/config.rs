//! 应用配置：默认值 + 环境变量覆盖，并转换成关卡、编排器、下载引擎各自的配置。

pub mod structs;
