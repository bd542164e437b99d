//! # Error 模块
//!
//! 定义 parallax-runtime 中使用的错误类型。
//!
//! ## 错误策略
//!
//! - 声明格式错误是**调用方的配置错误**：在解析阶段立即失败，
//!   绝不静默回退为默认值。出错元素被排除，其余元素继续动画。
//! - 退化几何（高度为 0 的元素）**不是错误**：domain 收缩为一个点，
//!   缩放退化为常量函数，引擎照常运行。

use thiserror::Error;

/// 配置错误
///
/// 声明字符串解析阶段产生的致命错误。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 声明缺少 `value=` 键
    #[error("属性 '{attr}' 的声明缺少 'value=' 键")]
    MissingValue { attr: String },

    /// 多分量写法缺少 `from=` 或 `to=`
    #[error("属性 '{attr}' 的声明缺少 '{key}=' 段")]
    MissingChangeKey { attr: String, key: &'static str },

    /// 未知的锚点关键字
    #[error("未知的锚点 '{anchor}'（可用：top / center / bottom）")]
    UnknownAnchor { anchor: String },

    /// spread 段格式无效
    #[error("spread 格式无效：期望 '锚点,比例,锚点,比例'，实际 '{raw}'")]
    MalformedSpread { raw: String },

    /// 数值 token 无法解析
    #[error("无法解析数值 '{token}'")]
    InvalidNumber { token: String },

    /// 分量数与属性声明的分量数不符
    #[error("属性 '{attr}' 期望 {expected} 个分量，实际 {got} 个")]
    ComponentCount {
        attr: String,
        expected: usize,
        got: usize,
    },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
