//! # Value 模块
//!
//! 带单位标注的数值与 from/to 变化描述。
//!
//! ## 设计原则
//!
//! 百分比值在解析后**保留单位标注**，贯穿缩放计算直到样式输出：
//! `50%` 必须最终渲染为 `N%` 而非 `Npx`，平移分量还需要按元素
//! 宽高换算。若在解析时塌缩成裸数字，这些信息就丢失了。

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 数值单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValueUnit {
    /// 像素（或无量纲，如 opacity / scale）
    #[default]
    Px,
    /// 百分比
    Percent,
}

/// 带单位标注的数值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttrValue {
    /// 数值部分
    pub number: f64,
    /// 单位标注
    pub unit: ValueUnit,
}

impl AttrValue {
    /// 创建像素值
    pub fn px(number: f64) -> Self {
        Self {
            number,
            unit: ValueUnit::Px,
        }
    }

    /// 创建百分比值
    pub fn percent(number: f64) -> Self {
        Self {
            number,
            unit: ValueUnit::Percent,
        }
    }

    /// 解析单个声明 token
    ///
    /// 接受裸数字（`100`、`-3.5`）、像素后缀（`100px`）和百分比（`50%`）。
    ///
    /// # 错误
    ///
    /// 数值部分无法解析时返回 [`ConfigError::InvalidNumber`]。
    pub fn parse(token: &str) -> Result<Self, ConfigError> {
        let token = token.trim();

        let (literal, unit) = if let Some(stripped) = token.strip_suffix('%') {
            (stripped, ValueUnit::Percent)
        } else if let Some(stripped) = token.strip_suffix("px") {
            (stripped, ValueUnit::Px)
        } else {
            (token, ValueUnit::Px)
        };

        let number: f64 = literal
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber {
                token: token.to_string(),
            })?;

        Ok(Self { number, unit })
    }

    /// 数值缩放，保留单位
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            number: self.number * factor,
            unit: self.unit,
        }
    }
}

/// from/to 变化描述
///
/// 一个属性从 `from` 到 `to` 的有序分量序列。
/// 不变量：`from.len() == to.len()`，且长度等于属性声明的分量数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeChange {
    /// 起始分量
    pub from: Vec<AttrValue>,
    /// 结束分量
    pub to: Vec<AttrValue>,
}

impl AttributeChange {
    /// 创建变化描述
    pub fn new(from: Vec<AttrValue>, to: Vec<AttrValue>) -> Self {
        debug_assert_eq!(from.len(), to.len());
        Self { from, to }
    }

    /// 分量数
    pub fn len(&self) -> usize {
        self.from.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.from.is_empty()
    }

    /// 第 `i` 个分量的显示单位
    ///
    /// 以 `from` 侧的字面单位为准（`from` 为 `50%` 时整个分量按百分比渲染）。
    pub fn unit(&self, i: usize) -> ValueUnit {
        self.from.get(i).map(|v| v.unit).unwrap_or_default()
    }

    /// 第 `i` 个 from 分量的数值（越界取 0）
    pub fn from_number(&self, i: usize) -> f64 {
        self.from.get(i).map(|v| v.number).unwrap_or(0.0)
    }

    /// 第 `i` 个 to 分量的数值（越界取 0）
    pub fn to_number(&self, i: usize) -> f64 {
        self.to.get(i).map(|v| v.number).unwrap_or(0.0)
    }
}
