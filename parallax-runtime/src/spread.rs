//! # Spread 模块
//!
//! 视口相对触发点：动画相对于视口从何处开始、到何处结束。
//!
//! 一个触发点由 **锚点 + 比例** 组成：
//!
//! - 锚点：元素的哪个部位（top / center / bottom）参与测量
//! - 比例：视口内的位置，0 = 视口顶部，1 = 视口底部，
//!   超出 \[0, 1\] 表示进入前 / 离开后的屏外偏移

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 锚点：元素上参与触发测量的部位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    /// 元素顶边
    Top,
    /// 元素中线
    Center,
    /// 元素底边
    Bottom,
}

impl Anchor {
    /// 按关键字解析
    ///
    /// # 错误
    ///
    /// 未知关键字返回 [`ConfigError::UnknownAnchor`]。
    pub fn parse(keyword: &str) -> Result<Self, ConfigError> {
        match keyword.trim() {
            "top" => Ok(Anchor::Top),
            "center" => Ok(Anchor::Center),
            "bottom" => Ok(Anchor::Bottom),
            other => Err(ConfigError::UnknownAnchor {
                anchor: other.to_string(),
            }),
        }
    }

    /// 锚点相对元素顶边的偏移量
    pub fn offset(&self, element_height: f64) -> f64 {
        match self {
            Anchor::Top => 0.0,
            Anchor::Center => element_height / 2.0,
            Anchor::Bottom => element_height,
        }
    }
}

/// 单个触发点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadPoint {
    /// 元素锚点
    pub anchor: Anchor,
    /// 视口比例
    pub fraction: f64,
}

impl SpreadPoint {
    /// 创建触发点
    pub fn new(anchor: Anchor, fraction: f64) -> Self {
        Self { anchor, fraction }
    }
}

/// 触发点对
///
/// 不变量：构造后恒按比例**降序**排列，向下滚动时 `start`
/// 总是先于 `finish` 到达。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    /// 动画开始触发点
    pub start: SpreadPoint,
    /// 动画结束触发点
    pub finish: SpreadPoint,
}

impl Spread {
    /// 由两个触发点构造，自动按比例降序排序
    pub fn ordered(a: SpreadPoint, b: SpreadPoint) -> Self {
        if a.fraction >= b.fraction {
            Self {
                start: a,
                finish: b,
            }
        } else {
            Self {
                start: b,
                finish: a,
            }
        }
    }
}

impl Default for Spread {
    /// 默认触发区间：元素顶边进入视口底部开始，底边到达视口顶部结束
    fn default() -> Self {
        Self {
            start: SpreadPoint::new(Anchor::Top, 1.0),
            finish: SpreadPoint::new(Anchor::Bottom, 0.0),
        }
    }
}
