//! # Scale 模块
//!
//! 带钳制的线性映射：滚动位置 → 属性值。
//!
//! ## 设计要点
//!
//! - 钳制与 domain 方向无关：domain 升序或降序都正确，输出
//!   永不超出 `[from, to]` 两端
//! - 零宽 domain（几何退化）退化为常量函数，取值为 range 终点，
//!   绝不除零
//! - resize 时只重绑 domain，range（配置的视觉端值）保持不变

use serde::{Deserialize, Serialize};

use crate::domain::Domain;

/// 带钳制的线性缩放
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    /// 输入区间（滚动位置），不保证升序
    domain: Domain,
    /// 输出区间 `[from, to]`
    range: [f64; 2],
}

impl LinearScale {
    /// 创建缩放
    pub fn new(domain: Domain, range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    /// 输入区间
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// 输出区间
    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// 重绑输入区间，保留输出区间
    pub fn rebind_domain(&mut self, domain: Domain) {
        self.domain = domain;
    }

    /// 求值
    ///
    /// 输入先钳制到 domain 区间内（与方向无关），再线性映射到 range。
    pub fn evaluate(&self, input: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;

        // 零宽 domain：常量函数，取 to 端
        if d0 == d1 {
            return r1;
        }

        let (lo, hi) = if d0 < d1 { (d0, d1) } else { (d1, d0) };
        let clamped = input.clamp(lo, hi);

        let t = (clamped - d0) / (d1 - d0);
        r0 + (r1 - r0) * t
    }
}
