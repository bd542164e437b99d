//! # Record 模块
//!
//! 单个元素的动画记录：解析完成的声明 + 推导出的 domain/缩放 +
//! 缓存的几何。
//!
//! ## 生命周期
//!
//! - 引擎 setup 时从页面扫描构建
//! - resize 时几何与 domain 整体重算，缩放重绑（range 保留）
//! - 引擎实例销毁时随记录集合一并丢弃，无独立析构

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attr::Attr;
use crate::domain::{self, Domain};
use crate::host::ElementId;
use crate::scale::LinearScale;
use crate::spread::Spread;
use crate::value::AttributeChange;

/// 缓存的元素几何
///
/// `top` 是页面绝对值，且在**未变换**的盒上测得（元素位置
/// 独立于其自身动画变换）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// 顶边到页面顶部的绝对距离
    pub top: f64,
    /// 元素高度
    pub height: f64,
    /// 元素宽度
    pub width: f64,
}

/// 单个属性的动画数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatedAttribute {
    /// from/to 变化描述
    pub change: AttributeChange,
    /// 触发区间
    pub spread: Spread,
    /// 滚动区间
    pub domain: Domain,
    /// 每分量一个缩放，共享 domain、独立 range
    pub scales: Vec<LinearScale>,
}

impl AnimatedAttribute {
    /// 由解析结果与几何构建
    pub fn build(
        attr: Attr,
        change: AttributeChange,
        spread: Spread,
        dimensions: &Dimensions,
        viewport_height: f64,
    ) -> Self {
        let domain = domain::build_domain(
            dimensions.top,
            dimensions.height,
            viewport_height,
            &spread,
            attr,
            &change,
        );

        let scales = (0..change.len())
            .map(|i| {
                LinearScale::new(domain, [change.from_number(i), change.to_number(i)])
            })
            .collect();

        Self {
            change,
            spread,
            domain,
            scales,
        }
    }

    /// 第 `i` 个分量在给定滚动位置的取值
    ///
    /// `scales` 的长度由构建路径保证等于属性分量数，但记录字段
    /// 公开可改，越界分量按 0 处理（与 [`AttributeChange`] 的
    /// 越界语义一致），不会 panic。
    pub fn component(&self, i: usize, scroll: f64) -> f64 {
        self.scales.get(i).map_or(0.0, |s| s.evaluate(scroll))
    }

    /// resize 重绑：按新几何重算 domain，缩放 range 保留
    pub fn rebind(&mut self, attr: Attr, dimensions: &Dimensions, viewport_height: f64) {
        self.domain = domain::build_domain(
            dimensions.top,
            dimensions.height,
            viewport_height,
            &self.spread,
            attr,
            &self.change,
        );
        for scale in &mut self.scales {
            scale.rebind_domain(self.domain);
        }
    }
}

/// 单个元素的完整动画记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    /// 元素句柄（非拥有）
    pub element: ElementId,
    /// 缓存的几何
    pub dimensions: Dimensions,
    /// 作者预设的 2D 变换矩阵
    /// `[scaleX, skewY, skewX, scaleY, translateX, translateY]`
    pub initial_matrix: [f64; 6],
    /// 变换类属性
    pub transforms: BTreeMap<Attr, AnimatedAttribute>,
    /// 样式类属性
    pub styles: BTreeMap<Attr, AnimatedAttribute>,
    /// 全属性 domain 包络（视野判定）
    pub max_domain: Domain,
}

impl ElementRecord {
    /// 创建空记录（无声明属性）
    pub fn new(element: ElementId, dimensions: Dimensions, initial_matrix: [f64; 6]) -> Self {
        Self {
            element,
            dimensions,
            initial_matrix,
            transforms: BTreeMap::new(),
            styles: BTreeMap::new(),
            max_domain: [0.0, 0.0],
        }
    }

    /// 按属性查找动画数据（变换类与样式类统一入口）
    pub fn attribute(&self, attr: Attr) -> Option<&AnimatedAttribute> {
        self.transforms.get(&attr).or_else(|| self.styles.get(&attr))
    }

    /// 声明的属性总数
    pub fn attribute_count(&self) -> usize {
        self.transforms.len() + self.styles.len()
    }

    /// 重算 domain 包络
    pub fn recompute_max_domain(&mut self) {
        self.max_domain = domain::max_domain(
            self.transforms
                .values()
                .chain(self.styles.values())
                .map(|a| &a.domain),
        );
    }

    /// 滚动位置是否落在包络（± 缓冲）内
    pub fn is_in_view(&self, scroll: f64, buffer: f64) -> bool {
        domain::in_view(self.max_domain, scroll, buffer)
    }
}
