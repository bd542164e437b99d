//! # Events 模块
//!
//! 事件速率门控：滚动节流与 resize 尾沿防抖。
//! 宿主的原始事件流经 [`EventPump`] 过滤后才转发给引擎。
//!
//! resize 触发同步几何重量（强制布局读取），不能每个事件刻度
//! 都执行；滚动合成较轻但同样无需逐刻度运行。这是**资源策略
//! 而非正确性策略**：合成是幂等的，漏掉的中间刻度会在下一次
//! 放行的事件里被最新滚动值覆盖。
//!
//! 门控不读真实时钟，时刻由调用方传入，测试完全确定。

use std::time::{Duration, Instant};

use parallax_runtime::{DeclarationSource, ParallaxEngine, StyleSink, ViewportSource};

/// 滚动节流间隔
pub const SCROLL_THROTTLE: Duration = Duration::from_millis(50);

/// resize 防抖延迟
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);

/// 节流门控：两次放行之间至少间隔 `interval`
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    /// 创建节流门控
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// 事件到达：间隔已满返回 `true` 并记账，否则丢弃
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

/// 尾沿防抖门控：事件风暴平息 `delay` 之后才触发一次
#[derive(Debug, Clone)]
pub struct TrailingDebounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl TrailingDebounce {
    /// 创建防抖门控
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// 事件到达：推迟触发时刻
    pub fn bump(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// 轮询：触发时刻已过返回 `true` 并复位
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// 是否有挂起的触发
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// 事件泵：原始事件 → 速率门控 → 引擎
///
/// 滚动事件经节流直接转发；resize 事件只推迟防抖触发时刻，
/// 实际的 `on_resize` 在 [`EventPump::tick`] 轮询到风暴平息后执行。
#[derive(Debug, Clone)]
pub struct EventPump {
    scroll_gate: Throttle,
    resize_gate: TrailingDebounce,
}

impl EventPump {
    /// 创建事件泵（默认间隔）
    pub fn new() -> Self {
        Self {
            scroll_gate: Throttle::new(SCROLL_THROTTLE),
            resize_gate: TrailingDebounce::new(RESIZE_DEBOUNCE),
        }
    }

    /// 滚动事件到达：节流放行时转发给引擎
    ///
    /// # 返回
    ///
    /// 事件是否被放行。被丢弃的事件无需补偿：下一次放行的事件
    /// 从宿主读到的是最新滚动值。
    pub fn scroll_event<H>(&mut self, engine: &mut ParallaxEngine<H>, now: Instant) -> bool
    where
        H: ViewportSource + StyleSink + DeclarationSource,
    {
        if self.scroll_gate.ready(now) {
            engine.on_scroll();
            true
        } else {
            false
        }
    }

    /// resize 事件到达：推迟防抖触发时刻
    pub fn resize_event(&mut self, now: Instant) {
        self.resize_gate.bump(now);
    }

    /// 轮询：resize 风暴已平息时执行一次 `on_resize`
    pub fn tick<H>(&mut self, engine: &mut ParallaxEngine<H>, now: Instant) -> bool
    where
        H: ViewportSource + StyleSink + DeclarationSource,
    {
        if self.resize_gate.fire(now) {
            engine.on_resize();
            true
        } else {
            false
        }
    }
}

impl Default for EventPump {
    fn default() -> Self {
        Self::new()
    }
}
