//! # Host Headless
//!
//! 无头宿主：在没有真实页面的环境里驱动 `parallax-runtime`。
//!
//! - [`page`]：内存页面模型（三个协作者 trait 的实现）
//! - [`events`]：事件速率门控（滚动节流、resize 尾沿防抖）

pub mod events;
pub mod page;

pub use events::{EventPump, RESIZE_DEBOUNCE, SCROLL_THROTTLE, Throttle, TrailingDebounce};
pub use page::{ScenarioError, SimElement, SimPage};
