//! 无头宿主入口：加载场景 JSON，沿一段滚动区间驱动引擎，
//! 打印每个元素在各滚动位置的合成输出。

use std::path::PathBuf;
use std::time::Instant;

use anyhow::bail;
use clap::Parser;
use tracing::{info, warn};

use host_headless::{EventPump, SCROLL_THROTTLE, SimPage};
use parallax_runtime::ParallaxEngine;

/// 视差引擎无头演示
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// 场景 JSON 文件
    scenario: PathBuf,

    /// 起始滚动位置
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// 结束滚动位置
    #[arg(long, default_value_t = 1000.0)]
    to: f64,

    /// 滚动步长
    #[arg(long, default_value_t = 100.0)]
    step: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let args = Args::parse();
    if args.step <= 0.0 {
        bail!("步长必须为正数");
    }

    let page = SimPage::load(&args.scenario)?;
    let ids = page.element_ids();
    info!(elements = ids.len(), "场景加载完成");

    let mut engine = ParallaxEngine::new(page);
    engine.init(&ids);
    for warning in engine.warnings() {
        warn!("{warning}");
    }
    info!(records = engine.records().len(), "引擎初始化完成");

    // 扫动模拟时钟：每步推进一个节流间隔，事件逐个放行
    let mut pump = EventPump::new();
    let mut now = Instant::now();

    let mut scroll = args.from;
    while scroll <= args.to {
        engine.host_mut().set_scroll(scroll);
        pump.scroll_event(&mut engine, now);
        pump.tick(&mut engine, now);

        println!("scroll = {scroll}");
        for &id in &ids {
            let el = engine.host().element(id);
            println!(
                "  {:<16} {:<48} {}",
                el.name, el.inline_transform, el.inline_style
            );
        }

        now += SCROLL_THROTTLE;
        scroll += args.step;
    }

    Ok(())
}
