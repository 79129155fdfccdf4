mod app;
mod cli;
mod error;
mod event;
mod storage;
mod tasks;
mod theme;
mod ui;

use std::io;
use std::panic;

use clap::Parser;
use ratatui::DefaultTerminal;

use app::App;
use cli::Cli;

/// 日志文件名（位于 ~/.tick/ 下）
const LOG_FILE: &str = "tick.log";

/// 初始化文件日志（TUI 占用终端，stderr 不可见）
///
/// 日志只是辅助，任何一步失败都直接放弃，不影响启动。
fn init_logging() {
    let dir = storage::tick_dir();
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }

    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
    else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .try_init();
}

/// 启动 TUI 界面
fn run_tui() -> io::Result<()> {
    // 初始化终端
    let mut terminal = ratatui::init();

    // 创建应用
    let mut app = App::new();

    // 运行主循环
    let result = run(&mut terminal, &mut app);

    // 恢复终端
    ratatui::restore();

    result
}

fn main() -> io::Result<()> {
    // Set up panic hook to restore terminal state on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    // 解析命令行参数（目前只有 --help / --version）
    let _cli = Cli::parse();

    init_logging();
    tracing::info!("tick v{} starting", env!("CARGO_PKG_VERSION"));

    run_tui()
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> io::Result<()> {
    loop {
        // 渲染界面
        terminal.draw(|frame| ui::home::render(frame, app))?;

        // 处理事件
        if !event::handle_events(app)? {
            break;
        }
    }

    Ok(())
}
