//! Site Interactions Entry Point

use std::sync::OnceLock;
use zoon::*;

/// Stores the main task handle; the task owns the app, so dropping it would
/// tear down every controller.
static MAIN_TASK: OnceLock<TaskHandle> = OnceLock::new();

mod accordion;
mod app;
mod carousel;
mod config;
mod counters;
mod dataflow;
mod debug_utils;
mod dom;
mod engine;
mod guard;
mod hero;
mod hover;
mod menu;
mod portfolio;
mod reveal;
mod scroll_top;
mod services_scroll;
mod smooth_scroll;

pub fn main() {
    let handle = Task::start_droppable(async {
        let app = match app::SiteApp::new() {
            Ok(app) => app,
            Err(error) => {
                error.report("site");
                return;
            }
        };
        zoon::println!("APP: started");
        futures::future::pending::<()>().await;
        drop(app);
    });
    let _ = MAIN_TASK.set(handle);
}
