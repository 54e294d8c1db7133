use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io::Stdout;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::PredictionApi;
use crate::app::commands::execute;
use crate::app::{handle_input, handle_mouse, App, Reply};
use crate::ui;

/// Spawns one task per queued command; each reports back on `replies`.
pub fn dispatch_commands<A: PredictionApi>(
    app: &mut App,
    api: &Arc<A>,
    replies: &UnboundedSender<Reply>,
) {
    for command in app.take_commands() {
        log::debug!("Dispatching {command:?}");
        let api = Arc::clone(api);
        let replies = replies.clone();
        tokio::spawn(async move {
            let reply = execute(api.as_ref(), command).await;
            if replies.send(reply).is_err() {
                log::debug!("Reply dropped, event loop has exited");
            }
        });
    }
}

/// Applies every reply that has arrived without waiting for more.
pub fn drain_replies(app: &mut App, replies: &mut UnboundedReceiver<Reply>) {
    while let Ok(reply) = replies.try_recv() {
        app.handle_reply(reply);
    }
}

/// Run the main application event loop
pub async fn run<A: PredictionApi>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    api: Arc<A>,
) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel();
    let mut frame_area = Rect::default();

    loop {
        dispatch_commands(app, &api, &reply_tx);
        drain_replies(app, &mut reply_rx);
        app.update();

        match terminal.draw(|f| ui::ui(app, f)) {
            Ok(completed) => frame_area = completed.area,
            Err(e) => return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}")),
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code).await;
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Mouse(mouse)) => handle_mouse(app, mouse, frame_area),
                Ok(Event::Resize(_, _)) => {
                    // Redrawn on the next pass
                }
                Ok(_) => {}
                Err(e) => log::warn!("Failed to read terminal event: {e}"),
            }
        }
    }

    log::info!("Event loop finished");
    Ok(())
}
