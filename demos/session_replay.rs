//! Replay a scripted conference session and print each published snapshot
//!
//! Run with: cargo run --example session_replay [EVENTS_FILE] [CONFIG_FILE]
//!
//! Examples:
//!   cargo run --example session_replay                         # built-in script
//!   cargo run --example session_replay events.jsonl            # one JSON event per line
//!   cargo run --example session_replay events.jsonl layout.toml
//!
//! Event lines use the tagged form, for example:
//!   {"type":"stream_available","id":"cam-1","client_id":"alice","name":"Alice","origin":"remote","source":"media"}
//!   {"type":"voice_activity","id":"cam-1","level":0.6,"timestamp":1200}
//!   {"type":"layout_mode_change","mode":"speaker"}

use conference_layout::{
    LayoutMode, Origin, SessionConfig, SessionController, SessionEvent, SessionSnapshot,
    SharedMetadata, StreamDescriptor, StreamId, Viewport,
};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;

fn builtin_script() -> Vec<SessionEvent> {
    let mut events: Vec<SessionEvent> = ["alice", "bob", "carol", "dave", "erin"]
        .iter()
        .map(|name| {
            SessionEvent::StreamAvailable(StreamDescriptor::media(
                format!("cam-{name}"),
                *name,
                *name,
                Origin::Remote,
            ))
        })
        .collect();

    events.push(SessionEvent::StreamAvailable(StreamDescriptor::media(
        "cam-me",
        "me",
        "Me",
        Origin::Local,
    )));
    events.push(SessionEvent::VoiceActivity {
        id: StreamId::new("cam-dave"),
        level: 0.7,
        timestamp: 1_000,
    });
    events.push(SessionEvent::LayoutModeChange {
        mode: LayoutMode::Speaker,
    });
    events.push(SessionEvent::StreamAvailable(StreamDescriptor::screen(
        "share-bob",
        "bob",
        "Bob's screen",
        Origin::Remote,
    )));
    events.push(SessionEvent::MetadataChanged(
        SharedMetadata::new().with_pinned("cam-erin").with_muted("cam-carol"),
    ));
    events.push(SessionEvent::ViewportResize {
        width: 1024,
        height: 1366,
    });
    events.push(SessionEvent::StreamRemoved {
        id: StreamId::new("share-bob"),
    });
    events.push(SessionEvent::SetFullscreen {
        id: StreamId::new("cam-carol"),
        active: true,
    });
    events.push(SessionEvent::FullscreenExited);
    events
}

fn load_script(path: &str) -> Result<Vec<SessionEvent>, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    let mut events = Vec::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        events.push(serde_json::from_str(line)?);
    }
    Ok(events)
}

fn print_snapshot(snapshot: &SessionSnapshot) {
    let order: Vec<&str> = snapshot.streams.iter().map(|s| s.id.as_str()).collect();
    let speakers: Vec<&str> = snapshot.active_speakers.iter().map(StreamId::as_str).collect();

    println!(
        "#{:<3} mode={} (selected {}) page {}/{}",
        snapshot.revision, snapshot.mode, snapshot.selected_mode, snapshot.page, snapshot.page_count
    );
    println!("     order:    {}", order.join(", "));
    println!("     speakers: {}", speakers.join(", "));

    if let Some(plan) = &snapshot.layout {
        println!(
            "     layout:   {:?} visible={} hidden={} overflow={}",
            plan.container, plan.visible, plan.hidden, plan.overflow_tile
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("conference_layout=debug".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let script = match args.get(1) {
        Some(path) => load_script(path)?,
        None => builtin_script(),
    };
    let config = match args.get(2) {
        Some(path) => SessionConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => SessionConfig::default(),
    };

    let mut controller = SessionController::new(config, Viewport::new(1440, 900))?;
    let mut snapshots = controller.subscribe();
    let (tx, rx) = mpsc::channel(64);

    let printer = tokio::spawn(async move {
        loop {
            match snapshots.recv().await {
                Ok(snapshot) => print_snapshot(&snapshot),
                Err(RecvError::Lagged(skipped)) => println!("     ({skipped} snapshots skipped)"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let session = tokio::spawn(async move {
        controller.run(rx).await;
    });

    for event in script {
        tx.send(event).await?;
    }
    drop(tx);

    // Dropping the controller closes the snapshot channel and ends the printer.
    session.await?;
    printer.await?;
    Ok(())
}
