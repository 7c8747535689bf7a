use resilient_sse::{LifecycleObserver, SseClient, SseClientOptions};

/// Stream an SSE endpoint and print events until interrupted.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let url = std::env::args().nth(1).unwrap_or_else(|| {
        "http://localhost:3000/api/completion/stream?threadId=demo".to_string()
    });

    println!("streaming from {}", url);

    let client = SseClient::new(&url, SseClientOptions::default())?
        .on_open(|| println!("connected"))
        .on_event(|msg| println!("[{}] {}", msg.event, msg.data))
        .on_error(|err| eprintln!("stream error: {}", err))
        .on_close(|| println!("stream closed"))
        .build();

    client.connect().await?;

    tokio::signal::ctrl_c().await?;

    // Shut down the way a page unload would: close, then release the
    // server-side session best-effort.
    let observer = LifecycleObserver::new(client.clone());
    observer.page_unload().await;

    Ok(())
}
