use tokio::select;
use tokio_util::sync::CancellationToken;

/// Turns ctrl-c into cancellation. Resolves as soon as the token is
/// cancelled from anywhere else (quit command, stdin EOF), so the session
/// join never hangs on this branch.
pub async fn detect_shutdown(cancellation: CancellationToken) {
    select! {
        _ = tokio::signal::ctrl_c() => {
            cancellation.cancel();
        },
        _ = cancellation.cancelled() => (),
    };
}
