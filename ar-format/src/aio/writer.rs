use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, ReadBuf};

use crate::file::writer::ArchiveWriter;

/// Polling an empty writer that has not been finalized parks the task until the next
/// `add` or `finalize`.
impl AsyncRead for ArchiveWriter {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        let this = self.get_mut();

        if this.has_queued() {
            let n = this.read_queued(buf.initialize_unfilled());
            buf.advance(n);
            return Poll::Ready(Ok(()));
        }

        if this.is_finalized() {
            tracing::trace!("archive stream finished");
            return Poll::Ready(Ok(()));
        }

        this.waker = Some(cx.waker().clone());
        Poll::Pending
    }
}
