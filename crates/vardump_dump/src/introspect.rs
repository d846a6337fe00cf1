//! Handle introspection.
//!
//! Reads only the metadata a [`Handle`] already tracks; never reads from,
//! writes to, or seeks the underlying resource. A closed handle yields
//! [`HandleSnapshot::Closed`] instead of an error.

use std::rc::Rc;

use vardump_foundation::{Handle, HandleKind};

use crate::snapshot::{HandleMeta, HandleSnapshot};

/// Transport and medium names for each handle kind.
fn kind_names(kind: HandleKind) -> (&'static str, &'static str) {
    match kind {
        HandleKind::File => ("plainfile", "STDIO"),
        HandleKind::Directory => ("plainfile", "dir"),
        HandleKind::Stdin | HandleKind::Stdout | HandleKind::Stderr => ("std", "STDIO"),
        HandleKind::Tcp => ("tcp_socket", "tcp_socket"),
        HandleKind::Process => ("process", "pipe"),
        HandleKind::Memory => ("memory", "MEMORY"),
    }
}

fn is_seekable(kind: HandleKind) -> bool {
    matches!(
        kind,
        HandleKind::File | HandleKind::Directory | HandleKind::Memory
    )
}

/// Produces the metadata snapshot of a handle.
#[must_use]
pub fn introspect(handle: &Handle) -> HandleSnapshot {
    let Some(unread_bytes) = handle.unread_bytes() else {
        return HandleSnapshot::Closed;
    };
    let kind = handle.kind();
    let (wrapper_type, stream_type) = kind_names(kind);
    HandleSnapshot::Open(HandleMeta {
        timed_out: handle.is_timed_out(),
        blocked: handle.is_blocking(),
        eof: handle.is_eof(),
        wrapper_type,
        stream_type,
        mode: handle.mode().into(),
        unread_bytes,
        seekable: is_seekable(kind),
        uri: handle.uri().map(Rc::from),
    })
}
