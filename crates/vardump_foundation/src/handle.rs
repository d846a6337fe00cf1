//! External resource handles.
//!
//! A [`Handle`] owns one open resource plus the metadata the dumper shows for
//! it: open mode, blocking flag, end-of-stream and timeout flags, and the
//! resource's location when it has one. The metadata is tracked as the handle
//! is used, so inspecting it never touches the resource itself.

use std::cell::RefCell;
use std::fmt;
use std::fs::{File, OpenOptions, ReadDir};
use std::io::{self, BufRead, BufReader, Cursor, Read, Write};
use std::net::TcpStream;
use std::path::{Path, PathBuf};
use std::process::Child;
use std::rc::Rc;

use crate::error::{Error, Result};

/// The kind of resource behind a handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// Buffered regular file.
    File,
    /// Directory iterator.
    Directory,
    /// Process standard input.
    Stdin,
    /// Process standard output.
    Stdout,
    /// Process standard error.
    Stderr,
    /// Connected TCP socket.
    Tcp,
    /// Child process.
    Process,
    /// In-memory byte buffer.
    Memory,
}

enum Resource {
    File(BufReader<File>),
    Directory(ReadDir),
    Stdin(io::Stdin),
    Stdout(io::Stdout),
    Stderr(io::Stderr),
    Tcp(TcpStream),
    Process(Child),
    Memory(Cursor<Vec<u8>>),
}

struct State {
    resource: Option<Resource>,
    blocking: bool,
    eof: bool,
    timed_out: bool,
}

/// An open (or closed) external resource.
pub struct Handle {
    kind: HandleKind,
    mode: Rc<str>,
    uri: Option<Rc<str>>,
    state: RefCell<State>,
}

impl Handle {
    fn wrap(kind: HandleKind, mode: &str, uri: Option<String>, resource: Resource) -> Rc<Self> {
        Rc::new(Self {
            kind,
            mode: mode.into(),
            uri: uri.map(Into::into),
            state: RefCell::new(State {
                resource: Some(resource),
                blocking: true,
                eof: false,
                timed_out: false,
            }),
        })
    }

    /// Opens a file with a C-style mode string (`r`, `rb`, `r+b`, `w`, `a`, `x`, ...).
    ///
    /// # Errors
    ///
    /// Returns `InvalidMode` for an unrecognized mode, or `Io` if the open fails.
    pub fn open(path: impl AsRef<Path>, mode: &str) -> Result<Rc<Self>> {
        let path = path.as_ref();
        let file = open_options(mode)?.open(path)?;
        Ok(Self::from_file(file, path, mode))
    }

    /// Wraps an already-open file.
    #[must_use]
    pub fn from_file(file: File, path: impl AsRef<Path>, mode: &str) -> Rc<Self> {
        let uri = path.as_ref().display().to_string();
        Self::wrap(
            HandleKind::File,
            mode,
            Some(uri),
            Resource::File(BufReader::new(file)),
        )
    }

    /// Opens a directory for iteration.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the directory cannot be read.
    pub fn open_dir(path: impl AsRef<Path>) -> Result<Rc<Self>> {
        let entries = std::fs::read_dir(path)?;
        Ok(Self::wrap(
            HandleKind::Directory,
            "r",
            None,
            Resource::Directory(entries),
        ))
    }

    /// Handle on the process's standard input.
    #[must_use]
    pub fn stdin() -> Rc<Self> {
        Self::wrap(
            HandleKind::Stdin,
            "rb",
            Some("std://stdin".into()),
            Resource::Stdin(io::stdin()),
        )
    }

    /// Handle on the process's standard output.
    #[must_use]
    pub fn stdout() -> Rc<Self> {
        Self::wrap(
            HandleKind::Stdout,
            "wb",
            Some("std://stdout".into()),
            Resource::Stdout(io::stdout()),
        )
    }

    /// Handle on the process's standard error.
    #[must_use]
    pub fn stderr() -> Rc<Self> {
        Self::wrap(
            HandleKind::Stderr,
            "wb",
            Some("std://stderr".into()),
            Resource::Stderr(io::stderr()),
        )
    }

    /// Wraps a connected TCP stream.
    #[must_use]
    pub fn tcp(stream: TcpStream) -> Rc<Self> {
        let uri = stream.peer_addr().ok().map(|addr| format!("tcp://{addr}"));
        Self::wrap(HandleKind::Tcp, "r+", uri, Resource::Tcp(stream))
    }

    /// Wraps a spawned child process.
    #[must_use]
    pub fn process(child: Child) -> Rc<Self> {
        Self::wrap(HandleKind::Process, "r", None, Resource::Process(child))
    }

    /// Creates an in-memory stream over `bytes`.
    #[must_use]
    pub fn memory(bytes: impl Into<Vec<u8>>, mode: &str) -> Rc<Self> {
        Self::wrap(
            HandleKind::Memory,
            mode,
            Some("memory://".into()),
            Resource::Memory(Cursor::new(bytes.into())),
        )
    }

    /// Returns the resource kind.
    #[must_use]
    pub fn kind(&self) -> HandleKind {
        self.kind
    }

    /// Returns the mode recorded when the handle was opened.
    #[must_use]
    pub fn mode(&self) -> &str {
        &self.mode
    }

    /// Returns the resource location, when it has one.
    #[must_use]
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Returns true once the handle has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.borrow().resource.is_none()
    }

    /// Returns the blocking-mode flag.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.state.borrow().blocking
    }

    /// Returns true once a read has hit end of stream.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.state.borrow().eof
    }

    /// Returns true once a read has timed out.
    #[must_use]
    pub fn is_timed_out(&self) -> bool {
        self.state.borrow().timed_out
    }

    /// Returns the number of bytes buffered but not yet read.
    ///
    /// Returns `None` for a closed handle.
    #[must_use]
    pub fn unread_bytes(&self) -> Option<usize> {
        match self.state.borrow().resource.as_ref()? {
            Resource::File(reader) => Some(reader.buffer().len()),
            _ => Some(0),
        }
    }

    /// Reads into `buf`, tracking end-of-stream and timeouts.
    ///
    /// # Errors
    ///
    /// Returns `ClosedHandle` after [`Handle::close`], or `Io` on failure.
    pub fn read(&self, buf: &mut [u8]) -> Result<usize> {
        let mut state = self.state.borrow_mut();
        let result = match state.resource.as_mut().ok_or_else(Error::closed_handle)? {
            Resource::File(reader) => reader.read(buf),
            Resource::Stdin(stdin) => stdin.lock().read(buf),
            Resource::Tcp(stream) => stream.read(buf),
            Resource::Memory(cursor) => cursor.read(buf),
            Resource::Process(child) => match child.stdout.as_mut() {
                Some(out) => out.read(buf),
                None => Err(unsupported("process stdout is not piped")),
            },
            Resource::Directory(_) | Resource::Stdout(_) | Resource::Stderr(_) => {
                Err(unsupported("handle is not readable"))
            }
        };
        match result {
            Ok(0) if !buf.is_empty() => {
                state.eof = true;
                Ok(0)
            }
            Ok(n) => Ok(n),
            Err(err) => {
                if matches!(
                    err.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
                ) {
                    state.timed_out = true;
                }
                Err(err.into())
            }
        }
    }

    /// Fills the read buffer of a buffered file without consuming it.
    ///
    /// Returns the number of buffered bytes.
    ///
    /// # Errors
    ///
    /// Returns `ClosedHandle` after [`Handle::close`], or `Io` on failure.
    pub fn fill_buffer(&self) -> Result<usize> {
        let mut state = self.state.borrow_mut();
        match state.resource.as_mut().ok_or_else(Error::closed_handle)? {
            Resource::File(reader) => Ok(reader.fill_buf()?.len()),
            _ => Ok(0),
        }
    }

    /// Writes `buf`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns `ClosedHandle` after [`Handle::close`], or `Io` on failure.
    pub fn write(&self, buf: &[u8]) -> Result<usize> {
        let mut state = self.state.borrow_mut();
        let written = match state.resource.as_mut().ok_or_else(Error::closed_handle)? {
            Resource::File(reader) => reader.get_mut().write(buf),
            Resource::Stdout(out) => out.write(buf),
            Resource::Stderr(err) => err.write(buf),
            Resource::Tcp(stream) => stream.write(buf),
            Resource::Memory(cursor) => cursor.write(buf),
            Resource::Process(child) => match child.stdin.as_mut() {
                Some(input) => input.write(buf),
                None => Err(unsupported("process stdin is not piped")),
            },
            Resource::Directory(_) | Resource::Stdin(_) => {
                Err(unsupported("handle is not writable"))
            }
        }?;
        Ok(written)
    }

    /// Returns the next directory entry, or `None` when exhausted.
    ///
    /// # Errors
    ///
    /// Returns `ClosedHandle` after [`Handle::close`], or `Io` on failure or
    /// when the handle is not a directory.
    pub fn next_entry(&self) -> Result<Option<PathBuf>> {
        let mut state = self.state.borrow_mut();
        let Resource::Directory(entries) =
            state.resource.as_mut().ok_or_else(Error::closed_handle)?
        else {
            return Err(unsupported("handle is not a directory").into());
        };
        match entries.next() {
            Some(entry) => Ok(Some(entry?.path())),
            None => {
                state.eof = true;
                Ok(None)
            }
        }
    }

    /// Switches between blocking and non-blocking mode.
    ///
    /// Sockets are switched at the OS level; other kinds only record the flag.
    ///
    /// # Errors
    ///
    /// Returns `ClosedHandle` after [`Handle::close`], or `Io` on failure.
    pub fn set_blocking(&self, blocking: bool) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if let Resource::Tcp(stream) = state.resource.as_ref().ok_or_else(Error::closed_handle)? {
            stream.set_nonblocking(!blocking)?;
        }
        state.blocking = blocking;
        Ok(())
    }

    /// Closes the handle, releasing the resource.
    ///
    /// Closing twice is a no-op.
    pub fn close(&self) {
        self.state.borrow_mut().resource = None;
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_closed() {
            write!(f, "Handle({:?}, closed)", self.kind)
        } else {
            write!(f, "Handle({:?}, {:?})", self.kind, self.mode)
        }
    }
}

fn unsupported(message: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::Unsupported, message)
}

/// Translates a C-style mode string into open options.
fn open_options(mode: &str) -> Result<OpenOptions> {
    let base: String = mode.chars().filter(|c| !matches!(c, 'b' | 't')).collect();
    let mut options = OpenOptions::new();
    match base.as_str() {
        "r" => options.read(true),
        "r+" => options.read(true).write(true),
        "w" => options.write(true).create(true).truncate(true),
        "w+" => options.read(true).write(true).create(true).truncate(true),
        "a" => options.append(true).create(true),
        "a+" => options.read(true).append(true).create(true),
        "x" => options.write(true).create_new(true),
        "x+" => options.read(true).write(true).create_new(true),
        _ => return Err(Error::invalid_mode(mode)),
    };
    Ok(options)
}
