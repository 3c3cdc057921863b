//! Console shell abstraction.
//!
//! Commands never print directly; they write lines through a [`ConsoleShell`]
//! so the same command runs against a live stdout session, a remote client
//! session, or a capture buffer in tests.

/// Output sink and session facts for one command invocation.
pub trait ConsoleShell {
    /// Write an ordinary output line.
    fn write_line(&mut self, line: &str);

    /// Write an error line.
    fn write_error(&mut self, line: &str);

    /// Whether this shell belongs to a remote client session rather than the
    /// server's own console. Remote sessions are subject to privilege checks.
    fn is_remote(&self) -> bool;
}

/// Who is invoking a command, and what they are allowed to do.
#[derive(Debug, Clone)]
pub struct ConsoleActor {
    pub name: String,
    /// Elevated privilege covering mapping/sandbox commands.
    pub can_use_mapping: bool,
}

impl ConsoleActor {
    /// An admin actor holding the mapping privilege.
    pub fn admin(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            can_use_mapping: true,
        }
    }

    /// An ordinary player with no elevated privileges.
    pub fn player(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            can_use_mapping: false,
        }
    }
}

/// Shell that prints to the process stdout/stderr.
#[derive(Debug, Default)]
pub struct StdoutShell {
    remote: bool,
}

impl StdoutShell {
    /// Shell for the server's own console.
    pub fn local() -> Self {
        Self { remote: false }
    }

    /// Shell for a connected client session.
    pub fn remote() -> Self {
        Self { remote: true }
    }
}

impl ConsoleShell for StdoutShell {
    fn write_line(&mut self, line: &str) {
        println!("{line}");
    }

    fn write_error(&mut self, line: &str) {
        eprintln!("{line}");
    }

    fn is_remote(&self) -> bool {
        self.remote
    }
}

/// Shell that captures output for assertions.
#[derive(Debug, Default)]
pub struct BufferShell {
    remote: bool,
    pub lines: Vec<String>,
    pub errors: Vec<String>,
}

impl BufferShell {
    pub fn local() -> Self {
        Self {
            remote: false,
            ..Self::default()
        }
    }

    pub fn remote() -> Self {
        Self {
            remote: true,
            ..Self::default()
        }
    }
}

impl ConsoleShell for BufferShell {
    fn write_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn write_error(&mut self, line: &str) {
        self.errors.push(line.to_string());
    }

    fn is_remote(&self) -> bool {
        self.remote
    }
}
