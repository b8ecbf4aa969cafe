//! Paging output through a pager process such as `less`

use std::io::{self, Write};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::error::{Error, Result};
use crate::util::split_command_line;

/// Writer feeding the stdin of a running pager process
pub struct Pager {
    cmdline: String,
    child: Child,
    stdin: Option<ChildStdin>,
}

impl Pager {
    /// Spawn the pager. `cmdline` may carry options like `less -R`
    pub fn start(cmdline: &str) -> Result<Self> {
        let words = split_command_line("pager", cmdline)?;
        let failed = |source: io::Error| Error::PagerFailed {
            cmdline: cmdline.to_string(),
            source,
        };
        let (program, args) = words
            .split_first()
            .ok_or_else(|| failed(io::Error::new(io::ErrorKind::InvalidInput, "empty command line")))?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(failed)?;
        let stdin = child.stdin.take();

        Ok(Self {
            cmdline: cmdline.to_string(),
            child,
            stdin,
        })
    }

    /// Close the pager's input and wait until the user quits it
    pub fn wait(mut self) -> Result<()> {
        drop(self.stdin.take());
        let status = self.child.wait().map_err(|source| Error::PagerFailed {
            cmdline: self.cmdline.clone(),
            source,
        })?;
        if !status.success() {
            return Err(Error::PagerFailed {
                cmdline: self.cmdline,
                source: io::Error::new(io::ErrorKind::Other, status.to_string()),
            });
        }
        Ok(())
    }
}

impl Write for Pager {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.stdin.as_mut() {
            Some(stdin) => stdin.write(buf),
            None => Err(io::Error::new(io::ErrorKind::BrokenPipe, "pager input is closed")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.stdin.as_mut() {
            Some(stdin) => stdin.flush(),
            None => Ok(()),
        }
    }
}
