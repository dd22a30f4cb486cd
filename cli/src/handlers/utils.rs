use core::fmt;
use std::io;

use ruichiji_core::source::ContentKind;

use super::Kind;

pub struct WriteAdapter<W>(pub W);

impl<W> fmt::Write for WriteAdapter<W>
where
    W: io::Write,
{
    fn write_str(&mut self, s: &str) -> Result<(), fmt::Error> {
        self.0.write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), fmt::Error> {
        self.0.write_fmt(args).map_err(|_| fmt::Error)
    }
}

impl From<Kind> for ContentKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Topics => Self::Topics,
            Kind::Music => Self::Music,
            Kind::Movies => Self::Movies,
            Kind::Discography => Self::Discography,
            Kind::Live => Self::Live,
        }
    }
}
