use crate::types::{RequestId, SessionId, Timestamp};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Per-call state handed to tools: identity, deadline and the directory
/// relative paths resolve against.
#[derive(Clone, Debug)]
pub struct Context {
    pub request_id: RequestId,
    pub session_id: Option<SessionId>,
    pub started_at: Timestamp,
    pub deadline: Option<Timestamp>,
    pub working_dir: Option<PathBuf>,
}

impl Context {
    pub fn new() -> Self {
        Self {
            request_id: RequestId::new(),
            session_id: None,
            started_at: Timestamp::now(),
            deadline: None,
            working_dir: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = self.started_at.plus(timeout);
        self
    }

    pub fn with_session(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn is_timeout(&self) -> bool {
        self.deadline.map_or(false, |d| Timestamp::now() > d)
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.deadline.map(|d| {
            let left = d.unix_millis() - Timestamp::now().unix_millis();
            Duration::from_millis(left.max(0) as u64)
        })
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        match &self.working_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline() {
        let ctx = Context::new().with_timeout(Duration::from_secs(30));
        assert!(!ctx.is_timeout());
        assert!(ctx.remaining().unwrap() <= Duration::from_secs(30));

        let expired = Context::new().with_timeout(Duration::ZERO);
        std::thread::sleep(Duration::from_millis(5));
        assert!(expired.is_timeout());
        assert_eq!(expired.remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn test_resolve_path() {
        let ctx = Context::new().with_working_dir("/srv/data");
        assert_eq!(ctx.resolve_path("notes.txt"), PathBuf::from("/srv/data/notes.txt"));
        assert_eq!(ctx.resolve_path("/etc/hosts"), PathBuf::from("/etc/hosts"));
        assert_eq!(Context::new().resolve_path("a.txt"), PathBuf::from("a.txt"));
    }
}
