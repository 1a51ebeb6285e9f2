use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A transient, user-visible message (a toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.filter(|d| !d.trim().is_empty()),
        }
    }

    pub fn success(title: impl Into<String>, description: Option<String>) -> Self {
        Self::new(NoticeLevel::Success, title, description)
    }

    pub fn error(title: impl Into<String>, description: Option<String>) -> Self {
        Self::new(NoticeLevel::Error, title, description)
    }

    pub fn info(title: impl Into<String>, description: Option<String>) -> Self {
        Self::new(NoticeLevel::Info, title, description)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{}: {}", self.title, description),
            None => f.write_str(&self.title),
        }
    }
}
